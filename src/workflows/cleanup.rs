// src/workflows/cleanup.rs
//! The cleanup workflow: delete daily entries that are still untouched
//! templates (created by automation and never edited), excluding today's.

use crate::api::NotionApi;
use crate::error::AppError;
use crate::model::PageObject;

use chrono::{Local, NaiveDate};

#[derive(Debug, Clone)]
pub struct CleanupOptions {
    /// Database of daily journal entries.
    pub daily_database: String,
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self {
            daily_database: "Daily SCRUM".to_string(),
        }
    }
}

/// Deletes every stale template entry; returns how many were deleted.
pub async fn run<A: NotionApi + ?Sized>(
    api: &A,
    options: &CleanupOptions,
) -> Result<usize, AppError> {
    let entries = api
        .database_entries_by_name(&options.daily_database, &[])
        .await?;
    let today = Local::now().date_naive();

    let mut deleted = 0;
    for entry in &entries {
        if is_stale_template(entry, today) {
            log::info!(
                "deleting untouched entry {} (created {})",
                entry.id,
                entry.created_time
            );
            api.delete_block(&entry.id).await?;
            deleted += 1;
        }
    }

    log::info!("deleted {} of {} entries", deleted, entries.len());
    Ok(deleted)
}

/// An entry is a stale template iff it was never edited after creation and
/// its creation date (in the local calendar, not the raw timestamp) is not
/// `today`. Today's entry survives even when untouched: it may still be
/// filled in.
pub fn is_stale_template(entry: &PageObject, today: NaiveDate) -> bool {
    entry.last_edited_time == entry.created_time
        && entry.created_time.with_timezone(&Local).date_naive() != today
}
