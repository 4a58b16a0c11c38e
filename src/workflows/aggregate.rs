// src/workflows/aggregate.rs
//! The aggregation workflow: sweep every daily entry for project mentions
//! and synthesize one digest page with a toggled section per project.

use crate::api::{create_subpage, fetch_block_tree, NotionApi};
use crate::error::AppError;
use crate::model::{Block, BlockPayload, PageObject, RichText, SortSpec, TextPayload};
use crate::types::NotionId;

use chrono::SecondsFormat;
use indexmap::IndexMap;
use std::collections::{HashSet, VecDeque};

/// Names driving the aggregation run. Defaults match the workspace layout
/// this tool grew up in; all are overridable on the command line.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Database of daily journal entries.
    pub daily_database: String,
    /// Database whose rows are the tracked project pages.
    pub projects_database: String,
    /// Page the digest is created under.
    pub destination_page: String,
    /// Title of the created digest page.
    pub output_title: String,
    /// Property the daily database is sorted by (creation time).
    pub created_property: String,
    /// Time zone attached to synthesized date mentions.
    pub time_zone: String,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            daily_database: "Daily SCRUM".to_string(),
            projects_database: "Projects".to_string(),
            destination_page: "Home".to_string(),
            output_title: "Project Thought Aggregate".to_string(),
            created_property: "Created".to_string(),
            time_zone: "America/Los_Angeles".to_string(),
        }
    }
}

/// Runs the aggregation and returns the created page's ID.
pub async fn run<A: NotionApi + ?Sized>(
    api: &A,
    options: &AggregateOptions,
) -> Result<NotionId, AppError> {
    // Date-descending, so each project's gathered sections read newest-first
    // in the digest as well.
    let daily_entries = api
        .database_entries_by_name(
            &options.daily_database,
            &[SortSpec::descending(options.created_property.as_str())],
        )
        .await?;
    log::info!(
        "{} entries in '{}'",
        daily_entries.len(),
        options.daily_database
    );

    let projects = api
        .database_entries_by_name(&options.projects_database, &[])
        .await?;
    let mut registry: IndexMap<NotionId, Vec<Block>> = projects
        .iter()
        .map(|project| (project.id.clone(), Vec::new()))
        .collect();
    log::info!(
        "tracking {} projects from '{}'",
        registry.len(),
        options.projects_database
    );

    for (index, entry) in daily_entries.iter().enumerate() {
        log::info!(
            "scanning entry {}/{} (created {})",
            index + 1,
            daily_entries.len(),
            entry.created_time
        );
        let tree = fetch_block_tree(api, &entry.id, true, true).await?;
        collect_mentions(entry, tree, &mut registry, &options.time_zone);
    }

    let content = digest_content(registry);
    let destination = api.page_by_name(&options.destination_page).await?;
    let page_id = create_subpage(api, &destination.id, &options.output_title, content).await?;
    log::info!("created digest page {}", page_id);
    Ok(page_id)
}

/// Breadth-first mention scan over one entry's stripped block tree.
///
/// Parents are visited before their children on purpose: a match captures the
/// whole block with its children still nested inside, so descending first
/// would re-add under the same project what the parent capture already holds.
/// Children are enqueued regardless of match, because they may mention other
/// projects on their own.
fn collect_mentions(
    entry: &PageObject,
    tree: Vec<Block>,
    registry: &mut IndexMap<NotionId, Vec<Block>>,
    time_zone: &str,
) {
    let mut dated: HashSet<NotionId> = HashSet::new();
    let mut queue: VecDeque<Block> = tree.into();

    while let Some(mut block) = queue.pop_front() {
        // One capture per (block, project), however many spans match.
        let mut mentioned: Vec<NotionId> = Vec::new();
        for span in block.payload.rich_text() {
            if let Some(page_id) = span.mentioned_page() {
                if registry.contains_key(page_id) && !mentioned.contains(page_id) {
                    mentioned.push(page_id.clone());
                }
            }
        }

        for project in mentioned {
            let Some(contents) = registry.get_mut(&project) else {
                continue;
            };
            if dated.insert(project.clone()) {
                contents.push(date_header(entry, time_zone));
            }
            contents.push(block.clone());
        }

        queue.extend(block.payload.take_children());
    }
}

/// A paragraph holding a date mention of the entry's creation time: the
/// header inserted once per (project, entry) pair.
fn date_header(entry: &PageObject, time_zone: &str) -> Block {
    let start = entry
        .created_time
        .to_rfc3339_opts(SecondsFormat::Millis, true);
    Block::new(BlockPayload::Paragraph {
        paragraph: TextPayload::from_rich_text(vec![RichText::date_mention(
            start,
            Some(time_zone.to_string()),
        )]),
    })
}

/// Consumes the registry into the digest page's content: one toggleable
/// heading per project with gathered content, the heading's rich text being a
/// page mention of the project. Projects nothing mentioned are omitted.
fn digest_content(registry: IndexMap<NotionId, Vec<Block>>) -> Vec<Block> {
    registry
        .into_iter()
        .filter(|(_, contents)| !contents.is_empty())
        .map(|(project_id, contents)| {
            let mut heading = TextPayload::from_rich_text(vec![RichText::page_mention(project_id)]);
            heading.is_toggleable = Some(true);
            heading.children = Some(contents);
            Block::new(BlockPayload::Heading1 { heading_1: heading })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn paragraph() -> Block {
        Block::new(BlockPayload::Paragraph {
            paragraph: TextPayload::default(),
        })
    }

    #[test]
    fn digest_omits_projects_without_content() {
        let mut registry: IndexMap<NotionId, Vec<Block>> = IndexMap::new();
        let mentioned = NotionId::new_v4();
        let silent = NotionId::new_v4();
        registry.insert(mentioned.clone(), vec![paragraph()]);
        registry.insert(silent, Vec::new());

        let content = digest_content(registry);
        assert_eq!(content.len(), 1);

        let value = serde_json::to_value(&content[0]).unwrap();
        assert_eq!(value["type"], "heading_1");
        assert_eq!(value["heading_1"]["is_toggleable"], true);
        assert_eq!(
            value["heading_1"]["rich_text"][0]["mention"]["page"]["id"],
            mentioned.as_str()
        );
        assert_eq!(
            value["heading_1"]["children"].as_array().map(Vec::len),
            Some(1)
        );
    }

    #[test]
    fn digest_preserves_registry_order() {
        let mut registry: IndexMap<NotionId, Vec<Block>> = IndexMap::new();
        let first = NotionId::new_v4();
        let second = NotionId::new_v4();
        registry.insert(first.clone(), vec![paragraph()]);
        registry.insert(second.clone(), vec![paragraph()]);

        let content = digest_content(registry);
        let ids: Vec<String> = content
            .iter()
            .map(|block| {
                serde_json::to_value(block).unwrap()["heading_1"]["rich_text"][0]["mention"]
                    ["page"]["id"]
                    .as_str()
                    .unwrap()
                    .to_string()
            })
            .collect();
        assert_eq!(ids, vec![first.as_str(), second.as_str()]);
    }
}
