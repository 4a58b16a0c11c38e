// src/api/client.rs
//! Pure HTTP client for the Notion API.
//!
//! A thin wrapper around reqwest: authentication headers, the six endpoint
//! operations, and the one-time decoding of error bodies into the typed
//! vocabulary. No business logic.

use crate::constants::{API_BASE_URL, NOTION_VERSION};
use crate::error::{AppError, NotionErrorCode};
use crate::model::{Block, PageObject, SortSpec};
use crate::types::{ApiKey, CancelFlag, NotionId};

use super::pagination::{fetch_all_pages, PaginatedResponse};

use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Authenticated HTTP session against one workspace.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    cancel: CancelFlag,
}

impl NotionHttpClient {
    /// Creates a client with Notion authentication, a per-request timeout,
    /// and a cancellation flag checked before every request.
    pub fn new(
        api_key: &ApiKey,
        timeout: Duration,
        cancel: CancelFlag,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .timeout(timeout)
            .build()?;
        Ok(Self { client, cancel })
    }

    /// The default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {e}"))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Fails fast once the cancellation flag is set, so a multi-call
    /// operation aborts at the next request boundary.
    fn ensure_live(&self) -> Result<(), AppError> {
        if self.cancel.is_cancelled() {
            Err(AppError::Cancelled)
        } else {
            Ok(())
        }
    }

    async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Response, AppError> {
        self.ensure_live()?;
        let url = format!("{API_BASE_URL}/{endpoint}");
        log::debug!("GET {url}");
        Ok(self.client.get(url).query(query).send().await?)
    }

    async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        self.ensure_live()?;
        let url = format!("{API_BASE_URL}/{endpoint}");
        log::debug!("POST {url}");
        Ok(self.client.post(url).json(body).send().await?)
    }

    async fn patch<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        self.ensure_live()?;
        let url = format!("{API_BASE_URL}/{endpoint}");
        log::debug!("PATCH {url}");
        Ok(self.client.patch(url).json(body).send().await?)
    }

    async fn delete(&self, endpoint: &str) -> Result<Response, AppError> {
        self.ensure_live()?;
        let url = format!("{API_BASE_URL}/{endpoint}");
        log::debug!("DELETE {url}");
        Ok(self.client.delete(url).send().await?)
    }
}

/// Structured error body the API attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
struct NotionApiErrorResponse {
    code: String,
    message: String,
}

/// Decodes a response: the expected body on 2xx, a typed service error
/// otherwise. This is the single place error bodies are interpreted.
async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    let text = response.text().await?;

    if status.is_success() {
        return serde_json::from_str(&text)
            .map_err(|e| AppError::MalformedResponse(format!("{e} in body: {text}")));
    }

    match serde_json::from_str::<NotionApiErrorResponse>(&text) {
        Ok(body) => Err(AppError::NotionService {
            code: NotionErrorCode::from_api_response(&body.code, &body.message),
            message: body.message,
            status,
        }),
        Err(_) => Err(AppError::NotionService {
            code: NotionErrorCode::from_http_status(status.as_u16()),
            message: text,
            status,
        }),
    }
}

/// The slice of a created page's JSON this client cares about.
#[derive(Debug, Clone, Deserialize)]
struct CreatedPage {
    id: NotionId,
}

#[async_trait::async_trait]
impl super::NotionApi for NotionHttpClient {
    async fn search(
        &self,
        query: Option<&str>,
        databases_only: bool,
    ) -> Result<Vec<PageObject>, AppError> {
        fetch_all_pages(|page_size, cursor| {
            let mut body = serde_json::json!({ "page_size": page_size });
            if let Some(q) = query {
                body["query"] = serde_json::json!(q);
            }
            if databases_only {
                body["filter"] = serde_json::json!({ "property": "object", "value": "database" });
            }
            if let Some(cursor) = cursor {
                body["start_cursor"] = serde_json::json!(cursor);
            }
            async move {
                let response = self.post("search", &body).await?;
                decode_response::<PaginatedResponse<PageObject>>(response).await
            }
        })
        .await
    }

    async fn query_database(
        &self,
        database: &NotionId,
        sorts: &[SortSpec],
    ) -> Result<Vec<PageObject>, AppError> {
        let endpoint = format!("databases/{}/query", database.to_hyphenated());
        fetch_all_pages(|page_size, cursor| {
            let mut body = serde_json::json!({ "page_size": page_size });
            if !sorts.is_empty() {
                body["sorts"] = serde_json::json!(sorts);
            }
            if let Some(cursor) = cursor {
                body["start_cursor"] = serde_json::json!(cursor);
            }
            let endpoint = endpoint.clone();
            async move {
                let response = self.post(&endpoint, &body).await?;
                decode_response::<PaginatedResponse<PageObject>>(response).await
            }
        })
        .await
    }

    async fn get_block_children(&self, block: &NotionId) -> Result<Vec<Block>, AppError> {
        let endpoint = format!("blocks/{}/children", block.to_hyphenated());
        fetch_all_pages(|page_size, cursor| {
            let mut params = vec![("page_size", page_size.to_string())];
            if let Some(cursor) = cursor {
                params.push(("start_cursor", cursor));
            }
            let endpoint = endpoint.clone();
            async move {
                let response = self.get(&endpoint, &params).await?;
                decode_response::<PaginatedResponse<Block>>(response).await
            }
        })
        .await
    }

    async fn append_children(
        &self,
        parent: &NotionId,
        children: Vec<Block>,
    ) -> Result<Vec<Block>, AppError> {
        let endpoint = format!("blocks/{}/children", parent.to_hyphenated());
        let body = serde_json::json!({ "children": children });
        let response = self.patch(&endpoint, &body).await?;
        let created = decode_response::<PaginatedResponse<Block>>(response).await?;
        Ok(created.results)
    }

    async fn create_page(
        &self,
        parent: &NotionId,
        title: &str,
        content: Option<Vec<Block>>,
    ) -> Result<NotionId, AppError> {
        let mut body = serde_json::json!({
            "parent": { "type": "page_id", "page_id": parent.to_hyphenated() },
            "properties": {
                "title": { "title": [{ "text": { "content": title } }] }
            },
        });
        if let Some(children) = content {
            body["children"] = serde_json::to_value(children)?;
        }

        let response = self.post("pages", &body).await?;
        let created = decode_response::<CreatedPage>(response).await?;
        Ok(created.id)
    }

    async fn delete_block(&self, block: &NotionId) -> Result<(), AppError> {
        let endpoint = format!("blocks/{}", block.to_hyphenated());
        let response = self.delete(&endpoint).await?;
        decode_response::<serde_json::Value>(response).await?;
        Ok(())
    }
}
