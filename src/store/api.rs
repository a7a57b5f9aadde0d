// src/store/api.rs
//! A content store that reads pages from a remote wiki's Action API.
//!
//! Requests go to `api.php` with `action=query&prop=revisions` and
//! `formatversion=2`. Response parsing is a pure function over the body so
//! it can be tested without a server.

use super::ContentStore;
use crate::constants::{
    ERROR_BODY_PREVIEW_LENGTH, WIKI_API_INITIAL_BACKOFF_MS, WIKI_API_MAX_ATTEMPTS,
    WIKI_API_MAX_BACKOFF_MS, WIKI_API_TIMEOUT_SECS,
};
use crate::content::{Content, ContentModel, RevisionRecord, SlotRole};
use crate::error::{AppError, WikiErrorCode};
use crate::error_recovery::{retry_with_backoff, RetryPolicy};
use crate::types::PageTitle;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("preloader/", env!("CARGO_PKG_VERSION"));

/// Reads pages from a wiki over HTTP.
#[derive(Clone)]
pub struct WikiApiStore {
    client: Client,
    endpoint: Url,
    retry: RetryPolicy,
}

impl WikiApiStore {
    /// Creates a store for the wiki whose `api.php` lives at `endpoint`.
    pub fn new(endpoint: Url) -> Result<Self, AppError> {
        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            return Err(AppError::InvalidConfiguration {
                origin: endpoint.to_string(),
                reason: "only HTTP and HTTPS endpoints are supported".to_string(),
            });
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(WIKI_API_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            retry: RetryPolicy {
                max_attempts: WIKI_API_MAX_ATTEMPTS,
                initial_delay: Duration::from_millis(WIKI_API_INITIAL_BACKOFF_MS),
                max_delay: Duration::from_millis(WIKI_API_MAX_BACKOFF_MS),
            },
        })
    }

    /// Builds the query URL for one title.
    fn query_url(&self, title: &PageTitle, with_content: bool) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("action", "query")
                .append_pair("format", "json")
                .append_pair("formatversion", "2")
                .append_pair("titles", title.as_str());
            if with_content {
                query
                    .append_pair("prop", "revisions")
                    .append_pair("rvprop", "ids|content")
                    .append_pair("rvslots", "*");
            } else {
                query.append_pair("prop", "info");
            }
        }
        url
    }

    async fn fetch(
        &self,
        title: &PageTitle,
        with_content: bool,
    ) -> Result<Option<ApiPage>, AppError> {
        let url = self.query_url(title, with_content);
        let client = &self.client;
        retry_with_backoff(
            || {
                let url = url.clone();
                async move {
                    log::debug!("GET {}", url);
                    let response = client.get(url).send().await?;
                    let status = response.status();
                    let body = response.text().await?;
                    parse_query_response(status, &body)
                }
            },
            self.retry,
        )
        .await
    }
}

#[async_trait]
impl ContentStore for WikiApiStore {
    async fn page_exists(&self, title: &PageTitle) -> Result<bool, AppError> {
        Ok(self.fetch(title, false).await?.is_some())
    }

    async fn latest_revision(
        &self,
        title: &PageTitle,
    ) -> Result<Option<RevisionRecord>, AppError> {
        match self.fetch(title, true).await? {
            Some(page) => page.into_revision().map(Some),
            None => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// Response shapes (formatversion=2)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct QueryResponse {
    error: Option<ApiErrorBody>,
    query: Option<QueryBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<ApiPage>,
}

#[derive(Debug, Deserialize)]
struct ApiPage {
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    revisions: Vec<ApiRevision>,
}

#[derive(Debug, Deserialize)]
struct ApiRevision {
    revid: u64,
    #[serde(default)]
    slots: HashMap<String, ApiSlot>,
}

#[derive(Debug, Deserialize)]
struct ApiSlot {
    contentmodel: ContentModel,
    content: Option<String>,
}

impl ApiPage {
    fn into_revision(self) -> Result<RevisionRecord, AppError> {
        let revision = self.revisions.into_iter().next().ok_or_else(|| {
            AppError::MalformedResponse(format!(
                "page '{}' exists but no revision was returned",
                self.title
            ))
        })?;

        let slots: BTreeMap<SlotRole, Content> = revision
            .slots
            .into_iter()
            .map(|(role, slot)| {
                let content = match slot.content {
                    Some(text) => Content::new(slot.contentmodel, text),
                    None => Content::NonText {
                        model: slot.contentmodel,
                    },
                };
                (SlotRole::from(role.as_str()), content)
            })
            .collect();

        Ok(RevisionRecord {
            id: revision.revid,
            slots,
        })
    }
}

/// Interprets a query response for a single title.
///
/// Missing and invalid titles come back as `None`; API error objects and
/// non-success statuses become [`AppError::WikiService`].
fn parse_query_response(status: StatusCode, body: &str) -> Result<Option<ApiPage>, AppError> {
    let parsed: QueryResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) if !status.is_success() => {
            return Err(AppError::WikiService {
                code: WikiErrorCode::from_http_status(status.as_u16()),
                message: preview(body),
            });
        }
        Err(e) => {
            return Err(AppError::MalformedResponse(format!(
                "{} in body: {}",
                e,
                preview(body)
            )))
        }
    };

    if let Some(error) = parsed.error {
        return Err(AppError::WikiService {
            code: WikiErrorCode::from_api_response(&error.code),
            message: error.info,
        });
    }
    if !status.is_success() {
        return Err(AppError::WikiService {
            code: WikiErrorCode::from_http_status(status.as_u16()),
            message: preview(body),
        });
    }

    let page = parsed
        .query
        .and_then(|q| q.pages.into_iter().next())
        .ok_or_else(|| AppError::MalformedResponse("query returned no pages".to_string()))?;

    if page.missing || page.invalid {
        log::debug!("Wiki reports '{}' as missing or invalid", page.title);
        return Ok(None);
    }
    Ok(Some(page))
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}
