//! Remote exam feed -- a JSON array of `{ "name": ..., "date": "DD-MM-YYYY" }`.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

pub const DEFAULT_FEED_URL: &str =
    "https://cdn.jsdelivr.net/gh/NovatraX/exam-countdown-extension@main/assets/exam-info.json";

const USER_AGENT: &str = "examtab";

/// One entry of the remote feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteExam {
    pub name: String,
    #[serde(default)]
    pub date: Option<String>,
}

/// Source of remote exam entries.
///
/// Injected into [`ExamCatalog::load`](super::ExamCatalog::load) so tests and
/// offline runs can substitute their own.
pub trait ExamFeed {
    fn fetch(&self) -> impl Future<Output = Result<Vec<RemoteExam>, FetchError>> + Send;
}

/// HTTP implementation over reqwest.
pub struct HttpExamFeed {
    url: String,
    http_client: Client,
}

impl HttpExamFeed {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            url: url.into(),
            http_client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ExamFeed for HttpExamFeed {
    async fn fetch(&self) -> Result<Vec<RemoteExam>, FetchError> {
        let resp = self.http_client.get(&self.url).send().await?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                status: resp.status().as_u16(),
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

/// A feed that always fails; used when fetching is disabled or offline.
pub struct OfflineFeed;

impl ExamFeed for OfflineFeed {
    async fn fetch(&self) -> Result<Vec<RemoteExam>, FetchError> {
        Err(FetchError::Request("remote feed disabled".into()))
    }
}

/// A feed that serves a fixed response.
#[derive(Debug, Clone)]
pub struct StaticFeed(pub Result<Vec<RemoteExam>, String>);

impl ExamFeed for StaticFeed {
    async fn fetch(&self) -> Result<Vec<RemoteExam>, FetchError> {
        self.0.clone().map_err(FetchError::Request)
    }
}
