//! Learning-progress counters.
//!
//! [`fetch_count`] reports every failure. [`fetch_count_or_default`] is the
//! variant screens use for badges: any failure reads as zero, so "nothing due"
//! and "could not ask" look the same to its caller.

use reqwest::Url;
use serde_json::Value;
use tracing::warn;

use crate::client::ApiClient;
use crate::error::{ApiError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountQuery {
    /// Words not yet learned, by lexicon name.
    ToLearn { lexicon_name: String },
    /// Words due for review, by lexicon name.
    Review { lexicon_name: String },
    /// New words in a book for the cached user.
    NewWords { lexicon_id: String },
    /// Words due today in a book for the cached user.
    TodayReview { lexicon_id: String },
}

impl CountQuery {
    pub fn label(&self) -> &'static str {
        match self {
            CountQuery::ToLearn { .. } => "to-learn",
            CountQuery::Review { .. } => "review",
            CountQuery::NewWords { .. } => "new-words",
            CountQuery::TodayReview { .. } => "today-review",
        }
    }
}

pub(crate) async fn fetch_count(client: &ApiClient, query: &CountQuery) -> Result<u64> {
    let url = count_url(client, query).await?;
    let path = url.path().to_string();
    let value: Value = client.get_json(url).await?;
    parse_count(&path, &value)
}

pub(crate) async fn fetch_count_or_default(client: &ApiClient, query: &CountQuery) -> u64 {
    match fetch_count(client, query).await {
        Ok(count) => count,
        Err(error) => {
            warn!(query = query.label(), "count unavailable, reporting zero: {error}");
            0
        }
    }
}

async fn count_url(client: &ApiClient, query: &CountQuery) -> Result<Url> {
    Ok(match query {
        CountQuery::ToLearn { lexicon_name } => {
            client.endpoint(&["api", "studyplan", "learncount", lexicon_name.as_str()])
        }
        CountQuery::Review { lexicon_name } => {
            client.endpoint(&["api", "studyplan", "reviewcount", lexicon_name.as_str()])
        }
        CountQuery::NewWords { lexicon_id } => {
            learning_url(client, lexicon_id, "new-words-count").await?
        }
        CountQuery::TodayReview { lexicon_id } => {
            learning_url(client, lexicon_id, "today-review-count").await?
        }
    })
}

/// The learning endpoints are keyed by user as well as by token.
async fn learning_url(client: &ApiClient, lexicon_id: &str, counter: &str) -> Result<Url> {
    client.bearer_token().await?;
    let user_id = client.session().user_id().await?.ok_or_else(|| {
        ApiError::AuthenticationRequired("no cached user id".to_string())
    })?;
    let mut url = client.endpoint(&["api", "v1", "learning", "book", lexicon_id, counter]);
    url.query_pairs_mut().append_pair("userId", &user_id);
    Ok(url)
}

/// Accepts a bare integer or an object carrying an integer `count`.
fn parse_count(path: &str, value: &Value) -> Result<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::Object(map) => map.get("count").and_then(Value::as_u64),
        _ => None,
    }
    .ok_or_else(|| ApiError::InvalidResponse(format!("{path}: expected a count")))
}
