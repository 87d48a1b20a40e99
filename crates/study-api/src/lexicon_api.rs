use reqwest::Method;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::models::{Lexicon, LexiconInfo, LexiconResponse, Page, SelectLexiconRequest};

pub(crate) async fn get_user_lexicons(client: &ApiClient) -> Result<Vec<LexiconInfo>> {
    let url = client.endpoint(&["api", "lexicon"]);
    let path = url.path().to_string();
    let value: Value = client.get_json(url).await?;
    if !value.get("data").is_some_and(Value::is_array) {
        return Err(ApiError::InvalidResponse(format!(
            "{path}: expected a data array"
        )));
    }
    let response: LexiconResponse = serde_json::from_value(value)
        .map_err(|error| ApiError::InvalidResponse(format!("{path}: {error}")))?;
    Ok(response.data)
}

pub(crate) async fn get_all_lexicons(client: &ApiClient) -> Result<Vec<Lexicon>> {
    client.get_list(client.endpoint(&["books"])).await
}

pub(crate) async fn get_lexicon_page(
    client: &ApiClient,
    page: u32,
    size: u32,
) -> Result<Page<Lexicon>> {
    let mut url = client.endpoint(&["books"]);
    url.query_pairs_mut()
        .append_pair("page", &page.to_string())
        .append_pair("size", &size.to_string());
    client.get_json(url).await
}

pub(crate) async fn select_lexicon(client: &ApiClient, book_id: &str) -> Result<()> {
    let body = serde_json::to_value(SelectLexiconRequest { book_id })
        .map_err(|error| ApiError::InvalidResponse(error.to_string()))?;
    client
        .send_mutation(
            Method::POST,
            client.endpoint(&["api", "lexicon", "select"]),
            Some(body),
        )
        .await
}
