use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSentence {
    pub sentence: String,
    pub translation: String,
}

impl ExampleSentence {
    /// The endpoint answers in plain text: the sentence on the first line,
    /// its translation on the second.
    pub fn from_plain_text(text: &str) -> Self {
        let mut lines = text.split('\n');
        let sentence = lines.next().unwrap_or_default().trim().to_string();
        let translation = lines.next().unwrap_or_default().trim().to_string();
        Self {
            sentence,
            translation,
        }
    }
}

pub(crate) async fn generate_example_sentence(
    client: &ApiClient,
    language: &str,
    word: &str,
) -> Result<ExampleSentence> {
    let mut url = client.endpoint(&["api", "v1", "ai", "generate-sentence"]);
    url.query_pairs_mut()
        .append_pair("language", language)
        .append_pair("word", word);
    let text = client.get_text(url).await?;
    Ok(ExampleSentence::from_plain_text(&text))
}
