use serde::{Deserialize, Serialize};

/// A word book as served by `/books`.
///
/// `word_count` is computed by the server and is not guaranteed to match
/// `words.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lexicon {
    pub id: String,
    pub language: String,
    pub book_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub create_user: String,
    #[serde(default)]
    pub words: Vec<String>,
    #[serde(default)]
    pub word_count: u64,
}

/// System-provided books share the user book shape.
pub type SystemWordbook = Lexicon;

/// One entry of the signed-in user's lexicon listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconInfo {
    pub id: i64,
    pub name: String,
    pub status: LexiconStatus,
    pub total: u64,
    pub learned: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LexiconStatus {
    Learning,
    Completed,
    NotStarted,
}

/// Envelope around [`LexiconInfo`] listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconResponse {
    pub data: Vec<LexiconInfo>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Spring-style page returned by the paginated `/books` variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub pageable: Pageable,
    pub total_pages: u32,
    pub total_elements: u64,
    pub last: bool,
    pub first: bool,
    pub empty: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pageable {
    pub page_number: u32,
    pub page_size: u32,
    pub offset: u64,
    pub paged: bool,
}

/// The lexicon the user is currently studying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentLexicon {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SelectLexiconRequest<'a> {
    pub book_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_word_count_is_independent_of_words() {
        let lexicon: Lexicon = serde_json::from_value(json!({
            "id": "b1",
            "language": "English",
            "bookName": "CET-4",
            "description": "core words",
            "createUser": "system",
            "words": ["w1", "w2"],
            "wordCount": 4500
        }))
        .unwrap();

        assert_eq!(lexicon.words.len(), 2);
        assert_eq!(lexicon.word_count, 4500);
    }

    #[test]
    fn test_lexicon_status_wire_names() {
        let info: LexiconInfo = serde_json::from_value(json!({
            "id": 3,
            "name": "Basics",
            "status": "not-started",
            "total": 120,
            "learned": 0
        }))
        .unwrap();
        assert_eq!(info.status, LexiconStatus::NotStarted);
    }

    #[test]
    fn test_page_ignores_unknown_pageable_fields() {
        let page: Page<Lexicon> = serde_json::from_value(json!({
            "content": [],
            "pageable": {"pageNumber": 2, "pageSize": 20, "sort": {"sorted": false}},
            "totalPages": 3,
            "totalElements": 41,
            "last": true,
            "first": false,
            "empty": true
        }))
        .unwrap();
        assert_eq!(page.pageable.page_number, 2);
        assert_eq!(page.pageable.page_size, 20);
        assert_eq!(page.total_elements, 41);
    }

    #[test]
    fn test_select_request_body() {
        let body = serde_json::to_value(SelectLexiconRequest { book_id: "b7" }).unwrap();
        assert_eq!(body, json!({"bookId": "b7"}));
    }
}
