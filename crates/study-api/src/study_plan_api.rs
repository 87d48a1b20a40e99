use reqwest::Method;

use crate::client::ApiClient;
use crate::error::Result;
use crate::models::Word;

pub(crate) async fn get_learn_words(client: &ApiClient, lexicon_id: &str) -> Result<Vec<Word>> {
    client
        .get_list(client.endpoint(&["api", "studyplan", "learnwords", lexicon_id]))
        .await
}

pub(crate) async fn get_review_words(client: &ApiClient, lexicon_id: &str) -> Result<Vec<Word>> {
    client
        .get_list(client.endpoint(&["api", "studyplan", "reviewwords", lexicon_id]))
        .await
}

pub(crate) async fn reset_review_count(
    client: &ApiClient,
    lexicon_name: &str,
    word_id: &str,
) -> Result<()> {
    let url = client.endpoint(&["api", "studyplan", "resetcount", lexicon_name, word_id]);
    client.send_mutation(Method::PUT, url, None).await
}

/// Not idempotent: every call decrements once more.
pub(crate) async fn decrement_review_count(
    client: &ApiClient,
    lexicon_name: &str,
    word_id: &str,
) -> Result<()> {
    let url = client.endpoint(&["api", "studyplan", "decrementcount", lexicon_name, word_id]);
    client.send_mutation(Method::PUT, url, None).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::test_support::{logged_in_client, FakeTransport};

    const WORDS: &str = r#"[
        {"id":"w1","word":"apple","language":"English","category":null,
         "partOfSpeechList":[{"type":"noun","definitions":"a fruit"}],
         "phonetics":[{"ipa":"ˈæp.əl","audio":""}]},
        {"id":"w2","word":"pear","language":"English","category":["fruit"],
         "partOfSpeechList":[],"phonetics":[]}
    ]"#;

    #[tokio::test]
    async fn test_learn_words_decodes_list() {
        let transport = FakeTransport::new();
        transport.respond(200, WORDS);
        let client = logged_in_client(&transport, "T").await;

        let words = get_learn_words(&client, "42").await.unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[1].category, Some(vec!["fruit".to_string()]));

        let request = &transport.requests()[0];
        assert_eq!(request.url.path(), "/api/studyplan/learnwords/42");
        assert_eq!(request.header("Authorization"), Some("Bearer T"));
    }

    #[tokio::test]
    async fn test_review_words_rejects_object_body() {
        let transport = FakeTransport::new();
        transport.respond(200, r#"{"words": []}"#);
        let client = logged_in_client(&transport, "T").await;

        assert!(matches!(
            get_review_words(&client, "CET 4").await,
            Err(ApiError::InvalidResponse(_))
        ));
        assert_eq!(
            transport.requests()[0].url.path(),
            "/api/studyplan/reviewwords/CET%204"
        );
    }

    #[tokio::test]
    async fn test_review_words_failure_status() {
        let transport = FakeTransport::new();
        transport.respond(500, "oops");
        let client = logged_in_client(&transport, "T").await;

        assert!(matches!(
            get_review_words(&client, "1").await,
            Err(ApiError::Status { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_decrement_is_sent_every_time() {
        let transport = FakeTransport::new();
        transport.respond(200, "");
        transport.respond(200, "");
        transport.respond(200, "");
        let client = logged_in_client(&transport, "T").await;

        decrement_review_count(&client, "Basics", "w1").await.unwrap();
        decrement_review_count(&client, "Basics", "w1").await.unwrap();
        reset_review_count(&client, "Basics", "w1").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|request| request.method == Method::PUT));
        assert_eq!(
            requests[0].url.path(),
            "/api/studyplan/decrementcount/Basics/w1"
        );
        assert_eq!(requests[2].url.path(), "/api/studyplan/resetcount/Basics/w1");
    }
}
