//! Typed client for the vocabulary study backend.
//!
//! Every call reads the bearer token from the injected [`Session`], sends one
//! request through a [`Transport`] and maps the answer onto a typed value or
//! an [`ApiError`]. Nothing is retried.

use std::sync::Arc;

mod client;
pub mod error;
mod lexicon_api;
pub mod models;
mod progress_api;
mod sentence_api;
pub mod session;
pub mod store;
mod study_plan_api;
pub mod transport;
mod user_api;

#[cfg(test)]
mod test_support;

pub use client::ApiClient;
pub use error::{ApiError, Result, SessionError, StoreError, TransportError};
pub use models::{
    Comment, CommentNode, CommentThread, CurrentLexicon, LearnSettings, Lexicon, LexiconInfo,
    LexiconStatus, Page, PartOfSpeech, Phonetic, Post, SystemWordbook, UserInfo, Word,
};
pub use progress_api::CountQuery;
pub use sentence_api::ExampleSentence;
pub use session::Session;
pub use store::{KeyValueStore, MemoryStore};
pub use transport::{ReqwestTransport, Transport};

pub struct StudyApi {
    client: ApiClient,
}

impl StudyApi {
    pub fn new(base_url: &str, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        Self::with_transport(base_url, Arc::new(ReqwestTransport::new()), store)
    }

    pub fn with_transport(
        base_url: &str,
        transport: Arc<dyn Transport>,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self> {
        Ok(Self {
            client: ApiClient::new(base_url, transport, Session::new(store))?,
        })
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }

    /// Lexicons the signed-in user has added. A 401/403 surfaces as
    /// [`ApiError::AuthenticationRequired`]; navigating to login is up to the
    /// caller.
    pub async fn user_lexicons(&self) -> Result<Vec<LexiconInfo>> {
        lexicon_api::get_user_lexicons(&self.client).await
    }

    pub async fn all_lexicons(&self) -> Result<Vec<SystemWordbook>> {
        lexicon_api::get_all_lexicons(&self.client).await
    }

    pub async fn lexicon_page(&self, page: u32, size: u32) -> Result<Page<SystemWordbook>> {
        lexicon_api::get_lexicon_page(&self.client, page, size).await
    }

    pub async fn select_lexicon(&self, book_id: &str) -> Result<()> {
        lexicon_api::select_lexicon(&self.client, book_id).await
    }

    pub async fn learn_words(&self, lexicon_id: &str) -> Result<Vec<Word>> {
        study_plan_api::get_learn_words(&self.client, lexicon_id).await
    }

    pub async fn review_words(&self, lexicon_id: &str) -> Result<Vec<Word>> {
        study_plan_api::get_review_words(&self.client, lexicon_id).await
    }

    pub async fn reset_review_count(&self, lexicon_name: &str, word_id: &str) -> Result<()> {
        study_plan_api::reset_review_count(&self.client, lexicon_name, word_id).await
    }

    pub async fn decrement_review_count(&self, lexicon_name: &str, word_id: &str) -> Result<()> {
        study_plan_api::decrement_review_count(&self.client, lexicon_name, word_id).await
    }

    pub async fn fetch_count(&self, query: &CountQuery) -> Result<u64> {
        progress_api::fetch_count(&self.client, query).await
    }

    /// Like [`StudyApi::fetch_count`] but any failure reads as `0`.
    pub async fn fetch_count_or_default(&self, query: &CountQuery) -> u64 {
        progress_api::fetch_count_or_default(&self.client, query).await
    }

    pub async fn generate_example_sentence(
        &self,
        language: &str,
        word: &str,
    ) -> Result<ExampleSentence> {
        sentence_api::generate_example_sentence(&self.client, language, word).await
    }

    pub async fn user_info(&self) -> Result<UserInfo> {
        user_api::get_user_info(&self.client).await
    }

    pub async fn fetch_user_info(&self) -> Result<UserInfo> {
        user_api::fetch_user_info(&self.client).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeTransport, BASE_URL};

    #[tokio::test]
    async fn test_facade_shares_one_session() {
        let transport = FakeTransport::new();
        transport.respond(200, "[]");
        let api = StudyApi::with_transport(
            BASE_URL,
            Arc::new(transport.clone()),
            Arc::new(MemoryStore::new()),
        )
        .unwrap();

        assert!(api.all_lexicons().await.unwrap_err().is_authentication_required());

        api.session().set_token("abc").await.unwrap();
        assert!(api.all_lexicons().await.unwrap().is_empty());
        assert_eq!(
            transport.requests()[0].header("Authorization"),
            Some("Bearer abc")
        );
    }
}
