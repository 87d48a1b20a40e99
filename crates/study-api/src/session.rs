//! Locally persisted session state: bearer token, cached profile, active
//! lexicon and learning preferences.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::SessionError;
use crate::models::{CurrentLexicon, LearnSettings, UserInfo};
use crate::store::KeyValueStore;

pub const TOKEN_KEY: &str = "token";
/// Written by older builds; read once and moved to [`TOKEN_KEY`].
pub const LEGACY_TOKEN_KEY: &str = "authToken";
pub const USER_INFO_KEY: &str = "userInfo";
pub const CURRENT_LEXICON_KEY: &str = "currentLexicon";
pub const LEARN_SETTINGS_KEY: &str = "learnSettings";

type Result<T> = std::result::Result<T, SessionError>;

/// Typed view over a [`KeyValueStore`]. Every accessor goes to the store, so
/// a change made through one handle is visible to the next read on any other.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn token(&self) -> Result<Option<String>> {
        if let Some(token) = self.store.get(TOKEN_KEY).await? {
            if !token.is_empty() {
                return Ok(Some(token));
            }
        }
        match self.store.get(LEGACY_TOKEN_KEY).await? {
            Some(token) if !token.is_empty() => {
                self.store.set(TOKEN_KEY, token.clone()).await?;
                self.store.remove(LEGACY_TOKEN_KEY).await?;
                info!("migrated bearer token from legacy key {LEGACY_TOKEN_KEY}");
                Ok(Some(token))
            }
            _ => Ok(None),
        }
    }

    pub async fn set_token(&self, token: &str) -> Result<()> {
        self.store.set(TOKEN_KEY, token.to_string()).await?;
        self.store.remove(LEGACY_TOKEN_KEY).await?;
        Ok(())
    }

    pub async fn clear_token(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY).await?;
        self.store.remove(LEGACY_TOKEN_KEY).await?;
        Ok(())
    }

    pub async fn is_logged_in(&self) -> Result<bool> {
        Ok(self.token().await?.is_some())
    }

    pub async fn user_info(&self) -> Result<Option<UserInfo>> {
        self.read_json(USER_INFO_KEY).await
    }

    pub async fn set_user_info(&self, user: &UserInfo) -> Result<()> {
        self.write_json(USER_INFO_KEY, user).await
    }

    pub async fn clear_user_info(&self) -> Result<()> {
        Ok(self.store.remove(USER_INFO_KEY).await?)
    }

    /// Id of the cached profile, if one is cached and has an id.
    pub async fn user_id(&self) -> Result<Option<String>> {
        Ok(self
            .user_info()
            .await?
            .map(|user| user.id)
            .filter(|id| !id.is_empty()))
    }

    pub async fn current_lexicon(&self) -> Result<Option<CurrentLexicon>> {
        self.read_json(CURRENT_LEXICON_KEY).await
    }

    pub async fn set_current_lexicon(&self, lexicon: &CurrentLexicon) -> Result<()> {
        self.write_json(CURRENT_LEXICON_KEY, lexicon).await
    }

    pub async fn clear_current_lexicon(&self) -> Result<()> {
        Ok(self.store.remove(CURRENT_LEXICON_KEY).await?)
    }

    /// Stored settings, or the defaults when nothing usable is stored.
    pub async fn learn_settings(&self) -> Result<LearnSettings> {
        Ok(self
            .read_json(LEARN_SETTINGS_KEY)
            .await?
            .unwrap_or_default())
    }

    pub async fn save_learn_settings(&self, settings: &LearnSettings) -> Result<()> {
        if settings.words_per_group == 0 {
            return Err(SessionError::InvalidSetting(
                "wordsPerGroup must be at least 1".to_string(),
            ));
        }
        self.write_json(LEARN_SETTINGS_KEY, settings).await
    }

    pub async fn update_words_per_group(&self, count: u32) -> Result<LearnSettings> {
        let mut settings = self.learn_settings().await?;
        settings.words_per_group = count;
        self.save_learn_settings(&settings).await?;
        Ok(settings)
    }

    pub async fn update_enable_spelling(&self, enable: bool) -> Result<LearnSettings> {
        let mut settings = self.learn_settings().await?;
        settings.enable_spelling = enable;
        self.save_learn_settings(&settings).await?;
        Ok(settings)
    }

    /// Drops the credential and everything cached on behalf of the user.
    /// Learning preferences survive.
    pub async fn logout(&self) -> Result<()> {
        self.clear_token().await?;
        self.clear_user_info().await?;
        self.clear_current_lexicon().await
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &'static str) -> Result<Option<T>> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(error) => {
                warn!("ignoring unreadable {key} entry: {error}");
                Ok(None)
            }
        }
    }

    async fn write_json<T: Serialize>(&self, key: &'static str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)
            .map_err(|source| SessionError::Encode { key, source })?;
        Ok(self.store.set(key, raw).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn session() -> (Arc<MemoryStore>, Session) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), Session::new(store))
    }

    #[tokio::test]
    async fn test_settings_default_then_update() {
        let (_, session) = session();
        assert_eq!(
            session.learn_settings().await.unwrap(),
            LearnSettings {
                words_per_group: 10,
                enable_spelling: true
            }
        );

        session.update_words_per_group(5).await.unwrap();
        assert_eq!(
            session.learn_settings().await.unwrap(),
            LearnSettings {
                words_per_group: 5,
                enable_spelling: true
            }
        );

        session.update_enable_spelling(false).await.unwrap();
        let settings = session.learn_settings().await.unwrap();
        assert_eq!(settings.words_per_group, 5);
        assert!(!settings.enable_spelling);
    }

    #[tokio::test]
    async fn test_zero_words_per_group_rejected() {
        let (_, session) = session();
        let result = session.update_words_per_group(0).await;
        assert!(matches!(result, Err(SessionError::InvalidSetting(_))));
        assert_eq!(session.learn_settings().await.unwrap().words_per_group, 10);
    }

    #[tokio::test]
    async fn test_unreadable_settings_fall_back_to_defaults() {
        let (store, session) = session();
        store
            .set(LEARN_SETTINGS_KEY, "{not json".to_string())
            .await
            .unwrap();
        assert_eq!(
            session.learn_settings().await.unwrap(),
            LearnSettings::default()
        );
    }

    #[tokio::test]
    async fn test_current_lexicon_round_trip_and_clear() {
        let (_, session) = session();
        let lexicon = CurrentLexicon {
            id: "1".to_string(),
            name: "Basics".to_string(),
        };
        session.set_current_lexicon(&lexicon).await.unwrap();
        assert_eq!(session.current_lexicon().await.unwrap(), Some(lexicon));

        session.clear_current_lexicon().await.unwrap();
        assert_eq!(session.current_lexicon().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_legacy_token_is_migrated() {
        let (store, session) = session();
        store
            .set(LEGACY_TOKEN_KEY, "old-token".to_string())
            .await
            .unwrap();

        assert_eq!(session.token().await.unwrap().as_deref(), Some("old-token"));
        assert_eq!(
            store.get(TOKEN_KEY).await.unwrap().as_deref(),
            Some("old-token")
        );
        assert_eq!(store.get(LEGACY_TOKEN_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_canonical_token_wins_over_legacy() {
        let (store, session) = session();
        store.set(LEGACY_TOKEN_KEY, "old".to_string()).await.unwrap();
        session.set_token("new").await.unwrap();
        assert_eq!(session.token().await.unwrap().as_deref(), Some("new"));
        assert_eq!(store.get(LEGACY_TOKEN_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_empty_token_is_logged_out() {
        let (store, session) = session();
        store.set(TOKEN_KEY, String::new()).await.unwrap();
        assert!(!session.is_logged_in().await.unwrap());
    }

    #[tokio::test]
    async fn test_logout_keeps_settings() {
        let (_, session) = session();
        session.set_token("t").await.unwrap();
        session
            .set_user_info(&UserInfo {
                id: "u1".to_string(),
                username: "ana".to_string(),
                email: "ana@example.com".to_string(),
                avatar: None,
            })
            .await
            .unwrap();
        session
            .set_current_lexicon(&CurrentLexicon {
                id: "1".to_string(),
                name: "Basics".to_string(),
            })
            .await
            .unwrap();
        session.update_words_per_group(20).await.unwrap();

        session.logout().await.unwrap();

        assert!(!session.is_logged_in().await.unwrap());
        assert_eq!(session.user_info().await.unwrap(), None);
        assert_eq!(session.current_lexicon().await.unwrap(), None);
        assert_eq!(session.learn_settings().await.unwrap().words_per_group, 20);
    }
}
