use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "UserInfoRecord")]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Profiles arrive with `id`, `userId` or both. A non-empty `id` wins.
#[derive(Deserialize)]
struct UserInfoRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "userId")]
    user_id: Option<String>,
    username: String,
    email: String,
    #[serde(default)]
    avatar: Option<String>,
}

impl From<UserInfoRecord> for UserInfo {
    fn from(record: UserInfoRecord) -> Self {
        let id = record
            .id
            .filter(|id| !id.is_empty())
            .or(record.user_id)
            .unwrap_or_default();
        Self {
            id,
            username: record.username,
            email: record.email,
            avatar: record.avatar,
        }
    }
}

impl UserInfo {
    pub(crate) fn is_complete(&self) -> bool {
        !self.id.is_empty() && !self.username.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearnSettings {
    pub words_per_group: u32,
    pub enable_spelling: bool,
}

impl Default for LearnSettings {
    fn default() -> Self {
        Self {
            words_per_group: 10,
            enable_spelling: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_legacy_user_id_field() {
        let user: UserInfo = serde_json::from_value(json!({
            "userId": "u42",
            "username": "mira",
            "email": "mira@example.com"
        }))
        .unwrap();
        assert_eq!(user.id, "u42");
        assert!(user.is_complete());

        let encoded = serde_json::to_value(&user).unwrap();
        assert_eq!(encoded["id"], "u42");
        assert!(encoded.get("avatar").is_none());
    }

    #[test]
    fn test_id_and_user_id_together() {
        let user: UserInfo = serde_json::from_value(json!({
            "id": "u1",
            "userId": "u1",
            "username": "ana",
            "email": "a@b.c"
        }))
        .unwrap();
        assert_eq!(user.id, "u1");

        let user: UserInfo = serde_json::from_value(json!({
            "id": "",
            "userId": "u9",
            "username": "ana",
            "email": "a@b.c"
        }))
        .unwrap();
        assert_eq!(user.id, "u9");

        let user: UserInfo =
            serde_json::from_value(json!({"username": "ana", "email": "a@b.c"})).unwrap();
        assert!(!user.is_complete());
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: LearnSettings =
            serde_json::from_value(json!({"wordsPerGroup": 25})).unwrap();
        assert_eq!(settings.words_per_group, 25);
        assert!(settings.enable_spelling);
    }
}
