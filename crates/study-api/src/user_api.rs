use tracing::debug;

use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::models::UserInfo;

/// Cached profile if there is a usable one, otherwise the server's.
pub(crate) async fn get_user_info(client: &ApiClient) -> Result<UserInfo> {
    if let Some(cached) = client.session().user_info().await? {
        if cached.is_complete() {
            debug!(user = %cached.id, "using cached user info");
            return Ok(cached);
        }
    }
    fetch_user_info(client).await
}

pub(crate) async fn fetch_user_info(client: &ApiClient) -> Result<UserInfo> {
    let user: UserInfo = client.get_json(client.endpoint(&["user", "info"])).await?;
    if !user.is_complete() {
        return Err(ApiError::InvalidResponse(
            "/user/info: incomplete user record".to_string(),
        ));
    }
    client.session().set_user_info(&user).await?;
    Ok(user)
}
