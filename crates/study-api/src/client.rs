//! Request construction and response classification shared by every API
//! group.

use std::sync::Arc;

use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::{ApiError, Result};
use crate::session::Session;
use crate::transport::{ApiRequest, RawResponse, Transport};

pub struct ApiClient {
    base_url: Url,
    transport: Arc<dyn Transport>,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>, session: Session) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|error| ApiError::InvalidBaseUrl(format!("{base_url}: {error}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url,
            transport,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Base URL with `segments` appended; each segment is percent-encoded.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Reads the token from the session on every call.
    pub(crate) async fn bearer_token(&self) -> Result<String> {
        self.session.token().await?.ok_or_else(|| {
            ApiError::AuthenticationRequired("no bearer token stored".to_string())
        })
    }

    async fn send(&self, method: Method, url: Url, body: Option<Value>) -> Result<RawResponse> {
        let token = self.bearer_token().await?;
        let path = url.path().to_string();
        let request = ApiRequest {
            method,
            url,
            headers: vec![
                ("Authorization", format!("Bearer {token}")),
                ("Content-Type", "application/json".to_string()),
            ],
            body,
        };
        debug!(method = %request.method, %path, "sending request");
        self.transport.send(request).await.map_err(|failure| {
            error!(%path, "request failed: {failure}");
            ApiError::Transport(failure)
        })
    }

    pub(crate) async fn get_text(&self, url: Url) -> Result<String> {
        let path = url.path().to_string();
        let response = self.send(Method::GET, url, None).await?;
        Ok(check_status(&path, response, |status| status == 200)?.body)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let path = url.path().to_string();
        let body = self.get_text(url).await?;
        decode(&path, &body)
    }

    /// GET that must answer with a JSON array.
    pub(crate) async fn get_list<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>> {
        let path = url.path().to_string();
        let value: Value = self.get_json(url).await?;
        decode_list(&path, value)
    }

    /// Any 2xx counts as done; the body is ignored.
    pub(crate) async fn send_mutation(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
    ) -> Result<()> {
        let path = url.path().to_string();
        let response = self.send(method, url, body).await?;
        check_status(&path, response, |status| (200..300).contains(&status))?;
        Ok(())
    }
}

fn check_status(
    path: &str,
    response: RawResponse,
    accepted: impl Fn(u16) -> bool,
) -> Result<RawResponse> {
    if accepted(response.status) {
        return Ok(response);
    }
    debug!(%path, status = response.status, body = %response.body, "discarding error payload");
    error!(%path, status = response.status, "request rejected");
    Err(match response.status {
        401 | 403 => ApiError::AuthenticationRequired(format!(
            "{path} answered {}",
            response.status
        )),
        404 => ApiError::NotFound(path.to_string()),
        status => ApiError::Status {
            status,
            path: path.to_string(),
        },
    })
}

pub(crate) fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|error| ApiError::InvalidResponse(format!("{path}: {error}")))
}

pub(crate) fn decode_list<T: DeserializeOwned>(path: &str, value: Value) -> Result<Vec<T>> {
    if !value.is_array() {
        return Err(ApiError::InvalidResponse(format!(
            "{path}: expected an array"
        )));
    }
    serde_json::from_value(value)
        .map_err(|error| ApiError::InvalidResponse(format!("{path}: {error}")))
}
