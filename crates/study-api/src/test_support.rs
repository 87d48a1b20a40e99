use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::client::ApiClient;
use crate::error::TransportError;
use crate::session::Session;
use crate::store::{KeyValueStore, MemoryStore};
use crate::transport::{ApiRequest, RawResponse, Transport};

pub(crate) const BASE_URL: &str = "http://backend.test";

#[derive(Default)]
struct Recorded {
    responses: VecDeque<Result<RawResponse, TransportError>>,
    requests: Vec<ApiRequest>,
}

/// Replays canned responses in order and records every request it sees.
#[derive(Clone, Default)]
pub(crate) struct FakeTransport {
    recorded: Arc<Mutex<Recorded>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, status: u16, body: &str) {
        self.recorded.lock().unwrap().responses.push_back(Ok(RawResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub(crate) fn fail(&self, message: &str) {
        self.recorded
            .lock()
            .unwrap()
            .responses
            .push_back(Err(TransportError::new(message)));
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.recorded.lock().unwrap().requests.clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.requests.push(request);
        recorded
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("no canned response left")))
    }
}

pub(crate) fn client_at(transport: &FakeTransport, base_url: &str) -> ApiClient {
    client_with_store(transport, base_url, Arc::new(MemoryStore::new()))
}

pub(crate) fn client_with_store(
    transport: &FakeTransport,
    base_url: &str,
    store: Arc<dyn KeyValueStore>,
) -> ApiClient {
    ApiClient::new(base_url, Arc::new(transport.clone()), Session::new(store)).unwrap()
}

pub(crate) fn client(transport: &FakeTransport) -> ApiClient {
    client_at(transport, BASE_URL)
}

pub(crate) async fn logged_in_client(transport: &FakeTransport, token: &str) -> ApiClient {
    let client = client(transport);
    client.session().set_token(token).await.unwrap();
    client
}
