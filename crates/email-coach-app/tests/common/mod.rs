//! Shared fixtures for app integration tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use email_coach_app::{AppController, ClientConfig};
use email_coach_client::{ApiRequest, ApiTransport, ClientError, RawResponse};

/// Transport answering each path with a fixed outcome and recording requests.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    outcomes: Mutex<HashMap<String, Result<RawResponse, ClientError>>>,
    seen: Mutex<Vec<ApiRequest>>,
}

#[allow(dead_code)]
impl ScriptedTransport {
    /// Answers `path` with `status` and `body`.
    pub fn respond(self: &Arc<Self>, path: &str, status: u16, body: &str) -> Arc<Self> {
        self.outcomes
            .lock()
            .expect("outcome lock should work")
            .insert(path.to_string(), Ok(RawResponse::new(status, body)));
        Arc::clone(self)
    }

    /// Fails `path` as if the connection were refused.
    pub fn refuse(self: &Arc<Self>, path: &str) -> Arc<Self> {
        self.outcomes
            .lock()
            .expect("outcome lock should work")
            .insert(
                path.to_string(),
                Err(ClientError::Network("connection refused".to_string())),
            );
        Arc::clone(self)
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.seen.lock().expect("request lock should work").clone()
    }
}

#[async_trait::async_trait]
impl ApiTransport for ScriptedTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, ClientError> {
        self.seen
            .lock()
            .expect("request lock should work")
            .push(request.clone());
        self.outcomes
            .lock()
            .expect("outcome lock should work")
            .get(&request.path)
            .cloned()
            .unwrap_or_else(|| Ok(RawResponse::new(404, "")))
    }
}

/// Creates an empty scripted transport.
#[allow(dead_code)]
pub fn transport() -> Arc<ScriptedTransport> {
    Arc::new(ScriptedTransport::default())
}

/// Creates a controller over `transport` with default configuration.
#[allow(dead_code)]
pub fn controller(transport: Arc<ScriptedTransport>) -> AppController {
    AppController::with_transport(&ClientConfig::default(), transport)
        .expect("controller fixture should build")
}
