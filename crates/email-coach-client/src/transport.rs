//! `reqwest`-backed [`ApiTransport`].

use std::time::Duration;

use reqwest::Client;

use crate::{ApiMethod, ApiRequest, ApiTransport, ClientError, RawResponse};

/// Production transport over a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds a transport. `None` leaves requests without a deadline.
    ///
    /// # Errors
    /// Returns [`ClientError::Network`] when the TLS backend cannot start.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|error| ClientError::Network(error.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl ApiTransport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, ClientError> {
        let builder = match request.method {
            ApiMethod::Get => self.client.get(&request.url),
            ApiMethod::Post => {
                let builder = self.client.post(&request.url);
                match &request.body {
                    Some(body) => builder.json(body),
                    None => builder,
                }
            }
        };

        let response = builder.send().await.map_err(|error| {
            tracing::warn!(path = %request.path, %error, "request failed before a response");
            ClientError::Network(error.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|error| ClientError::Network(error.to_string()))?;

        Ok(RawResponse::new(status, body.to_vec()))
    }
}
