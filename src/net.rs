//! Outbound HTTP collaborator for data-fetching handlers

use crate::error::HttpError;
use std::time::Duration;

/// One outbound request as a handler describes it.
#[derive(Debug, Clone)]
pub struct HttpRequestSpec {
    /// Method token, e.g. `GET`, `POST`
    pub method: String,
    /// Target URI
    pub uri: String,
    /// Header pairs, applied in order (later duplicates override)
    pub headers: Vec<(String, String)>,
    /// Serialized request body, if the method carries one
    pub body: Option<String>,
}

/// Collaborator issuing outbound requests and returning response text.
/// Timeouts and retries are the implementation's concern, not the
/// engine's; a handler invocation simply blocks for the duration.
pub trait HttpDispatch: Send + Sync {
    /// Issue the request and return the response body.
    fn dispatch(&self, request: &HttpRequestSpec) -> Result<String, HttpError>;
}

/// Blocking `reqwest` dispatcher with a per-request timeout.
pub struct ReqwestDispatch {
    client: reqwest::blocking::Client,
}

impl ReqwestDispatch {
    /// Build a dispatcher with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self, HttpError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl HttpDispatch for ReqwestDispatch {
    fn dispatch(&self, request: &HttpRequestSpec) -> Result<String, HttpError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes()).map_err(|_| {
            HttpError::UnsupportedMethod {
                method: request.method.clone(),
            }
        })?;

        let mut builder = self.client.request(method, &request.uri);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        Ok(builder.send()?.text()?)
    }
}
