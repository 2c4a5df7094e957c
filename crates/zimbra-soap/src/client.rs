//! Default HTTP invoker.

use std::time::Duration;

use async_trait::async_trait;

use crate::element::Element;
use crate::envelope;
use crate::error::{Error, Result};
use crate::invoker::SoapInvoker;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default [`SoapInvoker`] over HTTPS.
///
/// Posts each request to the admin SOAP endpoint (conventionally
/// `https://host:7071/service/admin/soap`) with a pre-acquired auth token in
/// the context header. Acquiring and refreshing the token is the caller's
/// concern; the client holds no other session state, so one instance can be
/// shared across tasks.
#[derive(Debug, Clone)]
pub struct SoapClient {
    endpoint: String,
    auth_token: Option<String>,
    http: reqwest::Client,
}

/// Builder for [`SoapClient`].
#[derive(Debug, Clone)]
pub struct SoapClientBuilder {
    endpoint: String,
    auth_token: Option<String>,
    timeout: Duration,
}

impl SoapClient {
    /// Starts building a client for the given endpoint URL.
    #[must_use]
    pub fn builder(endpoint: impl Into<String>) -> SoapClientBuilder {
        SoapClientBuilder {
            endpoint: endpoint.into(),
            auth_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// The endpoint URL requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SoapClientBuilder {
    /// Sets the admin session auth token carried in the context header.
    #[must_use]
    pub fn auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Sets the per-request timeout. Defaults to 30 seconds.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn build(self) -> Result<SoapClient> {
        let http = reqwest::Client::builder().timeout(self.timeout).build()?;
        Ok(SoapClient {
            endpoint: self.endpoint,
            auth_token: self.auth_token,
            http,
        })
    }
}

#[async_trait]
impl SoapInvoker for SoapClient {
    async fn invoke(&self, request: Element) -> Result<Element> {
        let operation = request.name();
        let body = envelope::build(self.auth_token.as_deref(), &request);

        tracing::debug!(operation, endpoint = %self.endpoint, "sending admin request");
        let response = self
            .http
            .post(&self.endpoint)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/soap+xml; charset=utf-8",
            )
            .body(body)
            .send()
            .await?;

        // Faults arrive as a 500 with a fault body; the body is authoritative.
        let text = response.text().await?;
        match envelope::parse(&text) {
            Ok(element) => {
                tracing::debug!(operation, "admin request succeeded");
                Ok(element)
            }
            Err(Error::Fault(fault)) => {
                tracing::warn!(operation, %fault, "admin request faulted");
                Err(Error::Fault(fault))
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let builder = SoapClient::builder("https://mail.example.com:7071/service/admin/soap");
        assert_eq!(builder.timeout, DEFAULT_TIMEOUT);
        assert_eq!(builder.auth_token, None);
    }

    #[test]
    fn test_builder_sets_token_and_timeout() {
        let client = SoapClient::builder("https://mail.example.com:7071/service/admin/soap")
            .auth_token("0_secret")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://mail.example.com:7071/service/admin/soap"
        );
        assert_eq!(client.auth_token.as_deref(), Some("0_secret"));
    }
}
