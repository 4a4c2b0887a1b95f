//! Session client for the Coinos API

use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::error::{Error, Result};
use crate::types::{
    AccountDetails, CreateInvoiceBody, Credentials, Invoice, InvoiceRequest, LoginResponse,
};

/// Default Coinos API endpoint
pub const DEFAULT_BASE_URL: &str = "https://coinos.io/api";

const LOGIN_PATH: &str = "/login";
const ME_PATH: &str = "/me";
const INVOICE_PATH: &str = "/invoice";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Client holding a Coinos login session
///
/// Protected operations fail with [`Error::NotAuthenticated`] until
/// [`SessionClient::login`] has succeeded, without touching the network.
pub struct SessionClient {
    base_url: String,
    credentials: Credentials,
    token: Option<String>,
    headers: HeaderMap,
    http_client: reqwest::Client,
}

impl fmt::Debug for SessionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl SessionClient {
    /// Create a client for the default endpoint
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::builder(credentials).build()
    }

    /// Create a [`SessionClientBuilder`]
    pub fn builder(credentials: Credentials) -> SessionClientBuilder {
        SessionClientBuilder::new(credentials)
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Username of the stored credentials
    pub fn username(&self) -> &str {
        self.credentials.username()
    }

    /// Whether a session token is held
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Current session token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Log in with the stored credentials
    ///
    /// On success the returned token replaces any previous one and is sent as
    /// a bearer token with every later request. On failure the client is left
    /// unchanged.
    ///
    /// # Errors
    ///
    /// [`Error::Authentication`] if the server rejects the login,
    /// [`Error::MissingToken`] if the response has no token, and
    /// [`Error::Http`] on transport failure.
    #[instrument(skip(self), fields(username = %self.credentials.username()))]
    pub async fn login(&mut self) -> Result<()> {
        let url = self.endpoint(LOGIN_PATH);
        tracing::debug!("Logging in at {}", url);

        let response = self
            .http_client
            .post(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(&self.credentials.login_request())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Login request failed: {}", e);
                Error::from(e)
            })?;

        let login: LoginResponse = parse_response(response).await.map_err(|e| match e {
            Error::Api { status, message } => {
                tracing::warn!("Login failed ({}): {}", status, message);
                Error::Authentication { status, message }
            }
            e => e,
        })?;

        let token = match login.token {
            Some(token) if !token.is_empty() => token,
            _ => {
                tracing::warn!("Login response did not contain a token");
                return Err(Error::MissingToken);
            }
        };

        let mut bearer = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
            tracing::warn!("Login token is not a valid header value: {}", e);
            Error::from(e)
        })?;
        bearer.set_sensitive(true);

        self.headers.insert(AUTHORIZATION, bearer);
        self.token = Some(token);

        tracing::info!("Logged in");
        Ok(())
    }

    /// Fetch the account record of the logged in user
    ///
    /// # Errors
    ///
    /// [`Error::NotAuthenticated`] before login, [`Error::Api`] if the server
    /// rejects the request, and [`Error::Http`] on transport failure.
    #[instrument(skip(self))]
    pub async fn get_account_details(&self) -> Result<AccountDetails> {
        self.ensure_authenticated()?;

        let url = self.endpoint(ME_PATH);
        self.send(self.http_client.get(&url)).await
    }

    /// Create an invoice
    ///
    /// # Errors
    ///
    /// [`Error::InvalidAmount`] for a zero amount, [`Error::NotAuthenticated`]
    /// before login, [`Error::Api`] if the server rejects the invoice, and
    /// [`Error::Http`] on transport failure.
    #[instrument(skip(self, request), fields(amount = request.amount, invoice_type = %request.invoice_type))]
    pub async fn create_invoice(&self, request: &InvoiceRequest) -> Result<Invoice> {
        if request.amount == 0 {
            tracing::warn!("Refusing to create invoice with zero amount");
            return Err(Error::InvalidAmount(request.amount));
        }
        self.ensure_authenticated()?;

        let url = self.endpoint(INVOICE_PATH);
        let body = CreateInvoiceBody { invoice: request };

        self.send(self.http_client.post(&url).json(&body)).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn ensure_authenticated(&self) -> Result<()> {
        if self.token.is_none() {
            tracing::warn!("Not authenticated, call login first");
            return Err(Error::NotAuthenticated);
        }
        Ok(())
    }

    /// Send a request with the session headers and parse the JSON response
    async fn send<T>(&self, request: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = request
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Request failed: {}", e);
                Error::from(e)
            })?;

        parse_response(response).await.inspect_err(|e| {
            if let Error::Api { status, message } = e {
                tracing::warn!("Request rejected ({}): {}", status, message);
            }
        })
    }
}

/// Parse the HTTP response and deserialize the JSON body
async fn parse_response<T>(response: reqwest::Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let status = response.status();
    tracing::debug!("Response status: {}", status);

    let response_text = response.text().await?;

    if !status.is_success() {
        return Err(Error::Api {
            status: status.as_u16(),
            message: response_text,
        });
    }

    serde_json::from_str::<T>(&response_text).map_err(|e| {
        tracing::error!("JSON parse error: {} - Body: {}", e, response_text);
        Error::Serde(e)
    })
}

/// Builder for [`SessionClient`]
#[derive(Debug)]
pub struct SessionClientBuilder {
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
    connect_timeout: Duration,
}

impl SessionClientBuilder {
    fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// Send requests to `base_url` instead of [`DEFAULT_BASE_URL`]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Total time allowed per request
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Time allowed to establish a connection
    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// [`Error::Url`] if the base URL does not parse, [`Error::Http`] if the
    /// HTTP client cannot be built.
    pub fn build(self) -> Result<SessionClient> {
        let base_url = Url::parse(&self.base_url)?;

        let http_client = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .build()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(SessionClient {
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            credentials: self.credentials,
            token: None,
            headers,
            http_client,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("alice", "hunter2")
    }

    #[test]
    fn test_new_uses_default_base_url() {
        let client = SessionClient::new(credentials()).expect("Client should build");

        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        assert_eq!(client.username(), "alice");
        assert!(!client.is_authenticated());
        assert_eq!(client.token(), None);
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = SessionClient::builder(credentials())
            .base_url("http://localhost:3119/api/")
            .build()
            .expect("Client should build");

        assert_eq!(client.base_url(), "http://localhost:3119/api");
        assert_eq!(client.endpoint(LOGIN_PATH), "http://localhost:3119/api/login");
    }

    #[test]
    fn test_builder_rejects_invalid_url() {
        let result = SessionClient::builder(credentials())
            .base_url("not a url")
            .build();

        assert!(matches!(result, Err(Error::Url(_))));
    }

    #[test]
    fn test_builder_timeouts() {
        let result = SessionClient::builder(credentials())
            .timeout(Duration::from_secs(5))
            .connect_timeout(Duration::from_secs(1))
            .build();

        assert!(result.is_ok());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let client = SessionClient::new(credentials()).expect("Client should build");
        let debug = format!("{client:?}");

        assert!(debug.contains("authenticated: false"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_default_headers_before_login() {
        let client = SessionClient::new(credentials()).expect("Client should build");

        assert_eq!(
            client.headers.get(CONTENT_TYPE),
            Some(&HeaderValue::from_static("application/json"))
        );
        assert!(client.headers.get(AUTHORIZATION).is_none());
    }
}
