//! Request and response types for the Coinos API

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Login credentials
///
/// The password is never printed by the [`fmt::Debug`] implementation.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create new [`Credentials`]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Username
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn login_request(&self) -> LoginRequest<'_> {
        LoginRequest {
            username: &self.username,
            password: &self.password,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Kind of invoice to create
///
/// Strings other than the two known kinds are kept as [`InvoiceType::Other`]
/// and sent as-is, leaving validation to the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum InvoiceType {
    /// Lightning invoice
    #[default]
    Lightning,
    /// On-chain bitcoin address
    Bitcoin,
    /// Any other type string
    Other(String),
}

impl InvoiceType {
    /// Wire representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Lightning => "lightning",
            Self::Bitcoin => "bitcoin",
            Self::Other(other) => other,
        }
    }
}

impl fmt::Display for InvoiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "lightning" => Self::Lightning,
            "bitcoin" => Self::Bitcoin,
            _ => Self::Other(s.to_string()),
        })
    }
}

impl Serialize for InvoiceType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Parameters of an invoice to create
///
/// `webhook` and `secret` are left out of the request body entirely when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceRequest {
    /// Amount in satoshis
    pub amount: u64,
    /// Invoice type
    #[serde(rename = "type")]
    pub invoice_type: InvoiceType,
    /// URL the service calls when the invoice is paid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,
    /// Secret echoed back to the webhook
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl InvoiceRequest {
    /// Lightning invoice for `amount` satoshis
    pub fn new(amount: u64) -> Self {
        Self {
            amount,
            invoice_type: InvoiceType::default(),
            webhook: None,
            secret: None,
        }
    }

    /// Set the invoice type
    pub fn with_type(mut self, invoice_type: InvoiceType) -> Self {
        self.invoice_type = invoice_type;
        self
    }

    /// Set the webhook URL, an empty string leaves it unset
    pub fn with_webhook(mut self, webhook: impl Into<String>) -> Self {
        self.webhook = non_empty(webhook.into());
        self
    }

    /// Set the webhook secret, an empty string leaves it unset
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = non_empty(secret.into());
        self
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// Account record returned by `GET /me`
///
/// The body is kept verbatim; the accessors only read from it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountDetails(Map<String, Value>);

impl AccountDetails {
    /// Raw field lookup
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Account username
    pub fn username(&self) -> Option<&str> {
        self.get_str("username")
    }

    /// Balance in satoshis
    pub fn balance(&self) -> Option<i64> {
        self.get("balance").and_then(Value::as_i64)
    }

    /// Display currency of the account
    pub fn currency(&self) -> Option<&str> {
        self.get_str("currency")
    }

    /// Currencies the account supports
    pub fn currencies(&self) -> Option<Vec<&str>> {
        self.get("currencies")?
            .as_array()
            .map(|list| list.iter().filter_map(Value::as_str).collect())
    }

    /// Account id
    pub fn id(&self) -> Option<&str> {
        self.get_str("id")
    }

    /// Account public key
    pub fn pubkey(&self) -> Option<&str> {
        self.get_str("pubkey")
    }

    /// Borrow the underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Take the underlying JSON object
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for AccountDetails {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<AccountDetails> for Value {
    fn from(account: AccountDetails) -> Self {
        Value::Object(account.0)
    }
}

/// Invoice record returned by `POST /invoice`, kept verbatim
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Invoice(Map<String, Value>);

impl Invoice {
    /// Raw field lookup
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Borrow the underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Take the underlying JSON object
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Invoice {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Invoice> for Value {
    fn from(invoice: Invoice) -> Self {
        Value::Object(invoice.0)
    }
}

#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateInvoiceBody<'a> {
    pub invoice: &'a InvoiceRequest,
}
