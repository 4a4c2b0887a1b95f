//! Session client for the Coinos payments API
//!
//! The client logs in with a username and password, keeps the bearer token it
//! receives and uses it for account lookups and invoice creation.
//!
//! # Example
//!
//! ```no_run
//! use coinos::{Credentials, InvoiceRequest, InvoiceType, SessionClient};
//!
//! async fn example() -> coinos::Result<()> {
//!     let mut client = SessionClient::new(Credentials::new("alice", "hunter2"))?;
//!     client.login().await?;
//!
//!     let account = client.get_account_details().await?;
//!     println!("{:?}", account.username());
//!
//!     let request = InvoiceRequest::new(1000).with_type(InvoiceType::Lightning);
//!     let invoice = client.create_invoice(&request).await?;
//!     println!("{}", serde_json::Value::from(invoice));
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::{SessionClient, SessionClientBuilder, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use types::{AccountDetails, Credentials, Invoice, InvoiceRequest, InvoiceType};
