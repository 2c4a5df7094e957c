//! # zimbra-admin
//!
//! Typed account provisioning for the Zimbra admin SOAP API.
//!
//! ## Features
//!
//! - **One entity, whole lifecycle**: [`Account`] is built locally, created
//!   server-side, looked up, edited in place and saved back
//! - **Deliberate write semantics**: unset fields stay off the wire, an
//!   empty grant list clears every grant, the delegated-admin flag is always
//!   transmitted, and a raw-attribute map supersedes the modeled status
//! - **Absence vs failure**: lookups return `Ok(None)` for a missing
//!   account instead of erroring
//! - **Transport-agnostic**: [`AccountService`] runs over any
//!   [`SoapInvoker`], with the reqwest-backed [`SoapClient`] as the default
//!
//! ## Quick Start
//!
//! ```ignore
//! use zimbra_admin::{Account, AccountOptions, AccountService, SoapClient};
//!
//! #[tokio::main]
//! async fn main() -> zimbra_admin::Result<()> {
//!     let client = SoapClient::builder("https://mail.example.com:7071/service/admin/soap")
//!         .auth_token("0_d34db33f...")
//!         .build()?;
//!     let service = AccountService::new(client);
//!
//!     // Create
//!     let account = Account::create(&service, AccountOptions {
//!         name: Some("bob@example.com".to_string()),
//!         password: Some("hunter2".to_string()),
//!         ..AccountOptions::default()
//!     }).await?;
//!
//!     // Edit and save
//!     let mut account = account;
//!     account.mail_quota = Some(10 * 1024 * 1024 * 1024);
//!     account.set_delegated_admin(true);
//!     account.save(&service).await?;
//!
//!     // Look up; a missing account is None, not an error
//!     if let Some(found) = Account::find_by_name(&service, "bob@example.com").await? {
//!         println!("{:?} created {:?}", found.name, found.created_at);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`account`]: the entity, its builders and parsers, and the service
//! - [`acl`]: access-control grants on the `zimbraACE` attribute
//! - [`cos`]: class-of-service references

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod account;
pub mod acl;
pub mod cos;
mod error;

pub use account::{Account, AccountOptions, AccountService, AllAccountsOptions};
pub use acl::{Ace, AclEntry};
pub use cos::Cos;
pub use error::{Error, Result};

// The transport types callers need to stand up a service.
pub use zimbra_soap::{SoapClient, SoapClientBuilder, SoapInvoker};
