//! # zimbra-soap
//!
//! Wire-level plumbing for the Zimbra admin SOAP service (SOAP 1.2,
//! `urn:zimbraAdmin`).
//!
//! ## Features
//!
//! - **Owned XML tree**: [`Element`] is shared by request builders and
//!   response parsers, with namespace prefixes stripped on the way in
//! - **Directory-attribute codec**: the `<a n="...">value</a>` convention,
//!   with explicit single/multi cardinality handling
//! - **Value codecs**: directory booleans (`TRUE`/`FALSE`/`1`) and LDAP
//!   generalized-time stamps (`YYYYMMDDhhmmssZ`)
//! - **Envelope handling**: header context with auth token, body wrapping,
//!   fault extraction with not-found classification
//! - **Pluggable transport**: the [`SoapInvoker`] trait is the only seam
//!   higher layers touch; [`SoapClient`] is the reqwest-backed default
//!
//! ## Quick Start
//!
//! ```ignore
//! use zimbra_soap::{Element, SoapClient, SoapInvoker};
//!
//! #[tokio::main]
//! async fn main() -> zimbra_soap::Result<()> {
//!     let client = SoapClient::builder("https://mail.example.com:7071/service/admin/soap")
//!         .auth_token("0_d34db33f...")
//!         .build()?;
//!
//!     let mut request = Element::new("GetAccountRequest");
//!     request.add("account", "bob@example.com").set_attr("by", "name");
//!
//!     let response = client.invoke(request).await?;
//!     for account in response.descendants("account") {
//!         println!("{}", account.attr("name").unwrap_or("?"));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`element`]: owned XML tree, serialization and parsing
//! - [`attr`]: generic directory-attribute reads and writes
//! - [`boolean`] / [`time`]: value codecs
//! - [`envelope`]: SOAP envelope building and unwrapping
//! - [`fault`]: SOAP fault model
//! - [`invoker`] / [`client`]: transport seam and default HTTP client

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod attr;
pub mod boolean;
pub mod client;
pub mod element;
pub mod envelope;
mod error;
pub mod fault;
pub mod invoker;
pub mod time;

pub use attr::AttrValue;
pub use boolean::ZmBool;
pub use client::{SoapClient, SoapClientBuilder};
pub use element::Element;
pub use error::{Error, Result};
pub use fault::SoapFault;
pub use invoker::SoapInvoker;
