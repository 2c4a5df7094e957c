#![allow(clippy::expect_used, clippy::doc_markdown, clippy::uninlined_format_args)]
//! Example: Look up an account on a Zimbra server and print its fields
//!
//! ## Prerequisites
//!
//! An admin auth token, acquired for example with zmsoap:
//!
//! ```bash
//! zmsoap -z AuthRequest/name=admin@example.com AuthRequest/password=...
//! ```
//!
//! ## Running
//!
//! ```bash
//! export ZIMBRA_ENDPOINT=https://mail.example.com:7071/service/admin/soap
//! export ZIMBRA_AUTH_TOKEN=0_d34db33f...
//! cargo run --package zimbra-admin --example find_account -- bob@example.com
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zimbra_admin::{Account, AccountService, SoapClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zimbra_admin=debug,zimbra_soap=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let endpoint = std::env::var("ZIMBRA_ENDPOINT")?;
    let auth_token = std::env::var("ZIMBRA_AUTH_TOKEN")?;
    let name = std::env::args()
        .nth(1)
        .expect("usage: find_account <account-name>");

    let client = SoapClient::builder(endpoint)
        .auth_token(auth_token)
        .build()?;
    let service = AccountService::new(client);

    println!("Looking up {name}...");
    let Some(account) = Account::find_by_name(&service, &name).await? else {
        println!("No such account.");
        return Ok(());
    };

    println!("id:              {}", account.id.as_deref().unwrap_or("-"));
    println!("name:            {}", account.name.as_deref().unwrap_or("-"));
    println!("status:          {}", account.status.as_deref().unwrap_or("-"));
    println!("cos id:          {}", account.cos_id.as_deref().unwrap_or("-"));
    println!("delegated admin: {}", account.is_delegated_admin());
    println!("mail quota:      {:?}", account.mail_quota);
    println!("created at:      {:?}", account.created_at);
    println!("last login at:   {:?}", account.last_login_at);

    if let Some(aliases) = account.aliases(&service).await? {
        println!("aliases:");
        for alias in aliases {
            println!("  - {alias}");
        }
    }

    Ok(())
}
