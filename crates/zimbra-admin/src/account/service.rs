//! Account orchestration over the SOAP invoker.

use zimbra_soap::SoapInvoker;
use zimbra_soap::element::Element;

use crate::account::model::{Account, AllAccountsOptions};
use crate::account::{builder, parser};
use crate::error::{Error, Result};

/// One orchestration method per admin account operation.
///
/// Each call is a single request/response round trip: build the operation
/// body, invoke, parse. The service holds no state beyond the invoker it
/// wraps, so sharing one across tasks is safe whenever the invoker is.
///
/// Lookups translate a not-found fault into an absent result; every other
/// operation lets it surface as an error.
#[derive(Debug, Clone)]
pub struct AccountService<I> {
    invoker: I,
}

impl<I> AccountService<I> {
    /// Wraps an invoker.
    #[must_use]
    pub const fn new(invoker: I) -> Self {
        Self { invoker }
    }

    /// The wrapped invoker.
    #[must_use]
    pub const fn invoker(&self) -> &I {
        &self.invoker
    }
}

impl<I: SoapInvoker> AccountService<I> {
    /// Lists accounts, optionally restricted to one domain.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails or any entry fails to parse.
    pub async fn all(&self, options: &AllAccountsOptions) -> Result<Vec<Account>> {
        let mut request = Element::new("GetAllAccountsRequest");
        if let Some(domain) = &options.by_domain {
            request.add("domain", domain).set_attr("by", "name");
        }
        let response = self.invoker.invoke(request).await?;
        let accounts = parser::accounts(&response)?;
        tracing::debug!(count = accounts.len(), "listed accounts");
        Ok(accounts)
    }

    /// Creates an account and returns the server's view of it.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails or the response carries no
    /// account entry.
    pub async fn create(&self, account: &Account) -> Result<Account> {
        let mut request = Element::new("CreateAccountRequest");
        builder::create(&mut request, account);
        tracing::debug!(
            name = account.name.as_deref().unwrap_or_default(),
            "creating account"
        );
        let response = self.invoker.invoke(request).await?;
        single_account(&response)
    }

    /// Fetches an account by server id; `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on any fault other than not-found.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Account>> {
        let mut request = Element::new("GetAccountRequest");
        builder::get_by_id(&mut request, id);
        self.fetch_optional(request).await
    }

    /// Fetches an account by name; `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on any fault other than not-found.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Account>> {
        let mut request = Element::new("GetAccountRequest");
        builder::get_by_name(&mut request, name);
        self.fetch_optional(request).await
    }

    /// Pushes the account's current state and returns the server's view.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails or the response carries no
    /// account entry.
    pub async fn modify(&self, account: &Account) -> Result<Account> {
        let mut request = Element::new("ModifyAccountRequest");
        builder::modify(&mut request, account);
        let response = self.invoker.invoke(request).await?;
        single_account(&response)
    }

    /// Deletes the account server-side, addressed by its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails.
    pub async fn delete(&self, account: &Account) -> Result<()> {
        let mut request = Element::new("DeleteAccountRequest");
        builder::delete(&mut request, account.id.as_deref().unwrap_or_default());
        self.invoker.invoke(request).await?;
        Ok(())
    }

    /// Sets the account's password to its current `password` field.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails.
    pub async fn change_password(&self, account: &Account) -> Result<()> {
        let mut request = Element::new("SetPasswordRequest");
        request.add("id", account.id.as_deref().unwrap_or_default());
        request.add(
            "newPassword",
            account.password.as_deref().unwrap_or_default(),
        );
        self.invoker.invoke(request).await?;
        Ok(())
    }

    /// Lists the account's mail aliases: `None` when the account does not
    /// exist, otherwise always a (possibly empty) list.
    ///
    /// # Errors
    ///
    /// Returns an error on any fault other than not-found.
    pub async fn get_aliases(&self, account: &Account) -> Result<Option<Vec<String>>> {
        let mut request = Element::new("GetAccountRequest");
        builder::get_by_id(&mut request, account.id.as_deref().unwrap_or_default());
        match self.invoker.invoke(request).await {
            Ok(response) => {
                let aliases = response
                    .descendants("account")
                    .first()
                    .copied()
                    .map(parser::aliases)
                    .unwrap_or_default();
                Ok(Some(aliases))
            }
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Adds a mail alias to the account.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails.
    pub async fn create_alias(&self, account: &Account, alias: &str) -> Result<()> {
        let mut request = Element::new("AddAccountAliasRequest");
        request.add("id", account.id.as_deref().unwrap_or_default());
        request.add("alias", alias);
        self.invoker.invoke(request).await?;
        Ok(())
    }

    async fn fetch_optional(&self, request: Element) -> Result<Option<Account>> {
        match self.invoker.invoke(request).await {
            Ok(response) => Ok(Some(single_account(&response)?)),
            Err(err) if err.is_not_found() => {
                tracing::debug!("account not found");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn single_account(response: &Element) -> Result<Account> {
    let node = response
        .descendants("account")
        .into_iter()
        .next()
        .ok_or_else(|| Error::MalformedResponse("no account element".to_string()))?;
    parser::account(node)
}
