//! Account-centric entry points.
//!
//! Mirrors the two ways callers address the provisioning API: factory
//! functions for lookups and creation, instance methods for operating on an
//! account already in hand. All of them delegate to [`AccountService`]; the
//! service is passed explicitly, there is no ambient session.

use zimbra_soap::SoapInvoker;

use crate::account::model::{Account, AccountOptions, AllAccountsOptions};
use crate::account::service::AccountService;
use crate::error::Result;

impl Account {
    /// Lists accounts, optionally restricted to one domain.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails or any entry fails to parse.
    pub async fn all<I: SoapInvoker>(
        service: &AccountService<I>,
        options: &AllAccountsOptions,
    ) -> Result<Vec<Account>> {
        service.all(options).await
    }

    /// Fetches an account by server id; `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on any fault other than not-found.
    pub async fn find_by_id<I: SoapInvoker>(
        service: &AccountService<I>,
        id: &str,
    ) -> Result<Option<Account>> {
        service.get_by_id(id).await
    }

    /// Fetches an account by name; `None` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error on any fault other than not-found.
    pub async fn find_by_name<I: SoapInvoker>(
        service: &AccountService<I>,
        name: &str,
    ) -> Result<Option<Account>> {
        service.get_by_name(name).await
    }

    /// Creates an account from options and returns the server's view of it.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails or the response carries no
    /// account entry.
    pub async fn create<I: SoapInvoker>(
        service: &AccountService<I>,
        options: AccountOptions,
    ) -> Result<Account> {
        let account = Account::new(options);
        service.create(&account).await
    }

    /// Pushes this account's state to the server and returns its view.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails or the response carries no
    /// account entry.
    pub async fn save<I: SoapInvoker>(&self, service: &AccountService<I>) -> Result<Account> {
        service.modify(self).await
    }

    /// Deletes this account server-side.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails.
    pub async fn delete<I: SoapInvoker>(&self, service: &AccountService<I>) -> Result<()> {
        service.delete(self).await
    }

    /// Sets this account's password to its current `password` field.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails.
    pub async fn change_password<I: SoapInvoker>(
        &self,
        service: &AccountService<I>,
    ) -> Result<()> {
        service.change_password(self).await
    }

    /// Lists this account's mail aliases; `None` when the account no longer
    /// exists server-side.
    ///
    /// # Errors
    ///
    /// Returns an error on any fault other than not-found.
    pub async fn aliases<I: SoapInvoker>(
        &self,
        service: &AccountService<I>,
    ) -> Result<Option<Vec<String>>> {
        service.get_aliases(self).await
    }

    /// Adds a mail alias to this account.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails.
    pub async fn add_alias<I: SoapInvoker>(
        &self,
        service: &AccountService<I>,
        alias: &str,
    ) -> Result<()> {
        service.create_alias(self, alias).await
    }
}
