//! Account model types.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zimbra_soap::ZmBool;

use crate::acl::AclEntry;
use crate::cos::Cos;

/// Options bag for constructing an [`Account`].
///
/// Every settable field appears here; whatever stays `None` is simply unset
/// on the account, and unset fields are left out of write requests.
/// [`Account::new`] applies the construction rules: a [`Cos`] reference wins
/// over a raw `cos_id`, and the delegated-admin flag is coerced to a strict
/// boolean.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountOptions {
    /// Server-assigned id.
    pub id: Option<String>,
    /// Login/email identifier.
    pub name: Option<String>,
    /// Password, sent on create and password changes. Carried from a lookup
    /// when the server reports one; most deployments mask or omit it.
    pub password: Option<String>,
    /// Access-control grants.
    #[serde(skip)]
    pub acls: Vec<Arc<dyn AclEntry>>,
    /// Class-of-service reference; wins over `cos_id` when both are set.
    pub cos: Option<Cos>,
    /// Raw class-of-service id; ignored when `cos` is set.
    pub cos_id: Option<String>,
    /// Delegated-admin flag in any accepted representation.
    pub delegated_admin: Option<ZmBool>,
    /// Mail quota in bytes; 0 means unlimited.
    pub mail_quota: Option<i64>,
    /// Account status token (`active`, `locked`, `closed`, ...).
    pub status: Option<String>,
    /// Creation timestamp; populated from lookups.
    pub created_at: Option<DateTime<Utc>>,
    /// Last-login timestamp; populated from lookups.
    pub last_login_at: Option<DateTime<Utc>>,
    /// Escape hatch: directory attributes written verbatim on saves,
    /// superseding the modeled `status` field.
    pub raw_attributes: Option<BTreeMap<String, String>>,
    /// Given name (`givenName`).
    pub first_name: Option<String>,
    /// Surname (`sn`).
    pub last_name: Option<String>,
    /// Work phone (`telephoneNumber`).
    pub phone: Option<String>,
    /// Home phone (`homePhone`).
    pub home_phone: Option<String>,
    /// Mobile number (`mobile`).
    pub mobile: Option<String>,
    /// Pager number (`pager`).
    pub pager: Option<String>,
    /// Fax number (`facsimileTelephoneNumber`).
    pub fax: Option<String>,
    /// Company (`company`).
    pub company: Option<String>,
    /// Job title (`title`).
    pub title: Option<String>,
    /// Street address (`street`).
    pub street: Option<String>,
    /// City (`l`).
    pub city: Option<String>,
    /// State or province (`st`).
    pub state: Option<String>,
    /// Postal code (`postalCode`).
    pub postal_code: Option<String>,
    /// Country (`co`).
    pub country: Option<String>,
}

/// A mail account as the admin service sees it.
///
/// The same type carries accounts through their whole lifecycle: built
/// locally for a create, parsed out of a lookup response, edited in place
/// and pushed back with a modify. Identity fields are optional because a
/// locally built account has no server id until the create round trip
/// reports one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Account {
    /// Server-assigned id.
    pub id: Option<String>,
    /// Login/email identifier.
    pub name: Option<String>,
    /// Password, sent on create and password changes. Carried from a lookup
    /// when the server reports one; most deployments mask or omit it.
    pub password: Option<String>,
    /// Access-control grants. On a save, an empty list clears every grant
    /// server-side.
    #[serde(skip)]
    pub acls: Vec<Arc<dyn AclEntry>>,
    /// Class-of-service id.
    pub cos_id: Option<String>,
    delegated_admin: bool,
    /// Mail quota in bytes; 0 means unlimited.
    pub mail_quota: Option<i64>,
    /// Account status token (`active`, `locked`, `closed`, ...).
    pub status: Option<String>,
    /// Creation timestamp; populated from lookups.
    pub created_at: Option<DateTime<Utc>>,
    /// Last-login timestamp; unset when the account never logged in.
    pub last_login_at: Option<DateTime<Utc>>,
    /// Escape hatch: directory attributes written verbatim on saves,
    /// superseding the modeled `status` field.
    pub raw_attributes: Option<BTreeMap<String, String>>,
    /// Given name (`givenName`).
    pub first_name: Option<String>,
    /// Surname (`sn`).
    pub last_name: Option<String>,
    /// Work phone (`telephoneNumber`).
    pub phone: Option<String>,
    /// Home phone (`homePhone`).
    pub home_phone: Option<String>,
    /// Mobile number (`mobile`).
    pub mobile: Option<String>,
    /// Pager number (`pager`).
    pub pager: Option<String>,
    /// Fax number (`facsimileTelephoneNumber`).
    pub fax: Option<String>,
    /// Company (`company`).
    pub company: Option<String>,
    /// Job title (`title`).
    pub title: Option<String>,
    /// Street address (`street`).
    pub street: Option<String>,
    /// City (`l`).
    pub city: Option<String>,
    /// State or province (`st`).
    pub state: Option<String>,
    /// Postal code (`postalCode`).
    pub postal_code: Option<String>,
    /// Country (`co`).
    pub country: Option<String>,
}

impl Account {
    /// Builds an account from an options bag, applying the construction
    /// rules: `cos` takes precedence over `cos_id`, and the delegated-admin
    /// flag is coerced to a strict boolean (unset reads as `false`).
    #[must_use]
    pub fn new(options: AccountOptions) -> Self {
        let cos_id = match options.cos {
            Some(cos) => Some(cos.id),
            None => options.cos_id,
        };
        Self {
            id: options.id,
            name: options.name,
            password: options.password,
            acls: options.acls,
            cos_id,
            delegated_admin: options.delegated_admin.is_some_and(ZmBool::as_bool),
            mail_quota: options.mail_quota,
            status: options.status,
            created_at: options.created_at,
            last_login_at: options.last_login_at,
            raw_attributes: options.raw_attributes,
            first_name: options.first_name,
            last_name: options.last_name,
            phone: options.phone,
            home_phone: options.home_phone,
            mobile: options.mobile,
            pager: options.pager,
            fax: options.fax,
            company: options.company,
            title: options.title,
            street: options.street,
            city: options.city,
            state: options.state,
            postal_code: options.postal_code,
            country: options.country,
        }
    }

    /// The delegated-admin flag as a strict boolean.
    #[must_use]
    pub const fn is_delegated_admin(&self) -> bool {
        self.delegated_admin
    }

    /// Sets the delegated-admin flag, coercing any accepted representation
    /// (`bool`, wire strings, `0`/`1`).
    pub fn set_delegated_admin(&mut self, value: impl Into<ZmBool>) {
        self.delegated_admin = value.into().as_bool();
    }
}

/// Options for listing accounts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllAccountsOptions {
    /// Restrict the listing to one domain, matched by name.
    pub by_domain: Option<String>,
}

impl AllAccountsOptions {
    /// Options restricted to one domain.
    #[must_use]
    pub fn domain(name: impl Into<String>) -> Self {
        Self {
            by_domain: Some(name.into()),
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

    mod construction_tests {
        use super::*;

        #[test]
        fn test_empty_options_yield_blank_account() {
            let account = Account::new(AccountOptions::default());
            assert_eq!(account.id, None);
            assert_eq!(account.name, None);
            assert_eq!(account.cos_id, None);
            assert!(!account.is_delegated_admin());
            assert!(account.acls.is_empty());
            assert_eq!(account.raw_attributes, None);
        }

        #[test]
        fn test_cos_reference_wins_over_raw_id() {
            let account = Account::new(AccountOptions {
                cos: Some(Cos::named("from-cos", "premium")),
                cos_id: Some("from-raw".to_string()),
                ..AccountOptions::default()
            });
            assert_eq!(account.cos_id.as_deref(), Some("from-cos"));
        }

        #[test]
        fn test_raw_cos_id_used_without_reference() {
            let account = Account::new(AccountOptions {
                cos_id: Some("from-raw".to_string()),
                ..AccountOptions::default()
            });
            assert_eq!(account.cos_id.as_deref(), Some("from-raw"));
        }

        #[test]
        fn test_delegated_admin_coerced_at_construction() {
            let truthy = Account::new(AccountOptions {
                delegated_admin: Some(ZmBool::from("TRUE")),
                ..AccountOptions::default()
            });
            assert!(truthy.is_delegated_admin());

            let falsy = Account::new(AccountOptions {
                delegated_admin: Some(ZmBool::from("whatever")),
                ..AccountOptions::default()
            });
            assert!(!falsy.is_delegated_admin());
        }
    }

    mod delegated_admin_tests {
        use super::*;

        #[test]
        fn test_setter_accepts_wire_strings() {
            let mut account = Account::default();
            account.set_delegated_admin("TRUE");
            assert!(account.is_delegated_admin());
            account.set_delegated_admin("FALSE");
            assert!(!account.is_delegated_admin());
        }

        #[test]
        fn test_setter_accepts_bool_and_numbers() {
            let mut account = Account::default();
            account.set_delegated_admin(true);
            assert!(account.is_delegated_admin());
            account.set_delegated_admin(0_i64);
            assert!(!account.is_delegated_admin());
            account.set_delegated_admin(1_i64);
            assert!(account.is_delegated_admin());
        }
    }

    mod listing_options_tests {
        use super::*;

        #[test]
        fn test_domain_constructor() {
            let options = AllAccountsOptions::domain("example.com");
            assert_eq!(options.by_domain.as_deref(), Some("example.com"));
            assert_eq!(AllAccountsOptions::default().by_domain, None);
        }
    }
}
