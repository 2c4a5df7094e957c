//! Response parsers for account operations.
//!
//! Parsers take the unwrapped operation response (or one `account` entry
//! inside it) and produce model types. Identity and creation stamp are
//! required; every other field is optional and defaults to unset.

use zimbra_soap::attr::{self, AttrValue};
use zimbra_soap::element::Element;
use zimbra_soap::{ZmBool, time};

use crate::account::model::{Account, AccountOptions};
use crate::acl;
use crate::error::{Error, Result};

/// Parses every `account` entry of a list response, in document order.
///
/// # Errors
///
/// Returns an error if any entry fails to parse.
pub fn accounts(response: &Element) -> Result<Vec<Account>> {
    response
        .descendants("account")
        .into_iter()
        .map(account)
        .collect()
}

/// Parses one `account` entry into an [`Account`].
///
/// `id`, `name` and `zimbraCreateTimestamp` are required: the service stamps
/// them on every entry, so their absence is a broken response, not a
/// default. A malformed creation stamp is also an error rather than a
/// silent `None`.
///
/// # Errors
///
/// Returns an error if identity or creation stamp is missing, or a
/// timestamp does not parse.
pub fn account(node: &Element) -> Result<Account> {
    let id = required_xml_attr(node, "id")?;
    let name = required_xml_attr(node, "name")?;

    let created_raw =
        attr::single_read(node, "zimbraCreateTimestamp").ok_or_else(|| Error::MissingAttribute {
            name: "zimbraCreateTimestamp".to_string(),
        })?;
    let created_at = time::parse_generalized(created_raw)?;

    // Never-logged-in accounts report this attribute absent or empty.
    let last_login_at = match attr::single_read(node, "zimbraLastLogonTimestamp") {
        Some(raw) if !raw.is_empty() => Some(time::parse_generalized(raw)?),
        _ => None,
    };

    // Absent or unparseable quota reads as 0 (unlimited).
    let mail_quota = attr::single_read(node, "zimbraMailQuota")
        .and_then(|raw| raw.parse::<i64>().ok())
        .unwrap_or(0);

    Ok(Account::new(AccountOptions {
        id: Some(id),
        name: Some(name),
        password: read_string(node, "password"),
        acls: acl::read(node),
        cos_id: read_string(node, "zimbraCOSId"),
        delegated_admin: attr::single_read(node, "zimbraIsDelegatedAdminAccount")
            .map(ZmBool::from_wire),
        mail_quota: Some(mail_quota),
        status: read_string(node, "zimbraAccountStatus"),
        created_at: Some(created_at),
        last_login_at,
        first_name: read_string(node, "givenName"),
        last_name: read_string(node, "sn"),
        phone: read_string(node, "telephoneNumber"),
        home_phone: read_string(node, "homePhone"),
        mobile: read_string(node, "mobile"),
        pager: read_string(node, "pager"),
        fax: read_string(node, "facsimileTelephoneNumber"),
        company: read_string(node, "company"),
        title: read_string(node, "title"),
        street: read_string(node, "street"),
        city: read_string(node, "l"),
        state: read_string(node, "st"),
        postal_code: read_string(node, "postalCode"),
        country: read_string(node, "co"),
        ..AccountOptions::default()
    }))
}

/// Extracts the mail aliases of an account entry, normalized to a list:
/// absent reads as empty, a single alias as a one-element list.
#[must_use]
pub fn aliases(node: &Element) -> Vec<String> {
    attr::read(node, "zimbraMailAlias")
        .map(AttrValue::into_vec)
        .unwrap_or_default()
}

fn read_string(node: &Element, name: &str) -> Option<String> {
    attr::single_read(node, name).map(str::to_string)
}

fn required_xml_attr(node: &Element, name: &str) -> Result<String> {
    node.attr(name)
        .map(str::to_string)
        .ok_or_else(|| Error::MissingAttribute {
            name: name.to_string(),
        })
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
    use chrono::{TimeZone, Utc};

    fn entry(inner: &str) -> Element {
        Element::parse(&format!(
            "<account id=\"dd288b87\" name=\"bob@example.com\">{inner}</account>"
        ))
        .unwrap()
    }

    fn full_entry() -> Element {
        entry(
            "<a n=\"zimbraCreateTimestamp\">20230101000000Z</a>\
             <a n=\"zimbraLastLogonTimestamp\">20230615120000Z</a>\
             <a n=\"zimbraCOSId\">5b6c38f4</a>\
             <a n=\"zimbraIsDelegatedAdminAccount\">TRUE</a>\
             <a n=\"zimbraMailQuota\">10737418240</a>\
             <a n=\"zimbraAccountStatus\">active</a>\
             <a n=\"zimbraACE\">3e2da734 usr sendAs</a>\
             <a n=\"givenName\">Bob</a>\
             <a n=\"sn\">Smith</a>\
             <a n=\"telephoneNumber\">+1 555 0100</a>\
             <a n=\"homePhone\">+1 555 0101</a>\
             <a n=\"mobile\">+1 555 0102</a>\
             <a n=\"pager\">+1 555 0103</a>\
             <a n=\"facsimileTelephoneNumber\">+1 555 0104</a>\
             <a n=\"company\">Example Corp</a>\
             <a n=\"title\">Engineer</a>\
             <a n=\"street\">1 Main St</a>\
             <a n=\"l\">Springfield</a>\
             <a n=\"st\">IL</a>\
             <a n=\"postalCode\">62701</a>\
             <a n=\"co\">USA</a>",
        )
    }

    mod single_entry_tests {
        use super::*;

        #[test]
        fn test_full_entry_maps_every_field() {
            let parsed = account(&full_entry()).unwrap();
            assert_eq!(parsed.id.as_deref(), Some("dd288b87"));
            assert_eq!(parsed.name.as_deref(), Some("bob@example.com"));
            assert_eq!(
                parsed.created_at,
                Some(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap())
            );
            assert_eq!(
                parsed.last_login_at,
                Some(Utc.with_ymd_and_hms(2023, 6, 15, 12, 0, 0).unwrap())
            );
            assert_eq!(parsed.cos_id.as_deref(), Some("5b6c38f4"));
            assert!(parsed.is_delegated_admin());
            assert_eq!(parsed.mail_quota, Some(10737418240));
            assert_eq!(parsed.status.as_deref(), Some("active"));
            assert_eq!(parsed.acls.len(), 1);
            assert_eq!(parsed.first_name.as_deref(), Some("Bob"));
            assert_eq!(parsed.last_name.as_deref(), Some("Smith"));
            assert_eq!(parsed.phone.as_deref(), Some("+1 555 0100"));
            assert_eq!(parsed.home_phone.as_deref(), Some("+1 555 0101"));
            assert_eq!(parsed.mobile.as_deref(), Some("+1 555 0102"));
            assert_eq!(parsed.pager.as_deref(), Some("+1 555 0103"));
            assert_eq!(parsed.fax.as_deref(), Some("+1 555 0104"));
            assert_eq!(parsed.company.as_deref(), Some("Example Corp"));
            assert_eq!(parsed.title.as_deref(), Some("Engineer"));
            assert_eq!(parsed.street.as_deref(), Some("1 Main St"));
            assert_eq!(parsed.city.as_deref(), Some("Springfield"));
            assert_eq!(parsed.state.as_deref(), Some("IL"));
            assert_eq!(parsed.postal_code.as_deref(), Some("62701"));
            assert_eq!(parsed.country.as_deref(), Some("USA"));
            // Reads never populate the raw-attribute escape hatch.
            assert_eq!(parsed.raw_attributes, None);
            // No password attribute in the entry, so none is carried.
            assert_eq!(parsed.password, None);
        }

        #[test]
        fn test_password_attribute_passes_through() {
            let parsed = account(&entry(
                "<a n=\"zimbraCreateTimestamp\">20230101000000Z</a>\
                 <a n=\"password\">VALUE-BLOCKED</a>",
            ))
            .unwrap();
            assert_eq!(parsed.password.as_deref(), Some("VALUE-BLOCKED"));
        }

        #[test]
        fn test_absent_quota_reads_as_zero() {
            let parsed = account(&entry("<a n=\"zimbraCreateTimestamp\">20230101000000Z</a>"))
                .unwrap();
            assert_eq!(parsed.mail_quota, Some(0));
        }

        #[test]
        fn test_unparseable_quota_reads_as_zero() {
            let parsed = account(&entry(
                "<a n=\"zimbraCreateTimestamp\">20230101000000Z</a>\
                 <a n=\"zimbraMailQuota\">unlimited</a>",
            ))
            .unwrap();
            assert_eq!(parsed.mail_quota, Some(0));
        }

        #[test]
        fn test_never_logged_in_account() {
            let absent = account(&entry("<a n=\"zimbraCreateTimestamp\">20230101000000Z</a>"))
                .unwrap();
            assert_eq!(absent.last_login_at, None);

            let empty = account(&entry(
                "<a n=\"zimbraCreateTimestamp\">20230101000000Z</a>\
                 <a n=\"zimbraLastLogonTimestamp\"></a>",
            ))
            .unwrap();
            assert_eq!(empty.last_login_at, None);
        }

        #[test]
        fn test_missing_creation_stamp_is_an_error() {
            let err = account(&entry("")).unwrap_err();
            match err {
                Error::MissingAttribute { name } => {
                    assert_eq!(name, "zimbraCreateTimestamp");
                }
                other => panic!("expected missing attribute, got {other:?}"),
            }
        }

        #[test]
        fn test_malformed_creation_stamp_is_an_error() {
            let err = account(&entry("<a n=\"zimbraCreateTimestamp\">bogus</a>")).unwrap_err();
            assert!(matches!(
                err,
                Error::Soap(zimbra_soap::Error::InvalidTimestamp { .. })
            ));
        }

        #[test]
        fn test_malformed_last_login_is_an_error() {
            let err = account(&entry(
                "<a n=\"zimbraCreateTimestamp\">20230101000000Z</a>\
                 <a n=\"zimbraLastLogonTimestamp\">bogus</a>",
            ))
            .unwrap_err();
            assert!(matches!(
                err,
                Error::Soap(zimbra_soap::Error::InvalidTimestamp { .. })
            ));
        }

        #[test]
        fn test_missing_identity_is_an_error() {
            let node = Element::parse(
                "<account name=\"bob@example.com\">\
                 <a n=\"zimbraCreateTimestamp\">20230101000000Z</a></account>",
            )
            .unwrap();
            let err = account(&node).unwrap_err();
            assert!(matches!(err, Error::MissingAttribute { name } if name == "id"));
        }

        #[test]
        fn test_delegated_admin_defaults_to_false() {
            let parsed = account(&entry("<a n=\"zimbraCreateTimestamp\">20230101000000Z</a>"))
                .unwrap();
            assert!(!parsed.is_delegated_admin());
        }
    }

    mod list_response_tests {
        use super::*;

        #[test]
        fn test_accounts_preserve_document_order() {
            let response = Element::parse(
                "<GetAllAccountsResponse>\
                 <account id=\"1\" name=\"a@example.com\">\
                 <a n=\"zimbraCreateTimestamp\">20230101000000Z</a></account>\
                 <account id=\"2\" name=\"b@example.com\">\
                 <a n=\"zimbraCreateTimestamp\">20230102000000Z</a></account>\
                 </GetAllAccountsResponse>",
            )
            .unwrap();
            let parsed = accounts(&response).unwrap();
            assert_eq!(parsed.len(), 2);
            assert_eq!(parsed[0].id.as_deref(), Some("1"));
            assert_eq!(parsed[1].id.as_deref(), Some("2"));
        }

        #[test]
        fn test_empty_response_yields_empty_list() {
            let response = Element::parse("<GetAllAccountsResponse/>").unwrap();
            assert!(accounts(&response).unwrap().is_empty());
        }

        #[test]
        fn test_one_broken_entry_fails_the_list() {
            let response = Element::parse(
                "<GetAllAccountsResponse>\
                 <account id=\"1\" name=\"a@example.com\">\
                 <a n=\"zimbraCreateTimestamp\">20230101000000Z</a></account>\
                 <account id=\"2\" name=\"b@example.com\"/>\
                 </GetAllAccountsResponse>",
            )
            .unwrap();
            assert!(accounts(&response).is_err());
        }
    }

    mod alias_list_tests {
        use super::*;

        #[test]
        fn test_absent_aliases_read_as_empty() {
            assert!(aliases(&entry("")).is_empty());
        }

        #[test]
        fn test_single_alias_normalized_to_list() {
            let node = entry("<a n=\"zimbraMailAlias\">robert@example.com</a>");
            assert_eq!(aliases(&node), vec!["robert@example.com".to_string()]);
        }

        #[test]
        fn test_multiple_aliases_in_order() {
            let node = entry(
                "<a n=\"zimbraMailAlias\">robert@example.com</a>\
                 <a n=\"zimbraMailAlias\">rob@example.com</a>",
            );
            assert_eq!(
                aliases(&node),
                vec![
                    "robert@example.com".to_string(),
                    "rob@example.com".to_string()
                ]
            );
        }
    }
}
