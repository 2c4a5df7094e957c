//! Request body builders for account operations.
//!
//! Pure writers: each one grows the given operation element with the body
//! fragment for one request and touches nothing else. The attribute names
//! written here are the admin service's wire contract and must not drift.

use zimbra_soap::ZmBool;
use zimbra_soap::attr;
use zimbra_soap::element::Element;

use crate::account::model::Account;
use crate::acl;

/// Emits the create fragment: `name` and `password` unconditionally, COS id
/// and mail quota only when set, then every raw attribute verbatim.
pub fn create(body: &mut Element, account: &Account) {
    body.add("name", account.name.as_deref().unwrap_or_default());
    body.add("password", account.password.as_deref().unwrap_or_default());
    attr::inject(body, "zimbraCOSId", account.cos_id.as_deref());
    attr::inject(body, "zimbraMailQuota", account.mail_quota);
    inject_raw_attributes(body, account);
}

/// Emits a lookup fragment addressing the account by server id.
pub fn get_by_id(body: &mut Element, id: &str) {
    body.add("account", id).set_attr("by", "id");
}

/// Emits a lookup fragment addressing the account by name.
pub fn get_by_name(body: &mut Element, name: &str) {
    body.add("account", name).set_attr("by", "name");
}

/// Emits the modify fragment: the target id followed by the attribute set.
pub fn modify(body: &mut Element, account: &Account) {
    body.add("id", account.id.as_deref().unwrap_or_default());
    modify_attributes(body, account);
}

/// Emits the attribute set of a modify request.
///
/// An empty grant list is a delete-all directive, not "leave unchanged".
/// The delegated-admin flag is always transmitted, in either polarity. A
/// raw-attribute map supersedes the modeled `status` field entirely.
pub fn modify_attributes(body: &mut Element, account: &Account) {
    if account.acls.is_empty() {
        acl::delete_all(body);
    } else {
        for grant in &account.acls {
            grant.apply(body);
        }
    }
    attr::inject(body, "zimbraCOSId", account.cos_id.as_deref());
    attr::inject(
        body,
        "zimbraIsDelegatedAdminAccount",
        Some(ZmBool::from(account.is_delegated_admin()).to_wire()),
    );
    attr::inject(body, "zimbraMailQuota", account.mail_quota);
    if account.raw_attributes.is_none() {
        attr::inject(body, "zimbraAccountStatus", account.status.as_deref());
    }
    inject_raw_attributes(body, account);
}

/// Emits the delete fragment.
pub fn delete(body: &mut Element, id: &str) {
    body.add("id", id);
}

fn inject_raw_attributes(body: &mut Element, account: &Account) {
    if let Some(attributes) = &account.raw_attributes {
        for (name, value) in attributes {
            attr::inject(body, name, Some(value.as_str()));
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
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use crate::account::model::AccountOptions;
    use crate::acl::Ace;

    fn body(name: &str) -> Element {
        Element::new(name)
    }

    mod create_fragment_tests {
        use super::*;

        #[test]
        fn test_minimal_account_emits_only_name_and_password() {
            let account = Account::new(AccountOptions {
                name: Some("bob@example.com".to_string()),
                password: Some("hunter2".to_string()),
                ..AccountOptions::default()
            });
            let mut request = body("CreateAccountRequest");
            create(&mut request, &account);
            assert_eq!(
                request.to_xml(),
                "<CreateAccountRequest>\
                 <name>bob@example.com</name>\
                 <password>hunter2</password>\
                 </CreateAccountRequest>"
            );
        }

        #[test]
        fn test_cos_and_quota_emitted_when_set() {
            let account = Account::new(AccountOptions {
                name: Some("bob@example.com".to_string()),
                password: Some("hunter2".to_string()),
                cos_id: Some("5b6c38f4".to_string()),
                mail_quota: Some(10_737_418_240),
                ..AccountOptions::default()
            });
            let mut request = body("CreateAccountRequest");
            create(&mut request, &account);
            let xml = request.to_xml();
            assert!(xml.contains("<a n=\"zimbraCOSId\">5b6c38f4</a>"));
            assert!(xml.contains("<a n=\"zimbraMailQuota\">10737418240</a>"));
        }

        #[test]
        fn test_raw_attributes_emitted_verbatim() {
            let mut raw = BTreeMap::new();
            raw.insert("displayName".to_string(), "Bob".to_string());
            raw.insert("zimbraHideInGal".to_string(), "TRUE".to_string());
            let account = Account::new(AccountOptions {
                name: Some("bob@example.com".to_string()),
                password: Some("hunter2".to_string()),
                raw_attributes: Some(raw),
                ..AccountOptions::default()
            });
            let mut request = body("CreateAccountRequest");
            create(&mut request, &account);
            let xml = request.to_xml();
            assert!(xml.contains("<a n=\"displayName\">Bob</a>"));
            assert!(xml.contains("<a n=\"zimbraHideInGal\">TRUE</a>"));
        }
    }

    mod lookup_fragment_tests {
        use super::*;

        #[test]
        fn test_get_by_id_discriminator() {
            let mut request = body("GetAccountRequest");
            get_by_id(&mut request, "dd288b87-8da1-4eb8");
            assert_eq!(
                request.to_xml(),
                "<GetAccountRequest><account by=\"id\">dd288b87-8da1-4eb8</account></GetAccountRequest>"
            );
        }

        #[test]
        fn test_get_by_name_discriminator() {
            let mut request = body("GetAccountRequest");
            get_by_name(&mut request, "bob@example.com");
            assert_eq!(
                request.to_xml(),
                "<GetAccountRequest><account by=\"name\">bob@example.com</account></GetAccountRequest>"
            );
        }
    }

    mod modify_fragment_tests {
        use super::*;

        #[test]
        fn test_empty_acl_list_clears_grants() {
            let account = Account::new(AccountOptions {
                id: Some("dd288b87".to_string()),
                ..AccountOptions::default()
            });
            let mut request = body("ModifyAccountRequest");
            modify(&mut request, &account);
            let xml = request.to_xml();
            assert!(xml.starts_with("<ModifyAccountRequest><id>dd288b87</id>"));
            assert!(xml.contains("<a n=\"zimbraACE\"/>"));
        }

        #[test]
        fn test_each_grant_applied_in_order() {
            let account = Account::new(AccountOptions {
                id: Some("dd288b87".to_string()),
                acls: vec![
                    Arc::new(Ace::new("3e2da734", "usr", "sendAs")),
                    Arc::new(Ace::new("77s0s9fs", "grp", "viewFreeBusy")),
                ],
                ..AccountOptions::default()
            });
            let mut request = body("ModifyAccountRequest");
            modify(&mut request, &account);
            let xml = request.to_xml();
            assert!(!xml.contains("<a n=\"zimbraACE\"/>"));
            let first = xml.find("3e2da734 usr sendAs").unwrap();
            let second = xml.find("77s0s9fs grp viewFreeBusy").unwrap();
            assert!(first < second);
        }

        #[test]
        fn test_delegated_admin_always_transmitted() {
            let enabled = Account::new(AccountOptions {
                id: Some("dd288b87".to_string()),
                delegated_admin: Some(ZmBool::from(true)),
                ..AccountOptions::default()
            });
            let mut request = body("ModifyAccountRequest");
            modify(&mut request, &enabled);
            assert!(request
                .to_xml()
                .contains("<a n=\"zimbraIsDelegatedAdminAccount\">TRUE</a>"));

            let disabled = Account::new(AccountOptions {
                id: Some("dd288b87".to_string()),
                ..AccountOptions::default()
            });
            let mut request = body("ModifyAccountRequest");
            modify(&mut request, &disabled);
            assert!(request
                .to_xml()
                .contains("<a n=\"zimbraIsDelegatedAdminAccount\">FALSE</a>"));
        }

        #[test]
        fn test_status_suppressed_by_raw_attributes() {
            let mut raw = BTreeMap::new();
            raw.insert("zimbraAccountStatus".to_string(), "locked".to_string());
            let account = Account::new(AccountOptions {
                id: Some("dd288b87".to_string()),
                status: Some("active".to_string()),
                raw_attributes: Some(raw),
                ..AccountOptions::default()
            });
            let mut request = body("ModifyAccountRequest");
            modify(&mut request, &account);
            let xml = request.to_xml();
            // The raw map wins; the modeled status never gets its own write.
            assert!(xml.contains("<a n=\"zimbraAccountStatus\">locked</a>"));
            assert!(!xml.contains(">active<"));
        }

        #[test]
        fn test_empty_raw_map_still_suppresses_status() {
            let account = Account::new(AccountOptions {
                id: Some("dd288b87".to_string()),
                status: Some("active".to_string()),
                raw_attributes: Some(BTreeMap::new()),
                ..AccountOptions::default()
            });
            let mut request = body("ModifyAccountRequest");
            modify(&mut request, &account);
            assert!(!request.to_xml().contains("zimbraAccountStatus"));
        }

        #[test]
        fn test_status_emitted_without_raw_attributes() {
            let account = Account::new(AccountOptions {
                id: Some("dd288b87".to_string()),
                status: Some("locked".to_string()),
                ..AccountOptions::default()
            });
            let mut request = body("ModifyAccountRequest");
            modify(&mut request, &account);
            assert!(request
                .to_xml()
                .contains("<a n=\"zimbraAccountStatus\">locked</a>"));
        }

        #[test]
        fn test_unset_quota_and_cos_not_transmitted() {
            let account = Account::new(AccountOptions {
                id: Some("dd288b87".to_string()),
                ..AccountOptions::default()
            });
            let mut request = body("ModifyAccountRequest");
            modify(&mut request, &account);
            let xml = request.to_xml();
            assert!(!xml.contains("zimbraCOSId"));
            assert!(!xml.contains("zimbraMailQuota"));
        }
    }

    mod delete_fragment_tests {
        use super::*;

        #[test]
        fn test_delete_emits_id() {
            let mut request = body("DeleteAccountRequest");
            delete(&mut request, "dd288b87");
            assert_eq!(
                request.to_xml(),
                "<DeleteAccountRequest><id>dd288b87</id></DeleteAccountRequest>"
            );
        }
    }
}
