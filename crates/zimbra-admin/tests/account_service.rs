//! Integration tests for the account service.
//!
//! These tests run every operation against a mock invoker that returns
//! canned response elements and captures request bodies, so the wire shape
//! and the parse path are exercised without a real server.

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use zimbra_admin::{Account, AccountOptions, AccountService, Ace, AllAccountsOptions};
use zimbra_soap::{Element, SoapFault, SoapInvoker};

/// Mock invoker that returns predefined responses.
struct MockInvoker {
    /// Responses to return, in order.
    responses: Mutex<VecDeque<zimbra_soap::Result<Element>>>,
    /// Captured request bodies, serialized.
    sent: Mutex<Vec<String>>,
}

impl MockInvoker {
    fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// A mock primed with one successful response document.
    fn respond_with(xml: &str) -> Self {
        let mock = Self::new();
        mock.push_ok(xml);
        mock
    }

    /// A mock primed with one not-found fault.
    fn respond_not_found() -> Self {
        let mock = Self::new();
        mock.responses
            .lock()
            .unwrap()
            .push_back(Err(zimbra_soap::Error::Fault(SoapFault {
                code: "soap:Sender".to_string(),
                reason: "no such account: bob@example.com".to_string(),
                detail_code: Some("account.NO_SUCH_ACCOUNT".to_string()),
            })));
        mock
    }

    fn push_ok(&self, xml: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Element::parse(xml));
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SoapInvoker for MockInvoker {
    async fn invoke(&self, request: Element) -> zimbra_soap::Result<Element> {
        self.sent.lock().unwrap().push(request.to_xml());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Element::parse("<EmptyResponse/>"))
    }
}

fn service(mock: MockInvoker) -> AccountService<MockInvoker> {
    AccountService::new(mock)
}

fn account_with_id(id: &str) -> Account {
    Account::new(AccountOptions {
        id: Some(id.to_string()),
        ..AccountOptions::default()
    })
}

const BOB_ENTRY: &str = "<account id=\"dd288b87\" name=\"bob@example.com\">\
    <a n=\"zimbraCreateTimestamp\">20230101000000Z</a>\
    <a n=\"zimbraCOSId\">5b6c38f4</a>\
    <a n=\"zimbraMailQuota\">10737418240</a>\
    <a n=\"zimbraAccountStatus\">active</a>\
    <a n=\"givenName\">Bob</a>\
    <a n=\"sn\">Smith</a>\
    </account>";

fn get_account_response() -> String {
    format!("<GetAccountResponse>{BOB_ENTRY}</GetAccountResponse>")
}

#[tokio::test]
async fn test_get_by_id_parses_the_entry() {
    let service = service(MockInvoker::respond_with(&get_account_response()));

    let account = service.get_by_id("dd288b87").await.unwrap().unwrap();
    assert_eq!(account.id.as_deref(), Some("dd288b87"));
    assert_eq!(account.name.as_deref(), Some("bob@example.com"));
    assert_eq!(account.cos_id.as_deref(), Some("5b6c38f4"));
    assert_eq!(account.mail_quota, Some(10_737_418_240));
    assert_eq!(account.first_name.as_deref(), Some("Bob"));

    let sent = service_requests(&service);
    assert_eq!(
        sent,
        vec![
            "<GetAccountRequest><account by=\"id\">dd288b87</account></GetAccountRequest>"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn test_get_by_name_uses_name_discriminator() {
    let service = service(MockInvoker::respond_with(&get_account_response()));

    let account = service.get_by_name("bob@example.com").await.unwrap();
    assert!(account.is_some());

    let sent = service_requests(&service);
    assert!(sent[0].contains("<account by=\"name\">bob@example.com</account>"));
}

#[tokio::test]
async fn test_missing_account_reads_as_none() {
    let service = service(MockInvoker::respond_not_found());
    let account = service.get_by_name("ghost@example.com").await.unwrap();
    assert!(account.is_none());
}

#[tokio::test]
async fn test_other_faults_stay_errors() {
    let mock = MockInvoker::new();
    mock.responses
        .lock()
        .unwrap()
        .push_back(Err(zimbra_soap::Error::Fault(SoapFault {
            code: "soap:Sender".to_string(),
            reason: "permission denied".to_string(),
            detail_code: Some("service.PERM_DENIED".to_string()),
        })));
    let service = service(mock);

    let err = service.get_by_id("dd288b87").await.unwrap_err();
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_create_sends_credentials_and_returns_server_view() {
    let service = service(MockInvoker::respond_with(&format!(
        "<CreateAccountResponse>{BOB_ENTRY}</CreateAccountResponse>"
    )));

    let account = Account::new(AccountOptions {
        name: Some("bob@example.com".to_string()),
        password: Some("hunter2".to_string()),
        ..AccountOptions::default()
    });
    let created = service.create(&account).await.unwrap();

    // The server view carries the assigned id and stamps.
    assert_eq!(created.id.as_deref(), Some("dd288b87"));
    assert!(created.created_at.is_some());

    let sent = service_requests(&service);
    assert_eq!(
        sent,
        vec![
            "<CreateAccountRequest>\
             <name>bob@example.com</name>\
             <password>hunter2</password>\
             </CreateAccountRequest>"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn test_create_without_account_entry_is_an_error() {
    let service = service(MockInvoker::respond_with("<CreateAccountResponse/>"));
    let account = Account::new(AccountOptions {
        name: Some("bob@example.com".to_string()),
        password: Some("hunter2".to_string()),
        ..AccountOptions::default()
    });

    let err = service.create(&account).await.unwrap_err();
    assert!(matches!(err, zimbra_admin::Error::MalformedResponse(_)));
}

#[tokio::test]
async fn test_modify_without_account_entry_is_an_error() {
    let service = service(MockInvoker::respond_with("<ModifyAccountResponse/>"));
    let account = account_with_id("dd288b87");

    let err = service.modify(&account).await.unwrap_err();
    assert!(matches!(err, zimbra_admin::Error::MalformedResponse(_)));
}

#[tokio::test]
async fn test_modify_round_trips_account_state() {
    let mut raw = BTreeMap::new();
    raw.insert("displayName".to_string(), "Bob Smith".to_string());
    let account = Account::new(AccountOptions {
        id: Some("dd288b87".to_string()),
        name: Some("bob@example.com".to_string()),
        acls: vec![Arc::new(Ace::new("3e2da734", "usr", "sendAs"))],
        cos_id: Some("5b6c38f4".to_string()),
        delegated_admin: Some(true.into()),
        mail_quota: Some(2048),
        raw_attributes: Some(raw),
        ..AccountOptions::default()
    });

    // Echo the transmitted state back the way the server reports it.
    let service = service(MockInvoker::respond_with(
        "<ModifyAccountResponse><account id=\"dd288b87\" name=\"bob@example.com\">\
         <a n=\"zimbraCreateTimestamp\">20230101000000Z</a>\
         <a n=\"zimbraACE\">3e2da734 usr sendAs</a>\
         <a n=\"zimbraCOSId\">5b6c38f4</a>\
         <a n=\"zimbraIsDelegatedAdminAccount\">TRUE</a>\
         <a n=\"zimbraMailQuota\">2048</a>\
         </account></ModifyAccountResponse>",
    ));

    let saved = service.modify(&account).await.unwrap();
    assert_eq!(saved.id, account.id);
    assert_eq!(saved.cos_id, account.cos_id);
    assert_eq!(saved.mail_quota, account.mail_quota);
    assert_eq!(saved.is_delegated_admin(), account.is_delegated_admin());
    assert_eq!(saved.acls.len(), 1);

    let sent = service_requests(&service);
    let request = &sent[0];
    assert!(request.starts_with("<ModifyAccountRequest><id>dd288b87</id>"));
    assert!(request.contains("<a n=\"zimbraACE\">3e2da734 usr sendAs</a>"));
    assert!(request.contains("<a n=\"zimbraCOSId\">5b6c38f4</a>"));
    assert!(request.contains("<a n=\"zimbraIsDelegatedAdminAccount\">TRUE</a>"));
    assert!(request.contains("<a n=\"zimbraMailQuota\">2048</a>"));
    assert!(request.contains("<a n=\"displayName\">Bob Smith</a>"));
    // The raw map was set, so no modeled status write.
    assert!(!request.contains("zimbraAccountStatus"));
}

#[tokio::test]
async fn test_delete_addresses_account_by_id() {
    let service = service(MockInvoker::respond_with("<DeleteAccountResponse/>"));
    let account = account_with_id("dd288b87");

    service.delete(&account).await.unwrap();
    assert_eq!(
        service_requests(&service),
        vec!["<DeleteAccountRequest><id>dd288b87</id></DeleteAccountRequest>".to_string()]
    );
}

#[tokio::test]
async fn test_change_password_sends_new_password() {
    let service = service(MockInvoker::respond_with("<SetPasswordResponse/>"));
    let account = Account::new(AccountOptions {
        id: Some("dd288b87".to_string()),
        password: Some("s3cret!".to_string()),
        ..AccountOptions::default()
    });

    service.change_password(&account).await.unwrap();
    assert_eq!(
        service_requests(&service),
        vec![
            "<SetPasswordRequest><id>dd288b87</id><newPassword>s3cret!</newPassword></SetPasswordRequest>"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn test_create_alias_sends_id_and_alias() {
    let service = service(MockInvoker::respond_with("<AddAccountAliasResponse/>"));
    let account = account_with_id("dd288b87");

    service.create_alias(&account, "robert@example.com").await.unwrap();
    assert_eq!(
        service_requests(&service),
        vec![
            "<AddAccountAliasRequest><id>dd288b87</id><alias>robert@example.com</alias></AddAccountAliasRequest>"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn test_get_aliases_normalizes_to_list() {
    let service = service(MockInvoker::respond_with(
        "<GetAccountResponse><account id=\"dd288b87\" name=\"bob@example.com\">\
         <a n=\"zimbraCreateTimestamp\">20230101000000Z</a>\
         <a n=\"zimbraMailAlias\">robert@example.com</a>\
         </account></GetAccountResponse>",
    ));
    let account = account_with_id("dd288b87");

    let aliases = service.get_aliases(&account).await.unwrap();
    assert_eq!(aliases, Some(vec!["robert@example.com".to_string()]));
}

#[tokio::test]
async fn test_get_aliases_on_aliasless_account() {
    let service = service(MockInvoker::respond_with(&get_account_response()));
    let account = account_with_id("dd288b87");

    let aliases = service.get_aliases(&account).await.unwrap();
    assert_eq!(aliases, Some(Vec::new()));
}

#[tokio::test]
async fn test_get_aliases_of_missing_account() {
    let service = service(MockInvoker::respond_not_found());
    let account = account_with_id("dd288b87");

    let aliases = service.get_aliases(&account).await.unwrap();
    assert_eq!(aliases, None);
}

#[tokio::test]
async fn test_all_lists_accounts_in_document_order() {
    let service = service(MockInvoker::respond_with(
        "<GetAllAccountsResponse>\
         <account id=\"1\" name=\"a@example.com\">\
         <a n=\"zimbraCreateTimestamp\">20230101000000Z</a></account>\
         <account id=\"2\" name=\"b@example.com\">\
         <a n=\"zimbraCreateTimestamp\">20230102000000Z</a></account>\
         </GetAllAccountsResponse>",
    ));

    let accounts = service.all(&AllAccountsOptions::default()).await.unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].name.as_deref(), Some("a@example.com"));
    assert_eq!(accounts[1].name.as_deref(), Some("b@example.com"));

    assert_eq!(
        service_requests(&service),
        vec!["<GetAllAccountsRequest/>".to_string()]
    );
}

#[tokio::test]
async fn test_all_restricted_to_domain() {
    let service = service(MockInvoker::respond_with("<GetAllAccountsResponse/>"));

    let accounts = service
        .all(&AllAccountsOptions::domain("example.com"))
        .await
        .unwrap();
    assert!(accounts.is_empty());

    assert_eq!(
        service_requests(&service),
        vec![
            "<GetAllAccountsRequest><domain by=\"name\">example.com</domain></GetAllAccountsRequest>"
                .to_string()
        ]
    );
}

#[tokio::test]
async fn test_facade_delegates_to_the_service() {
    let service = service(MockInvoker::respond_with(&get_account_response()));

    let found = Account::find_by_name(&service, "bob@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id.as_deref(), Some("dd288b87"));

    // Instance methods reuse the same service.
    // (The mock answers any further call with an empty response.)
    found.add_alias(&service, "robert@example.com").await.unwrap();
    let sent = service_requests(&service);
    assert_eq!(sent.len(), 2);
    assert!(sent[1].contains("<alias>robert@example.com</alias>"));
}

/// Serialized request bodies captured by the mock behind a service.
fn service_requests(service: &AccountService<MockInvoker>) -> Vec<String> {
    service.invoker().sent()
}
