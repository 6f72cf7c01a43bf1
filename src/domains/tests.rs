//! Tests for the resource domains

use super::*;
use crate::client::CrmClient;
use crate::error::Error;
use crate::http::mock::ScriptedTransport;
use crate::pagination::PageParams;
use futures::TryStreamExt;
use serde_json::{json, Value};
use std::sync::Arc;

fn object(id: &str) -> Value {
    json!({
        "id": id,
        "properties": { "hs_object_id": id },
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z",
        "archived": false
    })
}

fn two_pages(path: &str) -> ScriptedTransport {
    ScriptedTransport::new()
        .on(
            path,
            None,
            json!({ "results": [object("1"), object("2")], "paging": { "next": { "after": "2" } } }),
        )
        .on(path, Some("2"), json!({ "results": [object("3")] }))
        .on(&format!("{path}/1"), None, object("1"))
        .fail(&format!("{path}/missing"), None, 404, "")
}

#[test]
fn test_base_paths() {
    assert_eq!(CONTACTS_PATH, "/crm/v3/objects/contacts");
    assert_eq!(COMPANIES_PATH, "/crm/v3/objects/companies");
    assert_eq!(DEALS_PATH, "/crm/v3/objects/deals");
}

#[tokio::test]
async fn test_contacts_domain_forwards_all_operations() {
    let transport = Arc::new(two_pages(CONTACTS_PATH));
    let contacts = build_contacts_domain(transport.clone());

    let page = contacts
        .list_contacts(&PageParams::new().limit(2))
        .await
        .unwrap();
    assert_eq!(page.results.len(), 2);
    assert_eq!(page.next_cursor(), Some("2"));

    let one = contacts.get_contact("1").await.unwrap();
    assert_eq!(one.property("hs_object_id"), Some("1"));

    let missing = contacts.get_contact("missing").await.unwrap_err();
    assert!(matches!(missing, Error::NotFound { .. }));

    let streamed: Vec<_> = contacts
        .stream_contacts(&PageParams::new())
        .try_collect()
        .await
        .unwrap();
    let collected = contacts.get_contacts(&PageParams::new()).await.unwrap();
    assert_eq!(streamed, collected);
    assert_eq!(
        collected.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
        vec!["1", "2", "3"]
    );

    // list + get + missing + 2 stream + 2 collect
    assert_eq!(transport.calls(), 7);
    assert!(transport
        .requests()
        .iter()
        .all(|r| r.path.starts_with(CONTACTS_PATH)));
}

#[tokio::test]
async fn test_companies_domain() {
    let transport = Arc::new(two_pages(COMPANIES_PATH));
    let companies = build_companies_domain(transport.clone());

    assert_eq!(companies.get_companies(&PageParams::new()).await.unwrap().len(), 3);
    assert_eq!(
        companies
            .list_companies(&PageParams::new())
            .await
            .unwrap()
            .results
            .len(),
        2
    );
    assert_eq!(companies.get_company("1").await.unwrap().id, "1");
    let first = companies
        .stream_companies(&PageParams::new())
        .try_next()
        .await
        .unwrap();
    assert_eq!(first.map(|c| c.id), Some("1".to_string()));
}

#[tokio::test]
async fn test_deals_domain_get_with_properties() {
    let transport = Arc::new(two_pages(DEALS_PATH));
    let deals = build_deals_domain(transport.clone());

    let deal = deals
        .get_deal_with("1", &PageParams::new().properties(["amount", "dealstage"]))
        .await
        .unwrap();
    assert_eq!(deal.id, "1");
    assert_eq!(deals.get_deals(&PageParams::new()).await.unwrap().len(), 3);
    assert_eq!(deals.list_deals(&PageParams::new()).await.unwrap().results.len(), 2);
    assert!(deals
        .stream_deals(&PageParams::new())
        .try_collect::<Vec<_>>()
        .await
        .is_ok());

    let request = &transport.requests()[0];
    assert_eq!(request.path, "/crm/v3/objects/deals/1");
    assert_eq!(
        request.query_pairs(),
        vec![("properties", "amount"), ("properties", "dealstage")]
    );
}

#[tokio::test]
async fn test_client_shares_one_transport() {
    let transport = Arc::new(
        two_pages(CONTACTS_PATH)
            .on(DEALS_PATH, None, json!({ "results": [] })),
    );
    let client = CrmClient::new(transport.clone());

    let contacts = client.contacts().get_contacts(&PageParams::new()).await.unwrap();
    let deals = client.deals().get_deals(&PageParams::new()).await.unwrap();

    assert_eq!(contacts.len(), 3);
    assert!(deals.is_empty());
    assert_eq!(transport.calls(), 3);
    assert!(format!("{client:?}").contains("CrmClient"));
}
