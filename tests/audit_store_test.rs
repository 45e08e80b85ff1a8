mod common;

use std::sync::Arc;

use common::*;
use ipam_backend::audit::AuditLogger;
use ipam_backend::errors::InternalError;
use ipam_backend::errors::internal::NotFoundError;
use ipam_backend::stores::AuditStore;
use ipam_backend::types::internal::audit::{AuditAction, AuditFilter, EntityType};
use ipam_backend::types::internal::context::RequestContext;
use serde_json::json;

fn actor(id: i64, name: &str) -> RequestContext {
    RequestContext::new()
        .with_actor(Some(id), name)
        .with_ip_address("198.51.100.4".parse().unwrap())
        .with_client_info("curl/8.0")
}

async fn seed(stores: &TestStores) {
    let subnet = create_subnet(stores, "10.0.0.0", 24).await;
    stores.address_store
        .create(&actor(2, "bob"), address_fields("10.0.0.1", Some(subnet.id), "Acme"))
        .await
        .unwrap();
    stores.address_store
        .create(&actor(2, "bob"), address_fields("10.0.0.1", None, "Acme"))
        .await
        .unwrap_err();
    stores.subnet_store.delete(&actor(3, "carol"), subnet.id).await.unwrap();
}

#[tokio::test]
async fn test_entries_carry_actor_descriptor() {
    let stores = setup_test_stores().await;
    seed(&stores).await;

    let page = stores.audit_store.list(1, 10, &AuditFilter::default()).await.unwrap();

    let latest = &page.entries[0];
    assert_eq!(latest.action, "DELETE_SUBNET");
    assert_eq!(latest.entity_type, "subnet");
    assert_eq!(latest.actor_id, Some(3));
    assert_eq!(latest.actor_name, "carol");
    assert_eq!(latest.source_address, "198.51.100.4");
    assert_eq!(latest.client_info, "curl/8.0");

    let oldest = page.entries.last().unwrap();
    assert_eq!(oldest.action, "CREATE_SUBNET");
    assert_eq!(oldest.actor_name, "alice");
}

#[tokio::test]
async fn test_list_is_newest_first_with_page_metadata() {
    let stores = setup_test_stores().await;
    seed(&stores).await;

    let first = stores.audit_store.list(1, 3, &AuditFilter::default()).await.unwrap();
    assert_eq!(first.total, 4);
    assert_eq!(first.page, 1);
    assert_eq!(first.page_size, 3);
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.entries.len(), 3);
    assert!(first.entries.windows(2).all(|w| w[0].id > w[1].id));

    let second = stores.audit_store.list(2, 3, &AuditFilter::default()).await.unwrap();
    assert_eq!(second.entries.len(), 1);
    assert_eq!(second.entries[0].action, "CREATE_SUBNET");

    let beyond = stores.audit_store.list(5, 3, &AuditFilter::default()).await.unwrap();
    assert!(beyond.entries.is_empty());
    assert_eq!(beyond.total, 4);
}

#[tokio::test]
async fn test_page_arguments_are_clamped() {
    let stores = setup_test_stores().await;
    seed(&stores).await;

    let page = stores.audit_store.list(0, 0, &AuditFilter::default()).await.unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 1);
    assert_eq!(page.entries.len(), 1);

    let page = stores.audit_store.list(1, 10_000, &AuditFilter::default()).await.unwrap();
    assert_eq!(page.page_size, 100);
}

#[tokio::test]
async fn test_configured_max_page_size() {
    let audit_store = AuditStore::new(setup_test_audit_db().await).with_max_page_size(2);
    let logger = AuditLogger::new(Arc::new(audit_store));
    for id in 1..=3 {
        logger.builder(AuditAction::CreateSubnet, EntityType::Subnet)
            .with_context(&actor(1, "alice"))
            .entity_id(id)
            .write()
            .await
            .unwrap();
    }

    let page = logger.audit_store.list(1, 50, &AuditFilter::default()).await.unwrap();
    assert_eq!(page.page_size, 2);
    assert_eq!(page.total_pages, 2);
}

#[tokio::test]
async fn test_filters_combine() {
    let stores = setup_test_stores().await;
    seed(&stores).await;

    let by_action = stores.audit_store
        .list(1, 10, &AuditFilter { action: Some("CREATE".to_string()), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(by_action.total, 3);

    let by_entity = stores.audit_store
        .list(1, 10, &AuditFilter { entity_type: Some(EntityType::Address), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(by_entity.total, 2);

    let by_user = stores.audit_store
        .list(1, 10, &AuditFilter { username: Some("bo".to_string()), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(by_user.total, 2);

    let combined = stores.audit_store
        .list(1, 10, &AuditFilter {
            action: Some("FAILED".to_string()),
            entity_type: Some(EntityType::Address),
            username: Some("bob".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(combined.total, 1);
    assert_eq!(combined.entries[0].action, "CREATE_IP_FAILED");

    let none = stores.audit_store
        .list(1, 10, &AuditFilter { username: Some("mallory".to_string()), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(none.total, 0);
    assert_eq!(none.total_pages, 0);
}

#[tokio::test]
async fn test_text_filters_match_wildcards_literally() {
    let stores = setup_test_stores().await;
    seed(&stores).await;

    let wildcard = stores.audit_store
        .list(1, 10, &AuditFilter { action: Some("CREATE%IP".to_string()), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(wildcard.total, 0);

    let single = stores.audit_store
        .list(1, 10, &AuditFilter { username: Some("b_b".to_string()), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(single.total, 0);

    let literal = stores.audit_store
        .list(1, 10, &AuditFilter { action: Some("_IP_".to_string()), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(literal.total, 1);
    assert_eq!(literal.entries[0].action, "CREATE_IP_FAILED");
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() {
    let stores = setup_test_stores().await;
    seed(&stores).await;

    let beyond = stores.audit_store.list(3, 2, &AuditFilter::default()).await.unwrap();
    assert!(beyond.entries.is_empty());
    assert_eq!(beyond.total, 4);
    assert_eq!(beyond.total_pages, 2);

    let far = stores.audit_store.list(u64::MAX, 100, &AuditFilter::default()).await.unwrap();
    assert!(far.entries.is_empty());
    assert_eq!(far.page, u64::MAX);
    assert_eq!(far.total, 4);
}

#[tokio::test]
async fn test_get_returns_snapshots() {
    let stores = setup_test_stores().await;
    let logger = AuditLogger::new(stores.audit_store.clone());

    let id = logger.builder(AuditAction::UpdateSubnet, EntityType::Subnet)
        .with_context(&actor(1, "alice"))
        .entity_id(9)
        .before(json!({ "mask": 24 }))
        .after(json!({ "mask": 25 }))
        .write()
        .await
        .unwrap();

    let entry = stores.audit_store.get(id).await.unwrap();
    assert_eq!(entry.action, "UPDATE_SUBNET");
    assert_eq!(entry.entity_id, Some(9));
    assert_eq!(entry.before, Some(json!({ "mask": 24 })));
    assert_eq!(entry.after, Some(json!({ "mask": 25 })));
    assert!(entry.created_at > 0);
}

#[tokio::test]
async fn test_get_missing_entry() {
    let stores = setup_test_stores().await;

    let result = stores.audit_store.get(404).await;

    assert!(matches!(result, Err(InternalError::NotFound(NotFoundError::AuditEntry(404)))));
}

#[tokio::test]
async fn test_anonymous_actor_is_recorded_as_system() {
    let stores = setup_test_stores().await;

    stores.subnet_store
        .create(&RequestContext::new(), subnet_fields("172.16.0.0", 12))
        .await
        .unwrap();

    let page = stores.audit_store.list(1, 1, &AuditFilter::default()).await.unwrap();
    assert_eq!(page.entries[0].actor_id, None);
    assert_eq!(page.entries[0].actor_name, "system");
    assert_eq!(page.entries[0].source_address, "unknown");
}
