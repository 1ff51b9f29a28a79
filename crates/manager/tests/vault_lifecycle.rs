//! Integration tests for the storage vault manager against a mock authority.
//!
//! The mock implements the same `MetaService` contract a production
//! authority would, on an ephemeral port, so these tests exercise the real
//! client, wire codec, and response interpretation end to end.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::{collections::HashMap, sync::Arc, time::Duration};

use lakevault_client::{mock::MockAuthority, AuthorityClient, ClientConfig};
use lakevault_manager::{StorageVaultManager, VaultDefinition, VaultError, VaultId};
use lakevault_proto::proto::MetaCode;

fn hdfs_properties() -> HashMap<String, String> {
    HashMap::from([
        ("type".to_string(), "hdfs".to_string()),
        ("path".to_string(), "abs/".to_string()),
    ])
}

fn manager_for(endpoint: &str) -> StorageVaultManager {
    let config = ClientConfig::builder()
        .with_endpoint(endpoint)
        .with_cluster_id("test-cluster")
        .with_timeout(Duration::from_secs(5))
        .with_connect_timeout(Duration::from_millis(500))
        .build()
        .expect("valid config");
    StorageVaultManager::new(AuthorityClient::new(config))
}

#[tokio::test]
async fn create_returns_assigned_id_and_records_definition() {
    let server = MockAuthority::start().await.unwrap();
    let manager = manager_for(server.endpoint());

    let mut definition = VaultDefinition::hdfs("hdfs", false);
    definition.attach_properties(hdfs_properties()).unwrap();

    let id = manager.create_vault(&definition).await.unwrap();
    assert_eq!(id, Some(VaultId::new("1")));
    assert_eq!(definition.vault_id(), id.as_ref());

    assert!(server.contains("hdfs"));
    assert_eq!(manager.vault_id("hdfs"), Some(VaultId::new("1")));
}

#[tokio::test]
async fn duplicate_name_is_rejected_without_if_not_exists() {
    let server = MockAuthority::start().await.unwrap();
    let manager = manager_for(server.endpoint());

    let mut definition = VaultDefinition::hdfs("hdfs", false);
    definition.attach_properties(hdfs_properties()).unwrap();

    manager.create_vault(&definition).await.unwrap();
    let err = manager.create_vault(&definition).await.unwrap_err();

    assert!(matches!(err, VaultError::Conflict { ref name } if name == "hdfs"));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn duplicate_name_succeeds_with_if_not_exists() {
    let server = MockAuthority::start().await.unwrap();
    let manager = manager_for(server.endpoint());

    let mut definition = VaultDefinition::hdfs("name", true);
    definition.attach_properties(hdfs_properties()).unwrap();

    let first = manager.create_vault(&definition).await.unwrap();
    assert!(first.is_some());

    // The idempotent path still consults the authority and succeeds, but
    // the response shape carries no id for an existing vault.
    let second = manager.create_vault(&definition).await.unwrap();
    assert_eq!(second, None);
    assert_eq!(server.request_count(), 2);
}

#[tokio::test]
async fn empty_name_never_reaches_the_authority() {
    let server = MockAuthority::start().await.unwrap();
    let manager = manager_for(server.endpoint());

    let mut definition = VaultDefinition::hdfs("", false);
    definition.attach_properties(hdfs_properties()).unwrap();

    let err = manager.create_vault(&definition).await.unwrap_err();
    assert!(matches!(err, VaultError::Configuration { .. }));
    assert_eq!(server.request_count(), 0);
}

#[tokio::test]
async fn authority_side_rejection_surfaces_as_configuration() {
    let server = MockAuthority::start().await.unwrap();
    let manager = manager_for(server.endpoint());

    // Locally valid input; the authority's mirrored validation rejects it.
    server.inject_code(MetaCode::InvalidArgument, 1);

    let err = manager
        .create_hdfs_vault("hdfs", hdfs_properties(), false)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::Configuration { .. }));
    assert!(manager.vault_id("hdfs").is_none());
}

#[tokio::test]
async fn transport_failure_is_isolated_from_registry() {
    let server = MockAuthority::start().await.unwrap();
    let endpoint = server.endpoint().to_string();
    server.shutdown();
    // Give the listener a moment to close.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let manager = manager_for(&endpoint);
    let err = manager
        .create_hdfs_vault("hdfs", hdfs_properties(), false)
        .await
        .unwrap_err();

    assert!(matches!(err, VaultError::Unavailable { .. }));
    assert!(err.is_retryable());
    assert!(manager.vault_id("hdfs").is_none());
}

#[tokio::test]
async fn unavailable_outcome_is_safe_to_resubmit() {
    let server = MockAuthority::start().await.unwrap();
    let manager = manager_for(server.endpoint());

    server.inject_unavailable(1);
    let err = manager
        .create_hdfs_vault("hdfs", hdfs_properties(), false)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::Unavailable { .. }));
    assert!(manager.vault_id("hdfs").is_none());

    // The failed attempt was never applied; the retry registers the vault.
    let id = manager
        .create_hdfs_vault("hdfs", hdfs_properties(), false)
        .await
        .unwrap();
    assert_eq!(id, Some(VaultId::new("1")));
}

#[tokio::test]
async fn unrecognized_authority_code_carries_raw_code() {
    let server = MockAuthority::start().await.unwrap();
    let manager = manager_for(server.endpoint());

    server.inject_code(MetaCode::InternalError, 1);
    let err = manager
        .create_hdfs_vault("hdfs", hdfs_properties(), false)
        .await
        .unwrap_err();

    assert!(
        matches!(err, VaultError::Authority { code, .. } if code == MetaCode::InternalError as i32)
    );
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn alter_replaces_properties_of_existing_vault() {
    let server = MockAuthority::start().await.unwrap();
    let manager = manager_for(server.endpoint());

    manager
        .create_hdfs_vault("hdfs", hdfs_properties(), false)
        .await
        .unwrap();

    let mut updated = hdfs_properties();
    updated.insert("path".to_string(), "hdfs://nn1/warehouse".to_string());
    let id = manager.alter_hdfs_vault("hdfs", updated).await.unwrap();
    assert_eq!(id, Some(VaultId::new("1")));
}

#[tokio::test]
async fn alter_of_unknown_vault_is_an_authority_failure() {
    let server = MockAuthority::start().await.unwrap();
    let manager = manager_for(server.endpoint());

    let err = manager
        .alter_hdfs_vault("missing", hdfs_properties())
        .await
        .unwrap_err();
    assert!(
        matches!(err, VaultError::Authority { code, .. } if code == MetaCode::VaultNotFound as i32)
    );
}

#[tokio::test]
async fn names_created_elsewhere_conflict_here() {
    // A name registered by another cluster's manager is just as taken:
    // the authority, not the local registry, arbitrates uniqueness.
    let server = MockAuthority::start().await.unwrap();
    server.insert_existing("hdfs", "7");

    let manager = manager_for(server.endpoint());
    assert!(manager.vault_id("hdfs").is_none());

    let err = manager
        .create_hdfs_vault("hdfs", hdfs_properties(), false)
        .await
        .unwrap_err();
    assert!(matches!(err, VaultError::Conflict { .. }));

    let ok = manager
        .create_hdfs_vault("hdfs", hdfs_properties(), true)
        .await
        .unwrap();
    assert_eq!(ok, None);
}

#[tokio::test]
async fn concurrent_creates_have_a_single_winner() {
    let server = MockAuthority::start().await.unwrap();
    let manager = Arc::new(manager_for(server.endpoint()));

    let a = {
        let manager = Arc::clone(&manager);
        tokio::spawn(async move {
            manager
                .create_hdfs_vault("shared", hdfs_properties(), false)
                .await
        })
    };
    let b = {
        let manager = Arc::clone(&manager);
        tokio::spawn(async move {
            manager
                .create_hdfs_vault("shared", hdfs_properties(), false)
                .await
        })
    };

    let (a, b) = (a.await.unwrap(), b.await.unwrap());
    let winners = [&a, &b]
        .iter()
        .filter(|r| matches!(r, Ok(Some(_))))
        .count();
    let conflicts = [&a, &b]
        .iter()
        .filter(|r| matches!(r, Err(VaultError::Conflict { .. })))
        .count();

    assert_eq!(winners, 1, "exactly one caller wins the name");
    assert_eq!(conflicts, 1, "the other observes the conflict");
    assert_eq!(manager.vault_id("shared"), Some(VaultId::new("1")));
}
