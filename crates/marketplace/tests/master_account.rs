//! Master account provisioning against an in-memory game store.

mod common;

use assert_matches::assert_matches;
use common::{FakeGameStore, MASTER};
use portal_core::credentials::legacy_password_hash;
use portal_marketplace::provisioning::{provision_master_account, ProvisionError};

#[tokio::test]
async fn creates_missing_account_with_hashed_credential() {
    let store = FakeGameStore::default();

    let outcome = provision_master_account(&store, MASTER, false).await.unwrap();

    assert_eq!(outcome.login, MASTER);
    assert!(!outcome.replaced_existing);
    assert!(outcome.verified);
    assert_eq!(outcome.credential.plaintext.len(), 64);

    let stored = store.account_hash(MASTER).unwrap();
    assert_eq!(stored, outcome.credential.hash);
    assert_eq!(stored, legacy_password_hash(&outcome.credential.plaintext));
    assert_ne!(stored, outcome.credential.plaintext);
}

#[tokio::test]
async fn existing_account_is_kept_without_force() {
    let store = FakeGameStore::default().with_account(MASTER, "old-hash");

    let err = provision_master_account(&store, MASTER, false).await.unwrap_err();

    assert_matches!(err, ProvisionError::AccountExists(login) if login == MASTER);
    assert_eq!(store.account_hash(MASTER).as_deref(), Some("old-hash"));
}

#[tokio::test]
async fn force_replaces_existing_password() {
    let store = FakeGameStore::default().with_account(MASTER, "old-hash");

    let outcome = provision_master_account(&store, MASTER, true).await.unwrap();

    assert!(outcome.replaced_existing);
    assert_eq!(store.account_hash(MASTER), Some(outcome.credential.hash.clone()));
}

#[tokio::test]
async fn each_run_generates_a_new_credential() {
    let store = FakeGameStore::default();

    let first = provision_master_account(&store, MASTER, true).await.unwrap();
    let second = provision_master_account(&store, MASTER, true).await.unwrap();

    assert_ne!(first.credential.plaintext, second.credential.plaintext);
}

#[tokio::test]
async fn rejected_write_is_an_error() {
    let store = FakeGameStore {
        reject_account_writes: true,
        ..Default::default()
    };

    let err = provision_master_account(&store, MASTER, false).await.unwrap_err();

    assert_matches!(err, ProvisionError::WriteRejected(_));
    assert!(store.account_hash(MASTER).is_none());
}

#[tokio::test]
async fn unavailable_store_is_reported() {
    let store = FakeGameStore {
        unavailable: true,
        ..Default::default()
    };

    let err = provision_master_account(&store, MASTER, false).await.unwrap_err();

    assert_matches!(err, ProvisionError::StoreUnavailable(_));
}

#[tokio::test]
async fn invalid_login_never_touches_the_store() {
    let store = FakeGameStore {
        unavailable: true,
        ..Default::default()
    };

    let err = provision_master_account(&store, "bad login", false).await.unwrap_err();

    assert_matches!(err, ProvisionError::InvalidLogin(_));
}
