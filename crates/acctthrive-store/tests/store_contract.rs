// SPDX-License-Identifier: Apache-2.0

use acctthrive_model::{
    LedgerState, ReferralAccount, ReferralCode, ReferralRelationship, RelationshipId, Timestamp,
    Usd, UserId,
};
use acctthrive_store::{
    state_file_path, state_lock_path, state_tmp_path, LedgerStore, LocalFsStore, MemoryStore,
    StoreErrorCode,
};
use std::fs;
use tempfile::tempdir;

fn mk_state() -> LedgerState {
    let referrer = UserId::parse("user_123").expect("referrer");
    let code = ReferralCode::parse("US123456ABC").expect("code");
    let mut state = LedgerState::default();
    let mut account = ReferralAccount::new(
        referrer.clone(),
        code.clone(),
        Timestamp::from_millis(1),
    );
    account.note_referral();
    account.credit_bonus(Usd::from_cents(65));
    state.accounts.insert(referrer.clone(), account);

    let mut rel = ReferralRelationship::pending(
        RelationshipId::from_sequence(1),
        referrer,
        UserId::parse("user_456").expect("referred"),
        code,
        Timestamp::from_millis(2),
    );
    rel.record_deposit(Usd::from_dollars(30));
    assert!(rel.qualify(Usd::from_cents(65), Timestamp::from_millis(3)));
    state.relationships.push(rel);
    state.next_sequence = 2;
    state
}

#[test]
fn local_load_of_missing_file_is_empty_state() {
    let root = tempdir().expect("tempdir");
    let store = LocalFsStore::new(root.path().join("nested"));
    assert_eq!(store.load().expect("load"), LedgerState::default());
}

#[test]
fn local_save_then_load_preserves_state() {
    let root = tempdir().expect("tempdir");
    let store = LocalFsStore::new(root.path().to_path_buf());
    let state = mk_state();

    store.save(&state).expect("save");
    assert!(state_file_path(root.path()).exists());
    assert!(!state_tmp_path(root.path()).exists(), "temp file must be renamed away");
    assert!(!state_lock_path(root.path()).exists(), "lock must be released");

    let loaded = store.load().expect("load");
    assert_eq!(loaded, state);
}

#[test]
fn local_save_output_is_canonical() {
    let root = tempdir().expect("tempdir");
    let store = LocalFsStore::new(root.path().to_path_buf());
    store.save(&mk_state()).expect("save 1");
    let first = fs::read(state_file_path(root.path())).expect("read 1");
    store.save(&mk_state()).expect("save 2");
    let second = fs::read(state_file_path(root.path())).expect("read 2");
    assert_eq!(first, second);
}

#[test]
fn local_save_is_rejected_while_locked() {
    let root = tempdir().expect("tempdir");
    let store = LocalFsStore::new(root.path().to_path_buf());
    let guard = store.acquire_save_lock().expect("first lock");
    let err = store.save(&mk_state()).expect_err("second writer");
    assert_eq!(err.code, StoreErrorCode::Conflict);
    drop(guard);
    store.save(&mk_state()).expect("save after release");
}

#[test]
fn leftover_lock_file_blocks_saves_until_removed() {
    let root = tempdir().expect("tempdir");
    let store = LocalFsStore::new(root.path().to_path_buf());
    let lock = state_lock_path(root.path());
    fs::write(&lock, b"").expect("leftover lock");

    let err = store.save(&mk_state()).expect_err("locked");
    assert_eq!(err.code, StoreErrorCode::Conflict);
    assert!(err.message.contains(".referral_ledger.json.lock"));
    assert_eq!(store.load().expect("load"), LedgerState::default());

    fs::remove_file(&lock).expect("remove lock");
    store.save(&mk_state()).expect("save after removal");
    assert_eq!(store.load().expect("reload"), mk_state());
    assert!(!lock.exists());
}

#[test]
fn local_load_rejects_corrupt_json() {
    let root = tempdir().expect("tempdir");
    fs::write(state_file_path(root.path()), b"{not json").expect("write");
    let err = LocalFsStore::new(root.path().to_path_buf())
        .load()
        .expect_err("corrupt");
    assert_eq!(err.code, StoreErrorCode::Decode);
}

#[test]
fn local_load_rejects_structurally_invalid_state() {
    let root = tempdir().expect("tempdir");
    let mut state = mk_state();
    state.next_sequence = 1;
    let bytes = serde_json::to_vec(&state).expect("json");
    fs::write(state_file_path(root.path()), bytes).expect("write");
    let err = LocalFsStore::new(root.path().to_path_buf())
        .load()
        .expect_err("invalid");
    assert_eq!(err.code, StoreErrorCode::Validation);
}

#[test]
fn local_save_refuses_invalid_state() {
    let root = tempdir().expect("tempdir");
    let store = LocalFsStore::new(root.path().to_path_buf());
    let mut state = mk_state();
    state.schema_version = 99;
    let err = store.save(&state).expect_err("invalid");
    assert_eq!(err.code, StoreErrorCode::Validation);
    assert!(!state_file_path(root.path()).exists());
}

#[test]
fn memory_store_keeps_last_snapshot() {
    let store = MemoryStore::new();
    assert_eq!(store.load().expect("load"), LedgerState::default());
    store.save(&mk_state()).expect("save");
    assert_eq!(store.load().expect("reload"), mk_state());
    assert_eq!(store.save_count().expect("count"), 1);
}

#[test]
fn memory_store_can_be_seeded() {
    let store = MemoryStore::with_state(mk_state());
    assert_eq!(store.load().expect("load"), mk_state());
    assert_eq!(store.save_count().expect("count"), 0);
}
