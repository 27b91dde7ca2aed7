//! Tests against the durable LMDB backend

use factoring::prelude::*;
use tempfile::TempDir;

fn test_config(dir: &TempDir) -> FactoringConfig {
    FactoringConfig::new(dir.path().to_path_buf())
        .with_map_size(32 * 1024 * 1024)
        .with_sync_mode(SyncMode::NoSync)
}

/// Helper to create an initialized LMDB-backed store
fn create_test_db() -> (FactoringDb, TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();
    let db = FactoringDb::open_with_config(test_config(&temp_dir)).unwrap();
    assert!(db.init().is_success());
    (db, temp_dir)
}

fn tx_id_of(response: &Response) -> String {
    String::from_utf8(response.payload().unwrap().to_vec()).unwrap()
}

#[test]
fn test_records_survive_reopen() {
    let (db, temp_dir) = create_test_db();
    let payload = r#"{"businessNo":"BN-1","amount":100}"#;

    let saved = db.invoke("SaveData", &[payload.to_string()]);
    assert_eq!(saved.status, Status::Ok);
    let tx_id = tx_id_of(&saved);
    db.close().unwrap();

    let db: FactoringDb = FactoringDb::open_with_config(test_config(&temp_dir)).unwrap();
    assert_eq!(
        db.invoke("QueryDataByFabricTxId", &[tx_id]).payload(),
        Some(payload.as_bytes())
    );
    assert_eq!(
        db.invoke("QueryDataByBusinessNo", &["BN-1".to_string()])
            .payload(),
        Some(payload.as_bytes())
    );
    assert_eq!(db.invoke("KeepaliveQuery", &[]).status, Status::Ok);
}

#[test]
fn test_tx_ids_are_unique_and_increasing() {
    let (db, _temp) = create_test_db();

    let ids: Vec<String> = (0..5)
        .map(|i| {
            let payload = format!(r#"{{"businessNo":"BN-{}"}}"#, i);
            tx_id_of(&db.invoke("SaveData", &[payload]))
        })
        .collect();

    for pair in ids.windows(2) {
        assert!(pair[0] < pair[1], "{:?}", pair);
    }
}

#[test]
fn test_queries_and_failures_do_not_consume_tx_ids() {
    let (db, _temp) = create_test_db();
    let before = db.meta().unwrap().next_tx_seq;

    db.invoke("QueryDataByBusinessNo", &["BN-404".to_string()]);
    db.invoke("KeepaliveQuery", &[]);
    let failed = db.invoke("SaveData", &[r#"{"businessNo":null}"#.to_string()]);
    assert_eq!(failed.status, Status::Error);

    assert_eq!(db.meta().unwrap().next_tx_seq, before);
}

#[test]
fn test_host_supplied_tx_id() {
    let (db, _temp) = create_test_db();
    let payload = r#"{"businessNo":"BN-1"}"#;

    let saved = db.invoke_with_tx_id("SaveData", &[payload.to_string()], "TX-100");
    assert_eq!(saved.payload(), Some(&b"TX-100"[..]));
    assert_eq!(
        db.backend().read_state(b"BN-1").unwrap(),
        Some(b"TX-100".to_vec())
    );
}

#[test]
fn test_namespaced_store_from_json_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("factoring.json");
    let store_path = temp_dir.path().join("store");
    let raw = serde_json::json!({
        "path": store_path,
        "map_size": 32 * 1024 * 1024,
        "sync_mode": "NoSync",
        "key_layout": "Namespaced",
        "tx_id_prefix": "fab-"
    });
    std::fs::write(&config_path, raw.to_string()).unwrap();

    let cfg = FactoringConfig::from_json_file(&config_path).unwrap();
    let db: FactoringDb = FactoringDb::open_with_config(cfg).unwrap();
    assert_eq!(db.key_layout(), KeyLayout::Namespaced);
    assert!(db.init().is_success());

    let saved = db.invoke("SaveData", &[r#"{"businessNo":"BN-1"}"#.to_string()]);
    let tx_id = tx_id_of(&saved);
    assert!(tx_id.starts_with("fab-"));
    assert_eq!(
        db.backend()
            .read_state(format!("record/{}", tx_id).as_bytes())
            .unwrap(),
        Some(br#"{"businessNo":"BN-1"}"#.to_vec())
    );
}

#[test]
fn test_oversized_business_no_leaves_no_orphan() {
    let (db, _temp) = create_test_db();
    let payload = format!(r#"{{"businessNo":"{}"}}"#, "B".repeat(600));

    let mut txn = db.backend().write_txn_with_id("TX-BIG").unwrap();
    let response = db.router().handle("SaveData", &[payload], &mut txn);
    assert_eq!(response.status, Status::Error);
    assert!(response.message.starts_with("Key of 600 bytes"), "{}", response.message);
    assert_eq!(txn.get_state(b"TX-BIG").unwrap(), None);
    txn.abort();

    let lookup = db.invoke("QueryDataByBusinessNo", &["B".repeat(600)]);
    assert_eq!(lookup.status, Status::NotFound);
}
