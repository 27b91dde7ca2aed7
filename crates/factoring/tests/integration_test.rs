//! Integration tests for the record and index layer

use factoring::prelude::*;

/// Helper to create an initialized in-memory store
fn create_test_db(layout: KeyLayout) -> FactoringDb<MemoryStateStore> {
    let db = FactoringDb::with_backend(MemoryStateStore::new(layout));
    assert!(db.init().is_success());
    db
}

fn save(db: &FactoringDb<MemoryStateStore>, tx_id: &str, payload: &str) -> Response {
    db.invoke_with_tx_id("SaveData", &[payload.to_string()], tx_id)
}

fn query(db: &FactoringDb<MemoryStateStore>, function: &str, key: &str) -> Response {
    db.invoke(function, &[key.to_string()])
}

#[test]
fn test_round_trip_through_both_access_paths() {
    let db = create_test_db(KeyLayout::Flat);
    let payloads = [
        r#"{"businessNo":"BN-1","amount":100}"#,
        r#"{"businessNo":"BN-2","seller":"ACME","buyer":"Globex"}"#,
        r#"{"amount":7,"businessNo":"BN-3","nested":{"a":[1,2]}}"#,
    ];

    for payload in payloads {
        let saved = db.invoke("SaveData", &[payload.to_string()]);
        assert_eq!(saved.status, Status::Ok);
        let tx_id = String::from_utf8(saved.payload.unwrap()).unwrap();

        let by_tx = query(&db, "QueryDataByFabricTxId", &tx_id);
        assert_eq!(by_tx.payload(), Some(payload.as_bytes()));

        let business_no = Record::parse(payload.as_bytes())
            .unwrap()
            .business_no()
            .unwrap()
            .to_string();
        let by_bn = query(&db, "QueryDataByBusinessNo", &business_no);
        assert_eq!(by_bn.payload(), Some(payload.as_bytes()));
    }
}

#[test]
fn test_scenario_bn_1_under_tx_100() {
    let db = create_test_db(KeyLayout::Flat);
    let payload = r#"{"businessNo":"BN-1","invoice":"INV-77","amount":2500}"#;

    let saved = save(&db, "TX-100", payload);
    assert_eq!(saved.payload(), Some(&b"TX-100"[..]));

    assert_eq!(
        query(&db, "QueryDataByFabricTxId", "TX-100").payload(),
        Some(payload.as_bytes())
    );
    assert_eq!(
        query(&db, "QueryDataByBusinessNo", "BN-1").payload(),
        Some(payload.as_bytes())
    );

    let missing = query(&db, "QueryDataByFabricTxId", "TX-999");
    assert_eq!(missing.status, Status::NotFound);
    assert_eq!(missing.payload(), None);
}

#[test]
fn test_empty_business_no_writes_nothing() {
    let db = create_test_db(KeyLayout::Flat);
    let keys_before = db.backend().len();

    let response = save(&db, "TX-1", r#"{"businessNo":"","amount":1}"#);
    assert_eq!(response.status, Status::Error);
    assert_eq!(response.message, "businessNo must exist");

    assert_eq!(db.backend().len(), keys_before);
    assert_eq!(
        query(&db, "QueryDataByFabricTxId", "TX-1").status,
        Status::NotFound
    );
}

#[test]
fn test_never_written_keys_are_not_found() {
    let db = create_test_db(KeyLayout::Flat);

    for function in ["QueryDataByFabricTxId", "QueryDataByBusinessNo"] {
        let response = query(&db, function, "nothing-here");
        assert_eq!(response.status, Status::NotFound, "{}", function);
        assert!(response.is_success());
    }
}

#[test]
fn test_rewrite_repoints_index_to_newest_record() {
    let db = create_test_db(KeyLayout::Flat);
    let first = r#"{"businessNo":"BN-1","amount":100}"#;
    let second = r#"{"businessNo":"BN-1","amount":200}"#;

    save(&db, "TX-1", first);
    save(&db, "TX-2", second);

    assert_eq!(
        query(&db, "QueryDataByBusinessNo", "BN-1").payload(),
        Some(second.as_bytes())
    );
    // The older record stays reachable by its own primary key only
    assert_eq!(
        query(&db, "QueryDataByFabricTxId", "TX-1").payload(),
        Some(first.as_bytes())
    );
    assert_eq!(
        db.backend().read_state(b"BN-1").unwrap(),
        Some(b"TX-2".to_vec())
    );
}

#[test]
fn test_liveness_probe() {
    let db = FactoringDb::with_backend(MemoryStateStore::new(KeyLayout::Flat));

    // Absent before init
    let absent = db.invoke("KeepaliveQuery", &[]);
    assert_eq!(absent.status, Status::Error);
    assert_eq!(absent.message, "ERROR! KeepaliveQuery get result is null");

    assert!(db.init().is_success());
    let reached = db.invoke("KeepaliveQuery", &["ignored".to_string()]);
    assert_eq!(reached.status, Status::Ok);
    assert_eq!(reached.payload(), Some(&b"Reached"[..]));

    // In the flat layout a business number can clobber the sentinel
    save(&db, "TX-1", r#"{"businessNo":"keepAliveTest"}"#);
    let clobbered = db.invoke("KeepaliveQuery", &[]);
    assert_eq!(clobbered.status, Status::Error);
    assert_eq!(
        clobbered.message,
        "ERROR! KeepaliveQuery get result is TX-1"
    );
}

#[test]
fn test_init_rejects_other_function_names() {
    let db = FactoringDb::with_backend(MemoryStateStore::new(KeyLayout::Flat));

    let response = db.init_function("SaveData");
    assert_eq!(response.status, Status::Error);
    assert!(db.backend().is_empty());

    // Re-running init is harmless
    assert!(db.init().is_success());
    assert!(db.init().is_success());
    assert_eq!(db.backend().len(), 1);
}

#[test]
fn test_flat_layout_collision() {
    let db = create_test_db(KeyLayout::Flat);
    let record = r#"{"businessNo":"BN-1"}"#;
    save(&db, "TX-1", record);

    // A business number equal to an existing tx id overwrites that record
    save(&db, "TX-2", r#"{"businessNo":"TX-1"}"#);
    assert_eq!(
        query(&db, "QueryDataByFabricTxId", "TX-1").payload(),
        Some(&b"TX-2"[..])
    );
}

#[test]
fn test_namespaced_layout_avoids_collision() {
    let db = create_test_db(KeyLayout::Namespaced);
    let record = r#"{"businessNo":"BN-1"}"#;
    let colliding = r#"{"businessNo":"TX-1"}"#;
    save(&db, "TX-1", record);
    save(&db, "TX-2", colliding);

    assert_eq!(
        query(&db, "QueryDataByFabricTxId", "TX-1").payload(),
        Some(record.as_bytes())
    );
    assert_eq!(
        query(&db, "QueryDataByBusinessNo", "TX-1").payload(),
        Some(colliding.as_bytes())
    );
    assert_eq!(
        query(&db, "QueryDataByBusinessNo", "BN-1").payload(),
        Some(record.as_bytes())
    );

    // Sentinel keeps its fixed key
    assert_eq!(db.invoke("KeepaliveQuery", &[]).status, Status::Ok);
}

#[test]
fn test_unknown_function_fails() {
    let db = create_test_db(KeyLayout::Flat);
    let response = db.invoke("DeleteData", &["BN-1".to_string()]);
    assert_eq!(response.status, Status::Error);
    assert_eq!(response.status.code(), 500);
}
