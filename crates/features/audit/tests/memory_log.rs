use chrono::{DateTime, Duration, TimeZone, Utc};
use csign_audit::{AuditQuery, AuditSink, MemoryAuditLog, SignatureAuditRecord};
use csign_domain::{ActivationStatus, ReasonCode, SignatureType};
use std::sync::Arc;

fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes)
}

fn record(user: &str, app: &str, minutes: i64) -> SignatureAuditRecord {
    SignatureAuditRecord {
        activation_id: format!("{user}-device"),
        user_id: user.to_owned(),
        application_id: app.to_owned(),
        signature_type: SignatureType::PossessionKnowledge,
        payload: b"data&secret".to_vec(),
        valid: true,
        reason: ReasonCode::SignatureOk,
        counter: 1,
        status: ActivationStatus::Active,
        timestamp: at(minutes),
    }
}

#[tokio::test]
async fn query_filters_and_orders_by_timestamp() {
    let log = MemoryAuditLog::new();
    for r in [
        record("alice", "bank", 30),
        record("alice", "bank", 10),
        record("alice", "shop", 20),
        record("bob", "bank", 15),
    ] {
        log.record(r).await.unwrap();
    }

    let all = log.query(&AuditQuery::for_user("alice"));
    let times: Vec<_> = all.iter().map(|r| r.timestamp).collect();
    assert_eq!(times, vec![at(10), at(20), at(30)]);

    let bank = log.query(&AuditQuery::for_user("alice").application("bank"));
    assert_eq!(bank.len(), 2);
    assert!(bank.iter().all(|r| r.application_id == "bank"));

    assert!(log.query(&AuditQuery::for_user("carol")).is_empty());
}

#[tokio::test]
async fn time_bounds_are_inclusive() {
    let log = MemoryAuditLog::new();
    for minutes in [0, 10, 20, 30] {
        log.record(record("alice", "bank", minutes)).await.unwrap();
    }

    let window = AuditQuery::for_user("alice").between(Some(at(10)), Some(at(20)));
    assert_eq!(log.query(&window).len(), 2);

    let open_end = AuditQuery::for_user("alice").between(Some(at(20)), None);
    assert_eq!(log.query(&open_end).len(), 2);

    let open_start = AuditQuery::for_user("alice").between(None, Some(at(0)));
    assert_eq!(log.query(&open_start).len(), 1);
}

#[tokio::test]
async fn shared_log_receives_records_through_arc() {
    let log = Arc::new(MemoryAuditLog::new());
    let sink = Arc::clone(&log);

    sink.record(record("alice", "bank", 0)).await.unwrap();

    assert_eq!(log.len(), 1);
    assert_eq!(log.for_activation("alice-device")[0].payload_text(), "data&secret");
}

#[test]
fn record_serializes_with_wire_labels() {
    let json = serde_json::to_value(record("alice", "bank", 0)).unwrap();
    assert_eq!(json["signatureType"], "possession_knowledge");
    assert_eq!(json["reason"], "signature_ok");
    assert_eq!(json["status"], "ACTIVE");
}
