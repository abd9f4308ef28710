use acctthrive_core::canonical;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

fn bench_stable_json_bytes(c: &mut Criterion) {
    let payload = json!({
        "schema_version": 1,
        "next_sequence": 3,
        "accounts": [
            {"user_id": "user_123", "code": "US123456ABC", "total_referrals": 2},
            {"user_id": "user_456", "code": "US654321XYZ", "total_referrals": 0}
        ],
        "relationships": [
            {"id": "rec_1", "referrer_id": "user_123", "referred_user_id": "user_456", "status": "qualified"},
            {"id": "rec_2", "referrer_id": "user_123", "referred_user_id": "user_789", "status": "pending"}
        ]
    });

    c.bench_function("stable_json_bytes", |b| {
        b.iter(|| canonical::stable_json_bytes(black_box(&payload)).expect("stable json"))
    });
}

criterion_group!(benches, bench_stable_json_bytes);
criterion_main!(benches);
