use acctthrive_model::{ProgramConfig, Usd, UserId};
use acctthrive_referrals::{CountingEntropy, ManualClock, ReferralService};
use acctthrive_store::MemoryStore;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

type Service = ReferralService<MemoryStore, ManualClock, CountingEntropy>;

fn seeded_service(referred: usize) -> (Service, Vec<UserId>) {
    let mut svc = ReferralService::open(
        MemoryStore::new(),
        ManualClock::at_millis(1_700_000_000_000),
        CountingEntropy::default(),
        ProgramConfig::default(),
    )
    .expect("open");
    let code = svc
        .get_or_create_account(&UserId::parse("bench_referrer").expect("referrer"))
        .expect("account")
        .code
        .to_string();
    let users = (0..referred)
        .map(|i| UserId::parse(&format!("referred_{i}")).expect("referred"))
        .collect::<Vec<_>>();
    for user in &users {
        assert!(svc.record_referral(&code, user).expect("refer"));
    }
    (svc, users)
}

fn bench_deposit_processing(c: &mut Criterion) {
    c.bench_function("deposit_below_threshold_256_referrals", |b| {
        b.iter_batched(
            || seeded_service(256),
            |(mut svc, users)| {
                for user in &users {
                    black_box(svc.process_deposit(user, Usd::from_dollars(1)).expect("deposit"));
                }
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("deposit_qualifying_256_referrals", |b| {
        b.iter_batched(
            || seeded_service(256),
            |(mut svc, users)| {
                for user in &users {
                    black_box(svc.process_deposit(user, Usd::from_dollars(25)).expect("deposit"));
                }
            },
            BatchSize::SmallInput,
        )
    });

    let (svc, _) = seeded_service(256);
    let referrer = UserId::parse("bench_referrer").expect("referrer");
    c.bench_function("stats_256_referrals", |b| {
        b.iter(|| black_box(svc.stats(black_box(&referrer))))
    });
}

criterion_group!(benches, bench_deposit_processing);
criterion_main!(benches);
