use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use csign_crypto::prelude::{DerivedKey, MasterSecret, derive_signature_keys};
use csign_domain::SignatureType;
use csign_signature::ReplayWindow;
use std::hint::black_box;

fn bench_window_miss(c: &mut Criterion) {
    let master = MasterSecret::from_bytes([0x5a; 16]);
    let payload = b"POST&/pa/signature/validate&bm9uY2U=&app-secret";
    let mut group = c.benchmark_group("replay_window_miss");

    for ty in [SignatureType::Possession, SignatureType::PossessionKnowledgeBiometry] {
        let keys = derive_signature_keys(ty, &master);
        let signature = vec!["00000000"; ty.factor_count()].join("-");

        for lookahead in [1u32, 20, 100] {
            let window = ReplayWindow::new(lookahead).unwrap();
            group.bench_with_input(BenchmarkId::new(ty.to_string(), lookahead), &window, |b, w| {
                b.iter(|| w.verify(black_box(payload), black_box(&signature), &keys, 1_000));
            });
        }
    }
    group.finish();
}

fn bench_key_derivation(c: &mut Criterion) {
    let master = DerivedKey::from_bytes([0x5a; 16]);
    c.bench_function("derive_signature_keys_pkb", |b| {
        b.iter(|| derive_signature_keys(black_box(SignatureType::PossessionKnowledgeBiometry), &master));
    });
}

criterion_group!(benches, bench_window_miss, bench_key_derivation);
criterion_main!(benches);
