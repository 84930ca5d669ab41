use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tcg_sim::core::SimRng;
use tcg_sim::defs::Definitions;
use tcg_sim::draw::{Expansion, Pack};
use tcg_sim::sim::{complete_expansion, NullSink, SnapshotPolicy};
use tcg_sim::Player;

fn data_defs() -> Definitions {
    Definitions::from_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
}

fn registered_player(defs: &Definitions, names: &[&str]) -> Player {
    let mut player = Player::new("bench");
    for name in names {
        if let Ok(expansion) = Expansion::load(defs, name) {
            expansion.register(&mut player.collection);
        }
    }
    player
}

fn open_pack_bench(c: &mut Criterion) {
    let defs = data_defs();
    let mut group = c.benchmark_group("open_pack");

    for name in ["base_common", "base_rare", "destiny_common"] {
        let prefix = name.split('_').next().unwrap_or(name);
        let registered: Vec<String> = ["common", "rare", "epic", "legendary"]
            .iter()
            .map(|tier| format!("{prefix}_{tier}"))
            .collect();
        let names: Vec<&str> = registered.iter().map(String::as_str).collect();
        let pack = Pack::load(&defs, name).expect("pack loads");
        let mut player = registered_player(&defs, &names);
        let mut rng = SimRng::new(42);

        group.bench_function(name, |b| {
            b.iter(|| black_box(pack.open(&mut player.collection, &mut rng).expect("opens")))
        });
    }
    group.finish();
}

fn complete_bench(c: &mut Criterion) {
    let defs = data_defs();
    let expansion = Expansion::load(&defs, "ghost").expect("expansion loads");
    let pack = Pack::load(&defs, "ghost").expect("pack loads");
    let mut seed = 0u64;

    c.bench_function("complete_ghost", |b| {
        b.iter(|| {
            seed += 1;
            let mut player = registered_player(&defs, &["ghost"]);
            let report = complete_expansion(
                &mut player,
                &expansion,
                &pack,
                &mut SimRng::new(seed),
                &SnapshotPolicy::never(),
                &mut NullSink,
            )
            .expect("completes");
            black_box(report.packs_opened)
        })
    });
}

criterion_group!(benches, open_pack_bench, complete_bench);
criterion_main!(benches);
