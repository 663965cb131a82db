use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use pgn_replay::game_state::chess_types::Board;
use pgn_replay::notation::movetext_parser::parse_movetext;
use pgn_replay::utils::replay::{replay_mainline, replay_tree};

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    movetext: &'static str,
    expected_plies: usize,
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "opera_game",
        movetext: "1. e4 e5 2. Nf3 d6 3. d4 Bg4 4. dxe5 Bxf3 5. Qxf3 dxe5 6. Bc4 Nf6 \
                   7. Qb3 Qe7 8. Nc3 c6 9. Bg5 b5 10. Nxb5 cxb5 11. Bxb5+ Nbd7 \
                   12. O-O-O Rd8 13. Rxd7 Rxd7 14. Rd1 Qe6 15. Bxd7+ Nxd7 \
                   16. Qb8+ Nxb8 17. Rd8# 1-0",
        expected_plies: 33,
    },
    BenchCase {
        name: "annotated_ruy_lopez",
        movetext: "{Main line} 1. e4 e5 2. Nf3 Nc6 3. Bb5 $1 (3. Bc4 Bc5 (3... Nf6 \
                   4. Ng5 d5) 4. c3) 3... a6 4. Ba4 Nf6 5. O-O Be7 (5... Nxe4 6. d4) \
                   6. Re1 b5 7. Bb3 d6 8. c3 O-O 9. h3 Nb8!? 10. d4 Nbd7 *",
        expected_plies: 20,
    },
];

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("movetext_parse");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for case in CASES {
        // Correctness guard before benchmarking.
        let variation = parse_movetext(case.movetext).expect("benchmark movetext should parse");
        assert_eq!(variation.len(), case.expected_plies, "ply mismatch for {}", case.name);

        group.throughput(Throughput::Bytes(case.movetext.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(case.name), case, |b, case| {
            b.iter(|| {
                let variation = parse_movetext(black_box(case.movetext))
                    .expect("benchmark parse should succeed");
                black_box(variation.len())
            });
        });
    }

    group.finish();
}

fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("movetext_replay");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));

    for case in CASES {
        let variation = parse_movetext(case.movetext).expect("benchmark movetext should parse");
        let fens = replay_mainline(&mut Board::new(), &variation)
            .expect("benchmark main line should replay");
        assert_eq!(fens.len(), case.expected_plies);

        group.throughput(Throughput::Elements(variation.total_plies() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(case.name),
            &variation,
            |b, variation| {
                b.iter(|| {
                    let mut board = Board::new();
                    let nodes = replay_tree(&mut board, black_box(variation))
                        .expect("benchmark replay should succeed");
                    black_box(nodes.len())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(movetext_benches, bench_parse, bench_replay);
criterion_main!(movetext_benches);
