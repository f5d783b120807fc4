use std::time::Instant;

use crate::board::Position;
use crate::core::Move;

/// Counts the leaf positions reached after `depth` plies of legal moves.
///
/// Depth one is answered straight from the move list without applying anything.
pub fn perft(pos: &Position, depth: usize) -> usize {
    if depth == 0 {
        return 1;
    }

    let move_list = pos.generate_moves();

    if depth == 1 {
        return move_list.len();
    }

    let mut nodes = 0;

    for &move_ in move_list.iter() {
        let mut child = *pos;
        child.make_move(move_);
        nodes += perft(&child, depth - 1);
    }

    nodes
}

/// Node counts split by root move, in generation order.
pub fn perft_divide(pos: &Position, depth: usize) -> Vec<(Move, usize)> {
    if depth == 0 {
        return Vec::new();
    }

    pos.generate_moves()
        .iter()
        .map(|&move_| {
            let mut child = *pos;
            child.make_move(move_);
            (move_, perft(&child, depth - 1))
        })
        .collect()
}

/// Prints a divide report for `pos` at `depth`, followed by the total and the speed.
pub fn perft_test(pos: &Position, depth: usize) -> usize {
    if depth <= 1 {
        let nodes = perft(pos, depth);
        println!("Total nodes: {nodes}");
        return nodes;
    }

    println!("=============== PERFT TEST ===============");
    println!("                 Depth: {depth}           ");
    println!("==========================================");

    let start = Instant::now();
    let divide = perft_divide(pos, depth);

    for (move_, nodes) in divide.iter() {
        println!("              {move_}: {nodes}");
    }

    let total_nodes: usize = divide.iter().map(|(_, nodes)| nodes).sum();
    let time = start.elapsed().as_millis().max(1);

    println!("=========================================");
    println!("              Nodes: {total_nodes}       ");
    println!("              Time: {time}ms             ");
    println!(
        "              Mnps: {:0.1}Mnps",
        (total_nodes as f64 / time as f64 / 1000.0)
    );
    println!("=========================================");

    total_nodes
}

/// FEN, depth and expected node count for the positions the bench runs through.
#[rustfmt::skip]
pub const BENCH_LIST: &[(&str, usize, usize)] = &[
    ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 6, 119060324),
    ("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1", 4, 4080784),
    ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 7, 178633661),
    ("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1", 4, 405001),
    ("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8", 5, 89941194),
    ("r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10", 5, 164075551),
    ("1k6/1b6/8/8/7R/8/8/4K2R b K - 0 1", 5, 1063513),
    ("3k4/3p4/8/K1P4r/8/8/8/8 b - - 0 1", 6, 1134888),
    ("8/8/4k3/8/2p5/8/B2P2K1/8 w - - 0 1", 6, 1015133),
    ("8/8/1k6/2b5/2pP4/8/5K2/8 b - d3 0 1", 6, 1440467),
    ("5k2/8/8/8/8/8/8/4K2R w K - 0 1", 6, 661072),
    ("3k4/8/8/8/8/8/8/R3K3 w Q - 0 1", 6, 803711),
    ("r3k2r/1b4bq/8/8/8/8/7B/R3K2R w KQkq - 0 1", 4, 1201723),
    ("r3k2r/8/3Q4/8/8/5q2/8/R3K2R b KQkq - 0 1", 4, 1711259),
    ("2K2r2/4P3/8/8/8/8/8/3k4 w - - 0 1", 6, 3821001),
    ("8/8/1P2K3/8/2n5/1q6/8/5k2 b - - 0 1", 5, 1004658),
    ("4k3/1P6/8/8/8/8/K7/8 w - - 0 1", 6, 217342),
    ("8/P1k5/K7/8/8/8/8/8 w - - 0 1", 6, 92683),
    ("K1k5/8/P7/8/8/8/8/8 w - - 0 1", 6, 2217),
    ("8/k1P5/8/1K6/8/8/8/8 w - - 0 1", 7, 567584),
    ("8/8/2k5/5q2/5n2/8/5K2/8 b - - 0 1", 4, 23527),
    ("4k3/8/8/8/8/8/8/4K2R w K - 0 1", 6, 764643),
    ("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1", 6, 846648),
    ("4k2r/8/8/8/8/8/8/4K3 w k - 0 1", 6, 899442),
    ("r3k3/8/8/8/8/8/8/4K3 w q - 0 1", 6, 1001523),
];

/// Runs every entry of [`BENCH_LIST`], printing one status line each.
///
/// Returns `false` if any count disagrees or a FEN fails to load.
pub fn perft_bench() -> bool {
    let mut passed = true;

    println!("=============  START BENCH  =============");

    for &(fen, depth, expected_nodes) in BENCH_LIST.iter() {
        let pos = match Position::from_fen(fen) {
            Ok(pos) => pos,
            Err(err) => {
                println!("status: FAILED, {err}, Fen: {fen}");
                passed = false;
                continue;
            }
        };

        let start = Instant::now();
        let nodes = perft(&pos, depth);
        let time = start.elapsed().as_millis().max(1);

        let status = if nodes == expected_nodes {
            "PASSED"
        } else {
            passed = false;
            "FAILED"
        };

        println!(
            "status: {status}, time: {time:4}ms, Mnps: {:0.1}, Fen: {fen}",
            (nodes as f64 / time as f64 / 1000.0)
        )
    }

    passed
}
