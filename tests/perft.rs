use quill_chess::game_state::chess_types::Position;
use quill_chess::move_generation::perft::perft;

fn nodes(fen: &str, depth: u8) -> u64 {
    let position = Position::from_fen(fen).expect("FEN should parse");
    perft(&position, depth).nodes
}

#[test]
fn rook_endgame_depth_four() {
    assert_eq!(nodes("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 4), 43_238);
}

#[test]
fn promotion_tangle_depth_three() {
    assert_eq!(
        nodes("r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1", 3),
        9_467
    );
}

#[test]
fn discovered_check_depth_three() {
    assert_eq!(
        nodes("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8", 3),
        62_379
    );
}

#[test]
fn symmetric_middlegame_depth_three() {
    assert_eq!(
        nodes("r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10", 3),
        89_890
    );
}

#[test]
fn kiwipete_depth_three() {
    assert_eq!(
        nodes("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1", 3),
        97_862
    );
}

#[test]
#[ignore = "slow in debug builds"]
fn start_position_depth_five() {
    assert_eq!(nodes("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 5), 4_865_609);
}
