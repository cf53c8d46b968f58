//! Classic tactical positions used by `quill bench` and the benchmarks,
//! described as piece lists.

use crate::errors::ChessResult;
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy)]
pub struct BenchPosition {
    pub name: &'static str,
    pub white: &'static str,
    pub black: &'static str,
    pub side_to_move: Color,
}

impl BenchPosition {
    pub fn position(&self) -> ChessResult<Position> {
        Position::from_piece_lists(self.white, self.black, self.side_to_move)
    }
}

pub const BENCH_POSITIONS: &[BenchPosition] = &[
    // 1.h8Q+ Kxh8 2.Ng4+ leads to a long forced king hunt.
    BenchPosition {
        name: "kaminer_1935",
        white: "Kd1,Qh2,Nh6,a4,g3,h7",
        black: "Kg7,Qe4,Bf6,b7,e6,g6",
        side_to_move: Color::White,
    },
    // 30...Rxb2! 31.Nxb2 c3 32.Rxb6 c4!!
    BenchPosition {
        name: "tylkowski_wojciechowski_1931",
        white: "Kg1,Rb7,Na4,a2,b2,f4,g2,g3",
        black: "Kh7,Rd2,Bb6,a7,c5,c4,g7,h6",
        side_to_move: Color::Black,
    },
    BenchPosition {
        name: "rotlewi_rubinstein_1907",
        white: "Kh1,Qe2,Ra1,Rf1,Bb2,Be4,Nc3,a3,b4,e5,f4,g2,h2",
        black: "Kg8,Qe7,Rc8,Rd8,Bb6,Bb7,Ng4,a6,b5,e6,f7,g7,h7",
        side_to_move: Color::Black,
    },
    // 17...Be6!!
    BenchPosition {
        name: "byrne_fischer_1956",
        white: "Ke1,Qa3,Rd1,Rh1,Bc4,Bc5,Nf3,a2,d4,f2,g2,h2",
        black: "Kg8,Qb6,Ra8,Rf8,Bg4,Bg7,Nc3,a7,b7,c6,f7,g6,h7",
        side_to_move: Color::Black,
    },
    // 17.h4!
    BenchPosition {
        name: "fischer_sherwin_1957",
        white: "Kg1,Qc2,Ra1,Re1,Bc1,Bg2,Ng5,a2,b2,c3,d4,f2,g3,h2",
        black: "Kg8,Qd6,Ra8,Rf8,Bc8,Nd5,Ng6,a7,b6,c4,e6,f7,g7,h7",
        side_to_move: Color::White,
    },
    // 30.Ba3!
    BenchPosition {
        name: "botvinnik_capablanca_1938",
        white: "Kg1,Qe5,Bb2,Ng3,c3,d4,e6,g2,h2",
        black: "Kg7,Qe7,Nb3,Nf6,a7,b6,c4,d5,g6,h7",
        side_to_move: Color::White,
    },
];

#[cfg(test)]
mod tests {
    use super::BENCH_POSITIONS;

    #[test]
    fn every_bench_position_sets_up() {
        for bench in BENCH_POSITIONS {
            let position = bench.position().expect("bench piece lists should parse");
            assert!(position.is_consistent(), "{} is inconsistent", bench.name);
            assert!(
                !position.is_in_check(position.side_to_move.opposite()),
                "{} leaves the side not to move in check",
                bench.name
            );
        }
    }
}
