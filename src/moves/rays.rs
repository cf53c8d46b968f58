//! Directional ray tables for sliding pieces.
//!
//! `RAYS[dir][sq]` holds every square reached from `sq` walking in `dir` on an
//! empty board. Blocked attacks are cut at the nearest occupied square with a
//! single bit scan: lowest bit for directions that increase the square index,
//! highest bit for the others.

use crate::game_state::chess_types::{Bitboard, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    const fn steps(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
        }
    }

    #[inline]
    const fn increases_index(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::NorthEast | Direction::East | Direction::NorthWest
        )
    }

    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }
}

pub const RAYS: [[u64; 64]; 8] = generate_rays();

const fn generate_rays() -> [[u64; 64]; 8] {
    let mut table = [[0u64; 64]; 8];
    let mut dir = 0usize;

    while dir < 8 {
        let (file_step, rank_step) = Direction::ALL[dir].steps();
        let mut sq = 0usize;
        while sq < 64 {
            let mut file = (sq % 8) as i32 + file_step;
            let mut rank = (sq / 8) as i32 + rank_step;
            let mut ray = 0u64;
            while file >= 0 && file < 8 && rank >= 0 && rank < 8 {
                ray |= 1u64 << (rank * 8 + file);
                file += file_step;
                rank += rank_step;
            }
            table[dir][sq] = ray;
            sq += 1;
        }
        dir += 1;
    }

    table
}

#[inline]
pub const fn ray(direction: Direction, square: Square) -> Bitboard {
    Bitboard(RAYS[direction.index()][square as usize])
}

/// Squares attacked along `direction`, up to and including the first blocker.
#[inline]
pub fn ray_attacks(square: Square, direction: Direction, occupancy: Bitboard) -> Bitboard {
    let full = RAYS[direction.index()][square as usize];
    let blockers = full & occupancy.0;
    if blockers == 0 {
        return Bitboard(full);
    }

    let blocker = if direction.increases_index() {
        blockers.trailing_zeros()
    } else {
        63 - blockers.leading_zeros()
    };
    Bitboard(full ^ RAYS[direction.index()][blocker as usize])
}

/// Squares strictly between two aligned squares, empty when not aligned.
pub fn between(a: Square, b: Square) -> Bitboard {
    for direction in Direction::ALL {
        if ray(direction, a).contains(b) {
            return ray(direction, a) & ray(direction.opposite(), b);
        }
    }
    Bitboard::EMPTY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn north_ray_from_a1_covers_the_a_file() {
        assert_eq!(ray(Direction::North, 0).count(), 7);
        assert!(ray(Direction::North, 0).contains(56));
    }

    #[test]
    fn blocked_ray_stops_on_the_blocker() {
        let occupancy = Bitboard::bit(24) | Bitboard::bit(40);
        let attacks = ray_attacks(0, Direction::North, occupancy);
        assert_eq!(attacks, Bitboard::bit(8) | Bitboard::bit(16) | Bitboard::bit(24));

        let down = ray_attacks(56, Direction::South, occupancy);
        assert_eq!(down, Bitboard::bit(48) | Bitboard::bit(40));
    }

    #[test]
    fn between_on_diagonal_and_unaligned() {
        // c1 .. f4
        assert_eq!(between(2, 29), Bitboard::bit(11) | Bitboard::bit(20));
        // a1 .. b3 is a knight jump
        assert_eq!(between(0, 17), Bitboard::EMPTY);
        // adjacent squares have nothing between them
        assert_eq!(between(0, 1), Bitboard::EMPTY);
    }
}
