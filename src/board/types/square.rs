//! Square type and algebraic-notation helpers.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

/// A board square stored as a 0-63 index.
///
/// a1 = 0, h1 = 7, a8 = 56, h8 = 63; `rank = index / 8`, `file = index % 8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(u8);

impl Square {
    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize) -> Self {
        Square(idx as u8)
    }

    /// Build a square from rank and file, both 0-7. Unchecked; use
    /// `try_from((rank, file))` for validated construction.
    #[inline]
    #[must_use]
    pub const fn new(rank: usize, file: usize) -> Self {
        Square((rank * 8 + file) as u8)
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Rank 0-7, where 0 is rank 1.
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        (self.0 / 8) as usize
    }

    /// File 0-7, where 0 is file a.
    #[inline]
    #[must_use]
    pub const fn file(self) -> usize {
        (self.0 % 8) as usize
    }

    /// The square `delta` board steps away. Unchecked arithmetic; the
    /// caller is responsible for staying on the board.
    #[inline]
    #[must_use]
    pub(crate) const fn offset(self, delta: i8) -> Self {
        Square((self.0 as i8 + delta) as u8)
    }

    /// Mirror the square across the horizontal midline (a1 <-> a8).
    #[inline]
    #[must_use]
    pub const fn flip_vertical(self) -> Self {
        Square::new(7 - self.rank(), self.file())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (self.file() as u8 + b'a') as char, self.rank() + 1)
    }
}

impl TryFrom<(usize, usize)> for Square {
    type Error = SquareError;

    fn try_from((rank, file): (usize, usize)) -> Result<Self, Self::Error> {
        if rank >= 8 {
            return Err(SquareError::RankOutOfBounds { rank });
        }
        if file >= 8 {
            return Err(SquareError::FileOutOfBounds { file });
        }
        Ok(Square::new(rank, file))
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(f @ 'a'..='h'), Some(r @ '1'..='8'), None) => {
                (f as usize - 'a' as usize, r as usize - '1' as usize)
            }
            _ => {
                return Err(SquareError::InvalidNotation {
                    notation: s.to_string(),
                })
            }
        };
        Ok(Square::new(rank, file))
    }
}
