//! Symbol definitions

use std::fmt;

use serde::{Deserialize, Serialize};

/// A reel symbol
///
/// Declared from the lowest paying token to the highest. The discriminant is
/// the symbol's index in [`Symbol::ALL`] and in per-symbol tables
/// (paytable rows, distribution weights).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Symbol {
    Cherry = 0,
    Lemon = 1,
    Orange = 2,
    Plum = 3,
    Bell = 4,
    Bar = 5,
    Seven = 6,
}

impl Symbol {
    /// Number of distinct symbols
    pub const COUNT: usize = 7;

    /// Every symbol, in index order
    pub const ALL: [Symbol; Self::COUNT] = [
        Symbol::Cherry,
        Symbol::Lemon,
        Symbol::Orange,
        Symbol::Plum,
        Symbol::Bell,
        Symbol::Bar,
        Symbol::Seven,
    ];

    /// Index into per-symbol tables
    pub fn index(self) -> usize {
        self as usize
    }

    /// Symbol at a table index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Symbol::Cherry => "Cherry",
            Symbol::Lemon => "Lemon",
            Symbol::Orange => "Orange",
            Symbol::Plum => "Plum",
            Symbol::Bell => "Bell",
            Symbol::Bar => "Bar",
            Symbol::Seven => "Seven",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
