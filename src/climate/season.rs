//! Seasonal groupings of calendar months
//!
//! The source dataset reports one mean temperature per season. The four
//! seasons partition the twelve calendar months with no overlap and no gaps.

use std::fmt;

/// One of the four fixed multi-month groupings in the seasonal dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Season {
    /// January and February
    JanFeb,
    /// March to May
    MarMay,
    /// June to September
    JunSep,
    /// October to December
    OctDec,
}

impl Season {
    /// All seasons in expansion order
    pub const ALL: [Season; 4] = [
        Season::JanFeb,
        Season::MarMay,
        Season::JunSep,
        Season::OctDec,
    ];

    /// Column label used in the input table
    pub fn label(self) -> &'static str {
        match self {
            Season::JanFeb => "JAN-FEB",
            Season::MarMay => "MAR-MAY",
            Season::JunSep => "JUN-SEP",
            Season::OctDec => "OCT-DEC",
        }
    }

    /// Calendar months (1-12) covered by this season, ascending
    pub fn months(self) -> &'static [u32] {
        match self {
            Season::JanFeb => &[1, 2],
            Season::MarMay => &[3, 4, 5],
            Season::JunSep => &[6, 7, 8, 9],
            Season::OctDec => &[10, 11, 12],
        }
    }

    /// Season owning a calendar month, None outside 1-12
    pub fn of_month(month: u32) -> Option<Season> {
        Season::ALL
            .into_iter()
            .find(|season| season.months().contains(&month))
    }

    /// Position of this season in `Season::ALL`
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
