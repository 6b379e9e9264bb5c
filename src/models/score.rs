//! Score and grade derived from a nutrition record

use serde::{Deserialize, Serialize};

/// Letter grade, A best and E worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
}

impl Grade {
    /// Map a score onto its grade band.
    ///
    /// Scores of -1, 2 and 10 sit between the bands and resolve to E.
    pub fn from_score(score: i32) -> Self {
        match score {
            i32::MIN..=-2 => Grade::A,
            0..=1 => Grade::B,
            3..=9 => Grade::C,
            11..=18 => Grade::D,
            19.. => Grade::E,
            // -1, 2, 10: unconfirmed with product owners, kept as E
            _ => Grade::E,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score, grade and display total for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub score: i32,
    pub grade: Grade,
    pub total: i64,
}
