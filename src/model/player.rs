use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// A normalized player record from a team roster page.
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    /// Stable identifier, unique within a team's roster snapshot.
    pub id: String,
    /// Display name as shown on the roster page.
    pub name: String,
    /// Canonical team code (e.g. `NYY`).
    pub team: String,
    /// Fielding position; `Unknown` when the cell could not be parsed.
    pub position: Position,
    /// Which stat table this record was read from.
    pub stat_type: StatType,
    /// Statistic name to value, keyed by the origin column name.
    pub stats: BTreeMap<String, StatValue>,
    /// When the source page was fetched.
    pub fetched_at: DateTime<Utc>,
}

/// A single statistic cell value.
///
/// Numeric columns are coerced to numbers; anything else is kept as text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

/// Fielding positions as abbreviated on roster pages.
#[derive(
    Debug, Clone, Copy, Hash, Eq, PartialEq, strum_macros::Display, strum_macros::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Position {
    #[strum(serialize = "C")]
    Catcher,
    #[strum(serialize = "1B")]
    FirstBase,
    #[strum(serialize = "2B")]
    SecondBase,
    #[strum(serialize = "3B")]
    ThirdBase,
    #[strum(serialize = "SS")]
    Shortstop,
    #[strum(serialize = "LF")]
    LeftField,
    #[strum(serialize = "CF")]
    CenterField,
    #[strum(serialize = "RF")]
    RightField,
    #[strum(serialize = "DH")]
    DesignatedHitter,
    #[strum(serialize = "SP")]
    StartingPitcher,
    #[strum(serialize = "RP")]
    ReliefPitcher,
    #[strum(serialize = "P")]
    Pitcher,
    #[strum(serialize = "UNKNOWN")]
    Unknown,
}

impl Position {
    /// Parse a roster-page position cell, mapping unrecognized or empty
    /// text to [`Position::Unknown`].
    pub fn parse_lenient(text: &str) -> Self {
        text.trim().parse().unwrap_or(Position::Unknown)
    }
}

// Serialize as the abbreviation, not the variant name.
impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Which statistics table a query reads: batting or pitching lines.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum StatType {
    #[default]
    #[strum(serialize = "hitting")]
    Hitting,
    #[strum(serialize = "pitching")]
    Pitching,
}

impl Serialize for StatType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
