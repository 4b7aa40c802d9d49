use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One scraped stats column. Declaration order is the column order of the
/// page table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Position,
    JerseyNumber,
    Rank,
    GamesPlayed,
    Goals,
    PenaltyMinutes,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Position,
        Field::JerseyNumber,
        Field::Rank,
        Field::GamesPlayed,
        Field::Goals,
        Field::PenaltyMinutes,
    ];

    /// Token the page embeds in the cell's class attribute.
    pub fn class_token(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Position => "position",
            Field::JerseyNumber => "jersey_number",
            Field::Rank => "rank",
            Field::GamesPlayed => "games_played",
            Field::Goals => "goals",
            Field::PenaltyMinutes => "penalty_minutes",
        }
    }
}

/// Inner markup of one matched table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCell {
    pub html: String,
}

impl RawCell {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

/// Per-field cell sequences for one page, in document order.
#[derive(Debug, Clone, Default)]
pub struct ExtractedFields {
    pub columns: BTreeMap<Field, Vec<RawCell>>,
    pub links: Vec<String>,
}

impl ExtractedFields {
    pub fn column_len(&self, field: Field) -> usize {
        self.columns.get(&field).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.column_len(Field::Name) == 0
    }
}

/// Raw, unvalidated cells for one player row.
#[derive(Debug, Clone)]
pub struct RawFieldBundle {
    pub row: usize,
    pub cells: BTreeMap<Field, RawCell>,
    pub link: String,
}

impl RawFieldBundle {
    pub fn cell(&self, field: Field) -> Option<&RawCell> {
        self.cells.get(&field)
    }
}

/// Normalized text fields of a player, before the photo is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerFields {
    pub name: String,
    pub position: String,
    pub number: String,
    pub rank: String,
    pub games_played: String,
    pub goals: String,
    pub penalty_minutes: String,
}

impl PlayerFields {
    pub fn with_photo(self, photo_path: String) -> PlayerRecord {
        PlayerRecord {
            name: self.name,
            position: self.position,
            number: self.number,
            rank: self.rank,
            games_played: self.games_played,
            goals: self.goals,
            penalty_minutes: self.penalty_minutes,
            photo_path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub position: String,
    pub number: String,
    pub rank: String,
    pub games_played: String,
    pub goals: String,
    pub penalty_minutes: String,
    pub photo_path: String,
}

impl PlayerRecord {
    /// Values in report column order, which differs from field order.
    pub fn report_row(&self) -> [&str; 8] {
        [
            self.name.as_str(),
            self.number.as_str(),
            self.rank.as_str(),
            self.position.as_str(),
            self.games_played.as_str(),
            self.goals.as_str(),
            self.penalty_minutes.as_str(),
            self.photo_path.as_str(),
        ]
    }
}

/// Players of one run keyed by name, kept in construction order.
///
/// A later record with an existing name replaces the earlier one in place.
#[derive(Debug, Default)]
pub struct PlayerRoster {
    records: Vec<PlayerRecord>,
    index: HashMap<String, usize>,
}

impl PlayerRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record that was overwritten, if any.
    pub fn insert(&mut self, record: PlayerRecord) -> Option<PlayerRecord> {
        match self.index.get(&record.name) {
            Some(&slot) => Some(std::mem::replace(&mut self.records[slot], record)),
            None => {
                self.index.insert(record.name.clone(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&PlayerRecord> {
        self.index.get(name).map(|&slot| &self.records[slot])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<PlayerRecord> {
        self.records
    }
}
