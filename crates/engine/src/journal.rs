//! Journal module - serializable record of every decision
//!
//! Each discard and selection the session makes is appended as a
//! [`JournalEntry`]. Entries collect in memory and can be written out as
//! JSON lines for offline inspection; nothing in the decision path depends
//! on the journal.

use std::io::{self, Write};

use serde::Serialize;

use mahjong_pilot_types::{GameStage, Tile};

/// What kind of decision an entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Discard,
    Select,
}

/// One journaled decision
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntry {
    /// Turn count at decision time
    pub turn: u32,
    pub kind: EntryKind,
    /// Chosen tile in canonical notation (`Wan3`, `Wind1`)
    pub tile: String,
    /// Delay attached to the decision, in seconds
    pub delay: f64,
    /// Game stage at decision time
    pub stage: &'static str,
    /// Stage-weighted score the tile carried into the choice
    pub score: f64,
}

impl JournalEntry {
    pub fn new(
        kind: EntryKind,
        turn: u32,
        tile: Tile,
        delay: f64,
        stage: GameStage,
        score: f64,
    ) -> Self {
        Self {
            turn,
            kind,
            tile: tile.to_string(),
            delay,
            stage: stage.as_str(),
            score,
        }
    }
}

/// In-memory collection of journal entries
#[derive(Debug, Clone, Default)]
pub struct DecisionJournal {
    entries: Vec<JournalEntry>,
}

impl DecisionJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write every entry as one JSON object per line
    pub fn write_json_lines<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for entry in &self.entries {
            let line = serde_json::to_string(entry).map_err(io::Error::other)?;
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }
}
