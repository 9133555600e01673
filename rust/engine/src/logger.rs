use serde::{Deserialize, Serialize};

use crate::dice::Face;
use crate::engine::{GameEngine, SubmitOutcome};
use crate::hands::HandId;

/// How a submitted hand left its pot.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandOutcome {
    /// The pot goes on with the next hand
    Continue,
    Cleared,
    Failed,
}

/// One submitted hand, serialized as a JSONL line of the hand history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// Run seed, enough to replay the whole run
    pub seed: u64,
    pub floor: u32,
    pub pot_in_floor: u32,
    pub global_pot_number: u32,
    /// 1-based hand number inside the pot
    pub hand_number: u32,
    pub faces: Vec<Face>,
    pub hand: HandId,
    pub total_heat: u32,
    pub pot_heat: u32,
    pub pot_target: u32,
    pub outcome: HandOutcome,
    #[serde(default)]
    pub chips_gained: u32,
    /// Timestamp when the hand was played (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl HandRecord {
    /// Builds the record for `outcome`, which must be the engine's latest
    /// submission.
    pub fn from_submission(hand_id: String, engine: &GameEngine, outcome: &SubmitOutcome) -> Self {
        let s = engine.state();
        let ps = &s.pot_state;
        let result = if outcome.pot_cleared {
            HandOutcome::Cleared
        } else if outcome.pot_failed {
            HandOutcome::Failed
        } else {
            HandOutcome::Continue
        };
        Self {
            hand_id,
            seed: s.seed,
            floor: s.floor,
            pot_in_floor: s.pot_in_floor,
            global_pot_number: s.global_pot_number,
            hand_number: ps.current_hand_index(),
            faces: outcome.result.faces.clone(),
            hand: outcome.result.hand_id,
            total_heat: outcome.result.total_heat,
            pot_heat: ps.pot_heat(),
            pot_target: ps.pot_target(),
            outcome: result,
            chips_gained: outcome.chips_gained,
            ts: None,
        }
    }
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends [`HandRecord`]s to a JSONL hand history.
pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    /// Creates (truncating) a history file.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        ensure_parent(path.as_ref());
        let f = File::create(path)?;
        Ok(Self::with_writer(f))
    }

    /// Opens a history file for appending, creating it if needed.
    pub fn append<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        ensure_parent(path.as_ref());
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::with_writer(f))
    }

    fn with_writer(f: File) -> Self {
        Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        }
    }

    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }

    /// Records the engine's latest submission under a fresh id.
    pub fn record(&mut self, engine: &GameEngine, outcome: &SubmitOutcome) -> std::io::Result<()> {
        let id = self.next_id();
        self.write(&HandRecord::from_submission(id, engine, outcome))
    }
}

fn ensure_parent(path: &Path) {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            let _ = create_dir_all(parent);
        }
    }
}
