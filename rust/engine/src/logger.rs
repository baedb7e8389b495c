use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::Street;
use crate::pot::{HandResult, Payout};
use crate::rules::ValidatedAction;

/// Records a single player action during a hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: String,
    /// The betting street when this action occurred
    pub street: Street,
    pub action: ValidatedAction,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub timed_out: bool,
}

/// Who won at showdown and what they were paid.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    pub winners: Vec<String>,
    pub payouts: Vec<Payout>,
    /// e.g. "Flush, Ace high" or "uncontested"
    #[serde(default)]
    pub notes: Option<String>,
}

impl ShowdownInfo {
    pub fn from_result(result: &HandResult) -> Self {
        let notes = if result.showdown {
            result
                .shown
                .iter()
                .find(|s| result.winners.contains(&s.player))
                .map(|s| s.hand.to_string())
        } else {
            Some("uncontested".to_string())
        };
        Self {
            winners: result.winners.clone(),
            payouts: result.payouts.clone(),
            notes,
        }
    }
}

/// Complete record of one hand, written as a single JSON line.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    pub hand_number: u32,
    /// Seed of the match RNG, when one was given
    pub seed: Option<u64>,
    pub small_blind: u32,
    pub players: Vec<String>,
    /// Chronological list of all player actions
    pub actions: Vec<ActionRecord>,
    pub board: Vec<Card>,
    pub pot: u32,
    /// Timestamp when the hand was played (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Appends [`HandRecord`]s to a JSONL file and hands out sequential ids.
pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    /// Opens (or creates) `path` for appending, creating parent directories.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Local::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// Logger that only numbers hands; nothing is written.
    pub fn in_memory(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn with_date(mut self, yyyymmdd: &str) -> Self {
        self.date = yyyymmdd.to_string();
        self
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
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
}
