//! JSONL effect journal: one line per effect lifecycle event.
//!
//! ```text
//! {"ts_ms":1712345678901,"effect":3,"kind":"glitch","event":"started"}
//! {"ts_ms":1712345680902,"effect":3,"kind":"glitch","event":"completed"}
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{EffectId, Finished};
use crate::types::{EffectKind, StopReason};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalEvent {
    Started,
    Completed,
    Cancelled,
    Failed,
}

impl From<StopReason> for JournalEvent {
    fn from(reason: StopReason) -> Self {
        match reason {
            StopReason::Completed => JournalEvent::Completed,
            StopReason::Cancelled => JournalEvent::Cancelled,
            StopReason::Failed => JournalEvent::Failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRecord {
    pub ts_ms: u64,
    pub effect: u64,
    pub kind: String,
    pub event: JournalEvent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JournalRecord {
    pub fn started(id: EffectId, kind: EffectKind) -> Self {
        Self {
            ts_ms: now_ms(),
            effect: id.get(),
            kind: kind.as_str().to_string(),
            event: JournalEvent::Started,
            error: None,
        }
    }

    pub fn finished(finished: &Finished) -> Self {
        Self {
            ts_ms: now_ms(),
            effect: finished.id.get(),
            kind: finished.kind.as_str().to_string(),
            event: finished.reason.into(),
            error: finished.error.as_ref().map(ToString::to_string),
        }
    }
}

pub struct EffectJournal {
    out: BufWriter<File>,
    buf: Vec<u8>,
}

impl EffectJournal {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening effect journal {}", path.display()))?;
        Ok(Self {
            out: BufWriter::new(file),
            buf: Vec::with_capacity(256),
        })
    }

    /// Append one record and flush it.
    pub fn record(&mut self, rec: &JournalRecord) -> Result<()> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, rec)?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
