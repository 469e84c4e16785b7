//! hvk-audit
//!
//! Append-only lockdown-episode log. One JSON line per episode event, with
//! an optional SHA-256 hash chain so post-incident review can tell whether
//! the log itself was edited.
//!
//! The engine writes here exactly twice per episode at most: once when a
//! page locks, and once if the soft recovery path requests a reload. The
//! page's own console is already neutered by then; this log is the
//! server-side (or host-side) record.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Append-only episode writer.
pub struct EpisodeLog {
    path: PathBuf,
    hash_chain: bool,
    last_hash: Option<String>,
    /// Increments on every append; feeds deterministic episode-id derivation.
    seq: u64,
}

impl EpisodeLog {
    /// Creates the log and ensures parent dirs exist. When the file already
    /// holds records (the audit path is a fixed policy knob, so successive
    /// page loads share it), chain state resumes from the last line instead
    /// of restarting at genesis and breaking verification.
    pub fn new(path: impl AsRef<Path>, hash_chain: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create_dir_all {:?}", parent))?;
        }

        let mut last_hash = None;
        let mut seq = 0;
        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("read existing episode log {:?}", path))?;
            for line in content.lines().filter(|l| !l.trim().is_empty()) {
                let record: EpisodeRecord = serde_json::from_str(line.trim())
                    .with_context(|| format!("parse existing episode log {:?}", path))?;
                last_hash = record.hash_self;
                seq += 1;
            }
        }

        Ok(Self {
            path,
            hash_chain,
            last_hash,
            seq,
        })
    }

    /// Append one episode event.
    pub fn append(
        &mut self,
        page_load_id: Uuid,
        at_ms: u64,
        kind: EpisodeKind,
        trigger: &str,
        score: f64,
        policy_fingerprint: &str,
    ) -> Result<EpisodeRecord> {
        // Episode id derived from chain state + seq: deterministic, no RNG.
        let episode_id = derive_episode_id(self.last_hash.as_deref(), self.seq);
        self.seq += 1;

        let mut record = EpisodeRecord {
            episode_id,
            page_load_id,
            ts_utc: Utc::now(),
            at_ms,
            kind,
            trigger: trigger.to_string(),
            score,
            policy_fingerprint: policy_fingerprint.to_string(),
            hash_prev: None,
            hash_self: None,
        };

        if self.hash_chain {
            record.hash_prev = self.last_hash.clone();
            let self_hash = compute_record_hash(&record)?;
            record.hash_self = Some(self_hash.clone());
            self.last_hash = Some(self_hash);
        }

        let line = canonical_json_line(&record)?;
        append_line(&self.path, &line)?;

        Ok(record)
    }
}

/// What the episode event records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeKind {
    Locked,
    ReloadRequested,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub episode_id: Uuid,
    /// Fresh per page load; ties multi-event episodes together.
    pub page_load_id: Uuid,
    pub ts_utc: DateTime<Utc>,
    /// Host-monotonic milliseconds at the controller tick.
    pub at_ms: u64,
    pub kind: EpisodeKind,
    /// Reason string from the controller (e.g. "key_trigger",
    /// "strong_signal").
    pub trigger: String,
    pub score: f64,
    pub policy_fingerprint: String,
    pub hash_prev: Option<String>,
    pub hash_self: Option<String>,
}

/// Deterministic v5 UUID from the chain position.
fn derive_episode_id(last_hash: Option<&str>, seq: u64) -> Uuid {
    let material = format!("hvk-episode:{}:{}", last_hash.unwrap_or("genesis"), seq);
    Uuid::new_v5(&Uuid::NAMESPACE_OID, material.as_bytes())
}

fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut f = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open episode log {:?}", path))?;
    f.write_all(line.as_bytes()).context("write episode line")?;
    f.write_all(b"\n").context("write newline")?;
    Ok(())
}

/// Canonicalize by sorting keys recursively; one record == one JSON line.
fn canonical_json_line<T: Serialize>(v: &T) -> Result<String> {
    let raw = serde_json::to_value(v).context("serialize episode record")?;
    let sorted = sort_keys(&raw);
    serde_json::to_string(&sorted).context("stringify episode record")
}

fn sort_keys(v: &serde_json::Value) -> serde_json::Value {
    use serde_json::Value;
    match v {
        Value::Object(map) => {
            let mut keys: Vec<_> = map.keys().cloned().collect();
            keys.sort();
            let mut new = serde_json::Map::new();
            for k in keys {
                new.insert(k.clone(), sort_keys(&map[&k]));
            }
            Value::Object(new)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_keys).collect()),
        _ => v.clone(),
    }
}

/// Chain hash over canonical JSON of the record WITHOUT `hash_self`.
pub fn compute_record_hash(record: &EpisodeRecord) -> Result<String> {
    let mut clone = record.clone();
    clone.hash_self = None;

    let canonical = canonical_json_line(&clone)?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyResult {
    Valid { lines: usize },
    Broken { line: usize, reason: String },
}

/// Verify the hash-chain integrity of an episode log file.
pub fn verify_chain(path: impl AsRef<Path>) -> Result<VerifyResult> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("read episode log {:?}", path.as_ref()))?;
    verify_chain_str(&content)
}

/// Same as [`verify_chain`] over in-memory JSONL content.
pub fn verify_chain_str(content: &str) -> Result<VerifyResult> {
    let mut prev_hash: Option<String> = None;
    let mut line_count = 0usize;

    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let record: EpisodeRecord = serde_json::from_str(trimmed)
            .with_context(|| format!("parse episode record at line {}", i + 1))?;
        line_count += 1;

        if record.hash_prev != prev_hash {
            return Ok(VerifyResult::Broken {
                line: i + 1,
                reason: format!(
                    "hash_prev mismatch: expected {:?}, got {:?}",
                    prev_hash, record.hash_prev
                ),
            });
        }

        // Unchained records carry no hash_self; there is nothing to check.
        if let Some(claimed) = record.hash_self.as_deref() {
            let expected_self = compute_record_hash(&record)?;
            if claimed != expected_self {
                return Ok(VerifyResult::Broken {
                    line: i + 1,
                    reason: format!(
                        "hash_self mismatch: expected {:?}, got {:?}",
                        expected_self, record.hash_self
                    ),
                });
            }
        }

        prev_hash = record.hash_self.clone();
    }

    Ok(VerifyResult::Valid { lines: line_count })
}
