//! hvk-config
//!
//! Tamper-policy loading, validation, and fingerprinting, plus the privilege
//! flag the gate consumes.
//!
//! Every threshold the merged page scripts hard-coded (and disagreed on) is
//! a policy knob here with a serde default. The policy fingerprint is a
//! SHA-256 over canonical JSON so an audit record can be tied to the exact
//! policy that produced it.

use anyhow::{Context, Result};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

mod policy;
mod privilege;

pub use policy::{
    default_key_triggers, AggregationPolicy, AuditPolicy, FingerprintPolicy, KeyChord,
    LockScreenPolicy, MutationPolicy, RecoveryPolicyConfig, SizeDeltaPolicy, SourcesPolicy,
    TamperPolicy, Thresholds, TimingPolicy, TimingProbe, KNOWN_SOURCE_NAMES,
};
pub use privilege::PrivilegeSignals;

/// Load and validate a policy file. YAML unless the extension says `.json`.
pub fn load_policy(path: impl AsRef<Path>) -> Result<TamperPolicy> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read policy {:?}", path))?;

    let policy: TamperPolicy = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => {
            serde_json::from_str(&raw).with_context(|| format!("parse policy json {:?}", path))?
        }
        _ => serde_yaml::from_str(&raw).with_context(|| format!("parse policy yaml {:?}", path))?,
    };

    policy.validate()?;
    Ok(policy)
}

/// Build a policy from an already-parsed JSON value (e.g. a server-injected
/// config blob).
pub fn policy_from_json(value: &Value) -> Result<TamperPolicy> {
    let policy: TamperPolicy =
        serde_json::from_value(value.clone()).context("parse policy from json value")?;
    policy.validate()?;
    Ok(policy)
}

/// SHA-256 fingerprint of the effective policy over canonical (sorted-key,
/// compact) JSON.
pub fn policy_fingerprint(policy: &TamperPolicy) -> Result<String> {
    let raw = serde_json::to_value(policy).context("serialize policy for fingerprint")?;
    let canonical =
        serde_json::to_string(&sort_keys(&raw)).context("stringify canonical policy")?;

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Canonicalize by sorting object keys recursively.
fn sort_keys(v: &Value) -> Value {
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
