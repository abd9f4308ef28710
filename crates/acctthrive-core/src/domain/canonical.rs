// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::errors::Result;

struct Hash256([u8; 32]);

impl Hash256 {
    fn to_hex(&self) -> String {
        let mut out = String::with_capacity(64);
        for b in self.0 {
            use std::fmt::Write as _;
            let _ = write!(&mut out, "{b:02x}");
        }
        out
    }
}

/// JSON value with object keys sorted recursively.
#[derive(Debug, Clone)]
pub struct CanonicalJson(Value);

impl CanonicalJson {
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        let raw = serde_json::to_value(value)?;
        Ok(Self(normalize_json_value(raw)))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.0)?)
    }

    pub fn to_pretty_bytes(&self) -> Result<Vec<u8>> {
        let mut out = serde_json::to_vec_pretty(&self.0)?;
        out.push(b'\n');
        Ok(out)
    }
}

fn stable_hash_bytes(bytes: &[u8]) -> Hash256 {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    let mut out = [0_u8; 32];
    out.copy_from_slice(&digest);
    Hash256(out)
}

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    stable_hash_bytes(bytes).to_hex()
}

pub fn stable_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    CanonicalJson::from_serialize(value)?.to_bytes()
}

pub fn stable_json_pretty_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    CanonicalJson::from_serialize(value)?.to_pretty_bytes()
}

fn normalize_json_value(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut sorted = Map::new();
            let mut entries: Vec<(String, Value)> = map
                .into_iter()
                .map(|(k, v)| (k, normalize_json_value(v)))
                .collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            for (k, v) in entries {
                sorted.insert(k, v);
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_json_value).collect()),
        other => other,
    }
}
