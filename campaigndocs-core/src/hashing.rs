//! Hashing - SHA-256 Fingerprints for Generated Document Sets
//!
//! Same record, same context, same engine version: same hashes.

use serde::Serialize;
use serde_json::{to_string, Value};
use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Convert to canonical JSON (sorted keys, no whitespace)
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let v: Value = serde_json::to_value(value)?;
    to_string(&sort_value(&v))
}

fn sort_value(v: &Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), sort_value(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_value).collect()),
        _ => v.clone(),
    }
}

/// Hash of a generated document set (computed with its own hash field blank).
pub fn compute_content_hash<T: Serialize>(documents: &T) -> Result<String, serde_json::Error> {
    Ok(sha256_hex(canonical_json(documents)?.as_bytes()))
}

/// job_hash = sha256(canonical context + canonical record + engine version)
pub fn compute_job_hash(
    context: &impl Serialize,
    record: &impl Serialize,
    engine_version: &str,
) -> Result<String, serde_json::Error> {
    let combined = format!(
        "{}:{}:{}",
        canonical_json(context)?,
        canonical_json(record)?,
        engine_version
    );
    Ok(sha256_hex(combined.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_json_sorts_keys() {
        let obj = json!({"prize_2": "B", "campaign_name": "Spring", "prize_1": "A"});
        assert_eq!(
            canonical_json(&obj).unwrap(),
            r#"{"campaign_name":"Spring","prize_1":"A","prize_2":"B"}"#
        );
    }

    #[test]
    fn known_digest() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn job_hash_depends_on_every_input() {
        let ctx = json!({"family": "X/事後抽選"});
        let record = json!({"campaign_name": "Spring"});
        let base = compute_job_hash(&ctx, &record, "1.0.0").unwrap();
        assert_eq!(base, compute_job_hash(&ctx, &record, "1.0.0").unwrap());
        assert_ne!(base, compute_job_hash(&ctx, &record, "1.0.1").unwrap());
        assert_ne!(base, compute_job_hash(&ctx, &json!({"campaign_name": "Fall"}), "1.0.0").unwrap());
    }
}
