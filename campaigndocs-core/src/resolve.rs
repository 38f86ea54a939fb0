//! Placeholder Resolver
//!
//! One left-to-right pass over `[key]` tokens. Composite date tokens are
//! formatted from their parts; the raw date, time and period parts are never
//! substituted on their own. Substituted values are not scanned again.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::datetime::{DateTimeField, PeriodDateField, TimePolicy};
use crate::normalize::known_keys;
use crate::record::CampaignRecord;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([A-Za-z0-9_]+)\]").expect("token pattern"));

/// Record keys the date tokens are built from.
pub fn is_consumed_key(key: &str) -> bool {
    if key.contains("_hour") || key.contains("_minute") {
        return true;
    }
    DateTimeField::ALL.iter().any(|field| field.date_key() == key)
        || PeriodDateField::ALL
            .iter()
            .any(|field| field.keys().iter().any(|k| k == key))
}

/// Value for one token, or `None` to leave it in place.
///
/// Missing dates, periods and known keys resolve to `""`.
pub fn resolve_token(key: &str, record: &CampaignRecord, policy: &TimePolicy) -> Option<String> {
    let token = format!("[{key}]");
    if let Some(field) = DateTimeField::ALL.into_iter().find(|f| f.token() == token) {
        return Some(field.format(record, policy.forces(field)));
    }
    if let Some(field) = PeriodDateField::ALL.into_iter().find(|f| f.token() == token) {
        return Some(field.read(record).map(|p| p.to_string()).unwrap_or_default());
    }
    if is_consumed_key(key) {
        return None;
    }
    let known = record.keys().any(|k| k == key) || known_keys().any(|k| k == key);
    known.then(|| record.get(key).to_string())
}

/// Replace every resolvable `[key]` token in a single pass.
pub fn resolve_placeholders(text: &str, record: &CampaignRecord, policy: &TimePolicy) -> String {
    TOKEN
        .replace_all(text, |caps: &Captures| {
            resolve_token(&caps[1], record, policy).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
