//! Campaign Record - Flat Field Map
//!
//! Absent keys and empty values are the same thing. Every lookup is total.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Spellings the intake UI uses for "leave blank if not needed".
pub const NOT_APPLICABLE_SENTINELS: [&str; 2] = ["（不要なら空白）", "(不要なら空白)"];

pub const PRIZE_SLOTS: u8 = 5;

/// Raw campaign fields keyed by internal ASCII key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignRecord {
    fields: BTreeMap<String, String>,
}

impl CampaignRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and callers assembling a record by hand.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Raw value, or `""` when the key is absent.
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    /// Trimmed value when it is non-empty.
    pub fn value(&self, key: &str) -> Option<&str> {
        let v = self.get(key).trim();
        (!v.is_empty()).then_some(v)
    }

    /// Whether the field carries real content (see [`is_active_value`]).
    pub fn is_active(&self, key: &str) -> bool {
        is_active_value(self.get(key))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Prize slots 1..=5 in order.
    pub fn prize_slots(&self) -> Vec<PrizeSlot<'_>> {
        (1..=PRIZE_SLOTS)
            .map(|index| PrizeSlot {
                index,
                name: self.get(&format!("prize_{index}")),
                quantity: self.get(&format!("prize_{index}_quantity")),
            })
            .collect()
    }

    pub fn active_prize_count(&self) -> usize {
        self.prize_slots().iter().filter(|slot| slot.is_active()).count()
    }

    /// Optional application steps (STEP1 and STEP2 are always part of the template).
    pub fn step_slots(&self) -> Vec<StepSlot<'_>> {
        (3..=5)
            .map(|index| StepSlot {
                index,
                content: self.get(&format!("step_{index}")),
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CampaignRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// A value is active when it has non-whitespace content that is not a sentinel.
///
/// Sentinels match exactly after trimming the outer whitespace.
pub fn is_active_value(value: &str) -> bool {
    let v = value.trim();
    !v.is_empty() && !NOT_APPLICABLE_SENTINELS.contains(&v)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrizeSlot<'a> {
    pub index: u8,
    pub name: &'a str,
    pub quantity: &'a str,
}

impl PrizeSlot<'_> {
    pub fn is_active(&self) -> bool {
        is_active_value(self.name)
    }

    /// `name　quantity` (full-width space) when asked for and a quantity exists.
    pub fn display(&self, include_quantity: bool) -> String {
        let name = self.name.trim();
        let quantity = self.quantity.trim();
        if include_quantity && !quantity.is_empty() {
            format!("{name}\u{3000}{quantity}")
        } else {
            name.to_string()
        }
    }

    /// Human-readable name token, e.g. `[賞品名2]`.
    pub fn name_token(&self) -> String {
        format!("[賞品名{}]", self.index)
    }

    /// Human-readable quantity token, e.g. `[賞品名2数量]`.
    pub fn quantity_token(&self) -> String {
        format!("[賞品名{}数量]", self.index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSlot<'a> {
    pub index: u8,
    pub content: &'a str,
}

impl StepSlot<'_> {
    pub fn is_active(&self) -> bool {
        is_active_value(self.content)
    }

    pub fn token(&self) -> String {
        format!("[応募方法_STEP{}]", self.index)
    }

    pub fn display(&self) -> String {
        format!("STEP{}：{}", self.index, self.content.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty_are_equivalent() {
        let record = CampaignRecord::new().with("company_name", "");
        assert_eq!(record.get("company_name"), "");
        assert_eq!(record.get("campaign_name"), "");
        assert_eq!(record.value("company_name"), None);
        assert_eq!(record.value("campaign_name"), None);
    }

    #[test]
    fn sentinels_are_inactive() {
        assert!(!is_active_value("（不要なら空白）"));
        assert!(!is_active_value("(不要なら空白)"));
        assert!(!is_active_value("  (不要なら空白) "));
        assert!(!is_active_value("   "));
        assert!(is_active_value("Gift card"));
        // only the two exact spellings count
        assert!(is_active_value("( 不要なら空白 )"));
    }

    #[test]
    fn prize_display_uses_full_width_space() {
        let record = CampaignRecord::new()
            .with("prize_1", " Tote bag ")
            .with("prize_1_quantity", "10名様");
        let slots = record.prize_slots();
        assert_eq!(slots[0].display(true), "Tote bag\u{3000}10名様");
        assert_eq!(slots[0].display(false), "Tote bag");
        assert_eq!(slots[1].display(true), "");
    }

    #[test]
    fn counts_active_prizes() {
        let record = CampaignRecord::new()
            .with("prize_1", "A")
            .with("prize_2", "（不要なら空白）")
            .with("prize_4", "D");
        assert_eq!(record.active_prize_count(), 2);
    }

    #[test]
    fn deserializes_from_flat_json() {
        let record: CampaignRecord =
            serde_json::from_str(r#"{"campaign_name": "Spring", "prize_1": "A"}"#).unwrap();
        assert_eq!(record.get("campaign_name"), "Spring");
        assert_eq!(record.len(), 2);
    }
}
