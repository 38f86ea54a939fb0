//! Placeholder Normalizer
//!
//! Templates are written with Japanese labels (`[会社名]`); the resolver works
//! on ASCII keys (`[company_name]`). Unknown labels pass through untouched.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Human-readable token -> internal token.
pub const PLACEHOLDER_MAPPING: &[(&str, &str)] = &[
    ("[キャンペーン名]", "[campaign_name]"),
    ("[会社名]", "[company_name]"),
    ("[賞品名1]", "[prize_1]"),
    ("[賞品名2]", "[prize_2]"),
    ("[賞品名3]", "[prize_3]"),
    ("[賞品名4]", "[prize_4]"),
    ("[賞品名5]", "[prize_5]"),
    ("[賞品名1数量]", "[prize_1_quantity]"),
    ("[賞品名2数量]", "[prize_2_quantity]"),
    ("[賞品名3数量]", "[prize_3_quantity]"),
    ("[賞品名4数量]", "[prize_4_quantity]"),
    ("[賞品名5数量]", "[prize_5_quantity]"),
    ("[応募期間開始]", "[start_date]"),
    ("[応募期間終了]", "[end_date]"),
    ("[フォームURL]", "[form_url]"),
    ("[フォーム入力締切日]", "[form_deadline]"),
    ("[賞品発送日]", "[shipping_date]"),
    ("[DM送付日]", "[dm_send_date]"),
    ("[合計人数]", "[total_winners]"),
    ("[プライバシーポリシーURL]", "[privacy_policy_url]"),
    ("[Xアカウント名]", "[x_name]"),
    ("[XアカウントID]", "[x_id]"),
    ("[XアカウントURL]", "[x_url]"),
    ("[IGアカウント名]", "[ig_name]"),
    ("[IGアカウントID]", "[ig_id]"),
    ("[IGアカウントURL]", "[ig_url]"),
    ("[TikTokアカウント名]", "[tiktok_name]"),
    ("[TikTokアカウントID]", "[tiktok_id]"),
    ("[TikTokアカウントURL]", "[tiktok_url]"),
    ("[お問い合わせメールアドレス]", "[contact_email]"),
    ("[フォーム備考]", "[form_note]"),
    ("[応募方法_STEP2]", "[step_2]"),
    ("[応募方法_STEP3]", "[step_3]"),
    ("[応募方法_STEP4]", "[step_4]"),
    ("[応募方法_STEP5]", "[step_5]"),
    ("[当選確率アップ]", "[rate_boost_text]"),
    ("[連絡受付開始]", "[contact_start]"),
    ("[連絡受付終了]", "[contact_end]"),
];

static LABEL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = PLACEHOLDER_MAPPING
        .iter()
        .map(|(label, _)| regex::escape(label))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&alternation).expect("placeholder labels form a valid pattern")
});

static LOOKUP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| PLACEHOLDER_MAPPING.iter().copied().collect());

/// Rewrite every known human-readable token into its internal token.
pub fn normalize_placeholders(template: &str) -> String {
    LABEL_PATTERN
        .replace_all(template, |caps: &regex::Captures| {
            let label = &caps[0];
            LOOKUP.get(label).copied().unwrap_or(label).to_string()
        })
        .into_owned()
}

/// Internal keys (without brackets) that the normalizer can produce.
pub fn known_keys() -> impl Iterator<Item = &'static str> {
    PLACEHOLDER_MAPPING
        .iter()
        .map(|(_, internal)| internal.trim_start_matches('[').trim_end_matches(']'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_known_labels() {
        let out = normalize_placeholders("[会社名]の[キャンペーン名]：[賞品名1]　[賞品名1数量]");
        assert_eq!(out, "[company_name]の[campaign_name]：[prize_1]　[prize_1_quantity]");
    }

    #[test]
    fn unknown_labels_pass_through() {
        let out = normalize_placeholders("[未知のラベル] [company_name] [会社名");
        assert_eq!(out, "[未知のラベル] [company_name] [会社名");
    }

    #[test]
    fn mapping_has_no_duplicate_labels() {
        assert_eq!(LOOKUP.len(), PLACEHOLDER_MAPPING.len());
    }

    #[test]
    fn known_keys_are_bare() {
        assert!(known_keys().any(|k| k == "contact_email"));
        assert!(known_keys().all(|k| !k.contains('[')));
    }
}
