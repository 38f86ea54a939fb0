//! Contract Invariant Tests
//!
//! These tests verify the non-negotiable guarantees.

use campaigndocs_core::{
    conditional::{prize_line_rules, prize_list_rule},
    datetime::PeriodDateField,
    format_date_time, normalize_placeholders,
    normalize::PLACEHOLDER_MAPPING,
    pipeline::time_policy,
    resolve_placeholders, strategy_for, strip_markdown, CampaignRecord, DateTimeField,
    DocumentContext, DocumentKind, TemplateFamily, TimeOfDay, TimePolicy,
};
use pretty_assertions::assert_eq;

const PRIZE_TEMPLATE: &str = "head\n- [賞品名1]\n- [賞品名2]\n- [賞品名3]\n- [賞品名4]\n- [賞品名5]\ntail";

fn all_prizes() -> CampaignRecord {
    (1..=5)
        .map(|i| (format!("prize_{i}"), format!("Prize{i}")))
        .collect()
}

#[test]
fn invariant_resolution_is_idempotent() {
    let record = CampaignRecord::new()
        .with("campaign_name", "Winter Gift")
        .with("company_name", "Acme")
        .with("form_url", "https://forms.example/abc")
        .with("total_winners", "10")
        .with("x_name", "Acme公式");
    let template = normalize_placeholders(
        "[キャンペーン名] / [会社名]\n[フォームURL] [合計人数]名\n[Xアカウント名] [unknown_key]\n[フォーム備考]",
    );

    let once = resolve_placeholders(&template, &record, &TimePolicy::none());
    let twice = resolve_placeholders(&once, &record, &TimePolicy::none());

    assert_eq!(once, twice);
    assert_eq!(once, "Winter Gift / Acme\nhttps://forms.example/abc 10名\nAcme公式 [unknown_key]\n");
}

#[test]
fn invariant_bracketed_values_are_substituted_once() {
    let record = CampaignRecord::new()
        .with("campaign_name", "[x_name] Fest")
        .with("x_name", "Acme");
    let template = normalize_placeholders("[キャンペーン名] by [Xアカウント名]");

    let out = resolve_placeholders(&template, &record, &TimePolicy::none());
    assert_eq!(out, "[x_name] Fest by Acme");
}

#[test]
fn invariant_inactive_prize_slot_loses_its_line() {
    let ctx = DocumentContext::default();
    for slot in 1..=5 {
        for inactive in ["", "   ", "（不要なら空白）", "(不要なら空白)"] {
            let record = all_prizes().with(format!("prize_{slot}"), inactive);
            let out = prize_line_rules(&record, false).apply(PRIZE_TEMPLATE, &ctx);

            let expected: Vec<String> = std::iter::once("head".to_string())
                .chain((1..=5).filter(|i| *i != slot).map(|i| format!("- Prize{i}")))
                .chain(std::iter::once("tail".to_string()))
                .collect();
            assert_eq!(out, expected.join("\n"), "slot {slot} with {inactive:?}");
        }
    }
}

#[test]
fn invariant_active_prize_slot_is_substituted() {
    let out = prize_line_rules(&all_prizes(), false).apply(PRIZE_TEMPLATE, &DocumentContext::default());
    assert_eq!(out, "head\n- Prize1\n- Prize2\n- Prize3\n- Prize4\n- Prize5\ntail");
}

#[test]
fn invariant_date_formatting() {
    assert_eq!(
        format_date_time("2024-12-25", "09", "30", false, TimeOfDay::START_OF_DAY),
        "2024年12月25日（水）09:30"
    );
    assert_eq!(
        format_date_time("2024-12-25", "", "", false, TimeOfDay::START_OF_DAY),
        "2024年12月25日（水）"
    );
}

#[test]
fn invariant_period_formatting() {
    let record = CampaignRecord::new()
        .with("dm_send_year", "24")
        .with("dm_send_month", "11")
        .with("dm_send_period", "上旬");
    let period = PeriodDateField::DmDispatch.read(&record).unwrap();
    assert_eq!(period.to_string(), "2024年11月上旬");
}

#[test]
fn invariant_markdown_stripping() {
    assert_eq!(
        strip_markdown("## Title\n- item **bold**\n\n\n\nend"),
        "Title\nitem bold\n\nend"
    );
}

#[test]
fn invariant_two_prizes_use_set_phrasing_before_resolution() {
    let record = CampaignRecord::new().with("prize_1", "Mug").with("prize_2", "Pen");
    let template = "[賞品名1] [賞品名2] [賞品名3] [賞品名4] [賞品名5]を合計[合計人数]名様にプレゼント";

    let listed = prize_list_rule(&record).apply(template);
    let framed = strategy_for(TemplateFamily::XScheduledDraw)
        .apply_prize_framing(&listed, record.active_prize_count());

    assert_eq!(framed, "Mug、Penのセットを合計[合計人数]名様にプレゼント");
}

#[test]
fn invariant_full_record_leaves_no_tokens() {
    let date_tokens: Vec<&str> = DateTimeField::ALL
        .iter()
        .map(|f| f.token())
        .chain(PeriodDateField::ALL.iter().map(|f| f.token()))
        .collect();

    let mut record = CampaignRecord::new();
    for (_, internal) in PLACEHOLDER_MAPPING {
        if !date_tokens.contains(internal) {
            let key = internal.trim_start_matches('[').trim_end_matches(']');
            record.set(key, format!("value of {key}"));
        }
    }
    for field in DateTimeField::ALL {
        record.set(field.date_key(), "2024-12-01");
    }
    for field in PeriodDateField::ALL {
        let [year, month, period] = field.keys();
        record.set(year, "24");
        record.set(month, "12");
        record.set(period, "中旬");
    }

    let template: String = PLACEHOLDER_MAPPING
        .iter()
        .map(|(label, _)| format!("{label}\n"))
        .collect();
    let out = resolve_placeholders(
        &normalize_placeholders(&template),
        &record,
        &time_policy(DocumentKind::Guidelines),
    );

    for (key, _) in record.iter() {
        assert!(!out.contains(&format!("[{key}]")), "[{key}] left in output");
    }
    assert!(!out.contains('['), "unresolved token in:\n{out}");
    assert!(out.contains("2024年12月1日（日）00:00"));
    assert!(out.contains("2024年12月中旬"));
}
