//! Conditional Line Processor
//!
//! Builds the rule tables that inline optional fields or delete the lines that
//! mention them. Runs on human-readable tokens, before normalization.

use crate::datetime::DateTimeField;
use crate::family::{Platform, TemplateFamily};
use crate::record::CampaignRecord;
use crate::rules::{Applicability, EditRule, RuleSet};

/// Guidelines templates list all prizes in one sentence through this token run.
pub const PRIZE_LIST_TOKEN: &str = "[賞品名1] [賞品名2] [賞品名3] [賞品名4] [賞品名5]";

pub const RATE_BOOST_TOKEN: &str = "[当選確率アップ]";
pub const FORM_NOTE_TOKEN: &str = "[フォーム備考]";
pub const CONTACT_START_TOKEN: &str = "[連絡受付開始]";
pub const CONTACT_END_TOKEN: &str = "[連絡受付終了]";

/// Hint line in the X notification template; only meaningful on X itself.
pub const X_MESSAGE_TAB_HINT: &str = "※Xアプリの「メッセージ」タブ";

const FORM_ACCOUNT_PHRASE: &str = "Instagramのアカウント名";

const INSTANT_DISPATCH_SCHEDULED: &str = "当選DMは[DM送付日]頃に送付いたします。";
const INSTANT_DISPATCH_IMMEDIATE: &str = "当選DMは抽選後すぐに送付いたします。";

const X_FAMILIES: &[TemplateFamily] = &[TemplateFamily::XScheduledDraw, TemplateFamily::XInstantWin];
const CONTACT_WINDOW_FAMILIES: &[TemplateFamily] = &[
    TemplateFamily::InstagramScheduledDraw,
    TemplateFamily::InstagramXScheduledDraw,
];

/// Active prize names joined with `、`.
pub fn prize_list(record: &CampaignRecord) -> String {
    record
        .prize_slots()
        .iter()
        .filter(|slot| slot.is_active())
        .map(|slot| slot.name.trim())
        .collect::<Vec<_>>()
        .join("、")
}

pub fn prize_list_rule(record: &CampaignRecord) -> EditRule {
    EditRule::replace("prize_list", PRIZE_LIST_TOKEN, prize_list(record))
}

/// One slot rule per prize, keyed on `[賞品名N]`.
pub fn prize_line_rules(record: &CampaignRecord, include_quantity: bool) -> RuleSet {
    record
        .prize_slots()
        .iter()
        .map(|slot| {
            EditRule::slot(
                format!("prize_{}", slot.index),
                slot.name_token(),
                slot.is_active().then(|| slot.display(include_quantity)),
            )
        })
        .collect()
}

/// Intake-form variant: name and quantity tokens sit side by side as one pair.
pub fn paired_prize_line_rules(record: &CampaignRecord) -> RuleSet {
    record
        .prize_slots()
        .iter()
        .map(|slot| {
            EditRule::slot(
                format!("prize_{}_pair", slot.index),
                format!("{}{}", slot.name_token(), slot.quantity_token()),
                slot.is_active().then(|| slot.display(true)),
            )
        })
        .collect()
}

/// STEP3..STEP5 become `STEPn：content` or vanish with their line.
pub fn step_line_rules(record: &CampaignRecord) -> RuleSet {
    record
        .step_slots()
        .iter()
        .map(|step| {
            EditRule::slot(
                format!("step_{}", step.index),
                step.token(),
                step.is_active().then(|| step.display()),
            )
        })
        .collect()
}

/// Single free-text field with the slot activity rule.
pub fn optional_text_rule(name: &str, token: &str, record: &CampaignRecord, key: &str) -> EditRule {
    let content = record.is_active(key).then(|| record.get(key).trim().to_string());
    EditRule::slot(name, token, content)
}

/// Missing start drops the whole window; missing end drops only the end line.
/// Present tokens are left for the resolver.
pub fn contact_window_rules(record: &CampaignRecord) -> Vec<EditRule> {
    let has_start = record.value(DateTimeField::ContactStart.date_key()).is_some();
    let has_end = record.value(DateTimeField::ContactEnd.date_key()).is_some();

    let mut rules = Vec::new();
    if !has_start {
        rules.push(EditRule::delete_line("contact_window_start", CONTACT_START_TOKEN));
    }
    if !has_start || !has_end {
        rules.push(EditRule::delete_line("contact_window_end", CONTACT_END_TOKEN));
    }
    rules
}

/// Family-specific overrides for the guidelines document.
pub fn guideline_overrides(record: &CampaignRecord) -> RuleSet {
    let mut rules = RuleSet::new();
    rules.push(
        optional_text_rule("rate_boost", RATE_BOOST_TOKEN, record, "rate_boost_text")
            .when(Applicability::Families(X_FAMILIES)),
    );
    rules.extend(
        contact_window_rules(record)
            .into_iter()
            .map(|rule| rule.when(Applicability::Families(CONTACT_WINDOW_FAMILIES))),
    );
    rules.push(
        EditRule::replace(
            "instant_dispatch_timing",
            INSTANT_DISPATCH_SCHEDULED,
            INSTANT_DISPATCH_IMMEDIATE,
        )
        .when(Applicability::Families(&[TemplateFamily::XInstantWin])),
    );
    rules
}

/// Platform hints that only make sense on one network.
pub fn notification_platform_rules() -> RuleSet {
    [EditRule::delete_line("x_message_tab_hint", X_MESSAGE_TAB_HINT)
        .when(Applicability::ExceptPlatforms(&[Platform::X]))]
    .into_iter()
    .collect()
}

/// Names the campaign's network in the intake form's account-name question.
pub fn form_platform_rule(platform: Platform) -> EditRule {
    EditRule::replace(
        "form_platform_name",
        FORM_ACCOUNT_PHRASE,
        format!("{}のアカウント名", platform.display_name()),
    )
}

pub fn form_note_rule(record: &CampaignRecord) -> EditRule {
    optional_text_rule("form_note", FORM_NOTE_TOKEN, record, "form_note")
}
