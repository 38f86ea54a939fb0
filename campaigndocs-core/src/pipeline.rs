//! Generation Pipeline - One Fixed Pipeline per Document Kind
//!
//! Order is load-bearing: conditional edits, normalization, resolution,
//! Markdown stripping, family cleanup. Each stage relies on the previous one.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::catalog::TemplateCatalog;
use crate::conditional::{
    form_note_rule, form_platform_rule, guideline_overrides, notification_platform_rules,
    paired_prize_line_rules, prize_line_rules, prize_list_rule, step_line_rules,
};
use crate::datetime::{DateTimeField, TimePolicy};
use crate::family::{ContactMethod, DocumentContext, DocumentKind, Platform, TemplateFamily};
use crate::hashing::{compute_content_hash, compute_job_hash};
use crate::markdown::strip_markdown;
use crate::normalize::normalize_placeholders;
use crate::record::CampaignRecord;
use crate::resolve::resolve_placeholders;
use crate::strategy::strategy_for;
use crate::ENGINE_VERSION;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Template not found: {kind} for {family}")]
    TemplateNotFound {
        kind: DocumentKind,
        family: TemplateFamily,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Date-time fields each document prints with a time even when none was entered.
pub fn time_policy(kind: DocumentKind) -> TimePolicy {
    match kind {
        DocumentKind::Guidelines => TimePolicy::forcing(&[
            DateTimeField::ApplicationStart,
            DateTimeField::ApplicationEnd,
            DateTimeField::FormDeadline,
        ]),
        DocumentKind::Notification | DocumentKind::IntakeForm => {
            TimePolicy::forcing(&[DateTimeField::FormDeadline])
        }
        DocumentKind::EnclosedLetter => TimePolicy::none(),
    }
}

/// Shared tail: normalize tokens, resolve them, strip Markdown.
fn finish(text: &str, record: &CampaignRecord, kind: DocumentKind) -> String {
    let normalized = normalize_placeholders(text);
    let resolved = resolve_placeholders(&normalized, record, &time_policy(kind));
    strip_markdown(&resolved)
}

/// Terms of service.
pub fn generate_guidelines(template: &str, record: &CampaignRecord, ctx: &DocumentContext) -> String {
    let strategy = strategy_for(ctx.family);
    let active_prizes = record.active_prize_count();
    debug!(family = %ctx.family, active_prizes, "generating guidelines");

    let text = prize_list_rule(record).apply(template);
    let text = strategy.apply_prize_framing(&text, active_prizes);
    let text = step_line_rules(record).apply(&text, ctx);
    let text = guideline_overrides(record).apply(&text, ctx);
    let text = strategy.apply_contact_method(&text, ctx.contact_method);
    let text = finish(&text, record, DocumentKind::Guidelines);
    strategy.apply_heading_cleanup(&text)
}

/// Direct message sent to winners.
pub fn generate_notification(template: &str, record: &CampaignRecord, ctx: &DocumentContext) -> String {
    debug!(family = %ctx.family, platform = %ctx.platform, "generating notification");
    let text = prize_line_rules(record, true).apply(template, ctx);
    let text = notification_platform_rules().apply(&text, ctx);
    finish(&text, record, DocumentKind::Notification)
}

/// Winner intake form.
pub fn generate_intake_form(template: &str, record: &CampaignRecord, ctx: &DocumentContext) -> String {
    debug!(family = %ctx.family, platform = %ctx.platform, "generating intake form");
    let text = form_platform_rule(ctx.platform).apply(template);
    let text = form_note_rule(record).apply(&text);
    let text = paired_prize_line_rules(record).apply(&text, ctx);
    finish(&text, record, DocumentKind::IntakeForm)
}

/// Letter packed with the prize.
pub fn generate_enclosed_letter(template: &str, record: &CampaignRecord, ctx: &DocumentContext) -> String {
    debug!(family = %ctx.family, platform = %ctx.platform, "generating enclosed letter");
    let text = prize_line_rules(record, true).apply(template, ctx);
    finish(&text, record, DocumentKind::EnclosedLetter)
}

/// Run the generator for `kind` over an explicit template.
pub fn render(kind: DocumentKind, template: &str, record: &CampaignRecord, ctx: &DocumentContext) -> String {
    match kind {
        DocumentKind::Guidelines => generate_guidelines(template, record, ctx),
        DocumentKind::Notification => generate_notification(template, record, ctx),
        DocumentKind::IntakeForm => generate_intake_form(template, record, ctx),
        DocumentKind::EnclosedLetter => generate_enclosed_letter(template, record, ctx),
    }
}

/// The four documents generated from one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSet {
    pub family: TemplateFamily,
    pub platform: Platform,
    pub contact_method: ContactMethod,
    pub engine_version: String,
    pub job_hash: String,
    pub content_hash: String,
    pub guidelines: String,
    pub notification: String,
    pub intake_form: String,
    pub enclosed_letter: String,
}

impl DocumentSet {
    pub fn get(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::Guidelines => &self.guidelines,
            DocumentKind::Notification => &self.notification,
            DocumentKind::IntakeForm => &self.intake_form,
            DocumentKind::EnclosedLetter => &self.enclosed_letter,
        }
    }
}

/// Catalog-backed entry point used by the CLI and other callers.
pub struct CampaignGenerator {
    catalog: TemplateCatalog,
}

impl CampaignGenerator {
    pub fn new(catalog: TemplateCatalog) -> Self {
        Self { catalog }
    }

    pub fn template(&self, kind: DocumentKind, family: TemplateFamily) -> Result<&str, GenerationError> {
        self.catalog
            .template_for(kind, family)
            .ok_or(GenerationError::TemplateNotFound { kind, family })
    }

    pub fn generate(
        &self,
        kind: DocumentKind,
        record: &CampaignRecord,
        ctx: &DocumentContext,
    ) -> Result<String, GenerationError> {
        let template = self.template(kind, ctx.family)?;
        Ok(render(kind, template, record, ctx))
    }

    /// All four documents off the same record.
    pub fn generate_all(
        &self,
        record: &CampaignRecord,
        ctx: &DocumentContext,
    ) -> Result<DocumentSet, GenerationError> {
        let mut set = DocumentSet {
            family: ctx.family,
            platform: ctx.platform,
            contact_method: ctx.contact_method,
            engine_version: ENGINE_VERSION.to_string(),
            job_hash: compute_job_hash(ctx, record, ENGINE_VERSION)?,
            content_hash: String::new(), // Computed after
            guidelines: self.generate(DocumentKind::Guidelines, record, ctx)?,
            notification: self.generate(DocumentKind::Notification, record, ctx)?,
            intake_form: self.generate(DocumentKind::IntakeForm, record, ctx)?,
            enclosed_letter: self.generate(DocumentKind::EnclosedLetter, record, ctx)?,
        };
        set.content_hash = compute_content_hash(&set)?;
        Ok(set)
    }
}

impl Default for CampaignGenerator {
    fn default() -> Self {
        Self::new(TemplateCatalog::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn letter_pipeline_end_to_end() {
        let template = "# [キャンペーン名]\n\n**【同梱賞品】**\n- [賞品名1]\n- [賞品名2]\n\n[会社名]";
        let record = CampaignRecord::new()
            .with("campaign_name", "Spring")
            .with("company_name", "Acme")
            .with("prize_1", "Mug")
            .with("prize_1_quantity", "1個");
        let out = generate_enclosed_letter(template, &record, &DocumentContext::default());
        assert_eq!(out, "Spring\n\n【同梱賞品】\nMug\u{3000}1個\n\nAcme");
    }

    #[test]
    fn guidelines_keep_lines_with_individual_prize_tokens() {
        let template = "[賞品名1] [賞品名2] [賞品名3] [賞品名4] [賞品名5]を合計[合計人数]名様にプレゼント\n補足：[賞品名2]は数量限定";
        let record = CampaignRecord::new()
            .with("prize_1", "Mug")
            .with("total_winners", "5");
        let out = generate_guidelines(template, &record, &DocumentContext::default());
        assert_eq!(out, "Mugを合計5名様にプレゼント\n補足：は数量限定");
    }

    #[test]
    fn notification_hint_kept_only_on_x() {
        let template = "hi\n※Xアプリの「メッセージ」タブから確認できます。\nbye";
        let record = CampaignRecord::new();
        let x = generate_notification(template, &record, &DocumentContext::new(TemplateFamily::XScheduledDraw));
        assert!(x.contains("メッセージ"));
        let ig_x = generate_notification(
            template,
            &record,
            &DocumentContext::new(TemplateFamily::InstagramXScheduledDraw),
        );
        assert_eq!(ig_x, "hi\nbye");
    }

    #[test]
    fn policies_per_document() {
        assert!(time_policy(DocumentKind::Guidelines).forces(DateTimeField::ApplicationEnd));
        assert!(time_policy(DocumentKind::IntakeForm).forces(DateTimeField::FormDeadline));
        assert!(!time_policy(DocumentKind::IntakeForm).forces(DateTimeField::ApplicationStart));
        assert!(!time_policy(DocumentKind::EnclosedLetter).forces(DateTimeField::FormDeadline));
    }

    #[test]
    fn missing_template_is_an_error() {
        let generator = CampaignGenerator::new(TemplateCatalog::new());
        let err = generator
            .generate(DocumentKind::Guidelines, &CampaignRecord::new(), &DocumentContext::default())
            .unwrap_err();
        assert!(err.to_string().contains("Template not found"));
    }
}
