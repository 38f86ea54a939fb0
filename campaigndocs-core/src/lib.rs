//! Campaign Docs Core - Template Resolution Engine
//!
//! Turns one flat record of campaign fields into four publish-ready texts:
//! guidelines, winner notification, intake form and enclosed letter.
//!
//! # Pipeline Order (Non-Negotiable)
//! 1. Conditional line edits, on human-readable tokens
//! 2. Token normalization
//! 3. Date tokens, then generic `[key]` resolution
//! 4. Markdown stripping
//! 5. Family heading cleanup

pub mod record;
pub mod family;
pub mod catalog;
pub mod normalize;
pub mod datetime;
pub mod rules;
pub mod conditional;
pub mod strategy;
pub mod resolve;
pub mod markdown;
pub mod hashing;
pub mod pipeline;

pub use record::{CampaignRecord, PrizeSlot, StepSlot, is_active_value};
pub use family::{CampaignMode, ContactMethod, DocumentContext, DocumentKind, ParseError, Platform, TemplateFamily};
pub use catalog::{CatalogError, TemplateCatalog, TemplateEntry, TemplateKey};
pub use datetime::{format_date, format_date_time, DateTimeField, PeriodField, TimeOfDay, TimePolicy};
pub use rules::{Applicability, EditAction, EditRule, RuleSet};
pub use strategy::{strategy_for, FamilyStrategy};
pub use normalize::normalize_placeholders;
pub use resolve::resolve_placeholders;
pub use markdown::strip_markdown;
pub use pipeline::{
    generate_enclosed_letter, generate_guidelines, generate_intake_form, generate_notification,
    CampaignGenerator, DocumentSet, GenerationError,
};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
