//! Family Strategies
//!
//! Structural edits that differ per template family. Every method defaults to
//! a no-op; each family overrides only what its templates need.

use crate::family::{ContactMethod, TemplateFamily};
use crate::rules::EditRule;

pub const PRIZE_PHRASE_SINGLE: &str = "を合計[合計人数]名様にプレゼント";
pub const PRIZE_PHRASE_SET: &str = "のセットを合計[合計人数]名様にプレゼント";

pub const EMAIL_CONTACT_SENTENCE: &str = "[お問い合わせメールアドレス]までメールにてお問い合わせください。";

const X_DM_SENTENCE: &str = "[Xアカウント名]（@[XアカウントID]）のDMにてお問い合わせください。";
const IG_DM_SENTENCE: &str =
    "Instagramアカウント[IGアカウント名]（@[IGアカウントID]）のDMにてお問い合わせください。";
const TIKTOK_DM_SENTENCE: &str =
    "TikTokアカウント[TikTokアカウント名]（@[TikTokアカウントID]）のDMにてお問い合わせください。";
const IG_X_DM_SENTENCE: &str =
    "Instagram（@[IGアカウントID]）またはX（@[XアカウントID]）のDMにてお問い合わせください。";

/// Headings in the X guidelines that take their body on the very next line.
const X_TIGHT_HEADINGS: &[&str] = &["【応募期間】", "【賞品】", "【応募方法】", "【当選発表】"];
const X_CONTACT_HEADING: &str = "【お問い合わせ】";

pub trait FamilyStrategy: Send + Sync {
    fn family(&self) -> TemplateFamily;

    /// Pick singular or set phrasing for the prize sentence.
    fn apply_prize_framing(&self, text: &str, _active_prizes: usize) -> String {
        text.to_string()
    }

    /// Swap the DM contact sentence for the email one.
    fn apply_contact_method(&self, text: &str, _method: ContactMethod) -> String {
        text.to_string()
    }

    /// Runs on final plaintext, after Markdown stripping.
    fn apply_heading_cleanup(&self, text: &str) -> String {
        text.to_string()
    }
}

pub fn strategy_for(family: TemplateFamily) -> &'static dyn FamilyStrategy {
    match family {
        TemplateFamily::XScheduledDraw => &XScheduledDrawStrategy,
        TemplateFamily::XInstantWin => &XInstantWinStrategy,
        TemplateFamily::InstagramScheduledDraw => &InstagramScheduledDrawStrategy,
        TemplateFamily::TikTokScheduledDraw => &TikTokScheduledDrawStrategy,
        TemplateFamily::InstagramXScheduledDraw => &InstagramXScheduledDrawStrategy,
    }
}

pub struct XScheduledDrawStrategy;

impl FamilyStrategy for XScheduledDrawStrategy {
    fn family(&self) -> TemplateFamily {
        TemplateFamily::XScheduledDraw
    }

    fn apply_prize_framing(&self, text: &str, active_prizes: usize) -> String {
        frame_prizes(text, active_prizes)
    }

    fn apply_contact_method(&self, text: &str, method: ContactMethod) -> String {
        contact_by_email(text, method, X_DM_SENTENCE)
    }

    fn apply_heading_cleanup(&self, text: &str) -> String {
        x_heading_cleanup(text)
    }
}

/// Instant-win copy has no "total winners" sentence to frame.
pub struct XInstantWinStrategy;

impl FamilyStrategy for XInstantWinStrategy {
    fn family(&self) -> TemplateFamily {
        TemplateFamily::XInstantWin
    }

    fn apply_contact_method(&self, text: &str, method: ContactMethod) -> String {
        contact_by_email(text, method, X_DM_SENTENCE)
    }

    fn apply_heading_cleanup(&self, text: &str) -> String {
        x_heading_cleanup(text)
    }
}

pub struct InstagramScheduledDrawStrategy;

impl FamilyStrategy for InstagramScheduledDrawStrategy {
    fn family(&self) -> TemplateFamily {
        TemplateFamily::InstagramScheduledDraw
    }

    fn apply_prize_framing(&self, text: &str, active_prizes: usize) -> String {
        frame_prizes(text, active_prizes)
    }

    fn apply_contact_method(&self, text: &str, method: ContactMethod) -> String {
        contact_by_email(text, method, IG_DM_SENTENCE)
    }
}

pub struct TikTokScheduledDrawStrategy;

impl FamilyStrategy for TikTokScheduledDrawStrategy {
    fn family(&self) -> TemplateFamily {
        TemplateFamily::TikTokScheduledDraw
    }

    fn apply_prize_framing(&self, text: &str, active_prizes: usize) -> String {
        frame_prizes(text, active_prizes)
    }

    fn apply_contact_method(&self, text: &str, method: ContactMethod) -> String {
        contact_by_email(text, method, TIKTOK_DM_SENTENCE)
    }
}

pub struct InstagramXScheduledDrawStrategy;

impl FamilyStrategy for InstagramXScheduledDrawStrategy {
    fn family(&self) -> TemplateFamily {
        TemplateFamily::InstagramXScheduledDraw
    }

    fn apply_prize_framing(&self, text: &str, active_prizes: usize) -> String {
        frame_prizes(text, active_prizes)
    }

    fn apply_contact_method(&self, text: &str, method: ContactMethod) -> String {
        contact_by_email(text, method, IG_X_DM_SENTENCE)
    }
}

/// Set phrasing for more than one prize, single phrasing otherwise.
pub fn frame_prizes(text: &str, active_prizes: usize) -> String {
    let single = text.replace(PRIZE_PHRASE_SET, PRIZE_PHRASE_SINGLE);
    if active_prizes > 1 {
        single.replace(PRIZE_PHRASE_SINGLE, PRIZE_PHRASE_SET)
    } else {
        single
    }
}

fn contact_by_email(text: &str, method: ContactMethod, dm_sentence: &str) -> String {
    match method {
        ContactMethod::DirectMessage => text.to_string(),
        ContactMethod::Email => {
            EditRule::replace("contact_method_email", dm_sentence, EMAIL_CONTACT_SENTENCE).apply(text)
        }
    }
}

fn x_heading_cleanup(text: &str) -> String {
    let tightened = X_TIGHT_HEADINGS
        .iter()
        .fold(text.to_string(), |acc, heading| collapse_blank_after(&acc, heading));
    ensure_single_blank_before(&tightened, X_CONTACT_HEADING)
}

/// Drop the blank lines directly below each `heading` line.
pub fn collapse_blank_after(text: &str, heading: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut after_heading = false;
    for line in text.lines() {
        if after_heading && line.trim().is_empty() {
            continue;
        }
        after_heading = line.trim() == heading;
        out.push(line);
    }
    out.join("\n")
}

/// Exactly one blank line above `heading` (none if it opens the text).
pub fn ensure_single_blank_before(text: &str, heading: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim() == heading {
            while out.last().is_some_and(|prev| prev.trim().is_empty()) {
                out.pop();
            }
            if !out.is_empty() {
                out.push("");
            }
        }
        out.push(line);
    }
    out.join("\n")
}
