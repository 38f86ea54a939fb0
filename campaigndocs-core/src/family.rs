//! Template Families, Platforms and Document Context

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown template family: {0}")]
    UnknownFamily(String),

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("Unknown document kind: {0}")]
    UnknownDocumentKind(String),

    #[error("Unknown contact method: {0}")]
    UnknownContactMethod(String),
}

/// Social network a campaign runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "X", alias = "x")]
    X,
    #[serde(rename = "IG", alias = "ig", alias = "instagram")]
    Instagram,
    #[serde(rename = "TikTok", alias = "tiktok")]
    TikTok,
    /// Instagram and X run together.
    #[serde(rename = "IG_X", alias = "ig_x", alias = "ig-x")]
    InstagramX,
}

impl Platform {
    pub fn code(self) -> &'static str {
        match self {
            Platform::X => "X",
            Platform::Instagram => "IG",
            Platform::TikTok => "TikTok",
            Platform::InstagramX => "IG_X",
        }
    }

    /// Name shown to winners in the intake form.
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::X | Platform::InstagramX => "X",
            Platform::Instagram => "Instagram",
            Platform::TikTok => "TikTok",
        }
    }

    /// Platform whose notification and letter templates this platform reuses.
    pub fn document_platform(self) -> Platform {
        match self {
            Platform::InstagramX => Platform::X,
            other => other,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Platform {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "x" => Ok(Platform::X),
            "ig" | "instagram" => Ok(Platform::Instagram),
            "tiktok" => Ok(Platform::TikTok),
            "ig_x" | "ig-x" => Ok(Platform::InstagramX),
            _ => Err(ParseError::UnknownPlatform(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignMode {
    /// Winners are drawn after the application window closes.
    ScheduledDraw,
    /// Winners learn the result right after applying.
    InstantWin,
}

/// A named template variant: one platform, one campaign mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TemplateFamily {
    #[serde(rename = "IG/事後抽選", alias = "ig-scheduled-draw")]
    InstagramScheduledDraw,
    #[serde(rename = "X/事後抽選", alias = "x-scheduled-draw")]
    XScheduledDraw,
    #[serde(rename = "X/即時", alias = "x-instant-win")]
    XInstantWin,
    #[serde(rename = "TikTok/事後抽選", alias = "tiktok-scheduled-draw")]
    TikTokScheduledDraw,
    #[serde(rename = "IG_X/事後抽選", alias = "ig-x-scheduled-draw")]
    InstagramXScheduledDraw,
}

impl TemplateFamily {
    pub const ALL: [TemplateFamily; 5] = [
        TemplateFamily::InstagramScheduledDraw,
        TemplateFamily::XScheduledDraw,
        TemplateFamily::XInstantWin,
        TemplateFamily::TikTokScheduledDraw,
        TemplateFamily::InstagramXScheduledDraw,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TemplateFamily::InstagramScheduledDraw => "IG/事後抽選",
            TemplateFamily::XScheduledDraw => "X/事後抽選",
            TemplateFamily::XInstantWin => "X/即時",
            TemplateFamily::TikTokScheduledDraw => "TikTok/事後抽選",
            TemplateFamily::InstagramXScheduledDraw => "IG_X/事後抽選",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            TemplateFamily::InstagramScheduledDraw => "ig-scheduled-draw",
            TemplateFamily::XScheduledDraw => "x-scheduled-draw",
            TemplateFamily::XInstantWin => "x-instant-win",
            TemplateFamily::TikTokScheduledDraw => "tiktok-scheduled-draw",
            TemplateFamily::InstagramXScheduledDraw => "ig-x-scheduled-draw",
        }
    }

    pub fn platform(self) -> Platform {
        match self {
            TemplateFamily::InstagramScheduledDraw => Platform::Instagram,
            TemplateFamily::XScheduledDraw | TemplateFamily::XInstantWin => Platform::X,
            TemplateFamily::TikTokScheduledDraw => Platform::TikTok,
            TemplateFamily::InstagramXScheduledDraw => Platform::InstagramX,
        }
    }

    pub fn mode(self) -> CampaignMode {
        match self {
            TemplateFamily::XInstantWin => CampaignMode::InstantWin,
            _ => CampaignMode::ScheduledDraw,
        }
    }

    /// Parse a label or slug, falling back to the default family.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl Default for TemplateFamily {
    fn default() -> Self {
        Self::XScheduledDraw
    }
}

impl fmt::Display for TemplateFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TemplateFamily {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|family| family.label() == wanted || family.slug() == wanted.to_lowercase())
            .ok_or_else(|| ParseError::UnknownFamily(s.to_string()))
    }
}

/// How winners and applicants are told to reach the organizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactMethod {
    #[default]
    DirectMessage,
    Email,
}

impl FromStr for ContactMethod {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dm" | "direct_message" | "direct-message" => Ok(ContactMethod::DirectMessage),
            "email" | "mail" => Ok(ContactMethod::Email),
            _ => Err(ParseError::UnknownContactMethod(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Terms of service for the campaign.
    Guidelines,
    /// Message sent to winners.
    Notification,
    /// Form winners fill in with delivery details.
    IntakeForm,
    /// Letter shipped together with the prize.
    EnclosedLetter,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::Guidelines,
        DocumentKind::Notification,
        DocumentKind::IntakeForm,
        DocumentKind::EnclosedLetter,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Guidelines => "guidelines",
            DocumentKind::Notification => "notification",
            DocumentKind::IntakeForm => "intake_form",
            DocumentKind::EnclosedLetter => "enclosed_letter",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "guidelines" | "tos" => Ok(DocumentKind::Guidelines),
            "notification" | "dm" => Ok(DocumentKind::Notification),
            "intake_form" | "form" => Ok(DocumentKind::IntakeForm),
            "enclosed_letter" | "letter" => Ok(DocumentKind::EnclosedLetter),
            _ => Err(ParseError::UnknownDocumentKind(s.to_string())),
        }
    }
}

/// Everything a generator needs to know besides the template and the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentContext {
    pub family: TemplateFamily,
    pub platform: Platform,
    #[serde(default)]
    pub contact_method: ContactMethod,
}

impl DocumentContext {
    pub fn new(family: TemplateFamily) -> Self {
        Self {
            family,
            platform: family.platform(),
            contact_method: ContactMethod::default(),
        }
    }

    pub fn with_contact_method(mut self, contact_method: ContactMethod) -> Self {
        self.contact_method = contact_method;
        self
    }
}

impl Default for DocumentContext {
    fn default() -> Self {
        Self::new(TemplateFamily::default())
    }
}
