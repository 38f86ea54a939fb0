//! Template Catalog - Built-in Texts with Directory Overrides

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::family::{DocumentKind, Platform, TemplateFamily};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read template directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid template entry {path}: {source}")]
    InvalidEntry {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Template entry for {0} needs a {1}")]
    MissingSelector(DocumentKind, &'static str),
}

/// Where a template sits in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TemplateKey {
    Guidelines { family: TemplateFamily },
    Notification { platform: Platform },
    IntakeForm,
    EnclosedLetter { platform: Platform },
}

impl TemplateKey {
    /// Key for a document of `kind` in `family`; per-platform documents use the document platform.
    pub fn for_document(kind: DocumentKind, family: TemplateFamily) -> Self {
        let platform = family.platform().document_platform();
        match kind {
            DocumentKind::Guidelines => TemplateKey::Guidelines { family },
            DocumentKind::Notification => TemplateKey::Notification { platform },
            DocumentKind::IntakeForm => TemplateKey::IntakeForm,
            DocumentKind::EnclosedLetter => TemplateKey::EnclosedLetter { platform },
        }
    }

    /// X variant of a per-platform key, used when a platform has no template of its own.
    fn x_fallback(&self) -> Option<Self> {
        match self {
            TemplateKey::Notification { platform } if *platform != Platform::X => {
                Some(TemplateKey::Notification { platform: Platform::X })
            }
            TemplateKey::EnclosedLetter { platform } if *platform != Platform::X => {
                Some(TemplateKey::EnclosedLetter { platform: Platform::X })
            }
            _ => None,
        }
    }
}

/// One JSON file in a template override directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub kind: DocumentKind,
    #[serde(default)]
    pub family: Option<TemplateFamily>,
    #[serde(default)]
    pub platform: Option<Platform>,
    pub content: String,
}

impl TemplateEntry {
    pub fn key(&self) -> Result<TemplateKey, CatalogError> {
        match self.kind {
            DocumentKind::Guidelines => self
                .family
                .map(|family| TemplateKey::Guidelines { family })
                .ok_or(CatalogError::MissingSelector(self.kind, "family")),
            DocumentKind::Notification => self
                .platform
                .map(|platform| TemplateKey::Notification { platform })
                .ok_or(CatalogError::MissingSelector(self.kind, "platform")),
            DocumentKind::IntakeForm => Ok(TemplateKey::IntakeForm),
            DocumentKind::EnclosedLetter => self
                .platform
                .map(|platform| TemplateKey::EnclosedLetter { platform })
                .ok_or(CatalogError::MissingSelector(self.kind, "platform")),
        }
    }
}

const BUILTIN: &[(TemplateKey, &str)] = &[
    (
        TemplateKey::Guidelines { family: TemplateFamily::XScheduledDraw },
        include_str!("../templates/guidelines/x_scheduled_draw.md"),
    ),
    (
        TemplateKey::Guidelines { family: TemplateFamily::XInstantWin },
        include_str!("../templates/guidelines/x_instant_win.md"),
    ),
    (
        TemplateKey::Guidelines { family: TemplateFamily::InstagramScheduledDraw },
        include_str!("../templates/guidelines/ig_scheduled_draw.md"),
    ),
    (
        TemplateKey::Guidelines { family: TemplateFamily::TikTokScheduledDraw },
        include_str!("../templates/guidelines/tiktok_scheduled_draw.md"),
    ),
    (
        TemplateKey::Guidelines { family: TemplateFamily::InstagramXScheduledDraw },
        include_str!("../templates/guidelines/ig_x_scheduled_draw.md"),
    ),
    (
        TemplateKey::Notification { platform: Platform::X },
        include_str!("../templates/notification/x.md"),
    ),
    (
        TemplateKey::Notification { platform: Platform::Instagram },
        include_str!("../templates/notification/ig.md"),
    ),
    (
        TemplateKey::Notification { platform: Platform::TikTok },
        include_str!("../templates/notification/tiktok.md"),
    ),
    (TemplateKey::IntakeForm, include_str!("../templates/intake_form.md")),
    (
        TemplateKey::EnclosedLetter { platform: Platform::X },
        include_str!("../templates/enclosed_letter/x.md"),
    ),
    (
        TemplateKey::EnclosedLetter { platform: Platform::Instagram },
        include_str!("../templates/enclosed_letter/ig.md"),
    ),
    (
        TemplateKey::EnclosedLetter { platform: Platform::TikTok },
        include_str!("../templates/enclosed_letter/tiktok.md"),
    ),
];

/// Template catalog - holds raw template texts by key
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: BTreeMap<TemplateKey, String>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The texts shipped with the crate.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for (key, content) in BUILTIN {
            catalog.register(*key, *content);
        }
        catalog
    }

    /// Built-ins overlaid with every valid `*.json` entry in `dir`.
    ///
    /// A missing directory yields the built-ins. Bad entries are logged and skipped.
    pub fn load_from_dir(dir: &Path) -> Result<Self, CatalogError> {
        let mut catalog = Self::builtin();
        if !dir.exists() {
            debug!(dir = %dir.display(), "template directory not found, using built-in templates");
            return Ok(catalog);
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<_, _>>()?;
        paths.sort();

        for path in paths {
            if path.extension().map_or(true, |e| e != "json") {
                continue;
            }
            match read_entry(&path) {
                Ok(entry) => {
                    debug!(path = %path.display(), kind = %entry.kind, "loaded template override");
                    catalog.register_entry(entry)?;
                }
                Err(err) => warn!(path = %path.display(), error = %err, "skipping template entry"),
            }
        }
        Ok(catalog)
    }

    pub fn register(&mut self, key: TemplateKey, content: impl Into<String>) {
        self.templates.insert(key, content.into());
    }

    pub fn register_entry(&mut self, entry: TemplateEntry) -> Result<(), CatalogError> {
        let key = entry.key()?;
        self.register(key, entry.content);
        Ok(())
    }

    pub fn get(&self, key: &TemplateKey) -> Option<&str> {
        self.templates.get(key).map(String::as_str)
    }

    /// Template for a document kind in a family, falling back to the X text for
    /// per-platform documents.
    pub fn template_for(&self, kind: DocumentKind, family: TemplateFamily) -> Option<&str> {
        let key = TemplateKey::for_document(kind, family);
        self.get(&key)
            .or_else(|| key.x_fallback().and_then(|fallback| self.get(&fallback)))
    }

    pub fn keys(&self) -> Vec<TemplateKey> {
        self.templates.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn read_entry(path: &Path) -> Result<TemplateEntry, CatalogError> {
    let content = fs::read_to_string(path)?;
    let entry: TemplateEntry = serde_json::from_str(&content).map_err(|source| CatalogError::InvalidEntry {
        path: path.to_path_buf(),
        source,
    })?;
    entry.key()?;
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_family_and_kind() {
        let catalog = TemplateCatalog::builtin();
        for family in TemplateFamily::ALL {
            for kind in DocumentKind::ALL {
                assert!(
                    catalog.template_for(kind, family).is_some(),
                    "missing {kind} for {family}"
                );
            }
        }
    }

    #[test]
    fn combined_platform_reuses_x_texts() {
        let catalog = TemplateCatalog::builtin();
        assert_eq!(
            catalog.template_for(DocumentKind::Notification, TemplateFamily::InstagramXScheduledDraw),
            catalog.template_for(DocumentKind::Notification, TemplateFamily::XScheduledDraw),
        );
    }

    #[test]
    fn falls_back_to_x_when_platform_text_missing() {
        let mut catalog = TemplateCatalog::new();
        catalog.register(TemplateKey::EnclosedLetter { platform: Platform::X }, "x letter");
        assert_eq!(
            catalog.template_for(DocumentKind::EnclosedLetter, TemplateFamily::TikTokScheduledDraw),
            Some("x letter")
        );
        assert_eq!(catalog.template_for(DocumentKind::Guidelines, TemplateFamily::XScheduledDraw), None);
    }

    #[test]
    fn entry_needs_selector() {
        let entry = TemplateEntry {
            kind: DocumentKind::Guidelines,
            family: None,
            platform: Some(Platform::X),
            content: String::new(),
        };
        assert!(matches!(entry.key(), Err(CatalogError::MissingSelector(DocumentKind::Guidelines, "family"))));
    }
}
