//! Edit Rules - Declared Rewrites
//!
//! Each rule is one textual edit plus the families/platforms it applies to.
//! A RuleSet applies its rules in declared order.

use tracing::{debug, trace};

use crate::family::{ContactMethod, DocumentContext, Platform, TemplateFamily};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    /// Replace every occurrence of the target.
    Replace(String),
    /// Delete every line containing the target.
    DeleteLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    Always,
    Families(&'static [TemplateFamily]),
    Platforms(&'static [Platform]),
    ExceptPlatforms(&'static [Platform]),
    ContactMethod(ContactMethod),
}

impl Applicability {
    pub fn holds(&self, ctx: &DocumentContext) -> bool {
        match self {
            Applicability::Always => true,
            Applicability::Families(families) => families.contains(&ctx.family),
            Applicability::Platforms(platforms) => platforms.contains(&ctx.platform),
            Applicability::ExceptPlatforms(platforms) => !platforms.contains(&ctx.platform),
            Applicability::ContactMethod(method) => *method == ctx.contact_method,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRule {
    pub name: String,
    pub target: String,
    pub action: EditAction,
    pub applies: Applicability,
}

impl EditRule {
    pub fn replace(
        name: impl Into<String>,
        target: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            action: EditAction::Replace(replacement.into()),
            applies: Applicability::Always,
        }
    }

    pub fn delete_line(name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: token.into(),
            action: EditAction::DeleteLine,
            applies: Applicability::Always,
        }
    }

    /// Inline `content` when present, otherwise drop every line mentioning the token.
    pub fn slot(name: impl Into<String>, token: impl Into<String>, content: Option<String>) -> Self {
        match content {
            Some(content) => Self::replace(name, token, content),
            None => Self::delete_line(name, token),
        }
    }

    pub fn when(mut self, applies: Applicability) -> Self {
        self.applies = applies;
        self
    }

    pub fn applies_to(&self, ctx: &DocumentContext) -> bool {
        self.applies.holds(ctx)
    }

    pub fn apply(&self, text: &str) -> String {
        match &self.action {
            EditAction::Replace(replacement) => text.replace(&self.target, replacement),
            EditAction::DeleteLine => remove_lines_containing(text, &self.target),
        }
    }
}

/// Remove every line containing `token`, trailing newline included.
pub fn remove_lines_containing(text: &str, token: &str) -> String {
    if token.is_empty() {
        return text.to_string();
    }
    text.split_inclusive('\n')
        .filter(|line| !line.contains(token))
        .collect()
}

/// Ordered rule table.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<EditRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: EditRule) {
        self.rules.push(rule);
    }

    pub fn names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn apply(&self, text: &str, ctx: &DocumentContext) -> String {
        let mut out = text.to_string();
        for rule in &self.rules {
            if !rule.applies_to(ctx) {
                trace!(rule = %rule.name, family = %ctx.family, "edit rule not applicable");
                continue;
            }
            if !out.contains(&rule.target) {
                continue;
            }
            out = rule.apply(&out);
            debug!(rule = %rule.name, action = ?rule.action, "applied edit rule");
        }
        out
    }
}

impl FromIterator<EditRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = EditRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl Extend<EditRule> for RuleSet {
    fn extend<I: IntoIterator<Item = EditRule>>(&mut self, iter: I) {
        self.rules.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deletes_whole_lines() {
        let text = "head\n- [賞品名2] here\ntail\n";
        assert_eq!(remove_lines_containing(text, "[賞品名2]"), "head\ntail\n");
    }

    #[test]
    fn deletes_last_line_without_newline() {
        let text = "head\n[賞品名2]";
        assert_eq!(remove_lines_containing(text, "[賞品名2]"), "head\n");
    }

    #[test]
    fn deletes_every_matching_line() {
        let text = "[a]\nkeep\n[a] again\n";
        assert_eq!(remove_lines_containing(text, "[a]"), "keep\n");
    }

    #[test]
    fn slot_replaces_or_deletes() {
        let active = EditRule::slot("prize_1", "[p1]", Some("Mug".into()));
        assert_eq!(active.apply("- [p1]\n"), "- Mug\n");
        let inactive = EditRule::slot("prize_1", "[p1]", None);
        assert_eq!(inactive.apply("a\n- [p1]\nb"), "a\nb");
    }

    #[test]
    fn rule_set_honours_applicability_and_order() {
        let rules: RuleSet = [
            EditRule::replace("first", "A", "B"),
            EditRule::replace("second", "B", "C"),
            EditRule::replace("x-only", "C", "X")
                .when(Applicability::Platforms(&[Platform::X])),
        ]
        .into_iter()
        .collect();

        let x = DocumentContext::new(TemplateFamily::XScheduledDraw);
        let ig = DocumentContext::new(TemplateFamily::InstagramScheduledDraw);
        assert_eq!(rules.apply("A", &x), "X");
        assert_eq!(rules.apply("A", &ig), "C");
        assert_eq!(rules.names(), vec!["first", "second", "x-only"]);
    }

    #[test]
    fn except_platforms() {
        let rule = EditRule::delete_line("hint", "hint").when(Applicability::ExceptPlatforms(&[Platform::X]));
        assert!(!rule.applies_to(&DocumentContext::new(TemplateFamily::XInstantWin)));
        assert!(rule.applies_to(&DocumentContext::new(TemplateFamily::InstagramXScheduledDraw)));
    }
}
