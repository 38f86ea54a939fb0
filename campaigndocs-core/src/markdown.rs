//! Markdown Stripper
//!
//! Output is pasted into word processors and DM boxes, so the fixed set of
//! Markdown markers the templates use is removed. Nothing is parsed.

use regex::Regex;
use std::sync::LazyLock;

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s+").expect("heading pattern"));
static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^[-*]\s+").expect("list pattern"));
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern"));
static RULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^---+$").expect("rule pattern"));
static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("fence pattern"));
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("code pattern"));
static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank run pattern"));

/// Strip Markdown markers in a fixed order and trim the result.
pub fn strip_markdown(text: &str) -> String {
    let text = HEADING.replace_all(text, "");
    let text = LIST_ITEM.replace_all(&text, "");
    let text = BOLD.replace_all(&text, "${1}");
    let text = RULE.replace_all(&text, "");
    let text = CODE_FENCE.replace_all(&text, "");
    let text = INLINE_CODE.replace_all(&text, "${1}");
    let text = BLANK_RUN.replace_all(&text, "\n\n");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_headings_lists_bold_and_blank_runs() {
        let input = "## Title\n- item **bold**\n\n\n\nend";
        assert_eq!(strip_markdown(input), "Title\nitem bold\n\nend");
    }

    #[test]
    fn removes_rules_and_fences() {
        let input = "above\n---\nbelow\n```\ncode\n```\n`inline` text";
        assert_eq!(strip_markdown(input), "above\n\nbelow\n\ninline text");
    }

    #[test]
    fn keeps_plain_text() {
        let input = "【応募期間】\n2024年12月1日（日）〜2024年12月25日（水）";
        assert_eq!(strip_markdown(input), input);
    }

    #[test]
    fn star_bullets_and_deep_headings() {
        assert_eq!(strip_markdown("###### h6\n* star"), "h6\nstar");
        assert_eq!(strip_markdown("####### seven"), "####### seven");
    }
}
