//! Target identity resolution and semantic naming
//!
//! Two small pure functions shared by the detectors and the emitter: a stable
//! tracking key for a clicked element, and a truncated human-readable label
//! for telemetry attributes.

use crate::types::ElementInfo;

/// Maximum characters in a semantic label before truncation
pub const MAX_LABEL_CHARS: usize = 50;

/// Resolve a stable tracking key for an element: the element id when present,
/// else a structural fallback derived from tag and class list.
///
/// Two visually distinct elements sharing the same fallback key (no id,
/// identical tag and classes) are intentionally treated as one tracked
/// target; this is an accepted approximation.
pub fn target_key(element: &ElementInfo) -> String {
    if let Some(id) = element.id.as_deref().filter(|s| !s.is_empty()) {
        return id.to_string();
    }

    let tag = if element.tag.is_empty() {
        "unknown"
    } else {
        element.tag.as_str()
    };

    if element.classes.is_empty() {
        tag.to_string()
    } else {
        format!("{}.{}", tag, element.classes.join("."))
    }
}

/// Produce a human-readable label for an element, using a fixed priority
/// order: explicit label attribute > visible text > title > alt > placeholder
/// > tag name fallback. The result is truncated to [`MAX_LABEL_CHARS`]
/// characters plus an ellipsis.
pub fn semantic_label(element: &ElementInfo) -> String {
    let candidates = [
        element.label.as_deref(),
        element.text.as_deref(),
        element.title.as_deref(),
        element.alt.as_deref(),
        element.placeholder.as_deref(),
    ];

    for candidate in candidates.into_iter().flatten() {
        let trimmed = candidate.trim();
        if !trimmed.is_empty() {
            return truncate_label(trimmed);
        }
    }

    let tag = if element.tag.is_empty() {
        "unknown"
    } else {
        element.tag.as_str()
    };
    format!("<{}>", tag)
}

/// Truncate to [`MAX_LABEL_CHARS`] characters, appending an ellipsis when
/// anything was cut. Operates on characters, not bytes, so multi-byte text
/// never splits mid-codepoint.
pub fn truncate_label(text: &str) -> String {
    if text.chars().count() <= MAX_LABEL_CHARS {
        return text.to_string();
    }
    let mut out: String = text.chars().take(MAX_LABEL_CHARS).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(tag: &str) -> ElementInfo {
        ElementInfo {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_target_key_prefers_id() {
        let mut el = element("button");
        el.id = Some("checkout".to_string());
        el.classes = vec!["btn".to_string()];
        assert_eq!(target_key(&el), "checkout");
    }

    #[test]
    fn test_target_key_structural_fallback() {
        let mut el = element("div");
        el.classes = vec!["card".to_string(), "clickable".to_string()];
        assert_eq!(target_key(&el), "div.card.clickable");

        let plain = element("span");
        assert_eq!(target_key(&plain), "span");
    }

    #[test]
    fn test_target_key_empty_id_ignored() {
        let mut el = element("div");
        el.id = Some(String::new());
        assert_eq!(target_key(&el), "div");
    }

    #[test]
    fn test_semantic_label_priority() {
        let mut el = element("button");
        el.text = Some("Buy now".to_string());
        el.title = Some("Purchase".to_string());
        assert_eq!(semantic_label(&el), "Buy now");

        el.label = Some("Buy now button".to_string());
        assert_eq!(semantic_label(&el), "Buy now button");

        el.label = None;
        el.text = None;
        assert_eq!(semantic_label(&el), "Purchase");
    }

    #[test]
    fn test_semantic_label_tag_fallback() {
        let el = element("img");
        assert_eq!(semantic_label(&el), "<img>");

        let mut blank = element("a");
        blank.text = Some("   ".to_string());
        assert_eq!(semantic_label(&blank), "<a>");
    }

    #[test]
    fn test_label_truncation() {
        let long = "x".repeat(80);
        let truncated = truncate_label(&long);
        assert_eq!(truncated.chars().count(), MAX_LABEL_CHARS + 1);
        assert!(truncated.ends_with('…'));

        let exact = "y".repeat(MAX_LABEL_CHARS);
        assert_eq!(truncate_label(&exact), exact);
    }
}
