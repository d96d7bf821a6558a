//! Structural page snapshot: the interactive elements an agent can act on.
//!
//! One DOM evaluation collects every element matching a fixed allowlist
//! (anchors, buttons, form controls, explicit click handlers, button roles),
//! in document order. A relevance filter then keeps only elements that carry
//! a label, an id, or a class, the ones a caller can plausibly target.
//! Invisible or decorative elements can still appear if they carry an
//! id/class; the filter is about relevance, not correctness.

use serde::{Deserialize, Serialize};

/// Script evaluated in the page to collect interactive elements.
///
/// Indices are assigned over the matched set before filtering, so they are
/// stable references into the DOM order even when the filter drops entries.
pub(crate) const INTERACTIVE_ELEMENTS_JS: &str = r#"
Array.from(document.querySelectorAll('a, button, input, select, textarea, [onclick], [role="button"]'))
    .map((el, i) => ({
        index: i,
        tag: el.tagName.toLowerCase(),
        label: (el.textContent || '').trim() || el.value || el.getAttribute('placeholder') || '',
        type: el.getAttribute('type') || '',
        role: el.getAttribute('role') || '',
        id: el.id || '',
        classes: Array.from(el.classList)
    }))
"#;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotElement {
    /// Zero-based position within the matched set, in DOM order.
    pub index: usize,
    pub tag: String,
    /// Trimmed text content, else value, else placeholder, else empty.
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type", default)]
    pub type_attr: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub classes: Vec<String>,
}

impl SnapshotElement {
    fn is_relevant(&self) -> bool {
        !self.label.is_empty() || !self.id.is_empty() || !self.classes.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub url: String,
    pub title: String,
    pub elements: Vec<SnapshotElement>,
}

/// Keep only elements a caller can plausibly identify.
pub(crate) fn keep_relevant(elements: Vec<SnapshotElement>) -> Vec<SnapshotElement> {
    elements.into_iter().filter(SnapshotElement::is_relevant).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(index: usize, label: &str, id: &str, classes: &[&str]) -> SnapshotElement {
        SnapshotElement {
            index,
            tag: "button".to_string(),
            label: label.to_string(),
            type_attr: String::new(),
            role: String::new(),
            id: id.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_unlabeled_anonymous_elements_dropped() {
        let kept = keep_relevant(vec![
            element(0, "", "", &[]),
            element(1, "Submit", "", &[]),
            element(2, "", "test-button", &[]),
            element(3, "", "", &["btn", "primary"]),
        ]);

        let indices: Vec<usize> = kept.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_indices_survive_filtering() {
        // Index 0 is dropped; the survivor keeps its DOM-order index.
        let kept = keep_relevant(vec![element(0, "", "", &[]), element(1, "Go", "", &[])]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].index, 1);
    }

    #[test]
    fn test_empty_set_stays_empty() {
        assert!(keep_relevant(Vec::new()).is_empty());
    }

    #[test]
    fn test_deserializes_from_page_shape() {
        let raw = serde_json::json!([
            {
                "index": 0,
                "tag": "button",
                "label": "Click me",
                "type": "submit",
                "role": "",
                "id": "test-button",
                "classes": ["wide"]
            }
        ]);

        let elements: Vec<SnapshotElement> = serde_json::from_value(raw).unwrap();
        assert_eq!(elements[0].tag, "button");
        assert_eq!(elements[0].type_attr, "submit");
        assert_eq!(elements[0].id, "test-button");
    }
}
