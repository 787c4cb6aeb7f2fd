#![forbid(unsafe_code)]

//! Minimal element selectors.
//!
//! Browser hosts pass [`Selector::as_str`] straight to `querySelectorAll`.
//! Headless hosts evaluate the parsed form with [`Selector::matches`], so
//! only the two shapes the reconciler needs are accepted:
//!
//! - `[class*="panel-"]`: the class attribute contains a substring
//! - `.panel`: the element has an exact class

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, ViewstateError};

/// Selector for the elements whose height tracks the frame aspect.
pub const PANEL_SELECTOR: &str = r#"[class*="panel-"]"#;

#[derive(Debug, Clone, PartialEq, Eq)]
enum SelectorKind {
    ClassContains(String),
    Class(String),
}

/// A parsed element selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    kind: SelectorKind,
}

impl Selector {
    /// Parse a selector string.
    pub fn parse(source: &str) -> Result<Self> {
        let trimmed = source.trim();
        let kind = if let Some(inner) = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            let value = inner
                .trim()
                .strip_prefix("class")
                .map(str::trim_start)
                .and_then(|rest| rest.strip_prefix("*="))
                .map(str::trim)
                .ok_or_else(|| unsupported(source))?;
            SelectorKind::ClassContains(unquote(value).ok_or_else(|| unsupported(source))?)
        } else if let Some(class) = trimmed.strip_prefix('.') {
            if class.is_empty() || class.contains(|c: char| c.is_whitespace() || c == '.') {
                return Err(unsupported(source));
            }
            SelectorKind::Class(class.to_owned())
        } else {
            return Err(unsupported(source));
        };

        Ok(Self {
            source: trimmed.to_owned(),
            kind,
        })
    }

    /// The default panel selector, `[class*="panel-"]`.
    #[must_use]
    pub fn panel() -> Self {
        Self {
            source: PANEL_SELECTOR.to_owned(),
            kind: SelectorKind::ClassContains("panel-".to_owned()),
        }
    }

    /// Selector text as written, suitable for `querySelectorAll`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Test an element's class list against this selector.
    #[must_use]
    pub fn matches<S: AsRef<str>>(&self, classes: &[S]) -> bool {
        match &self.kind {
            SelectorKind::ClassContains(needle) => {
                // Substring match runs over the space-joined attribute value.
                let attr = classes
                    .iter()
                    .map(AsRef::as_ref)
                    .collect::<Vec<_>>()
                    .join(" ");
                attr.contains(needle.as_str())
            }
            SelectorKind::Class(name) => classes.iter().any(|c| c.as_ref() == name),
        }
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::panel()
    }
}

impl FromStr for Selector {
    type Err = ViewstateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn unquote(value: &str) -> Option<String> {
    let unquoted = ['"', '\'']
        .into_iter()
        .find_map(|q| value.strip_prefix(q).and_then(|v| v.strip_suffix(q)))
        .unwrap_or(value);
    (!unquoted.is_empty()).then(|| unquoted.to_owned())
}

fn unsupported(source: &str) -> ViewstateError {
    ViewstateError::invalid_input(format!("unsupported selector {source:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_panel_selector() {
        let sel = Selector::parse(PANEL_SELECTOR).expect("panel selector parses");
        assert_eq!(sel, Selector::panel());
        assert_eq!(sel.as_str(), PANEL_SELECTOR);
    }

    #[test]
    fn substring_match_spans_class_boundaries() {
        let sel = Selector::panel();
        assert!(sel.matches(&["hero", "panel-main"]));
        assert!(sel.matches(&["side-panel-left"]));
        assert!(!sel.matches(&["panel"]));
        assert!(!sel.matches::<&str>(&[]));
    }

    #[test]
    fn class_selector_is_exact() {
        let sel: Selector = ".card".parse().expect("class selector parses");
        assert!(sel.matches(&["x", "card"]));
        assert!(!sel.matches(&["cards"]));
    }

    #[test]
    fn accepts_single_and_bare_quotes() {
        assert!(Selector::parse("[class*='panel-']").is_ok());
        assert!(Selector::parse("[class *= panel-]").is_ok());
    }

    #[test]
    fn rejects_unsupported_shapes() {
        for bad in ["div", "[id*=\"x\"]", "[class*=\"\"]", ".", ".a .b", "#main"] {
            assert!(
                matches!(Selector::parse(bad), Err(ViewstateError::InvalidInput(_))),
                "{bad} should be rejected"
            );
        }
    }
}
