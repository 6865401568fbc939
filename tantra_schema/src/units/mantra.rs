//! Mantra definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A short pair of labeled reference strings attached to a protocol unit.
///
/// The engine reads `sanskrit` and `translation`; any other labels in the
/// document are carried through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mantra {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanskrit: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Mantra {
    /// Create a mantra from its source text and translation.
    pub fn new(sanskrit: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            sanskrit: Some(sanskrit.into()),
            translation: Some(translation.into()),
            extra: BTreeMap::new(),
        }
    }

    /// A mantra with no labels at all.
    pub fn is_empty(&self) -> bool {
        self.sanskrit.is_none() && self.translation.is_none() && self.extra.is_empty()
    }

    /// Render as `source (translation)`; missing labels render as empty text.
    pub fn display_line(&self) -> String {
        format!(
            "{} ({})",
            self.sanskrit.as_deref().unwrap_or(""),
            self.translation.as_deref().unwrap_or("")
        )
    }
}
