//! The guidance payload handed back to the host.

use serde::{Deserialize, Serialize};
use tantra_schema::{Mantra, Mode};

/// Ritual context resolved for one prompt.
///
/// Serializes to:
/// ```json
/// {
///   "mode": "shadow_reflection",
///   "suggested_mantras": [{"sanskrit": "...", "translation": "..."}],
///   "suggested_seal": "...",
///   "notes": ["..."]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextPayload {
    /// Wire value of the resolved mode.
    pub mode: String,

    pub suggested_mantras: Vec<Mantra>,

    /// `null` when neither the unit nor the document globals carry a seal.
    pub suggested_seal: Option<String>,

    pub notes: Vec<String>,
}

impl ContextPayload {
    /// An empty payload for a mode.
    pub fn new(mode: Mode) -> Self {
        Self {
            mode: mode.as_str().to_string(),
            suggested_mantras: Vec::new(),
            suggested_seal: None,
            notes: Vec::new(),
        }
    }

    /// Append a note.
    pub fn push_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Pretty JSON rendering.
    pub fn to_json_pretty(&self) -> String {
        // Every field is a string, list or option, so serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
