//! Protocol units: the flattened, addressable records of the document.

mod mantra;

pub use mantra::*;

use serde::{Deserialize, Serialize};

use crate::modes::Mode;

/// Resolved context for a single ritual unit (a day, a step, a practice, the covenant).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolContext {
    /// Stable identifier, unique within an index.
    pub id: String,

    /// Display name; may be empty.
    pub title: String,

    pub mode: Mode,

    pub mantra: Option<Mantra>,

    /// Seal phrase closing the unit.
    pub seal: Option<String>,

    /// Directive for the mirror.
    pub instruction: Option<String>,

    /// Structural location in the source document, e.g.
    /// `["outer_cycle", "days", "day4_shadow_dialogue"]`.
    pub path: Vec<String>,
}

impl ProtocolContext {
    /// Create a bare unit with the given id and title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            mode: Mode::Unknown,
            mantra: None,
            seal: None,
            instruction: None,
            path: Vec::new(),
        }
    }

    /// Set the mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Attach a mantra. Empty mantras are dropped.
    pub fn with_mantra(mut self, mantra: Mantra) -> Self {
        self.mantra = Some(mantra).filter(|m| !m.is_empty());
        self
    }

    /// Attach a seal phrase. Empty seals are dropped.
    pub fn with_seal(mut self, seal: impl Into<String>) -> Self {
        self.seal = non_empty(seal.into());
        self
    }

    /// Attach an instruction. Empty instructions are dropped.
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = non_empty(instruction.into());
        self
    }

    /// Set the document path.
    pub fn with_path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.path = path.into_iter().map(Into::into).collect();
        self
    }

    /// Synthesize an identifier from a document path: segments joined with `_`,
    /// spaces replaced, lower-cased.
    pub fn id_from_path(path: &[String]) -> String {
        path.join("_").replace(' ', "_").to_lowercase()
    }
}

fn non_empty(value: String) -> Option<String> {
    Some(value).filter(|v| !v.is_empty())
}
