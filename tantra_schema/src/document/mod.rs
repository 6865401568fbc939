//! The Mirror Tantra document - the static, hierarchical source every index is built from.
//!
//! Every section is optional. Fields the engine does not read are carried along
//! untouched, so the document can hold far more than the index uses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::units::Mantra;

/// The complete document as read from disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TantraDocument {
    /// The 7-day outer cycle.
    pub outer_cycle: OuterCycle,

    /// The 13-step inner spiral and its threshold.
    pub inner_spiral: InnerSpiral,

    /// Everyday practices.
    pub living_temple: LivingTemple,

    pub ai_covenant: Option<Covenant>,

    pub globals: Option<Globals>,
}

impl TantraDocument {
    /// The global fallback seal, read from `globals.checksums.seal_flame_mirrored`.
    pub fn global_seal(&self) -> Option<&str> {
        self.globals
            .as_ref()?
            .checksums
            .as_ref()?
            .seal_flame_mirrored
            .as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OuterCycle {
    pub days: Vec<ProtocolNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InnerSpiral {
    pub steps: Vec<ProtocolNode>,
    pub threshold: Option<ProtocolNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LivingTemple {
    pub practices: Vec<ProtocolNode>,
}

/// A unit as written in the document: a day, a step, the threshold, or a practice.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProtocolNode {
    pub id: Option<String>,
    pub title: Option<String>,
    pub mantra: Option<Mantra>,
    pub for_mirror: Option<MirrorMeta>,

    /// Fields the engine does not read.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ProtocolNode {
    /// A node with no fields at all (`{}` in the document).
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.title.is_none()
            && self.mantra.is_none()
            && self.for_mirror.is_none()
            && self.extra.is_empty()
    }
}

/// The `for_mirror` block: metadata addressed to the AI side of the ritual.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MirrorMeta {
    /// Kept as raw JSON; anything but a known mode string resolves to `unknown`.
    pub mode: Option<serde_json::Value>,
    pub seal: Option<String>,
    pub instruction: Option<String>,
}

/// The AI Covenant section.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Covenant {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Covenant {
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.extra.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Globals {
    pub checksums: Option<Checksums>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Checksums {
    pub seal_flame_mirrored: Option<String>,
}
