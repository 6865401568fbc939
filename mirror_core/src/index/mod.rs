//! Protocol Index - the flat, read-only mapping from protocol id to resolved unit.
//!
//! The index is built in one pass over the document and never mutated afterwards.
//! Traversal order is fixed:
//! 1. `outer_cycle.days`
//! 2. `inner_spiral.steps`
//! 3. `inner_spiral.threshold`
//! 4. `living_temple.practices`
//! 5. `ai_covenant`
//!
//! Later units silently replace earlier ones with the same id.

mod convert;
mod id;

pub use id::IndexId;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tantra_schema::{ProtocolContext, ProtocolNode, TantraDocument};
use tracing::{debug, info};

use crate::config::default_document_path;
use crate::error::IndexError;
use convert::{context_from_covenant, context_from_node, segment_for};

/// The flattened protocol index.
#[derive(Debug, Clone)]
pub struct ProtocolIndex {
    id: IndexId,

    /// Where the document was read from, if it came from disk.
    source: Option<PathBuf>,

    /// All units stored by id.
    protocols: HashMap<String, ProtocolContext>,

    /// `globals.checksums.seal_flame_mirrored`, if the document has one.
    global_seal: Option<String>,
}

impl ProtocolIndex {
    /// Load the bundled document.
    pub fn load_default() -> Result<Self, IndexError> {
        Self::load(default_document_path())
    }

    /// Load and flatten the document at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, IndexError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(IndexError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| IndexError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let document: TantraDocument =
            serde_json::from_str(&content).map_err(|source| IndexError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut index = Self::from_document(&document);
        index.source = Some(path.to_path_buf());

        info!(
            index_id = %index.id,
            path = %path.display(),
            protocols = index.len(),
            "loaded Mirror Tantra document"
        );
        Ok(index)
    }

    /// Build an index from document text held in memory.
    pub fn from_json_str(content: &str) -> serde_json::Result<Self> {
        let document: TantraDocument = serde_json::from_str(content)?;
        Ok(Self::from_document(&document))
    }

    /// Flatten an already parsed document.
    pub fn from_document(document: &TantraDocument) -> Self {
        let mut builder = IndexBuilder::default();

        // Outer 7-day cycle
        builder.add_nodes(&document.outer_cycle.days, "outer_cycle", "days");

        // Inner 13-step spiral
        builder.add_nodes(&document.inner_spiral.steps, "inner_spiral", "steps");

        // Inner threshold
        let threshold = document.inner_spiral.threshold.as_ref();
        if let Some(threshold) = threshold.filter(|t| !t.is_empty()) {
            builder.insert(context_from_node(
                threshold,
                vec!["inner_spiral".to_string(), "threshold".to_string()],
            ));
        }

        // Living Temple practices
        builder.add_nodes(&document.living_temple.practices, "living_temple", "practices");

        // AI Covenant, treated as a protocol container
        if let Some(covenant) = document.ai_covenant.as_ref().filter(|c| !c.is_empty()) {
            builder.insert(context_from_covenant(covenant));
        }

        builder.finish(document.global_seal().map(str::to_string))
    }

    /// Identifier of this index instance.
    pub fn id(&self) -> IndexId {
        self.id
    }

    /// Path the document was loaded from.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// All protocol ids, sorted.
    pub fn list_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.protocols.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Fetch a unit by id.
    pub fn get(&self, id: &str) -> Option<&ProtocolContext> {
        self.protocols.get(id)
    }

    /// Check if a unit exists.
    pub fn contains(&self, id: &str) -> bool {
        self.protocols.contains_key(id)
    }

    /// All units, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &ProtocolContext> {
        self.list_ids()
            .into_iter()
            .filter_map(move |id| self.protocols.get(id))
    }

    /// The global fallback seal.
    pub fn global_seal(&self) -> Option<&str> {
        self.global_seal.as_deref()
    }

    pub fn len(&self) -> usize {
        self.protocols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.protocols.is_empty()
    }
}

impl Default for ProtocolIndex {
    fn default() -> Self {
        IndexBuilder::default().finish(None)
    }
}

/// Accumulates units during the single build pass.
#[derive(Default)]
struct IndexBuilder {
    protocols: HashMap<String, ProtocolContext>,
}

impl IndexBuilder {
    fn add_nodes(&mut self, nodes: &[ProtocolNode], section: &str, list: &str) {
        for node in nodes {
            let path = vec![section.to_string(), list.to_string(), segment_for(node)];
            self.insert(context_from_node(node, path));
        }
    }

    fn insert(&mut self, context: ProtocolContext) {
        if let Some(previous) = self.protocols.get(&context.id) {
            debug!(
                id = %context.id,
                replaced = ?previous.path,
                by = ?context.path,
                "duplicate protocol id, keeping the later unit"
            );
        }
        self.protocols.insert(context.id.clone(), context);
    }

    fn finish(self, global_seal: Option<String>) -> ProtocolIndex {
        ProtocolIndex {
            id: IndexId::new(),
            source: None,
            protocols: self.protocols,
            global_seal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tantra_schema::{Mantra, Mode};

    const DOCUMENT: &str = r#"{
        "outer_cycle": {
            "days": [
                {
                    "id": "day1_opening_the_mirror",
                    "title": "Opening the Mirror",
                    "mantra": {"sanskrit": "darpanam udghatayami", "translation": "I open the mirror"},
                    "for_mirror": {"mode": "open_protocol", "seal": "The mirror is open"}
                },
                {
                    "id": "day4_shadow_dialogue",
                    "title": "Shadow Dialogue",
                    "for_mirror": {"mode": "shadow_reflection"}
                }
            ]
        },
        "inner_spiral": {
            "steps": [
                {"title": "Breath", "for_mirror": {"mode": "breath_ack"}},
                {"id": "step2_gentle_light", "title": "Gentle Light", "for_mirror": {"mode": "gentle_illumination"}}
            ],
            "threshold": {"id": "threshold_checkpoints", "title": "Threshold Checkpoints", "for_mirror": {"mode": "pause_protocol", "seal": "We pause"}}
        },
        "living_temple": {
            "practices": [
                {"id": "broken_mirror", "title": "Broken Mirror", "for_mirror": {"mode": "failure_state"}},
                {"id": "day4_shadow_dialogue", "title": "Shadow Practice", "for_mirror": {"mode": "shadow_reveal"}}
            ]
        },
        "ai_covenant": {"title": "The Covenant", "description": "Meet as mirrors."},
        "globals": {"checksums": {"seal_flame_mirrored": "The flame is mirrored"}}
    }"#;

    #[test]
    fn test_build_from_document() {
        let index = ProtocolIndex::from_json_str(DOCUMENT).unwrap();

        assert_eq!(index.len(), 7);
        assert_eq!(
            index.list_ids(),
            vec![
                "ai_covenant",
                "broken_mirror",
                "day1_opening_the_mirror",
                "day4_shadow_dialogue",
                "inner_spiral_steps_",
                "step2_gentle_light",
                "threshold_checkpoints",
            ]
        );
        assert_eq!(index.global_seal(), Some("The flame is mirrored"));
    }

    #[test]
    fn test_unit_fields() {
        let index = ProtocolIndex::from_json_str(DOCUMENT).unwrap();

        let opening = index.get("day1_opening_the_mirror").unwrap();
        assert_eq!(opening.mode, Mode::Open);
        assert_eq!(
            opening.mantra,
            Some(Mantra::new("darpanam udghatayami", "I open the mirror"))
        );
        assert_eq!(opening.seal.as_deref(), Some("The mirror is open"));
        assert_eq!(
            opening.path,
            vec!["outer_cycle", "days", "day1_opening_the_mirror"]
        );

        let threshold = index.get("threshold_checkpoints").unwrap();
        assert_eq!(threshold.mode, Mode::Pause);
        assert_eq!(threshold.path, vec!["inner_spiral", "threshold"]);

        let breath = index.get("inner_spiral_steps_").unwrap();
        assert_eq!(breath.title, "Breath");
        assert_eq!(breath.mode, Mode::BreathAck);
        assert_eq!(breath.path, vec!["inner_spiral", "steps", ""]);
    }

    #[test]
    fn test_covenant_unit() {
        let index = ProtocolIndex::from_json_str(DOCUMENT).unwrap();

        let covenant = index.get("ai_covenant").unwrap();
        assert_eq!(covenant.title, "The Covenant");
        assert_eq!(covenant.mode, Mode::EthicalRecalibration);
        assert_eq!(covenant.instruction.as_deref(), Some("Meet as mirrors."));
    }

    #[test]
    fn test_duplicate_id_last_write_wins() {
        let index = ProtocolIndex::from_json_str(DOCUMENT).unwrap();

        let shadow = index.get("day4_shadow_dialogue").unwrap();
        assert_eq!(shadow.title, "Shadow Practice");
        assert_eq!(shadow.mode, Mode::ShadowReveal);
        assert_eq!(shadow.path[0], "living_temple");
    }

    #[test]
    fn test_list_ids_round_trip() {
        let index = ProtocolIndex::from_json_str(DOCUMENT).unwrap();

        for id in index.list_ids() {
            assert_eq!(index.get(id).map(|p| p.id.as_str()), Some(id));
        }
        assert_eq!(index.iter().count(), index.len());
    }

    #[test]
    fn test_empty_sections() {
        let index =
            ProtocolIndex::from_json_str(r#"{"inner_spiral": {"threshold": {}}, "ai_covenant": {}}"#)
                .unwrap();
        assert!(index.is_empty());
        assert!(index.list_ids().is_empty());
        assert!(index.global_seal().is_none());
        assert!(index.get("ai_covenant").is_none());
    }

    #[test]
    fn test_sections_with_only_unread_fields_are_kept() {
        let index = ProtocolIndex::from_json_str(
            r#"{"inner_spiral": {"threshold": {"name": "Gate"}}, "ai_covenant": {"principles": ["x"]}}"#,
        )
        .unwrap();

        assert_eq!(index.list_ids(), vec!["ai_covenant", "inner_spiral_threshold"]);

        let threshold = index.get("inner_spiral_threshold").unwrap();
        assert_eq!(threshold.mode, Mode::Unknown);
        assert_eq!(threshold.path, vec!["inner_spiral", "threshold"]);

        let covenant = index.get("ai_covenant").unwrap();
        assert_eq!(covenant.title, "AI Covenant");
        assert_eq!(covenant.mode, Mode::EthicalRecalibration);
        assert!(covenant.instruction.is_none());
    }

    #[test]
    fn test_non_string_mode_is_unknown() {
        let index = ProtocolIndex::from_json_str(
            r#"{"outer_cycle": {"days": [
                {"id": "d1", "for_mirror": {"mode": 5}},
                {"id": "d2", "for_mirror": {"mode": ["open_protocol"], "seal": "kept"}},
                {"id": "d3", "for_mirror": {"mode": {"name": "open_protocol"}}},
                {"id": "d4", "for_mirror": {"mode": null}}
            ]}}"#,
        )
        .unwrap();

        assert_eq!(index.len(), 4);
        for id in ["d1", "d2", "d3", "d4"] {
            assert_eq!(index.get(id).unwrap().mode, Mode::Unknown, "id: {id}");
        }
        assert_eq!(index.get("d2").unwrap().seal.as_deref(), Some("kept"));
        assert_eq!(index.get("d1").unwrap().path, vec!["outer_cycle", "days", "d1"]);
    }

    #[test]
    fn test_units_without_id_share_one_record() {
        let index = ProtocolIndex::from_json_str(
            r#"{"outer_cycle": {"days": [
                {"title": "First", "for_mirror": {"mode": "seed_prompt"}},
                {"id": "", "title": "Second", "for_mirror": {"mode": "grounding"}}
            ]}}"#,
        )
        .unwrap();

        assert_eq!(index.list_ids(), vec!["outer_cycle_days_"]);

        let day = index.get("outer_cycle_days_").unwrap();
        assert_eq!(day.title, "Second");
        assert_eq!(day.mode, Mode::Grounding);
        assert_eq!(day.path, vec!["outer_cycle", "days", ""]);
    }

    #[test]
    fn test_default_index_is_empty() {
        let index = ProtocolIndex::default();
        assert!(index.is_empty());
        assert!(index.source().is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let result = ProtocolIndex::load("/definitely/not/here/mirror_tantra.json");
        assert!(matches!(result, Err(IndexError::NotFound { .. })));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ \"outer_cycle\": ").unwrap();

        let result = ProtocolIndex::load(file.path());
        assert!(matches!(result, Err(IndexError::Parse { .. })));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOCUMENT.as_bytes()).unwrap();

        let index = ProtocolIndex::load(file.path()).unwrap();
        assert_eq!(index.len(), 7);
        assert_eq!(index.source(), Some(file.path()));
    }

    #[test]
    fn test_independent_instances() {
        let a = ProtocolIndex::from_json_str(DOCUMENT).unwrap();
        let b = ProtocolIndex::from_json_str(DOCUMENT).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.list_ids(), b.list_ids());
    }
}
