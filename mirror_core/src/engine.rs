//! The engine facade: one loaded index plus the classifier and resolver that read it.

use std::path::Path;

use tantra_schema::{Mode, ProtocolContext};

use crate::classifier::ModeClassifier;
use crate::config::EngineConfig;
use crate::error::{IndexError, Result};
use crate::index::ProtocolIndex;
use crate::resolver::{ContextPayload, ContextResolver};

/// Loads the Mirror Tantra document once and answers lookups against it.
///
/// ```no_run
/// use mirror_core::MirrorEngine;
///
/// let engine = MirrorEngine::load(None)?;
/// let (mode, payload) = engine.resolve_context("Show me my shadow", None);
/// println!("{mode}: {:?}", payload.suggested_seal);
/// # Ok::<(), mirror_core::IndexError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MirrorEngine {
    index: ProtocolIndex,
    classifier: ModeClassifier,
    resolver: ContextResolver,
}

impl MirrorEngine {
    /// Load the document at `path`, or the bundled document when `None`.
    pub fn load(path: Option<&Path>) -> std::result::Result<Self, IndexError> {
        let index = match path {
            Some(path) => ProtocolIndex::load(path)?,
            None => ProtocolIndex::load_default()?,
        };
        Ok(Self::from_index(index))
    }

    /// Build an engine as described by a configuration.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let index = ProtocolIndex::load(config.resolved_document_path())?;
        Ok(Self {
            index,
            classifier: ModeClassifier::default(),
            resolver: ContextResolver::new(config.resolver_config()),
        })
    }

    /// Wrap an index that is already built.
    pub fn from_index(index: ProtocolIndex) -> Self {
        Self {
            index,
            classifier: ModeClassifier::default(),
            resolver: ContextResolver::with_defaults(),
        }
    }

    /// Replace the built-in classification rules.
    pub fn with_classifier(mut self, classifier: ModeClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// All known protocol ids, sorted.
    pub fn list_ids(&self) -> Vec<&str> {
        self.index.list_ids()
    }

    /// Fetch a protocol by id.
    pub fn get(&self, protocol_id: &str) -> Option<&ProtocolContext> {
        self.index.get(protocol_id)
    }

    /// Decide which mode a prompt belongs to.
    pub fn classify(&self, prompt: &str) -> Mode {
        self.classifier.classify(prompt)
    }

    /// Resolve a prompt into its mode and guidance payload.
    pub fn resolve_context(&self, prompt: &str, fallback: Option<&str>) -> (Mode, ContextPayload) {
        self.resolver
            .resolve(&self.index, &self.classifier, prompt, fallback)
    }

    /// Text block for a protocol, to paste into an AI's system prompt.
    pub fn render_context_block(&self, protocol_id: &str) -> String {
        self.resolver.render_context_block(&self.index, protocol_id)
    }

    pub fn index(&self) -> &ProtocolIndex {
        &self.index
    }

    pub fn classifier(&self) -> &ModeClassifier {
        &self.classifier
    }
}
