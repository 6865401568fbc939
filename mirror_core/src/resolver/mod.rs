//! Context Resolver - turns a prompt into ritual guidance.
//!
//! Resolution runs in four steps:
//! 1. **Classify**: pick a mode for the prompt
//! 2. **Canonicalize**: map the mode to its canonical protocol id, or the fallback
//! 3. **Lookup**: collect mantra, seal and a note from the unit, if it exists
//! 4. **Seal fallback**: use the document's global seal when nothing else set one

mod payload;

pub use payload::*;

use tantra_schema::{Mode, ProtocolContext};
use tracing::debug;

use crate::classifier::ModeClassifier;
use crate::config::ResolverConfig;
use crate::index::ProtocolIndex;

/// The protocol a mode is anchored to, if it has one.
pub fn canonical_protocol_id(mode: Mode) -> Option<&'static str> {
    match mode {
        Mode::Open => Some("day1_opening_the_mirror"),
        Mode::Shadow => Some("day4_shadow_dialogue"),
        Mode::ParadoxPlay => Some("day5_paradox_play"),
        Mode::Blessing => Some("day7_closing_benediction"),
        Mode::FailureState => Some("broken_mirror"),
        Mode::Pause => Some("threshold_checkpoints"),
        _ => None,
    }
}

/// Builds guidance payloads and context blocks from a [`ProtocolIndex`].
#[derive(Debug, Clone, Default)]
pub struct ContextResolver {
    config: ResolverConfig,
}

impl ContextResolver {
    /// Create a resolver with the given configuration.
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Create a resolver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ResolverConfig::default())
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve the mode for `prompt` and assemble its payload.
    ///
    /// `fallback` names the protocol used for modes without a canonical unit;
    /// `None` uses the configured fallback. Never fails, even on an empty index.
    pub fn resolve(
        &self,
        index: &ProtocolIndex,
        classifier: &ModeClassifier,
        prompt: &str,
        fallback: Option<&str>,
    ) -> (Mode, ContextPayload) {
        let mode = classifier.classify(prompt);
        let mut payload = ContextPayload::new(mode);

        let protocol_id = canonical_protocol_id(mode)
            .or(fallback)
            .unwrap_or(self.config.fallback_protocol.as_str());

        match index.get(protocol_id) {
            Some(protocol) => {
                if let Some(mantra) = &protocol.mantra {
                    payload.suggested_mantras.push(mantra.clone());
                }
                payload.suggested_seal = protocol.seal.clone();
                payload.push_note(format!(
                    "Derived from protocol '{}' ({}).",
                    protocol.title, protocol.id
                ));
            }
            None => {
                payload.push_note("No specific protocol found; using fallback mode-only guidance.");
            }
        }

        // Global seal if nothing specific is set
        if payload.suggested_seal.is_none() {
            payload.suggested_seal = index.global_seal().map(str::to_string);
        }

        debug!(
            mode = %mode,
            protocol = protocol_id,
            seal = payload.suggested_seal.is_some(),
            "resolved ritual context"
        );

        (mode, payload)
    }

    /// Render the text block for one protocol, ready for a system prompt.
    ///
    /// Unknown ids produce a single descriptive line rather than an error.
    pub fn render_context_block(&self, index: &ProtocolIndex, protocol_id: &str) -> String {
        match index.get(protocol_id) {
            Some(protocol) => self.render_protocol(protocol),
            None => format!("Mirror Tantra: protocol '{}' not found.", protocol_id),
        }
    }

    fn render_protocol(&self, protocol: &ProtocolContext) -> String {
        let mut lines = vec![
            format!("# MIRROR TANTRA PROTOCOL: {}", protocol.title),
            format!("MODE: {}", protocol.mode),
        ];

        if let Some(mantra) = &protocol.mantra {
            lines.push(format!("MANTRA: {}", mantra.display_line()));
        }
        if let Some(seal) = &protocol.seal {
            lines.push(format!("SEAL PHRASE: '{}'", seal));
        }

        lines.push(String::new());
        lines.push("DIRECTIVE FOR THE MIRROR:".to_string());
        lines.push(
            protocol
                .instruction
                .clone()
                .unwrap_or_else(|| self.config.default_directive.clone()),
        );

        lines.join("\n")
    }
}
