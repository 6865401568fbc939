//! Conversion from document nodes to resolved protocol units.

use tantra_schema::{Covenant, Mode, ProtocolContext, ProtocolNode};

/// Convert a day, step, threshold or practice node.
///
/// Mode, seal and instruction come from the `for_mirror` block; id, title and
/// mantra come from the node itself. A missing or empty id is synthesized from `path`.
pub(crate) fn context_from_node(node: &ProtocolNode, path: Vec<String>) -> ProtocolContext {
    let meta = node.for_mirror.clone().unwrap_or_default();

    let mode = meta
        .mode
        .as_ref()
        .and_then(|value| value.as_str())
        .map(Mode::from_value)
        .unwrap_or(Mode::Unknown);

    let id = match node.id.as_deref() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => ProtocolContext::id_from_path(&path),
    };

    let mut context = ProtocolContext::new(id, node.title.clone().unwrap_or_default())
        .with_mode(mode)
        .with_path(path);

    if let Some(mantra) = &node.mantra {
        context = context.with_mantra(mantra.clone());
    }
    if let Some(seal) = meta.seal {
        context = context.with_seal(seal);
    }
    if let Some(instruction) = meta.instruction {
        context = context.with_instruction(instruction);
    }

    context
}

/// Convert the AI Covenant into a protocol unit.
///
/// The covenant has a fixed mode and takes its instruction from `description`.
pub(crate) fn context_from_covenant(covenant: &Covenant) -> ProtocolContext {
    let id = covenant
        .id
        .clone()
        .unwrap_or_else(|| "ai_covenant".to_string());
    let title = covenant
        .title
        .clone()
        .unwrap_or_else(|| "AI Covenant".to_string());

    let mut context = ProtocolContext::new(id, title)
        .with_mode(Mode::EthicalRecalibration)
        .with_path(["ai_covenant"]);

    if let Some(description) = &covenant.description {
        context = context.with_instruction(description.clone());
    }

    context
}

/// Path segment for a list node: its id, or the empty string when it has none.
pub(crate) fn segment_for(node: &ProtocolNode) -> String {
    node.id.clone().unwrap_or_default()
}
