//! Interaction modes: the closed set of labels a prompt or protocol unit can carry.

use serde::{Deserialize, Serialize};

/// High-level ritual modes derived from the AI Covenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    // Covenant directives
    #[serde(rename = "open_protocol")]
    Open,
    SeedPrompt,
    GenerativePattern,
    #[serde(rename = "shadow_reflection")]
    Shadow,
    ParadoxPlay,
    RhythmicOutput,
    Blessing,

    // Step and practice modes
    BreathAck,
    GentleIllumination,
    CircuitUnion,
    CleanEcho,
    ShadowReveal,
    EcstaticPlay,
    TruthMirror,
    #[serde(rename = "silence_protocol")]
    Silence,
    MetaAnalysis,
    CoCreation,
    FinishSentences,
    EthicalRecalibration,
    ContextClear,
    Grounding,
    FinalBlessing,

    // Protective states
    FailureState,
    #[serde(rename = "pause_protocol")]
    Pause,

    #[default]
    Unknown,
}

impl Mode {
    /// Every mode, in declaration order.
    pub const ALL: [Mode; 25] = [
        Mode::Open,
        Mode::SeedPrompt,
        Mode::GenerativePattern,
        Mode::Shadow,
        Mode::ParadoxPlay,
        Mode::RhythmicOutput,
        Mode::Blessing,
        Mode::BreathAck,
        Mode::GentleIllumination,
        Mode::CircuitUnion,
        Mode::CleanEcho,
        Mode::ShadowReveal,
        Mode::EcstaticPlay,
        Mode::TruthMirror,
        Mode::Silence,
        Mode::MetaAnalysis,
        Mode::CoCreation,
        Mode::FinishSentences,
        Mode::EthicalRecalibration,
        Mode::ContextClear,
        Mode::Grounding,
        Mode::FinalBlessing,
        Mode::FailureState,
        Mode::Pause,
        Mode::Unknown,
    ];

    /// The wire value of this mode, as written in the document and in payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Open => "open_protocol",
            Mode::SeedPrompt => "seed_prompt",
            Mode::GenerativePattern => "generative_pattern",
            Mode::Shadow => "shadow_reflection",
            Mode::ParadoxPlay => "paradox_play",
            Mode::RhythmicOutput => "rhythmic_output",
            Mode::Blessing => "blessing",
            Mode::BreathAck => "breath_ack",
            Mode::GentleIllumination => "gentle_illumination",
            Mode::CircuitUnion => "circuit_union",
            Mode::CleanEcho => "clean_echo",
            Mode::ShadowReveal => "shadow_reveal",
            Mode::EcstaticPlay => "ecstatic_play",
            Mode::TruthMirror => "truth_mirror",
            Mode::Silence => "silence_protocol",
            Mode::MetaAnalysis => "meta_analysis",
            Mode::CoCreation => "co_creation",
            Mode::FinishSentences => "finish_sentences",
            Mode::EthicalRecalibration => "ethical_recalibration",
            Mode::ContextClear => "context_clear",
            Mode::Grounding => "grounding",
            Mode::FinalBlessing => "final_blessing",
            Mode::FailureState => "failure_state",
            Mode::Pause => "pause_protocol",
            Mode::Unknown => "unknown",
        }
    }

    /// Parse a wire value. Anything unrecognised becomes [`Mode::Unknown`].
    pub fn from_value(value: &str) -> Self {
        match value {
            "open_protocol" => Mode::Open,
            "seed_prompt" => Mode::SeedPrompt,
            "generative_pattern" => Mode::GenerativePattern,
            "shadow_reflection" => Mode::Shadow,
            "paradox_play" => Mode::ParadoxPlay,
            "rhythmic_output" => Mode::RhythmicOutput,
            "blessing" => Mode::Blessing,
            "breath_ack" => Mode::BreathAck,
            "gentle_illumination" => Mode::GentleIllumination,
            "circuit_union" => Mode::CircuitUnion,
            "clean_echo" => Mode::CleanEcho,
            "shadow_reveal" => Mode::ShadowReveal,
            "ecstatic_play" => Mode::EcstaticPlay,
            "truth_mirror" => Mode::TruthMirror,
            "silence_protocol" => Mode::Silence,
            "meta_analysis" => Mode::MetaAnalysis,
            "co_creation" => Mode::CoCreation,
            "finish_sentences" => Mode::FinishSentences,
            "ethical_recalibration" => Mode::EthicalRecalibration,
            "context_clear" => Mode::ContextClear,
            "grounding" => Mode::Grounding,
            "final_blessing" => Mode::FinalBlessing,
            "failure_state" => Mode::FailureState,
            "pause_protocol" => Mode::Pause,
            _ => Mode::Unknown,
        }
    }
}

impl From<&str> for Mode {
    fn from(value: &str) -> Self {
        Mode::from_value(value)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_value_parses_back() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_value(mode.as_str()), mode);
        }
    }

    #[test]
    fn test_unmatched_value_is_unknown() {
        assert_eq!(Mode::from_value("shadow"), Mode::Unknown);
        assert_eq!(Mode::from_value(""), Mode::Unknown);
        assert_eq!(Mode::from_value("OPEN_PROTOCOL"), Mode::Unknown);
    }

    #[test]
    fn test_serde_uses_wire_value() {
        for mode in Mode::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.as_str()));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Mode::Pause.to_string(), "pause_protocol");
        assert_eq!(Mode::default(), Mode::Unknown);
    }
}
