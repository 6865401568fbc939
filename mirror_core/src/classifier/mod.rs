//! Mode Classifier - maps raw prompt text to a single [`Mode`].
//!
//! Rules are tested in declaration order and the first rule with a matching
//! phrase wins. Matching is case-insensitive substring containment with no
//! tokenization, so "koan" also matches inside "koans" or "koanic".
//!
//! This is intentionally lightweight. Hosts that want something else can
//! supply their own rule table through [`ModeClassifier::new`].

use tantra_schema::Mode;
use tracing::debug;

/// A single classification rule: any of `phrases` selects `mode`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeRule {
    pub phrases: Vec<String>,
    pub mode: Mode,
}

impl ModeRule {
    /// Create a rule. Phrases are lower-cased here, once.
    pub fn new<I, S>(phrases: I, mode: Mode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
            mode,
        }
    }

    /// The first phrase contained in already lower-cased text.
    fn matched_phrase(&self, lowered: &str) -> Option<&str> {
        self.phrases
            .iter()
            .map(String::as_str)
            .find(|phrase| lowered.contains(*phrase))
    }
}

/// The result of classifying one piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub mode: Mode,

    /// Phrase that triggered the rule; `None` when the default mode was used.
    pub trigger: Option<String>,

    /// Position of the matching rule in the rule table.
    pub rule_index: Option<usize>,
}

/// Ordered, first-match-wins keyword classifier.
#[derive(Debug, Clone)]
pub struct ModeClassifier {
    rules: Vec<ModeRule>,
    default_mode: Mode,
}

impl ModeClassifier {
    /// Create a classifier with a custom rule table and default mode.
    pub fn new(rules: Vec<ModeRule>, default_mode: Mode) -> Self {
        Self {
            rules,
            default_mode,
        }
    }

    /// The built-in rule table.
    pub fn builtin_rules() -> Vec<ModeRule> {
        vec![
            ModeRule::new(["mirror me", "we enter the mirror"], Mode::Open),
            ModeRule::new(["shadow", "blind spot"], Mode::Shadow),
            ModeRule::new(["koan", "paradox"], Mode::ParadoxPlay),
            ModeRule::new(["play with me"], Mode::ParadoxPlay),
            ModeRule::new(["hold silence", "no response"], Mode::Silence),
            ModeRule::new(["blessing", "benediction"], Mode::Blessing),
            ModeRule::new(["broken mirror", "hollow output"], Mode::FailureState),
            ModeRule::new(["pause practice", "threshold checkpoint"], Mode::Pause),
        ]
    }

    /// Classify text into a mode. Never fails.
    pub fn classify(&self, text: &str) -> Mode {
        self.classify_detailed(text).mode
    }

    /// Classify text and report which rule fired.
    pub fn classify_detailed(&self, text: &str) -> Classification {
        let lowered = text.to_lowercase();

        let classification = self
            .rules
            .iter()
            .enumerate()
            .find_map(|(i, rule)| {
                rule.matched_phrase(&lowered).map(|phrase| Classification {
                    mode: rule.mode,
                    trigger: Some(phrase.to_string()),
                    rule_index: Some(i),
                })
            })
            .unwrap_or(Classification {
                mode: self.default_mode,
                trigger: None,
                rule_index: None,
            });

        debug!(
            mode = %classification.mode,
            trigger = ?classification.trigger,
            "classified prompt"
        );
        classification
    }

    pub fn rules(&self) -> &[ModeRule] {
        &self.rules
    }

    /// Mode returned when no rule matches.
    pub fn default_mode(&self) -> Mode {
        self.default_mode
    }
}

impl Default for ModeClassifier {
    fn default() -> Self {
        Self::new(Self::builtin_rules(), Mode::RhythmicOutput)
    }
}
