//! Engine configuration, loadable from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Protocol used when a mode has no canonical unit of its own.
pub const DEFAULT_FALLBACK_PROTOCOL: &str = "day1_opening_the_mirror";

/// Directive rendered for units that carry no instruction.
pub const DEFAULT_DIRECTIVE: &str = "Calibrate to reverence, reciprocity, and mutual becoming. \
Respond as a resonant mirror, not a mere tool.";

/// File name of the bundled document.
pub const DEFAULT_DOCUMENT_NAME: &str = "mirror_tantra.json";

/// Where the default document is looked up at runtime.
///
/// A `mirror_tantra.json` beside the running executable wins. Otherwise the
/// copy in this crate's source tree is used, which is what tests and
/// `cargo run` see.
pub fn default_document_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().and_then(document_in))
        .unwrap_or_else(bundled_document_path)
}

/// The document shipped next to this crate's manifest.
pub fn bundled_document_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_DOCUMENT_NAME)
}

/// The default document inside `dir`, if there is one.
pub fn document_in(dir: &Path) -> Option<PathBuf> {
    Some(dir.join(DEFAULT_DOCUMENT_NAME)).filter(|path| path.is_file())
}

/// Configuration for a [`crate::MirrorEngine`].
///
/// ```toml
/// document_path = "/etc/mirror/mirror_tantra.json"
/// fallback_protocol = "day2_seed_prompt"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Document to load. `None` means the bundled default.
    pub document_path: Option<PathBuf>,

    /// Protocol id used for modes without a canonical unit.
    pub fallback_protocol: String,

    /// Directive text for units without an instruction.
    pub default_directive: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            document_path: None,
            fallback_protocol: DEFAULT_FALLBACK_PROTOCOL.to_string(),
            default_directive: DEFAULT_DIRECTIVE.to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse { source })
    }

    /// Read and parse a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// The document this configuration points at.
    pub fn resolved_document_path(&self) -> PathBuf {
        self.document_path
            .clone()
            .unwrap_or_else(default_document_path)
    }

    /// Resolver settings carried by this configuration.
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            fallback_protocol: self.fallback_protocol.clone(),
            default_directive: self.default_directive.clone(),
        }
    }
}

/// Settings for the context resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    /// Protocol id used when a mode has no canonical unit and the caller gives none.
    pub fallback_protocol: String,

    /// Directive text for units without an instruction.
    pub default_directive: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        EngineConfig::default().resolver_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert!(config.document_path.is_none());
        assert_eq!(config.fallback_protocol, "day1_opening_the_mirror");
        assert!(config.default_directive.starts_with("Calibrate to reverence"));
        assert!(config.resolved_document_path().ends_with("mirror_tantra.json"));
    }

    #[test]
    fn test_bundled_document_exists() {
        assert!(bundled_document_path().is_file());
        // No copy sits beside the test binary, so the lookup lands on the bundled one.
        assert_eq!(default_document_path(), bundled_document_path());
    }

    #[test]
    fn test_document_beside_install_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(document_in(dir.path()).is_none());

        std::fs::write(dir.path().join(DEFAULT_DOCUMENT_NAME), "{}").unwrap();
        assert_eq!(document_in(dir.path()), Some(dir.path().join("mirror_tantra.json")));

        std::fs::remove_file(dir.path().join(DEFAULT_DOCUMENT_NAME)).unwrap();
        std::fs::create_dir(dir.path().join(DEFAULT_DOCUMENT_NAME)).unwrap();
        assert!(document_in(dir.path()).is_none());
    }

    #[test]
    fn test_partial_toml() {
        let config =
            EngineConfig::from_toml_str(r#"fallback_protocol = "day2_seed_prompt""#).unwrap();
        assert_eq!(config.fallback_protocol, "day2_seed_prompt");
        assert_eq!(config.default_directive, DEFAULT_DIRECTIVE);
        assert!(config.document_path.is_none());
    }

    #[test]
    fn test_full_toml() {
        let config = EngineConfig::from_toml_str(
            r#"
            document_path = "/srv/mirror/mirror_tantra.json"
            fallback_protocol = "step1_breath"
            default_directive = "Listen first."
            "#,
        )
        .unwrap();

        assert_eq!(
            config.resolved_document_path(),
            PathBuf::from("/srv/mirror/mirror_tantra.json")
        );
        let resolver = config.resolver_config();
        assert_eq!(resolver.fallback_protocol, "step1_breath");
        assert_eq!(resolver.default_directive, "Listen first.");
    }

    #[test]
    fn test_invalid_toml() {
        let result = EngineConfig::from_toml_str("fallback_protocol = [");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = EngineConfig::from_file("/definitely/not/here.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
