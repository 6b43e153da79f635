/*
Rule configuration and static metadata.

    RuleConfig    tunables, read from / written to TOON

    RuleMetadata  identity, language-version gate and references the host
                  uses for gating and documentation
*/
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::synthesize::{DEFAULT_MAX_DEPTH, Synthesizer};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid rule configuration: {0}")]
    Decode(String),
    #[error("could not encode rule configuration: {0}")]
    Encode(String),
    #[error("max_depth must be at least 1")]
    ZeroDepth,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Deepest nesting of array components, type arguments and wildcard
    /// bounds the synthesizer accepts before giving up.
    pub max_depth: usize,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RuleConfig {
    pub fn from_toon(input: &str) -> Result<Self, ConfigError> {
        let config: RuleConfig =
            toon_format::decode_default(input).map_err(|e| ConfigError::Decode(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toon(&self) -> Result<String, ConfigError> {
        toon_format::encode_default(self).map_err(|e| ConfigError::Encode(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(())
    }

    pub fn synthesizer(&self) -> Synthesizer {
        Synthesizer::new(self.max_depth)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleMetadata {
    pub id: &'static str,
    /// Lowest language version whose sources may contain `var`.
    pub minimal_language_version: u32,
    pub tags: &'static [&'static str],
    pub see_urls: &'static [&'static str],
    pub sonar_id: Option<&'static str>,
    pub jsparrow_id: Option<&'static str>,
    pub pmd_url: Option<&'static str>,
}

pub static USE_EXPLICIT_TYPES: RuleMetadata = RuleMetadata {
    id: "UseExplicitTypes",
    minimal_language_version: 10,
    tags: &["ImplicitToExplicit"],
    see_urls: &[
        "https://openjdk.org/jeps/286",
        "https://pmd.github.io/latest/pmd_rules_java_codestyle.html#useexplicittypes",
    ],
    sonar_id: None,
    jsparrow_id: None,
    pmd_url: Some("https://pmd.github.io/latest/pmd_rules_java_codestyle.html#useexplicittypes"),
};

impl RuleMetadata {
    pub fn accepts_language_version(&self, version: u32) -> bool {
        version >= self.minimal_language_version
    }

    pub fn to_toon(&self) -> Result<String, ConfigError> {
        toon_format::encode_default(self).map_err(|e| ConfigError::Encode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_reads_depth_from_toon() {
        let config = RuleConfig::from_toon("max_depth: 8").unwrap();
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.synthesizer().max_depth(), 8);
    }

    #[test]
    fn zero_depth_is_rejected() {
        assert_eq!(RuleConfig::from_toon("max_depth: 0").unwrap_err(), ConfigError::ZeroDepth);
    }

    #[test]
    fn default_config_encodes_its_depth() {
        let text = RuleConfig::default().to_toon().unwrap();
        assert!(text.contains("max_depth"), "unexpected encoding: {text}");
        assert!(text.contains("32"), "unexpected encoding: {text}");
    }

    #[test]
    fn metadata_gates_on_language_version() {
        assert!(!USE_EXPLICIT_TYPES.accepts_language_version(8));
        assert!(USE_EXPLICIT_TYPES.accepts_language_version(10));
        assert!(USE_EXPLICIT_TYPES.accepts_language_version(21));

        let text = USE_EXPLICIT_TYPES.to_toon().unwrap();
        assert!(text.contains("UseExplicitTypes"));
        assert!(text.contains("ImplicitToExplicit"));
    }
}
