//! Configuration structures and loading.

use crate::error::{ConfigError, ConfigResult};
use crate::paths::AppPaths;
use crate::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub vocabulary: VocabularyConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> ConfigResult<Self> {
        let paths = AppPaths::new().ok_or(ConfigError::NoConfigDir)?;
        Self::load_from(&paths.config_file)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Create a default config file with comments.
    pub fn create_default_file(path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Self::default_config_string())?;
        Ok(())
    }

    /// Generate a default config file with helpful comments.
    pub fn default_config_string() -> String {
        r#"# Unihelp Configuration
# Administrative document processing

[pipeline]
# Preferred chunk length in characters
target_chunk_size = 800

# Hard cap on chunk length in characters
max_chunk_size = 1000

# Characters of trailing context carried into the next chunk
chunk_overlap = 150

# Appended to the input file stem to name each output record
output_suffix = "_processed.json"

[vocabulary]
# Built-in term lists: "en" or "fr"
locale = "en"

# Override individual lists of the preset
# document_types = ["Decision", "Ruling", "Minutes", "Notice", "Circular"]
# month_names = ["January", "February", "March", "April", "May", "June",
#                "July", "August", "September", "October", "November", "December"]
# department_prefixes = ["Department of", "Faculty of", "Service of"]

[logging]
# Default log level when RUST_LOG is not set
level = "info"
"#
        .to_string()
    }
}

/// Chunking and output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub target_chunk_size: usize,
    pub max_chunk_size: usize,
    pub chunk_overlap: usize,
    pub output_suffix: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_chunk_size: 800,
            max_chunk_size: 1000,
            chunk_overlap: 150,
            output_suffix: "_processed.json".to_string(),
        }
    }
}

/// Locale preset and optional term list overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    pub locale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_prefixes: Option<Vec<String>>,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            document_types: None,
            month_names: None,
            department_prefixes: None,
        }
    }
}

impl VocabularyConfig {
    /// Build the effective vocabulary from the preset and any overrides.
    pub fn resolve(&self) -> ConfigResult<Vocabulary> {
        let mut vocabulary = Vocabulary::for_locale(&self.locale).ok_or_else(|| {
            ConfigError::Invalid(format!("unknown vocabulary locale: {}", self.locale))
        })?;

        if let Some(ref terms) = self.document_types {
            vocabulary.document_types = terms.clone();
        }
        if let Some(ref months) = self.month_names {
            vocabulary.month_names = months.clone();
        }
        if let Some(ref prefixes) = self.department_prefixes {
            vocabulary.department_prefixes = prefixes.clone();
        }

        Ok(vocabulary)
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
