//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/exprfuzz/exprfuzz.toml`
//! 3. Environment variables: `EXPRFUZZ_*` prefix
//! 4. Command-line flags (applied by the CLI layer)

use std::fs;
use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::operand::{OperandClass, OperandConfig};
use crate::operator::{OperatorClass, OperatorConfig};

/// Sentinel accepted wherever a digit length or spacing may be "random"
/// (`-i 99`).
pub const RANDOM_SENTINEL: usize = 99;

/// Highest target length iterated when none is configured.
const DEFAULT_MAX_LENGTH: usize = 511;

/// Map the 99 sentinel onto "draw at random".
pub fn sentinel(value: usize) -> Option<usize> {
    (value != RANDOM_SENTINEL).then_some(value)
}

/// Persistent generator defaults: the config-file and env-var surface.
/// `None` lengths mean "drawn from the distribution".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Operand class mix
    pub class: OperandClass,
    /// Fixed integer digit count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integer_len: Option<usize>,
    /// Fixed integer-part digit count for decimals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub float_len: Option<usize>,
    /// Fixed fractional digit count for decimals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraction_len: Option<usize>,
    /// Operator class
    pub operators: OperatorClass,
    /// Fixed spaces around operators
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<usize>,
    /// Generate expressions of length 1 to this maximum
    pub max_length: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            class: OperandClass::IntegerAndDecimal,
            integer_len: None,
            float_len: None,
            fraction_len: None,
            operators: OperatorClass::All,
            space: None,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

/// Raw settings for intermediate parsing: every field optional so merging
/// can distinguish "not specified" from an explicit value. The 99 sentinel
/// in a file or env var maps to "random".
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    class: Option<OperandClass>,
    integer_len: Option<usize>,
    float_len: Option<usize>,
    fraction_len: Option<usize>,
    operators: Option<OperatorClass>,
    space: Option<usize>,
    max_length: Option<usize>,
}

impl Settings {
    /// Merge overlay config onto self (base): overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            class: overlay.class.unwrap_or(self.class),
            integer_len: overlay.integer_len.map_or(self.integer_len, sentinel),
            float_len: overlay.float_len.map_or(self.float_len, sentinel),
            fraction_len: overlay.fraction_len.map_or(self.fraction_len, sentinel),
            operators: overlay.operators.unwrap_or(self.operators),
            space: overlay.space.map_or(self.space, sentinel),
            max_length: overlay.max_length.unwrap_or(self.max_length),
        }
    }

    /// Load settings with layered precedence: compiled defaults, then the
    /// global config file, then `EXPRFUZZ_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        current.apply_env_overrides()
    }

    /// Apply `EXPRFUZZ_*` environment variables as explicit overrides.
    fn apply_env_overrides(self) -> Result<Self, ConfigError> {
        let env = Config::builder()
            .add_source(Environment::with_prefix("EXPRFUZZ"))
            .build()
            .map_err(|e| ConfigError::Environment(e.to_string()))?;

        let mut settings = self;
        if let Ok(val) = env.get::<OperandClass>("class") {
            settings.class = val;
        }
        if let Ok(val) = env.get::<usize>("integer_len") {
            settings.integer_len = sentinel(val);
        }
        if let Ok(val) = env.get::<usize>("float_len") {
            settings.float_len = sentinel(val);
        }
        if let Ok(val) = env.get::<usize>("fraction_len") {
            settings.fraction_len = sentinel(val);
        }
        if let Ok(val) = env.get::<OperatorClass>("operators") {
            settings.operators = val;
        }
        if let Ok(val) = env.get::<usize>("space") {
            settings.space = sentinel(val);
        }
        if let Ok(val) = env.get::<usize>("max_length") {
            settings.max_length = val;
        }
        Ok(settings)
    }

    /// Lower into the typed configuration handed to the driver. Value
    /// validation happens in the generator constructors, so a bad length
    /// still halts the run before generation starts.
    ///
    /// The zero-avoidance guard engages for single-digit integers under a
    /// multiplicative operator class.
    pub fn generator_config(&self) -> GeneratorConfig {
        let avoid_zero =
            self.integer_len == Some(1) && self.operators.is_multiplicative();
        GeneratorConfig {
            operand: OperandConfig {
                class: self.class,
                integer_len: self.integer_len,
                decimal_len: self.float_len,
                fraction_len: self.fraction_len,
                avoid_zero,
            },
            operator: OperatorConfig {
                class: self.operators,
                spacing: self.space,
            },
            max_length: self.max_length,
        }
    }

    /// Render for `config show`.
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).expect("settings serialize to TOML")
    }
}

/// Typed, validated-on-construction configuration for one run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub operand: OperandConfig,
    pub operator: OperatorConfig,
    pub max_length: usize,
}

/// Get the XDG config directory for exprfuzz.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "exprfuzz").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("exprfuzz.toml"))
}

/// Load a TOML file into RawSettings for merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::ConfigFileRead {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::ConfigFileParse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Commented template written by `config init`.
pub const CONFIG_TEMPLATE: &str = r#"# exprfuzz configuration
#
# Every key is optional; unset keys fall back to the compiled defaults.
# Digit lengths and spacing accept 99 for "random".

# Operand class mix: "integer", "decimal" or "integer-and-decimal"
class = "integer-and-decimal"

# Fixed digit counts (1-19, 99 = random)
integer_len = 99
float_len = 99
fraction_len = 99

# Operator class: "add", "sub", "add-sub", "mul", "div", "mul-div" or "all"
operators = "all"

# Spaces around operators (0-9, 99 = random)
space = 99

# Generate expressions of length 1 to this maximum
max_length = 511
"#;

/// Write the config template, creating parent directories as needed.
pub fn write_template(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::ConfigFileWrite {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    }
    fs::write(path, CONFIG_TEMPLATE).map_err(|e| ConfigError::ConfigFileWrite {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
