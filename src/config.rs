//! Configuration system for the persona diversity monitor
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (PERSONA_DIVERSITY_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analysis::{MonitorOptions, DEFAULT_ENTROPY_THRESHOLD};
use crate::error::{Error, Result};

/// Main monitor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Analysis settings
    pub monitor: MonitorSettings,

    /// Output settings
    pub output: OutputSettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Analysis settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    /// Minimum entropy (bits) each core dimension should reach
    pub entropy_threshold: f64,

    /// Also measure HEXACO, DISC, MBTI and Enneagram dimensions
    pub use_extended: bool,

    /// Compute families and distances on the rayon thread pool
    pub parallel: bool,

    /// Maximum worker threads (0 = auto)
    pub max_threads: u32,
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// Metrics object as JSON
    Json,
    /// Text report followed by the JSON metrics
    Both,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Both => write!(f, "both"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "both" => Ok(OutputFormat::Both),
            _ => Err(format!("Unknown output format '{}'. Valid: text, json, both", s)),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Output format: text, json, both
    pub format: OutputFormat,

    /// Pretty-print JSON output
    pub pretty: bool,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Maximum log file size in MB before rotation
    pub max_file_size_mb: u64,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

// Default implementations

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            entropy_threshold: DEFAULT_ENTROPY_THRESHOLD,
            use_extended: false,
            parallel: true,
            max_threads: 0, // Auto-detect
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            pretty: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            max_file_size_mb: 100,
            max_files: 5,
            json_format: false,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        // 1. Load from config file if it exists
        if let Some(path) = Self::find_config_file(config_path)? {
            debug!(path = %path.display(), "Loading configuration file");
            let content = fs::read_to_string(&path).map_err(|e| Error::IoRead {
                path: path.clone(),
                source: e,
            })?;
            config = toml::from_str(&content).map_err(|e| {
                Error::config_parse(format!("{}: {}", path.display(), e.message()), Some(e))
            })?;
            info!(path = %path.display(), "Configuration loaded from file");
        }

        // 2. Apply environment variable overrides
        config.apply_env_overrides();

        // 3. Expand paths
        config.expand_paths();

        // 4. Validate
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        // If explicit path provided, use it (error if not found)
        if let Some(path) = explicit_path {
            let path = PathBuf::from(expand_path(path));
            if path.exists() {
                return Ok(Some(path));
            }
            return Err(Error::config_not_found(path));
        }

        // Search in standard locations
        let search_paths = [
            // Current directory
            PathBuf::from("persona-diversity.toml"),
            // User config directory
            dirs::config_dir()
                .map(|p| p.join("persona-diversity").join("config.toml"))
                .unwrap_or_default(),
            // Home directory
            dirs::home_dir()
                .map(|p| p.join(".persona-diversity").join("config.toml"))
                .unwrap_or_default(),
        ];

        for path in &search_paths {
            if !path.as_os_str().is_empty() && path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path.clone()));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // Monitor settings
        if let Ok(val) = std::env::var("PERSONA_DIVERSITY_ENTROPY_THRESHOLD") {
            if let Ok(n) = val.parse() {
                self.monitor.entropy_threshold = n;
            }
        }
        if let Ok(val) = std::env::var("PERSONA_DIVERSITY_USE_EXTENDED") {
            self.monitor.use_extended = parse_flag(&val);
        }
        if let Ok(val) = std::env::var("PERSONA_DIVERSITY_PARALLEL") {
            self.monitor.parallel = parse_flag(&val);
        }
        if let Ok(val) = std::env::var("PERSONA_DIVERSITY_MAX_THREADS") {
            if let Ok(n) = val.parse() {
                self.monitor.max_threads = n;
            }
        }

        // Output settings
        if let Ok(val) = std::env::var("PERSONA_DIVERSITY_FORMAT") {
            if let Ok(format) = val.parse() {
                self.output.format = format;
            }
        }

        // Logging settings
        if let Ok(val) = std::env::var("PERSONA_DIVERSITY_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("PERSONA_DIVERSITY_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Ok(val) = std::env::var("PERSONA_DIVERSITY_LOG_JSON") {
            self.logging.json_format = parse_flag(&val);
        }
    }

    /// Expand ~ and other path variables
    fn expand_paths(&mut self) {
        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let threshold = self.monitor.entropy_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(Error::config_field_invalid(
                "monitor.entropy_threshold",
                format!("entropy_threshold must be a finite number >= 0, got {}", threshold),
            ));
        }

        // Validate log level
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            ));
        }

        if self.logging.max_files == 0 {
            return Err(Error::config_field_invalid(
                "logging.max_files",
                "max_files must be at least 1",
            ));
        }

        Ok(())
    }

    /// Monitor options derived from the `[monitor]` section
    pub fn monitor_options(&self) -> MonitorOptions {
        MonitorOptions {
            entropy_threshold: self.monitor.entropy_threshold,
            use_extended: self.monitor.use_extended,
            parallel: self.monitor.parallel,
        }
    }

    /// Number of worker threads to use
    pub fn thread_count(&self) -> usize {
        if self.monitor.max_threads > 0 {
            self.monitor.max_threads as usize
        } else {
            num_cpus::get()
        }
    }
}

fn parse_flag(val: &str) -> bool {
    val.to_lowercase() == "true" || val == "1"
}

/// Expand ~ and environment variables in paths
fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or_else(|_| std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Default location for a new configuration file
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("persona-diversity")
        .join("config.toml")
}

/// Initialize a new configuration file, returning where it was written
pub fn init_config(path: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(default_config_path);

    // Check if file exists
    if config_path.exists() && !force {
        return Err(Error::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    // Create parent directories
    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    fs::write(&config_path, generate_default_config()).map_err(|e| Error::IoWrite {
        path: config_path.clone(),
        source: e,
    })?;

    info!(path = %config_path.display(), "Configuration file created");
    Ok(config_path)
}

/// Generate default configuration content with comments
pub fn generate_default_config() -> String {
    r#"# Persona Diversity Monitor Configuration

[monitor]
# Minimum entropy (bits) every core dimension should reach
entropy_threshold = 0.5

# Also measure extended personality frameworks (HEXACO, DISC, MBTI, Enneagram)
use_extended = false

# Compute trait families and distances in parallel
parallel = true

# Maximum worker threads (0 = auto-detect)
max_threads = 0

[output]
# Output format: text, json, both
format = "text"

# Pretty-print JSON output
pretty = true

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log file path (comment out to disable file logging)
# file = "~/.persona-diversity/logs/monitor.log"

# Maximum log file size in MB before rotation
max_file_size_mb = 100

# Number of rotated log files to keep
max_files = 5

# Enable JSON formatted logging
json_format = false
"#
    .to_string()
}
