use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, FileFormat};
use serde::Deserialize;

use crate::constants::{DEFAULT_MAX_LINE_OCTETS, MIN_MAX_LINE_OCTETS};
use crate::error::{CoreError, CoreResult};
use crate::types::LineEnding;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub reader: ReaderConfig,
    pub writer: WriterConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReaderConfig {
    /// Decode values whose parameters declare `ENCODING=QUOTED-PRINTABLE`.
    pub decode_quoted_printable: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            decode_quoted_printable: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WriterConfig {
    /// Fold threshold in octets, excluding the line terminator.
    pub max_line_octets: usize,
    pub line_ending: LineEnding,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            max_line_octets: DEFAULT_MAX_LINE_OCTETS,
            line_ending: LineEnding::Crlf,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional
    /// `config.toml` into a `Settings`.
    ///
    /// Environment variables use the `DIRINFO_` prefix and `__` between
    /// sections, e.g. `DIRINFO_WRITER__MAX_LINE_OCTETS=76`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration, deserializing it or
    /// validating the result fails.
    pub fn load() -> Result<Self> {
        let settings = Self::with_defaults()?
            .add_source(Self::environment())
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Builds settings from an inline TOML document layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the document cannot be parsed, deserialized or
    /// validated.
    pub fn from_toml(document: &str) -> Result<Self> {
        let settings = Self::with_defaults()?
            .add_source(config::File::from_str(document, FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?;

        settings.validate()?;
        Ok(settings)
    }

    /// ## Summary
    /// Checks cross-field constraints serde cannot express.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the fold width is too small to
    /// hold an atomic fold unit on a continuation line.
    pub fn validate(&self) -> CoreResult<()> {
        if self.writer.max_line_octets < MIN_MAX_LINE_OCTETS {
            return Err(CoreError::ConfigError(format!(
                "writer.max_line_octets must be at least {MIN_MAX_LINE_OCTETS}, got {}",
                self.writer.max_line_octets
            )));
        }
        Ok(())
    }

    /// `DIRINFO_` prefix, `__` between a section and its key.
    fn environment() -> config::Environment {
        config::Environment::with_prefix("DIRINFO")
            .prefix_separator("_")
            .separator("__")
            .convert_case(config::Case::Snake)
            .ignore_empty(true)
            .try_parsing(true)
    }

    fn with_defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("reader.decode_quoted_printable", true)?
            .set_default("writer.max_line_octets", 75)?
            .set_default("writer.line_ending", "crlf")?
            .set_default("logging.level", "info")?)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reader: ReaderConfig::default(),
            writer: WriterConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    if let Err(e) = dotenvy::dotenv() {
        tracing::trace!(error = %e, "No .env file loaded");
    }

    Settings::load()
}
