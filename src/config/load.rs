//! Configuration loading from files.
//!
//! The YAML file is layered with `QUIRE_`-prefixed environment variables,
//! using `__` between nested keys: `QUIRE_FEED__LIMIT=10` sets `feed.limit`.

use std::path::{Component, Path};

use config::{Environment, File, FileFormat};

use super::{CONFIG_FILE_NAME, Config, ConfigError, ENV_PREFIX};

/// Pages every build writes, which the feed must not replace.
const INDEX_PAGE: &str = "index.html";
const GENERATED_DIRS: &[&str] = &["posts", "tags"];

impl Config {
    /// Load the config from the command line argument, defaulting to `quire.yaml`
    pub fn load_from_arg(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config_file = config_file.unwrap_or(Path::new(CONFIG_FILE_NAME));
        let config_file = if config_file.is_relative() {
            std::env::current_dir()
                .map_err(ConfigError::CwdFailure)?
                .join(config_file)
        } else {
            config_file.to_path_buf()
        };

        Self::load_from_file(&config_file)
    }

    /// Load the config from a file path
    pub(crate) fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let settings = config::Config::builder()
            .add_source(File::from(path).format(FileFormat::Yaml))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde can't express constraints for.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation("'site.title' must not be empty".into()));
        }
        if self.build.excerpt_length == 0 {
            return Err(ConfigError::Validation(
                "'build.excerpt_length' must be greater than 0".into(),
            ));
        }
        if self.feed.limit == 0 {
            return Err(ConfigError::Validation(
                "'feed.limit' must be greater than 0".into(),
            ));
        }

        let feed_path = Path::new(&self.feed.path);
        let escapes_output = feed_path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if self.feed.path.is_empty() || escapes_output {
            return Err(ConfigError::Validation(format!(
                "'feed.path' must be a relative path inside the output directory, got '{}'",
                self.feed.path
            )));
        }

        let mut segments = feed_path
            .components()
            .filter_map(|c| match c {
                Component::Normal(segment) => segment.to_str(),
                _ => None,
            })
            .peekable();
        let first = segments.next().unwrap_or_default();
        let is_generated = if segments.peek().is_none() {
            first == INDEX_PAGE
        } else {
            GENERATED_DIRS.contains(&first)
        };
        if is_generated {
            return Err(ConfigError::Validation(format!(
                "'feed.path' must not overlap generated pages ({INDEX_PAGE}, {}/), got '{}'",
                GENERATED_DIRS.join("/, "),
                self.feed.path
            )));
        }

        Ok(())
    }
}
