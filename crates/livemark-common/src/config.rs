use livemark_core::{ExtractOptions, Extractor};
use serde::{Deserialize, Serialize};

use std::path::Path;
use std::path::PathBuf;

use crate::error::LivemarkError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Console log level (`error` ... `trace`) when `RUST_LOG` is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    /// Markdown dialect and math handling.
    pub extract: ExtractOptions,
}

impl Config {
    /// Loads the configuration from the provided loader.
    pub fn load(loader: &impl Loader) -> Result<Self, LivemarkError> {
        loader.load()
    }

    /// Loads from `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, LivemarkError> {
        match path {
            Some(path) => Self::load(&FileStore::new(path)),
            None => Ok(Self::default()),
        }
    }

    /// Saves the configuration using the provided saver.
    pub fn save(&self, saver: &impl Saver) -> Result<(), LivemarkError> {
        saver.save(self)
    }

    /// An extractor configured from these options.
    pub fn extractor(&self) -> Extractor {
        Extractor::new(self.extract.clone())
    }
}

/// The trait for loading configuration data.
pub trait Loader {
    /// Loads the configuration data.
    fn load(&self) -> Result<Config, LivemarkError>;
}

/// The trait for saving configuration data.
pub trait Saver {
    /// Saves the configuration data.
    fn save(&self, config: &Config) -> Result<(), LivemarkError>;
}

/// An implementation of [`Loader`] and [`Saver`] that reads and writes a configuration file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a new [`FileStore`] with the given path.
    ///
    /// [`Config`] data will be serialized and deserialized according to the
    /// file extension: `.json` or `.toml`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<String, LivemarkError> {
        std::fs::read_to_string(&self.path)
            .map_err(|err| LivemarkError::config(&self.path, err.to_string()))
    }
}

impl Loader for FileStore {
    fn load(&self) -> Result<Config, LivemarkError> {
        let config = match self.path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&self.read()?)?,
            Some("toml") => toml::from_str(&self.read()?)?,
            _ => return Err(LivemarkError::unsupported_format(&self.path)),
        };
        tracing::debug!(path = %self.path.display(), "loaded configuration");
        Ok(config)
    }
}

impl Saver for FileStore {
    fn save(&self, config: &Config) -> Result<(), LivemarkError> {
        let contents = match self.path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::to_string_pretty(config)?,
            Some("toml") => toml::to_string_pretty(config)?,
            _ => return Err(LivemarkError::unsupported_format(&self.path)),
        };
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use livemark_core::DecorationType;

    fn sample() -> Config {
        Config {
            log_level: Some("trace".into()),
            extract: ExtractOptions {
                latex_brackets: false,
                ..ExtractOptions::default()
            },
        }
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("livemark.json"));
        sample().save(&store).unwrap();
        assert_eq!(Config::load(&store).unwrap(), sample());
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("livemark.toml"));
        sample().save(&store).unwrap();
        assert_eq!(Config::load(&store).unwrap(), sample());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("livemark.toml");
        std::fs::write(&path, "[extract]\nmath = false\n").unwrap();

        let config = Config::load_or_default(Some(&path)).unwrap();
        assert!(!config.extract.math);
        assert!(config.extract.gfm);
        assert!(config.extract.substitute_latex);
        assert_eq!(config.log_level, None);
    }

    #[test]
    fn test_extractor_follows_options() {
        let mut config = Config::default();
        let kinds = |config: &Config| -> Vec<DecorationType> {
            config.extractor().extract("$x$").iter().map(|d| d.kind).collect()
        };
        assert!(kinds(&config).contains(&DecorationType::InlineMath));

        config.extract.math = false;
        assert!(!config.extractor().options().math);
        assert!(kinds(&config).is_empty());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("livemark.yaml"));
        assert!(matches!(
            Config::load(&store),
            Err(LivemarkError::Config { .. })
        ));
        assert!(matches!(
            Config::default().save(&store),
            Err(LivemarkError::Config { .. })
        ));
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = Config::load_or_default(Some(Path::new("/nonexistent/livemark.json")))
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/livemark.json"));
    }

    #[test]
    fn test_invalid_json_is_serde_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("livemark.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Config::load(&FileStore::new(&path)),
            Err(LivemarkError::Serde(_))
        ));
    }

    #[test]
    fn test_no_path_gives_defaults() {
        assert_eq!(Config::load_or_default(None).unwrap(), Config::default());
    }
}
