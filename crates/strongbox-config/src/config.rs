use std::{
    fs,
    path::{Path, PathBuf},
    sync::{LazyLock, RwLock},
};

use documented::{Documented, DocumentedFields};
use serde::{Deserialize, Serialize};
use strongbox_utils::{
    fs::read_optional,
    path::{resolve_path, xdg_config_home, xdg_data_home},
};
use toml_edit::DocumentMut;
use tracing::info;

use crate::{
    annotations::annotate_toml_table,
    error::{ConfigError, Result},
};

pub const DEFAULT_MAX_HIERARCHY_DEPTH: usize = 5;
pub const MAX_HIERARCHY_DEPTH_LIMIT: usize = 64;
pub const DEFAULT_LOG_LEVEL: &str = "info";

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Strongbox configuration
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Documented, DocumentedFields)]
pub struct Config {
    /// Root directory for strongbox data.
    /// Default: $XDG_DATA_HOME/strongbox
    pub root_path: String,

    /// Path of the graph snapshot file.
    /// Default: $STRONGBOX_ROOT/graph.json
    pub graph_path: Option<String>,

    /// How many ancestors a read follows above the requested vertex.
    /// Default: 5
    pub max_hierarchy_depth: Option<usize>,

    /// Log level used when no verbosity flag is given.
    /// One of "error", "warn", "info", "debug", "trace".
    /// Default: "info"
    pub log_level: Option<String>,
}

pub static CONFIG: LazyLock<RwLock<Option<Config>>> = LazyLock::new(|| RwLock::new(None));

pub static CONFIG_PATH: LazyLock<RwLock<PathBuf>> = LazyLock::new(|| {
    RwLock::new(match std::env::var("STRONGBOX_CONFIG") {
        Ok(path) => PathBuf::from(path),
        Err(_) => xdg_config_home().join("strongbox").join("config.toml"),
    })
});

pub fn init() -> Result<()> {
    let config = Config::new()?;
    let mut global_config = CONFIG.write().unwrap();
    *global_config = Some(config);
    Ok(())
}

pub fn get_config() -> Config {
    {
        let config_guard = CONFIG.read().unwrap();
        if let Some(config) = config_guard.as_ref() {
            return config.clone();
        }
    }

    let mut config_guard = CONFIG.write().unwrap();
    config_guard.get_or_insert_with(Config::default_config).clone()
}

/// Points the global configuration at `path` instead of the default location.
///
/// Takes effect on the next [`init`].
pub fn set_config_path<P: AsRef<Path>>(path: P) {
    let mut config_path = CONFIG_PATH.write().unwrap();
    *config_path = path.as_ref().to_path_buf();
}

pub fn config_path() -> PathBuf {
    CONFIG_PATH.read().unwrap().to_path_buf()
}

impl Config {
    pub fn default_config() -> Self {
        let root_path = std::env::var("STRONGBOX_ROOT")
            .unwrap_or_else(|_| format!("{}/strongbox", xdg_data_home().display()));

        Self {
            graph_path: Some(format!("{root_path}/graph.json")),
            root_path,
            max_hierarchy_depth: Some(DEFAULT_MAX_HIERARCHY_DEPTH),
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    /// Loads the configuration from [`CONFIG_PATH`].
    /// If the configuration file is not found, it uses the default configuration.
    pub fn new() -> Result<Self> {
        Self::load(config_path())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = match read_optional(path)? {
            Some(content) => toml::from_str(&content)?,
            None => Self::default_config(),
        };

        config.resolve()?;

        Ok(config)
    }

    /// Fills in unset optional fields and validates the result.
    pub fn resolve(&mut self) -> Result<()> {
        if self.graph_path.is_none() {
            self.graph_path = Some(format!("{}/graph.json", self.root_path));
        }
        self.max_hierarchy_depth
            .get_or_insert(DEFAULT_MAX_HIERARCHY_DEPTH);
        self.log_level
            .get_or_insert_with(|| DEFAULT_LOG_LEVEL.to_string());

        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.root_path.trim().is_empty() {
            return Err(ConfigError::EmptyPath("root_path"));
        }
        if self
            .graph_path
            .as_deref()
            .is_some_and(|path| path.trim().is_empty())
        {
            return Err(ConfigError::EmptyPath("graph_path"));
        }

        let depth = self.max_hierarchy_depth();
        if depth > MAX_HIERARCHY_DEPTH_LIMIT {
            return Err(ConfigError::InvalidDepth {
                depth,
                max: MAX_HIERARCHY_DEPTH_LIMIT,
            });
        }

        let level = self.log_level();
        if !LOG_LEVELS.contains(&level) {
            return Err(ConfigError::InvalidLogLevel(level.to_string()));
        }

        Ok(())
    }

    pub fn get_root_path(&self) -> Result<PathBuf> {
        if let Ok(env_path) = std::env::var("STRONGBOX_ROOT") {
            return Ok(resolve_path(&env_path)?);
        }
        Ok(resolve_path(&self.root_path)?)
    }

    pub fn get_graph_path(&self) -> Result<PathBuf> {
        if let Ok(env_path) = std::env::var("STRONGBOX_GRAPH") {
            return Ok(resolve_path(&env_path)?);
        }
        if let Some(graph_path) = &self.graph_path {
            return Ok(resolve_path(graph_path)?);
        }
        Ok(self.get_root_path()?.join("graph.json"))
    }

    pub fn max_hierarchy_depth(&self) -> usize {
        self.max_hierarchy_depth
            .unwrap_or(DEFAULT_MAX_HIERARCHY_DEPTH)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn to_annotated_document(&self) -> Result<DocumentMut> {
        let toml_string = toml::to_string_pretty(self)?;
        let mut doc = toml_string.parse::<DocumentMut>()?;

        annotate_toml_table::<Config>(doc.as_table_mut())?;

        Ok(doc)
    }
}

/// Writes the default configuration, with every field documented, to [`CONFIG_PATH`].
pub fn generate_default_config() -> Result<PathBuf> {
    let config_path = config_path();
    write_default_config(&config_path)?;
    Ok(config_path)
}

pub fn write_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Err(ConfigError::ConfigAlreadyExists);
    }

    let annotated_doc = Config::default_config().to_annotated_document()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, annotated_doc.to_string())?;
    info!(
        "Default configuration file generated with documentation at: {}",
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use tempfile::tempdir;

    use super::*;
    use crate::test_utils::with_env;

    #[test]
    #[serial]
    fn test_default_config() {
        with_env(vec![("STRONGBOX_ROOT", "/srv/strongbox")], || {
            let config = Config::default_config();

            assert_eq!(config.root_path, "/srv/strongbox");
            assert_eq!(
                config.graph_path.as_deref(),
                Some("/srv/strongbox/graph.json")
            );
            assert_eq!(config.max_hierarchy_depth(), DEFAULT_MAX_HIERARCHY_DEPTH);
            assert_eq!(config.log_level(), "info");
            assert!(config.validate().is_ok());
        });
    }

    #[test]
    #[serial]
    fn test_load_missing_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path().join("config.toml")).unwrap();

        assert_eq!(config, Config::default_config());
    }

    #[test]
    fn test_load_fills_unset_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "root_path = \"/data/sb\"\nmax_hierarchy_depth = 8\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.graph_path.as_deref(), Some("/data/sb/graph.json"));
        assert_eq!(config.max_hierarchy_depth(), 8);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "root_path = [").unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(ConfigError::TomlDeError(_))
        ));
    }

    #[test]
    fn test_validate() {
        let mut config = Config {
            root_path: "/data".into(),
            graph_path: None,
            max_hierarchy_depth: Some(65),
            log_level: None,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDepth { depth: 65, max: 64 })
        ));

        config.max_hierarchy_depth = Some(64);
        assert!(config.validate().is_ok());

        config.log_level = Some("loud".into());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLogLevel(level)) if level == "loud"
        ));

        config.log_level = None;
        config.graph_path = Some(" ".into());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyPath("graph_path"))
        ));

        config.root_path = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyPath("root_path"))
        ));
    }

    #[test]
    #[serial]
    fn test_graph_path_env_override() {
        with_env(vec![("STRONGBOX_GRAPH", "/custom/graph.json")], || {
            let config = Config::default_config();
            assert_eq!(
                config.get_graph_path().unwrap(),
                PathBuf::from("/custom/graph.json")
            );
        });
    }

    #[test]
    #[serial]
    fn test_write_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        write_default_config(&path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("# How many ancestors a read follows"));
        assert!(content.contains("max_hierarchy_depth = 5"));

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, Config::default_config());

        assert!(matches!(
            write_default_config(&path),
            Err(ConfigError::ConfigAlreadyExists)
        ));
    }
}
