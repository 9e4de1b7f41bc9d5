//! Configuration loading through figment.
//!
//! Sources, later ones overriding earlier ones:
//! 1. built-in defaults
//! 2. global file `<config dir>/partbin/partbin.{toml,yaml,yml,json}`
//! 3. project file `./.partbin/partbin.{toml,yaml,yml,json}`
//! 4. `PARTBIN_*` environment variables
//!
//! Command line overrides are applied by the caller on the extracted value.

use crate::error::{InventoryError, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Name of the config directory and of the config file stem
pub const CONFIG_NAME: &str = "partbin";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "PARTBIN_";

/// Component types accepted when nothing else is configured
pub const DEFAULT_COMPONENT_TYPES: [&str; 8] = [
    "resistor",
    "capacitor",
    "diode",
    "inductor",
    "transistor",
    "ic",
    "microcontroller",
    "other",
];

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Directory holding one JSON file per container
    pub data_dir: PathBuf,
    /// Allowed component types
    pub component_types: Vec<String>,
    /// Compartments per drawer when a container is created without one
    pub default_compartments: usize,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .map(|dir| dir.join(CONFIG_NAME).join("containers"))
            .unwrap_or_else(|| PathBuf::from(".partbin").join("containers"));
        Self {
            data_dir,
            component_types: DEFAULT_COMPONENT_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
            default_compartments: 3,
        }
    }
}

impl InventoryConfig {
    /// Load from every source with the default discovery locations
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }

    /// Override the data directory
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Configured spelling of a component type, matched case-insensitively
    pub fn canonical_component_type(&self, kind: &str) -> Option<&str> {
        self.component_types
            .iter()
            .find(|t| t.eq_ignore_ascii_case(kind.trim()))
            .map(String::as_str)
    }

    /// Validate a component type, returning its configured spelling
    pub fn check_component_type(&self, kind: &str) -> Result<String> {
        self.canonical_component_type(kind)
            .map(str::to_string)
            .ok_or_else(|| InventoryError::InvalidComponentType {
                kind: kind.to_string(),
                allowed: self.component_types.join(", "),
            })
    }

    fn validate(&self) -> Result<()> {
        if self.default_compartments == 0 {
            return Err(InventoryError::InvalidDimension {
                field: "default_compartments".into(),
                value: 0,
            });
        }
        if self.component_types.is_empty() {
            return Err(InventoryError::invalid_value(
                "component_types",
                "at least one component type is required",
            ));
        }
        Ok(())
    }
}

/// Configuration file format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// A configuration file found during discovery
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub format: ConfigFormat,
}

/// Builds the figment from defaults, discovered files and the environment
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    global_dir: Option<PathBuf>,
    project_dir: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader using `<config dir>/partbin` and `./.partbin`
    pub fn new() -> Self {
        Self {
            global_dir: dirs::config_dir().map(|dir| dir.join(CONFIG_NAME)),
            project_dir: std::env::current_dir()
                .ok()
                .map(|dir| dir.join(format!(".{CONFIG_NAME}"))),
        }
    }

    /// Use a specific global config directory
    pub fn with_global_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.global_dir = Some(dir.into());
        self
    }

    /// Use a specific project config directory
    pub fn with_project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = Some(dir.into());
        self
    }

    /// Config files that exist, lowest precedence first
    pub fn discover(&self) -> Vec<ConfigFile> {
        [&self.global_dir, &self.project_dir]
            .into_iter()
            .flatten()
            .flat_map(|dir| Self::files_in(dir))
            .collect()
    }

    /// Build the figment with all sources in precedence order
    pub fn figment(&self) -> Figment {
        debug!("Building figment configuration with precedence order");
        let mut figment = Figment::from(Serialized::defaults(InventoryConfig::default()));

        for file in self.discover() {
            trace!("Loading config file: {} ({:?})", file.path.display(), file.format);
            figment = match file.format {
                ConfigFormat::Toml => figment.merge(Toml::file(&file.path)),
                ConfigFormat::Yaml => figment.merge(Yaml::file(&file.path)),
                ConfigFormat::Json => figment.merge(Json::file(&file.path)),
            };
        }

        figment.merge(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().into()))
    }

    /// Extract and validate the configuration
    pub fn load(&self) -> Result<InventoryConfig> {
        let config: InventoryConfig = self.figment().extract()?;
        config.validate()?;
        debug!(
            data_dir = %config.data_dir.display(),
            types = config.component_types.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    fn files_in(dir: &Path) -> Vec<ConfigFile> {
        ["toml", "yaml", "yml", "json"]
            .into_iter()
            .filter_map(|ext| {
                let path = dir.join(format!("{CONFIG_NAME}.{ext}"));
                let format = ConfigFormat::from_extension(ext)?;
                path.is_file().then_some(ConfigFile { path, format })
            })
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    struct EnvGuard(&'static str);

    impl EnvGuard {
        fn set(key: &'static str, value: &str) -> Self {
            std::env::set_var(key, value);
            Self(key)
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            std::env::remove_var(self.0);
        }
    }

    fn setup() -> (TempDir, ConfigLoader) {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("global");
        let project = temp.path().join("project");
        fs::create_dir_all(&global).unwrap();
        fs::create_dir_all(&project).unwrap();
        let loader = ConfigLoader::new()
            .with_global_dir(global)
            .with_project_dir(project);
        (temp, loader)
    }

    #[test]
    #[serial]
    fn test_defaults() {
        let (_temp, loader) = setup();
        let config = loader.load().unwrap();
        assert_eq!(config.default_compartments, 3);
        assert_eq!(config.component_types.len(), 8);
        assert!(config.canonical_component_type("Resistor").is_some());
    }

    #[test]
    #[serial]
    fn test_project_overrides_global() {
        let (temp, loader) = setup();
        fs::write(
            temp.path().join("global/partbin.toml"),
            "default_compartments = 4\ndata_dir = \"/tmp/global\"\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("project/partbin.yaml"),
            "default_compartments: 6\n",
        )
        .unwrap();

        let config = loader.load().unwrap();
        assert_eq!(config.default_compartments, 6);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/global"));
        assert_eq!(loader.discover().len(), 2);
    }

    #[test]
    #[serial]
    fn test_env_overrides_files() {
        let (temp, loader) = setup();
        fs::write(
            temp.path().join("project/partbin.json"),
            r#"{"component_types": ["resistor", "fuse"]}"#,
        )
        .unwrap();
        let _guard = EnvGuard::set("PARTBIN_DEFAULT_COMPARTMENTS", "9");

        let config = loader.load().unwrap();
        assert_eq!(config.default_compartments, 9);
        assert_eq!(config.component_types, vec!["resistor", "fuse"]);
        assert_eq!(config.check_component_type("FUSE").unwrap(), "fuse");
        assert!(matches!(
            config.check_component_type("diode"),
            Err(InventoryError::InvalidComponentType { .. })
        ));
    }

    #[test]
    #[serial]
    fn test_invalid_values_rejected() {
        let (temp, loader) = setup();
        fs::write(
            temp.path().join("project/partbin.toml"),
            "default_compartments = 0\n",
        )
        .unwrap();
        assert!(matches!(
            loader.load(),
            Err(InventoryError::InvalidDimension { .. })
        ));

        fs::write(
            temp.path().join("project/partbin.toml"),
            "default_compartments = \"many\"\n",
        )
        .unwrap();
        assert!(matches!(loader.load(), Err(InventoryError::Config { .. })));
    }
}
