//! Naming configuration.
//!
//! Selects the gauge naming policy and the order in which declaration
//! sources are consulted. Loaded from YAML files and environment variables:
//!
//! ```yaml
//! gauge_naming: instance_class     # or declaring_class
//! resolution_order: [method, class]
//! ```

use std::sync::Arc;

use serde::Deserialize;

use crate::namer::{DeclaringClassMetricNamer, GaugeInstanceClassMetricNamer, MetricNamer};
use crate::resolver::{
    AnnotationResolver, ClassAnnotationResolver, ListAnnotationResolver, MethodAnnotationResolver,
};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "metrics-naming.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "METRICS_NAMING_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "METRICS_NAMING";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "METRICS_NAMING_LOG";

/// Which type supplies the namespace of a gauge name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeNaming {
    /// The type declaring the gauge method.
    DeclaringClass,
    /// The instantiated type, so inherited gauges do not collide.
    #[default]
    InstanceClass,
}

/// A declaration source that can be placed in the resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationSource {
    /// Declarations on the method itself.
    Method,
    /// Blanket declarations on the method's declaring type.
    Class,
}

impl DeclarationSource {
    pub fn resolver(&self) -> Box<dyn AnnotationResolver> {
        match self {
            DeclarationSource::Method => Box::new(MethodAnnotationResolver),
            DeclarationSource::Class => Box::new(ClassAnnotationResolver),
        }
    }
}

/// Naming configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Gauge naming policy.
    pub gauge_naming: GaugeNaming,
    /// Declaration sources, highest precedence first.
    pub resolution_order: Vec<DeclarationSource>,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            gauge_naming: GaugeNaming::default(),
            resolution_order: vec![DeclarationSource::Method, DeclarationSource::Class],
        }
    }
}

impl NamingConfig {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `metrics-naming.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix, e.g.
    ///    `METRICS_NAMING__RESOLUTION_ORDER=class,method`
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("resolution_order"),
            )
            .build()?;

        let config: NamingConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single YAML file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;

        let config: NamingConfig =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution_order.is_empty() {
            return Err(ConfigError::EmptyResolutionOrder);
        }
        Ok(())
    }

    /// Resolver consulting the configured sources in order.
    pub fn build_resolver(&self) -> Result<ListAnnotationResolver, ConfigError> {
        self.validate()?;
        Ok(ListAnnotationResolver::new(
            self.resolution_order.iter().map(|s| s.resolver()).collect(),
        ))
    }

    /// Namer implementing the configured gauge policy.
    pub fn build_namer(&self) -> Arc<dyn MetricNamer> {
        match self.gauge_naming {
            GaugeNaming::DeclaringClass => Arc::new(DeclaringClassMetricNamer),
            GaugeNaming::InstanceClass => Arc::new(GaugeInstanceClassMetricNamer),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}': {1}")]
    FileRead(String, String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to load config: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("resolution_order must name at least one declaration source")]
    EmptyResolutionOrder,
}
