use std::path::Path;

use serde::{Deserialize, Serialize};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use once_cell::sync::OnceCell;
use otlptranslator::MetricNamer;

pub static CONFIG: OnceCell<Configuration> = OnceCell::new();

/// Configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "promname.toml";

/// Prefix of environment overrides, e.g. `PROMNAME__TRANSLATOR__NAMESPACE`
pub const ENV_PREFIX: &str = "PROMNAME__";

/// How OTel metric names are translated
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// Prefix for every metric name. Not cleaned up, so it must already be a
    /// valid metric name token.
    pub namespace: String,
    /// Append unit and type suffixes (`_seconds`, `_total`, `_ratio`)
    pub add_metric_suffixes: bool,
    /// Keep UTF-8 characters and punctuation in metric names
    pub allow_utf8: bool,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            add_metric_suffixes: true,
            allow_utf8: false,
        }
    }
}

impl From<&TranslatorConfig> for MetricNamer {
    fn from(config: &TranslatorConfig) -> Self {
        MetricNamer::new(config.namespace.clone())
            .with_metric_suffixes(config.add_metric_suffixes)
            .with_utf8(config.allow_utf8)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter when neither `RUST_LOG` nor a CLI flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Configuration {
    /// Metric name translation settings
    #[serde(default)]
    pub translator: TranslatorConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Configuration {
    pub fn load() -> Result<Self, Box<figment::Error>> {
        Self::figment(Toml::file(CONFIG_FILE))
            .extract()
            .map_err(Box::new)
    }

    /// Load with an explicit configuration file instead of `promname.toml`
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Box::new(figment::Error::from(format!(
                "Configuration file not found: {}",
                path.display()
            ))));
        }

        Self::figment(Toml::file_exact(path))
            .extract()
            .map_err(Box::new)
    }

    fn figment(file: figment::providers::Data<Toml>) -> Figment {
        Figment::from(Serialized::defaults(Configuration::default()))
            .merge(file)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn metric_namer(&self) -> MetricNamer {
        MetricNamer::from(&self.translator)
    }
}
