use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub decks: u8,
    pub penetration: f64,
    pub seed: Option<u64>,
    pub hit_soft_17: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub decks: ValueSource,
    pub penetration: ValueSource,
    pub seed: ValueSource,
    pub hit_soft_17: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            decks: ValueSource::Default,
            penetration: ValueSource::Default,
            seed: ValueSource::Default,
            hit_soft_17: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            decks: 6,
            penetration: 0.75,
            seed: None,
            hit_soft_17: false,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[allow(dead_code)]
pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Resolve the configuration from defaults, then an optional TOML file
/// named by `TWENTYONE_CONFIG`, then individual environment variables.
/// Later layers win; each value remembers the layer it came from.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var("TWENTYONE_CONFIG") {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.decks {
            cfg.decks = v;
            sources.decks = ValueSource::File;
        }
        if let Some(v) = f.penetration {
            cfg.penetration = v;
            sources.penetration = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.hit_soft_17 {
            cfg.hit_soft_17 = v;
            sources.hit_soft_17 = ValueSource::File;
        }
    }

    if let Ok(decks) = std::env::var("TWENTYONE_DECKS")
        && !decks.is_empty()
    {
        cfg.decks = decks
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid decks".into()))?;
        sources.decks = ValueSource::Env;
    }
    if let Ok(pen) = std::env::var("TWENTYONE_PENETRATION")
        && !pen.is_empty()
    {
        cfg.penetration = pen
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid penetration".into()))?;
        sources.penetration = ValueSource::Env;
    }
    if let Ok(seed) = std::env::var("TWENTYONE_SEED")
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(h17) = std::env::var("TWENTYONE_HIT_SOFT_17")
        && !h17.is_empty()
    {
        cfg.hit_soft_17 =
            parse_bool(&h17).ok_or_else(|| ConfigError::Invalid("Invalid hit_soft_17".into()))?;
        sources.hit_soft_17 = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    decks: Option<u8>,
    #[serde(default)]
    penetration: Option<f64>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    hit_soft_17: Option<bool>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.decks == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: decks must be >=1".into(),
        ));
    }
    if !(cfg.penetration > 0.0 && cfg.penetration <= 1.0) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: penetration must be in (0, 1]".into(),
        ));
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
