use tracing::Level;

/// Default directives: quiet dependencies, informative workspace crates.
pub const DEFAULT_FILTER: &str = "warn,uniswapx=info,resolver=info";

/// How log events are filtered and where they are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `EnvFilter` directives, e.g. `warn,resolver=debug`.
    pub(crate) filter: String,
    /// Events at or above this level go to stderr, the rest to stdout.
    pub(crate) stderr_threshold: Level,
    pub(crate) json: bool,
}

impl Config {
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            ..Default::default()
        }
    }

    pub fn json(self, json: bool) -> Self {
        Self { json, ..self }
    }

    pub fn stderr_threshold(self, stderr_threshold: Option<Level>) -> Self {
        Self {
            stderr_threshold: stderr_threshold.unwrap_or(self.stderr_threshold),
            ..self
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            stderr_threshold: Level::ERROR,
            json: false,
        }
    }
}
