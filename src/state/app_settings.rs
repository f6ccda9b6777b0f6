use log::{LevelFilter, warn};

pub const SEED_ENV: &str = "CUPTUI_SEED";
pub const LOG_ENV: &str = "CUPTUI_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    /// Fixed RNG seed; `None` draws fresh brackets every run.
    pub seed: Option<u64>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: Some(LevelFilter::Info),
            seed: None,
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`AppSettings::load`], but a malformed variable is an error.
    pub fn load_strict() -> anyhow::Result<Self> {
        Self::strict_from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Unparseable values are logged and
    /// fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let (settings, rejected) = Self::parse(lookup);
        for problem in &rejected {
            warn!("ignoring {problem}");
        }
        settings
    }

    pub fn strict_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let (settings, rejected) = Self::parse(lookup);
        if !rejected.is_empty() {
            anyhow::bail!("invalid environment: {}", rejected.join("; "));
        }
        Ok(settings)
    }

    /// Parsed settings plus one message per variable that was set but rejected.
    pub fn parse(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<String>) {
        let mut settings = Self::default();
        let mut rejected = Vec::new();

        if let Some(raw) = lookup(SEED_ENV).filter(|v| !v.trim().is_empty()) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => settings.seed = Some(seed),
                Err(e) => rejected.push(format!("{SEED_ENV}={raw:?}: {e}")),
            }
        }

        if let Some(raw) = lookup(LOG_ENV).filter(|v| !v.trim().is_empty()) {
            match raw.trim().parse::<LevelFilter>() {
                Ok(level) => settings.log_level = Some(level),
                Err(e) => rejected.push(format!("{LOG_ENV}={raw:?}: {e}")),
            }
        }

        (settings, rejected)
    }
}
