use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};

use mood_sentiment::ClassifierConfig;
use mood_sentiment::classifier::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};

/// Runtime configuration, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub open_browser: bool,
    pub seed_demo: bool,
    pub classifier: ClassifierConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = get("MOOD_DB_PATH").unwrap_or_else(|| "mood_journal.db".into());
        let host = get("MOOD_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = get("MOOD_PORT")
            .unwrap_or_else(|| "5000".into())
            .parse()
            .context("MOOD_PORT must be a port number")?;

        let debug = bool_var(&get, "MOOD_DEBUG")?.unwrap_or(true);
        let open_browser = bool_var(&get, "MOOD_OPEN_BROWSER")?.unwrap_or(debug);
        let seed_demo = bool_var(&get, "MOOD_SEED_DEMO")?.unwrap_or(true);

        let timeout = match get("MOOD_HF_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse()
                    .context("MOOD_HF_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            None => DEFAULT_TIMEOUT,
        };

        let classifier = ClassifierConfig {
            endpoint: get("MOOD_HF_API_URL").unwrap_or_else(|| DEFAULT_ENDPOINT.into()),
            token: get("MOOD_HF_API_TOKEN").filter(|t| !t.trim().is_empty()),
            timeout,
        };

        Ok(Self {
            db_path: db_path.into(),
            host,
            port,
            debug,
            open_browser,
            seed_demo,
            classifier,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }

    /// Address a local browser should use, whatever the bind host.
    pub fn local_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn default_log_filter(&self) -> &'static str {
        if self.debug {
            "mood=debug,tower_http=debug"
        } else {
            "mood=info,tower_http=info"
        }
    }
}

fn bool_var<F>(get: &F, key: &str) -> Result<Option<bool>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = get(key) else {
        return Ok(None);
    };

    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        other => bail!("{} must be a boolean, got '{}'", key, other),
    }
}
