use std::io;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use mood_db::Database;
use mood_db::demo::seed_demo_entries;
use mood_sentiment::SentimentClassifier;

use crate::config::Config;

/// Opens (and migrates) the database, then seeds demo data if asked.
///
/// Failures are logged and never abort startup: `None` means the server
/// runs degraded and every store request answers 500.
pub fn open_store(config: &Config) -> Option<Arc<Database>> {
    let db = match Database::open(&config.db_path) {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!(
                "Could not open database at {}: {:#}",
                config.db_path.display(),
                e
            );
            return None;
        }
    };

    if config.seed_demo {
        if let Err(e) = seed_demo_entries(&db) {
            error!("Failed to create demo data: {:#}", e);
        }
    }

    Some(db)
}

pub fn build_classifier(config: &Config) -> Arc<SentimentClassifier> {
    let classifier = SentimentClassifier::new(config.classifier.clone()).unwrap_or_else(|e| {
        warn!("Remote classifier unavailable, using keyword heuristic: {}", e);
        SentimentClassifier::heuristic_only()
    });

    info!("Sentiment classifier mode: {}", classifier.mode().as_str());
    Arc::new(classifier)
}

/// Opens the journal in the user's browser at most once.
pub struct BrowserLauncher {
    url: String,
    opened: bool,
}

impl BrowserLauncher {
    pub fn new(url: String) -> Self {
        Self { url, opened: false }
    }

    /// Returns whether this call opened the browser.
    pub fn open_once(&mut self) -> bool {
        self.open_once_with(|url| open::that_detached(url))
    }

    fn open_once_with<F>(&mut self, opener: F) -> bool
    where
        F: FnOnce(&str) -> io::Result<()>,
    {
        if self.opened {
            return false;
        }

        match opener(&self.url) {
            Ok(()) => {
                info!("Browser opened at {}", self.url);
                self.opened = true;
                true
            }
            Err(e) => {
                warn!("Could not open browser automatically: {}", e);
                info!("Please open {} manually", self.url);
                false
            }
        }
    }
}

/// One-shot delayed launch, giving the listener time to come up.
pub fn schedule_browser_launch(mut launcher: BrowserLauncher, delay: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        launcher.open_once();
    });
}
