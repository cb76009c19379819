use std::io::{self, Write};

use tracing::{debug, warn};

use crate::config::Preferences;
use crate::domain::{BirdRecord, ReferenceSite};
use crate::error::BirdError;

pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemUrlOpener;

impl UrlOpener for SystemUrlOpener {
    fn open(&self, url: &str) {
        if let Err(err) = open::that(url) {
            warn!(%url, error = %err, "failed to open url");
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PrintUrlOpener;

impl UrlOpener for PrintUrlOpener {
    fn open(&self, url: &str) {
        let mut stdout = io::stdout();
        if let Err(err) = writeln!(stdout, "{url}") {
            warn!(%url, error = %err, "failed to print url");
        }
    }
}

/// All preference keys are checked before anything is opened.
pub fn dispatch(
    bird: &BirdRecord,
    preferences: &Preferences,
    opener: &dyn UrlOpener,
) -> Result<Vec<String>, BirdError> {
    let mut urls = Vec::new();
    for site in ReferenceSite::DISPATCH_ORDER {
        if preferences.is_enabled(site)? {
            urls.push(site.url(bird));
        }
    }
    for url in &urls {
        debug!(%url, "opening reference site");
        opener.open(url);
    }
    Ok(urls)
}
