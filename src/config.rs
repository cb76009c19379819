use std::collections::BTreeMap;
use std::fs;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::domain::ReferenceSite;
use crate::error::BirdError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Preferences {
    sites: BTreeMap<String, bool>,
}

impl Preferences {
    pub fn load(path: &Utf8Path) -> Result<Self, BirdError> {
        let content = fs::read_to_string(path.as_std_path())
            .map_err(|_| BirdError::ConfigRead(path.to_path_buf()))?;
        serde_json::from_str(&content).map_err(|err| BirdError::ConfigParse(err.to_string()))
    }

    pub fn from_sites<I, K>(sites: I) -> Self
    where
        I: IntoIterator<Item = (K, bool)>,
        K: Into<String>,
    {
        Self {
            sites: sites
                .into_iter()
                .map(|(key, enabled)| (key.into(), enabled))
                .collect(),
        }
    }

    pub fn is_enabled(&self, site: ReferenceSite) -> Result<bool, BirdError> {
        self.sites
            .get(site.key())
            .copied()
            .ok_or_else(|| BirdError::MissingPreference(site.key().to_string()))
    }
}
