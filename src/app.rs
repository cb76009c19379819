use tracing::{debug, info, warn};

use crate::config::Preferences;
use crate::dispatch::{UrlOpener, dispatch};
use crate::domain::BirdRecord;
use crate::error::BirdError;
use crate::present::{DisplayRow, PluginResults, present};
use crate::search::search;
use crate::store::Store;
use crate::taxonomy::{TaxonomyClient, parse_taxa_csv};

#[derive(Clone)]
pub struct App<T: TaxonomyClient, O: UrlOpener> {
    store: Store,
    taxonomy: T,
    opener: O,
}

impl<T: TaxonomyClient, O: UrlOpener> App<T, O> {
    pub fn new(store: Store, taxonomy: T, opener: O) -> Self {
        Self {
            store,
            taxonomy,
            opener,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn load_records(&self) -> Result<Vec<BirdRecord>, BirdError> {
        match self.store.read_record_cache() {
            Ok(Some(records)) => {
                debug!(count = records.len(), "record cache hit");
                return Ok(records);
            }
            Ok(None) => info!(path = %self.store.record_cache_path(), "no record cache"),
            Err(BirdError::CacheDecode(reason)) => {
                warn!(path = %self.store.record_cache_path(), %reason, "discarding record cache");
            }
            Err(err) => return Err(err),
        }

        let records = self.load_records_no_cache()?;
        self.store.write_record_cache(&records)?;
        info!(count = records.len(), "record cache written");
        Ok(records)
    }

    fn load_records_no_cache(&self) -> Result<Vec<BirdRecord>, BirdError> {
        let csv_path = self.store.taxa_csv_path();
        if !self.store.exists(&csv_path) {
            self.taxonomy.download_taxa(&csv_path)?;
        }
        let content = self.store.read_taxa_csv()?;
        parse_taxa_csv(&content)
    }

    pub fn results(&self, query: &str) -> Result<PluginResults, BirdError> {
        let records = self.load_records()?;
        let matched = search(query, &records);
        debug!(%query, matched = matched.len(), "search finished");
        Ok(PluginResults::from(present(&matched)))
    }

    pub fn run(&self, selection: &[DisplayRow]) -> Result<Vec<String>, BirdError> {
        let Some(row) = selection.first() else {
            debug!("empty selection");
            return Ok(Vec::new());
        };
        // re-read on every selection, the file may change after a search
        let preferences = Preferences::load(&self.store.preferences_path())?;
        dispatch(&row.to_record(), &preferences, &self.opener)
    }
}

/// Accepts the whole `run_args` array or a single entry of it.
pub fn parse_payload(payload: &str) -> Result<Vec<DisplayRow>, BirdError> {
    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(|err| BirdError::InvalidPayload(err.to_string()))?;
    let rows = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value::<DisplayRow>(value).map(|row| vec![row])
    };
    rows.map_err(|err| BirdError::InvalidPayload(err.to_string()))
}
