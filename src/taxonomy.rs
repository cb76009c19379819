use std::time::Duration;

use camino::Utf8Path;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tracing::info;

use crate::domain::BirdRecord;
use crate::error::BirdError;
use crate::store::Store;

pub const DEFAULT_TAXONOMY_URL: &str = "http://ebird.org/ws1.1/ref/taxa/ebird?cat=species&fmt=csv";

pub trait TaxonomyClient: Send + Sync {
    fn download_taxa(&self, destination: &Utf8Path) -> Result<(), BirdError>;
}

#[derive(Clone)]
pub struct TaxonomyHttpClient {
    client: Client,
    url: String,
}

impl TaxonomyHttpClient {
    pub fn new() -> Result<Self, BirdError> {
        Self::with_url(DEFAULT_TAXONOMY_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Result<Self, BirdError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("birdref/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| BirdError::TaxonomyHttp(err.to_string()))?,
        );
        // the full taxonomy is several MB; no deadline on the first fetch
        let client = Client::builder()
            .default_headers(headers)
            .timeout(None::<Duration>)
            .build()
            .map_err(|err| BirdError::TaxonomyHttp(err.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TaxonomyClient for TaxonomyHttpClient {
    fn download_taxa(&self, destination: &Utf8Path) -> Result<(), BirdError> {
        info!(url = %self.url, "fetching taxonomy");
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|err| BirdError::TaxonomyHttp(err.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "taxonomy request failed".to_string());
            return Err(BirdError::TaxonomyStatus { status, message });
        }
        let text = response
            .text()
            .map_err(|err| BirdError::TaxonomyHttp(err.to_string()))?;
        Store::write_bytes_atomic(destination, text.as_bytes())
    }
}

#[derive(Debug, Deserialize)]
struct TaxonRow {
    #[serde(rename = "COMMON_NAME")]
    common_name: String,
    #[serde(rename = "SCIENTIFIC_NAME")]
    scientific_name: String,
    #[serde(rename = "BANDING_CODES")]
    banding_codes: String,
    #[serde(rename = "SPECIES_CODE")]
    species_code: String,
}

impl From<TaxonRow> for BirdRecord {
    fn from(row: TaxonRow) -> Self {
        BirdRecord::new(
            row.common_name,
            row.scientific_name,
            row.banding_codes,
            row.species_code,
        )
    }
}

pub fn parse_taxa_csv(content: &str) -> Result<Vec<BirdRecord>, BirdError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(content.as_bytes());
    reader
        .deserialize::<TaxonRow>()
        .map(|row| {
            row.map(BirdRecord::from)
                .map_err(|err| BirdError::TaxonomyParse(err.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parse_ignores_extra_columns() {
        let csv = "SCIENTIFIC_NAME,COMMON_NAME,SPECIES_CODE,CATEGORY,TAXON_ORDER,BANDING_CODES\n\
                   Cardellina pusilla,Wilson's Warbler,wlswar,species,32450,WIWA\n\
                   \"Poecile atricapillus\",\"Black-capped Chickadee\",bkcchi,species,21680,BCCH\n";
        let records = parse_taxa_csv(csv).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].common_name, "Wilson's Warbler");
        assert_eq!(records[0].banding_code, "WIWA");
        assert_eq!(records[1].scientific_name, "Poecile atricapillus");
        assert_eq!(records[1].species_code, "bkcchi");
    }

    #[test]
    fn parse_keeps_empty_banding_code() {
        let csv = "COMMON_NAME,SCIENTIFIC_NAME,BANDING_CODES,SPECIES_CODE\n\
                   Common Ostrich,Struthio camelus,,ostric2\n";
        let records = parse_taxa_csv(csv).unwrap();
        assert_eq!(records[0].banding_code, "");
        assert_eq!(records[0].match_text(), "common ostrich struthio camelus  ostric2");
    }

    #[test]
    fn parse_header_only_is_empty() {
        let records = parse_taxa_csv("COMMON_NAME,SCIENTIFIC_NAME,BANDING_CODES,SPECIES_CODE\n")
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn parse_ignores_extra_trailing_field() {
        let csv = "COMMON_NAME,SCIENTIFIC_NAME,BANDING_CODES,SPECIES_CODE\n\
                   Wilson's Warbler,Cardellina pusilla,WIWA,wlswar\n\
                   American Robin,Turdus migratorius,AMRO,amerob,\n";
        let records = parse_taxa_csv(csv).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].species_code, "amerob");
        assert_eq!(records[1].match_text(), "american robin turdus migratorius amro amerob");
    }

    #[test]
    fn parse_short_row_fails() {
        let csv = "COMMON_NAME,SCIENTIFIC_NAME,BANDING_CODES,SPECIES_CODE\n\
                   Wilson's Warbler,Cardellina pusilla\n";
        let err = parse_taxa_csv(csv).unwrap_err();
        assert_matches!(err, BirdError::TaxonomyParse(_));
    }

    #[test]
    fn parse_missing_column_fails() {
        let csv = "COMMON_NAME,SCIENTIFIC_NAME\nWilson's Warbler,Cardellina pusilla\n";
        let err = parse_taxa_csv(csv).unwrap_err();
        assert_matches!(err, BirdError::TaxonomyParse(_));
    }
}
