use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BirdError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredRecord")]
pub struct BirdRecord {
    pub common_name: String,
    pub scientific_name: String,
    pub banding_code: String,
    pub species_code: String,
    match_text: String,
}

impl BirdRecord {
    pub fn new(
        common_name: impl Into<String>,
        scientific_name: impl Into<String>,
        banding_code: impl Into<String>,
        species_code: impl Into<String>,
    ) -> Self {
        let common_name = common_name.into();
        let scientific_name = scientific_name.into();
        let banding_code = banding_code.into();
        let species_code = species_code.into();
        let match_text = normalize_token(&format!(
            "{common_name} {scientific_name} {banding_code} {species_code}"
        ));
        Self {
            common_name,
            scientific_name,
            banding_code,
            species_code,
            match_text,
        }
    }

    pub fn match_text(&self) -> &str {
        &self.match_text
    }
}

// a stored `match_text` is ignored and rebuilt on load
#[derive(Deserialize)]
struct StoredRecord {
    common_name: String,
    scientific_name: String,
    banding_code: String,
    species_code: String,
}

impl From<StoredRecord> for BirdRecord {
    fn from(stored: StoredRecord) -> Self {
        BirdRecord::new(
            stored.common_name,
            stored.scientific_name,
            stored.banding_code,
            stored.species_code,
        )
    }
}

pub fn normalize_token(text: &str) -> String {
    text.chars()
        .filter(|ch| !ch.is_ascii_punctuation())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceSite {
    XenoCanto,
    PetersonFieldGuide,
    EbirdMap,
    AllAboutBirds,
    Audubon,
}

impl ReferenceSite {
    // least to most interesting, the last page opened ends up in front
    pub const DISPATCH_ORDER: [ReferenceSite; 5] = [
        ReferenceSite::Audubon,
        ReferenceSite::AllAboutBirds,
        ReferenceSite::EbirdMap,
        ReferenceSite::PetersonFieldGuide,
        ReferenceSite::XenoCanto,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ReferenceSite::XenoCanto => "xeno-canto.org",
            ReferenceSite::PetersonFieldGuide => "peterson-field-guide",
            ReferenceSite::EbirdMap => "ebird.org/map",
            ReferenceSite::AllAboutBirds => "allaboutbirds.org",
            ReferenceSite::Audubon => "audubon.org",
        }
    }

    pub fn url(&self, bird: &BirdRecord) -> String {
        match self {
            // view=3 shows sonograms, order=dt&dir=1 sorts newest first
            ReferenceSite::XenoCanto => format!(
                "https://www.xeno-canto.org/species/{}?view=3&order=dt&dir=1",
                bird.scientific_name.replace(' ', "-")
            ),
            ReferenceSite::PetersonFieldGuide => format!(
                "https://academy.allaboutbirds.org/peterson-field-guide-to-bird-sounds/?speciesCode={}",
                bird.species_code
            ),
            ReferenceSite::EbirdMap => format!("http://ebird.org/map/{}", bird.species_code),
            ReferenceSite::AllAboutBirds => format!(
                "https://www.allaboutbirds.org/guide/{}",
                title_case(&bird.common_name)
                    .replace('\'', "")
                    .replace(' ', "_")
            ),
            ReferenceSite::Audubon => format!(
                "http://www.audubon.org/field-guide/bird/{}",
                bird.common_name
                    .to_lowercase()
                    .replace('\'', "")
                    .replace(' ', "-")
            ),
        }
    }
}

impl fmt::Display for ReferenceSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for ReferenceSite {
    type Err = BirdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::DISPATCH_ORDER
            .into_iter()
            .find(|site| site.key() == trimmed)
            .ok_or_else(|| BirdError::UnknownReferenceSite(value.to_string()))
    }
}

fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
