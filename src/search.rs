use crate::domain::{BirdRecord, normalize_token};

/// Tokens match against the concatenation of all four fields, so tokens taken
/// from different fields combine.
pub fn search<'a>(query: &str, records: &'a [BirdRecord]) -> Vec<&'a BirdRecord> {
    let normalized = normalize_token(query);
    let tokens: Vec<&str> = normalized.split_whitespace().collect();

    let mut matched: Vec<&BirdRecord> = records
        .iter()
        .filter(|bird| {
            tokens
                .iter()
                .all(|token| bird.match_text().contains(*token))
        })
        .collect();
    matched.sort_by(|a, b| a.common_name.cmp(&b.common_name));
    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn birds() -> Vec<BirdRecord> {
        vec![
            BirdRecord::new("Wilson's Warbler", "Cardellina pusilla", "WIWA", "wlswar"),
            BirdRecord::new("Black-capped Chickadee", "Poecile atricapillus", "BCCH", "bkcchi"),
            BirdRecord::new("American Robin", "Turdus migratorius", "AMRO", "amerob"),
        ]
    }

    fn names(found: &[&BirdRecord]) -> Vec<String> {
        found.iter().map(|bird| bird.common_name.clone()).collect()
    }

    #[test]
    fn banding_code_matches_case_insensitively() {
        let records = birds();
        assert_eq!(names(&search("wiwa", &records)), ["Wilson's Warbler"]);
        assert_eq!(names(&search("WiWa", &records)), ["Wilson's Warbler"]);
    }

    #[test]
    fn every_token_must_match() {
        let records = birds();
        assert_eq!(
            names(&search("cardellina pusilla", &records)),
            ["Wilson's Warbler"]
        );
        assert!(search("cardellina robin", &records).is_empty());
    }

    #[test]
    fn punctuation_in_query_is_ignored() {
        let records = birds();
        assert_eq!(names(&search("wilson's", &records)), ["Wilson's Warbler"]);
        assert_eq!(
            names(&search("black-capped", &records)),
            ["Black-capped Chickadee"]
        );
    }

    #[test]
    fn empty_query_returns_all_sorted() {
        let records = birds();
        assert_eq!(
            names(&search("", &records)),
            ["American Robin", "Black-capped Chickadee", "Wilson's Warbler"]
        );
        assert_eq!(search("   ", &records).len(), 3);
    }

    #[test]
    fn tokens_may_come_from_different_fields() {
        let records = birds();
        assert_eq!(names(&search("warbler wiwa", &records)), ["Wilson's Warbler"]);
        assert_eq!(names(&search("pusilla wlswar", &records)), ["Wilson's Warbler"]);
        assert!(search("robin wiwa", &records).is_empty());
    }

    #[test]
    fn sort_is_case_sensitive_bytewise() {
        let records = vec![
            BirdRecord::new("eastern Phoebe", "Sayornis phoebe", "EAPH", "easpho"),
            BirdRecord::new("Zebra Finch", "Taeniopygia guttata", "ZEFI", "zebfin"),
        ];
        assert_eq!(
            names(&search("", &records)),
            ["Zebra Finch", "eastern Phoebe"]
        );
    }
}
