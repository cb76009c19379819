use serde::{Deserialize, Serialize};

use crate::domain::BirdRecord;

pub const RESULTS_TITLE: &str = "birds";

// `_`-prefixed keys are internal and never rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub name: String,
    #[serde(rename = "banding code")]
    pub banding_code: String,
    pub sciname: String,
    #[serde(rename = "_commonname")]
    pub common_name: String,
    #[serde(rename = "_sciname")]
    pub scientific_name: String,
    #[serde(rename = "_banding_codes")]
    pub banding_codes: String,
    #[serde(rename = "_species_code")]
    pub species_code: String,
}

impl DisplayRow {
    pub fn visible_fields(&self) -> [(&'static str, &str); 3] {
        [
            ("name", self.name.as_str()),
            ("banding code", self.banding_code.as_str()),
            ("sciname", self.sciname.as_str()),
        ]
    }

    pub fn to_record(&self) -> BirdRecord {
        BirdRecord::new(
            self.common_name.as_str(),
            self.scientific_name.as_str(),
            self.banding_codes.as_str(),
            self.species_code.as_str(),
        )
    }
}

impl From<&BirdRecord> for DisplayRow {
    fn from(bird: &BirdRecord) -> Self {
        Self {
            name: bird.common_name.clone(),
            banding_code: bird.banding_code.clone(),
            sciname: bird.scientific_name.clone(),
            common_name: bird.common_name.clone(),
            scientific_name: bird.scientific_name.clone(),
            banding_codes: bird.banding_code.clone(),
            species_code: bird.species_code.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Presentation {
    pub rows: Vec<DisplayRow>,
    pub html: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PluginResults {
    pub title: String,
    pub html: String,
    pub run_args: Vec<DisplayRow>,
}

impl From<Presentation> for PluginResults {
    fn from(presentation: Presentation) -> Self {
        Self {
            title: RESULTS_TITLE.to_string(),
            html: presentation.html,
            run_args: presentation.rows,
        }
    }
}

pub fn present(matched: &[&BirdRecord]) -> Presentation {
    let rows: Vec<DisplayRow> = matched.iter().map(|bird| DisplayRow::from(*bird)).collect();
    let html = render_html(&rows);
    Presentation { rows, html }
}

const STYLE: &str = r#"<style type="text/css">
    table, td, th {
        border: 0px solid gray;
        white-space: nowrap;
    }
    table {
        border-collapse: collapse;
    }
    td, th {
        padding: 3px;
    }
    th {
        text-align: left;
    }
    .footer, .footer a {
        margin-top: 3ex;
        color: lightgray;
        text-align: center;
    }
</style>
"#;

const FOOTER: &str = r#"<div class="footer">
    (Data from
    <a href="https://confluence.cornell.edu/display/CLOISAPI/eBird-1.1-SpeciesReference">ebird.org</a>)
</div>
"#;

fn render_html(rows: &[DisplayRow]) -> String {
    let mut html = String::from(STYLE);
    html.push_str("<table>\n");
    for row in rows {
        html.push_str("<tr>");
        for (_, value) in row.visible_fields() {
            html.push_str("<td>");
            html.push_str(&escape_html(value));
            html.push_str("</td>");
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");
    html.push_str(FOOTER);
    html
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
