use std::io::{self, Write};

use serde::Serialize;

use crate::present::PluginResults;

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_results(results: &PluginResults) -> io::Result<()> {
        Self::print_json(results)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}
