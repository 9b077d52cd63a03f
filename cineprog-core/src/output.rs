use crate::types::ProgramOutput;
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::Path;

impl ProgramOutput {
    /// Screenings as a pretty JSON array
    pub fn screenings_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.screenings)?)
    }

    /// Movie catalog as a pretty JSON array
    pub fn movies_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.movies)?)
    }

    /// Script for the static site: a last-updated stamp and the screening list
    pub fn to_program_js(&self, updated_at: DateTime<Utc>) -> Result<String> {
        Ok(format!(
            "window.PROGRAM_LAST_UPDATED = \"{}\";\nwindow.PROGRAM = {};\n",
            updated_at.to_rfc3339_opts(SecondsFormat::Secs, false),
            self.screenings_json()?
        ))
    }

    pub fn to_movies_js(&self) -> Result<String> {
        Ok(format!("window.MOVIES = {};\n", self.movies_json()?))
    }

    /// Save in one of the supported formats: `json` (default), `js`,
    /// `movies`, `movies-js`
    pub fn save_with_format<P: AsRef<Path>>(&self, path: P, format: &str) -> Result<()> {
        let path = path.as_ref();
        let content = match format {
            "js" => self.to_program_js(Utc::now())?,
            "movies" => format!("{}\n", self.movies_json()?),
            "movies-js" => self.to_movies_js()?,
            "json" => format!("{}\n", self.screenings_json()?),
            other => {
                tracing::warn!(format = other, "Unknown output format, writing json");
                format!("{}\n", self.screenings_json()?)
            }
        };
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write output: {}", path.display()))?;
        Ok(())
    }
}
