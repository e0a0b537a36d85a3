// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! The list of movies shown on the site's grid.
//!
//! The generator owns the list; the browser only ever reads what is written
//! here. Entries carry `name`, `title`, `year` and `rating`, and the grid
//! builds `movies/posters/<name>.jpg` and `movies/<name>.html` from `name`.

use crate::error::GenerateError;
use crate::file_io::{read_optional, write_file};
use crate::layout::SiteLayout;
use crate::render::{PageContext, PageTemplate};
use crate::slug::Slug;
use crate::types::MovieRecord;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumString};

const LOADER_TEMPLATE: &str = include_str!("../templates/movie-loader.js");
const MOVIES_MARKER: &str = "const movies = ";

/// Which catalog resources are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CatalogFormat {
    /// `data/movies.json`, fetched by the browser at load time.
    #[default]
    Json,
    /// `js/movie-loader.js` with the list embedded.
    Script,
    /// Both; the JSON file is the one read back.
    Both,
}

impl CatalogFormat {
    pub fn writes_json(self) -> bool {
        matches!(self, Self::Json | Self::Both)
    }

    pub fn writes_script(self) -> bool {
        matches!(self, Self::Script | Self::Both)
    }
}

/// One card on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub title: String,
    pub year: String,
    pub rating: String,
}

impl CatalogEntry {
    pub fn new(slug: &Slug, record: &MovieRecord) -> Self {
        Self {
            name: slug.to_string(),
            title: record.title.clone(),
            year: record.year.clone(),
            rating: record.rating.clone(),
        }
    }
}

/// Result of [`Catalog::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Appended,
    Replaced,
}

/// Ordered list of grid entries, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Appends `entry`, or replaces the entry with the same `name` in place.
    pub fn upsert(&mut self, entry: CatalogEntry) -> Upsert {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => {
                *existing = entry;
                Upsert::Replaced
            }
            None => {
                self.entries.push(entry);
                Upsert::Appended
            }
        }
    }

    /// The list as a JSON array indented by four spaces.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.entries.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// The browser loader script with the list embedded as an array literal.
    pub fn to_loader_script(&self) -> Result<String, GenerateError> {
        let template = PageTemplate::parse(LOADER_TEMPLATE)?;
        let mut context = PageContext::new();
        context.raw("movies", self.to_json()?);
        Ok(template.render(&context)?)
    }

    /// Reads the list back out of a loader script written by
    /// [`Catalog::to_loader_script`].
    pub fn from_loader_script(script: &str) -> Result<Self, serde_json::Error> {
        let start = script
            .find(MOVIES_MARKER)
            .map_or(script.len(), |i| i + MOVIES_MARKER.len());

        // The array is followed by the rest of the script; stop after one value.
        match serde_json::Deserializer::from_str(&script[start..])
            .into_iter::<Vec<CatalogEntry>>()
            .next()
        {
            Some(entries) => entries.map(Self::new),
            None => Err(serde::de::Error::custom("loader script has no movie list")),
        }
    }

    /// Loads the persisted list, or an empty one if nothing was written yet.
    pub async fn load(layout: &SiteLayout, format: CatalogFormat) -> Result<Self, GenerateError> {
        let (path, from_script) = if format.writes_json() {
            (layout.catalog_json_path(), false)
        } else {
            (layout.loader_script_path(), true)
        };

        let Some(text) = read_optional(&path).await? else {
            log::debug!("No catalog at {}, starting empty", path.display());
            return Ok(Self::default());
        };

        let parsed = if from_script {
            Self::from_loader_script(&text)
        } else {
            Self::from_json(&text)
        };
        parsed.map_err(|e| invalid_data(&path, e))
    }

    /// Overwrites the catalog resources selected by `format`.
    pub async fn save(
        &self,
        layout: &SiteLayout,
        format: CatalogFormat,
    ) -> Result<Vec<PathBuf>, GenerateError> {
        let mut written = Vec::new();

        if format.writes_json() {
            let path = layout.catalog_json_path();
            write_file(&path, &self.to_json()?).await?;
            log::info!("Updated {}", path.display());
            written.push(path);
        }

        if format.writes_script() {
            let path = layout.loader_script_path();
            write_file(&path, &self.to_loader_script()?).await?;
            log::info!("Updated {}", path.display());
            written.push(path);
        }

        Ok(written)
    }
}

fn invalid_data(path: &Path, error: serde_json::Error) -> GenerateError {
    GenerateError::fs(
        path,
        std::io::Error::new(std::io::ErrorKind::InvalidData, error),
    )
}
