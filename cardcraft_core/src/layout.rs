// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! Where generated files live on disk, and how the browser addresses them.

use crate::slug::Slug;
use std::path::PathBuf;

pub const PAGES_DIR: &str = "movies";
pub const POSTERS_DIR: &str = "movies/posters";
pub const CATALOG_JSON: &str = "data/movies.json";
pub const LOADER_SCRIPT: &str = "js/movie-loader.js";

/// Directory layout of the static site, rooted at `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteLayout {
    root: PathBuf,
}

impl SiteLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn pages_dir(&self) -> PathBuf {
        self.root.join(PAGES_DIR)
    }

    pub fn posters_dir(&self) -> PathBuf {
        self.root.join(POSTERS_DIR)
    }

    pub fn page_path(&self, slug: &Slug) -> PathBuf {
        self.pages_dir().join(slug.page_file_name())
    }

    pub fn poster_path(&self, slug: &Slug) -> PathBuf {
        self.posters_dir().join(slug.poster_file_name())
    }

    pub fn catalog_json_path(&self) -> PathBuf {
        self.root.join(CATALOG_JSON)
    }

    pub fn loader_script_path(&self) -> PathBuf {
        self.root.join(LOADER_SCRIPT)
    }
}

/// Site-relative URL of a poster, as used by the catalog grid.
pub fn poster_url(name: &str) -> String {
    format!("{POSTERS_DIR}/{name}.jpg")
}

/// Site-relative URL of a detail page, as used by the catalog grid.
pub fn page_url(name: &str) -> String {
    format!("{PAGES_DIR}/{name}.html")
}
