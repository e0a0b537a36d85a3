// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! The page generation pipeline.
//!
//! fetch metadata → derive slug → fetch poster → render → write page →
//! update catalog. Each stage runs only after the previous one succeeded, and
//! nothing touches the filesystem before the metadata lookup has succeeded.

use crate::asset::{PosterOutcome, fetch_poster};
use crate::catalog::{Catalog, CatalogEntry, CatalogFormat, Upsert};
use crate::client::{Lookup, OmdbClient, http_client};
use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::file_io::{ensure_dir, write_page};
use crate::layout::{SiteLayout, page_url};
use crate::render::PageRenderer;
use crate::slug::Slug;
use crate::types::MovieRecord;
use std::path::PathBuf;

/// What one successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub slug: Slug,
    pub record: MovieRecord,
    pub page_path: PathBuf,
    pub poster: PosterOutcome,
    pub catalog_paths: Vec<PathBuf>,
}

/// Generates movie pages into a site directory.
pub struct Generator {
    client: OmdbClient,
    renderer: PageRenderer,
    layout: SiteLayout,
    catalog_format: CatalogFormat,
}

impl Generator {
    pub fn new(config: &GeneratorConfig) -> Result<Self, GenerateError> {
        let client = OmdbClient::with_client(
            http_client(config.request_timeout)?,
            config.base_url.clone(),
            config.api_key.clone(),
        );
        Self::with_parts(
            client,
            SiteLayout::new(&config.site_root),
            &config.site_url,
            config.catalog_format,
        )
    }

    pub fn with_parts(
        client: OmdbClient,
        layout: SiteLayout,
        site_url: &str,
        catalog_format: CatalogFormat,
    ) -> Result<Self, GenerateError> {
        Ok(Self {
            client,
            renderer: PageRenderer::new(site_url)?,
            layout,
            catalog_format,
        })
    }

    pub fn layout(&self) -> &SiteLayout {
        &self.layout
    }

    /// Runs the whole pipeline for one movie.
    pub async fn generate(&self, lookup: &Lookup) -> Result<GeneratedPage, GenerateError> {
        let record = self.client.fetch(lookup).await?;

        let slug = Slug::new(&record.title).ok_or_else(|| GenerateError::InvalidTitle {
            title: record.title.clone(),
        })?;
        log::info!("Generated slug: {slug}");

        ensure_dir(&self.layout.pages_dir()).await?;
        ensure_dir(&self.layout.posters_dir()).await?;

        let poster = fetch_poster(
            self.client.http(),
            &record.poster,
            &self.layout.poster_path(&slug),
        )
        .await?;

        let html = self.renderer.render(&record, &slug)?;
        let page_path = write_page(&self.layout.pages_dir(), &slug, &html).await?;

        let catalog_paths = self.update_catalog(&slug, &record).await?;

        log::info!(
            "Successfully generated movie page: {} ({})",
            page_url(slug.as_str()),
            record.heading()
        );

        Ok(GeneratedPage {
            slug,
            record,
            page_path,
            poster,
            catalog_paths,
        })
    }

    /// Read-modify-writes the catalog with this movie's entry.
    async fn update_catalog(
        &self,
        slug: &Slug,
        record: &MovieRecord,
    ) -> Result<Vec<PathBuf>, GenerateError> {
        let mut catalog = Catalog::load(&self.layout, self.catalog_format).await?;

        match catalog.upsert(CatalogEntry::new(slug, record)) {
            Upsert::Appended => log::info!("Added {slug} to the catalog"),
            Upsert::Replaced => log::info!("Refreshed {slug} in the catalog"),
        }

        catalog.save(&self.layout, self.catalog_format).await
    }
}
