// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! Generator settings, read from environment variables.

use crate::catalog::CatalogFormat;
use crate::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, Lookup};
use crate::error::ConfigError;
use crate::render::DEFAULT_SITE_URL;
use std::path::PathBuf;
use std::str::FromStr as _;
use std::time::Duration;

pub const API_KEY_VAR: &str = "OMDB_API_KEY";
pub const MOVIE_NAME_VAR: &str = "MOVIE_NAME";
pub const BASE_URL_VAR: &str = "OMDB_BASE_URL";
pub const SITE_ROOT_VAR: &str = "SITE_ROOT";
pub const SITE_URL_VAR: &str = "SITE_URL";
pub const CATALOG_FORMAT_VAR: &str = "CATALOG_FORMAT";
pub const TIMEOUT_VAR: &str = "REQUEST_TIMEOUT_SECS";
pub const LOG_LEVEL_VAR: &str = "CARDCRAFT_LOG";

/// Separates several titles in `MOVIE_NAME`.
const TITLE_SEPARATOR: char = ';';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub api_key: String,
    /// Movies to generate, in order.
    pub lookups: Vec<Lookup>,
    pub base_url: String,
    pub site_root: PathBuf,
    pub site_url: String,
    pub catalog_format: CatalogFormat,
    pub request_timeout: Duration,
    pub log_level: log::LevelFilter,
}

impl GeneratorConfig {
    /// Reads the process environment.
    ///
    /// `lookups` from the command line take precedence over `MOVIE_NAME`.
    pub fn from_env(lookups: Vec<Lookup>) -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok(), lookups)
    }

    /// Reads settings through `var`, which returns a variable's value if set.
    pub fn from_lookup<F>(var: F, lookups: Vec<Lookup>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| var(name).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::Missing(API_KEY_VAR))?;

        let lookups = if lookups.is_empty() {
            get(MOVIE_NAME_VAR)
                .map(|names| {
                    names
                        .split(TITLE_SEPARATOR)
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(|name| Lookup::Title(name.to_owned()))
                        .collect()
                })
                .unwrap_or_default()
        } else {
            lookups
        };
        if lookups.is_empty() {
            return Err(ConfigError::Missing(MOVIE_NAME_VAR));
        }

        let catalog_format = match get(CATALOG_FORMAT_VAR) {
            Some(value) => CatalogFormat::from_str(&value).map_err(|e| ConfigError::Invalid {
                name: CATALOG_FORMAT_VAR,
                value,
                reason: e.to_string(),
            })?,
            None => CatalogFormat::default(),
        };

        let request_timeout = match get(TIMEOUT_VAR) {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        name: TIMEOUT_VAR,
                        value,
                        reason: "must be at least 1 second".to_owned(),
                    });
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        name: TIMEOUT_VAR,
                        value,
                        reason: e.to_string(),
                    });
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        let log_level = match get(LOG_LEVEL_VAR) {
            Some(value) => log::LevelFilter::from_str(&value).map_err(|e| ConfigError::Invalid {
                name: LOG_LEVEL_VAR,
                value,
                reason: e.to_string(),
            })?,
            None => log::LevelFilter::Info,
        };

        Ok(Self {
            api_key,
            lookups,
            base_url: get(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            site_root: get(SITE_ROOT_VAR).map_or_else(|| PathBuf::from("."), PathBuf::from),
            site_url: get(SITE_URL_VAR).unwrap_or_else(|| DEFAULT_SITE_URL.to_owned()),
            catalog_format,
            request_timeout,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)], lookups: Vec<Lookup>) -> Result<GeneratorConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        GeneratorConfig::from_lookup(|name| vars.get(name).cloned(), lookups)
    }

    #[test]
    fn test_defaults() {
        let config =
            config(&[("OMDB_API_KEY", "key"), ("MOVIE_NAME", "Inception")], vec![]).unwrap();

        assert_eq!(config.api_key, "key");
        assert_eq!(config.lookups, [Lookup::Title("Inception".to_owned())]);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.site_root, PathBuf::from("."));
        assert_eq!(config.site_url, DEFAULT_SITE_URL);
        assert_eq!(config.catalog_format, CatalogFormat::Json);
        assert_eq!(config.request_timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.log_level, log::LevelFilter::Info);
    }

    #[test]
    fn test_missing_api_key() {
        let result = config(&[("MOVIE_NAME", "Inception")], vec![]);
        assert!(matches!(result, Err(ConfigError::Missing("OMDB_API_KEY"))));

        let blank = config(&[("OMDB_API_KEY", "  "), ("MOVIE_NAME", "Inception")], vec![]);
        assert!(matches!(blank, Err(ConfigError::Missing("OMDB_API_KEY"))));
    }

    #[test]
    fn test_missing_title() {
        let result = config(&[("OMDB_API_KEY", "key")], vec![]);
        assert!(matches!(result, Err(ConfigError::Missing("MOVIE_NAME"))));

        let separators_only = config(&[("OMDB_API_KEY", "key"), ("MOVIE_NAME", " ; ;")], vec![]);
        assert!(matches!(separators_only, Err(ConfigError::Missing("MOVIE_NAME"))));
    }

    #[test]
    fn test_several_titles() {
        let config = config(
            &[("OMDB_API_KEY", "key"), ("MOVIE_NAME", "Inception; Heat ;Dune: Part Two")],
            vec![],
        )
        .unwrap();

        assert_eq!(config.lookups.len(), 3);
        assert_eq!(config.lookups[2], Lookup::Title("Dune: Part Two".to_owned()));
    }

    #[test]
    fn test_command_line_lookups_take_precedence() {
        let config = config(
            &[("OMDB_API_KEY", "key"), ("MOVIE_NAME", "Inception")],
            vec![Lookup::ImdbId("tt0113277".to_owned())],
        )
        .unwrap();

        assert_eq!(config.lookups, [Lookup::ImdbId("tt0113277".to_owned())]);
    }

    #[test]
    fn test_overrides() {
        let config = config(
            &[
                ("OMDB_API_KEY", "key"),
                ("MOVIE_NAME", "Inception"),
                ("OMDB_BASE_URL", "http://127.0.0.1:9000"),
                ("SITE_ROOT", "public"),
                ("SITE_URL", "https://movies.example"),
                ("CATALOG_FORMAT", "both"),
                ("REQUEST_TIMEOUT_SECS", "5"),
                ("CARDCRAFT_LOG", "debug"),
            ],
            vec![],
        )
        .unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.site_root, PathBuf::from("public"));
        assert_eq!(config.site_url, "https://movies.example");
        assert_eq!(config.catalog_format, CatalogFormat::Both);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.log_level, log::LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_values() {
        let base = [("OMDB_API_KEY", "key"), ("MOVIE_NAME", "Inception")];

        for (name, value) in [
            ("CATALOG_FORMAT", "xml"),
            ("REQUEST_TIMEOUT_SECS", "soon"),
            ("REQUEST_TIMEOUT_SECS", "0"),
            ("CARDCRAFT_LOG", "loud"),
        ] {
            let mut vars = base.to_vec();
            vars.push((name, value));
            let result = config(&vars, vec![]);
            assert!(
                matches!(result, Err(ConfigError::Invalid { name: n, .. }) if n == name),
                "{name}={value} should be rejected"
            );
        }
    }
}
