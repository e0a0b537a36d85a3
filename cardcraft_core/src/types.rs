// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
use serde::{Deserialize, Serialize};

/// The metadata API's marker for a field it has no value for.
pub const ABSENT: &str = "N/A";

/// Returns `true` if `value` is the absent marker (or blank).
pub fn is_absent(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == ABSENT
}

/// Returns `value`, or `fallback` when the value is absent.
pub fn or_fallback<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if is_absent(value) { fallback } else { value }
}

pub(crate) fn absent() -> String {
    ABSENT.to_owned()
}

/// A single credited cast member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct CastMember {
    pub name: String,
    pub role: Option<String>,
}

impl CastMember {
    pub fn new(name: impl Into<String>, role: Option<String>) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    /// Parses a single cast entry.
    ///
    /// Entries are either a bare name (`"Tom Hardy"`) or `"Name as Role"`.
    pub fn parse(entry: &str) -> Option<Self> {
        let entry = entry.trim();
        if entry.is_empty() {
            return None;
        }

        match entry.split_once(" as ") {
            Some((name, role)) if !name.trim().is_empty() && !role.trim().is_empty() => {
                Some(Self::new(name.trim(), Some(role.trim().to_owned())))
            }
            _ => Some(Self::new(entry, None)),
        }
    }

    /// Text shown under the actor's badge.
    pub fn label(&self) -> String {
        match &self.role {
            Some(role) => format!("{} as {}", self.name, role),
            None => self.name.clone(),
        }
    }

    /// First letter of the first two words of the name, e.g. `"LD"`.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .take(2)
            .filter_map(|word| word.chars().next())
            .collect()
    }
}

/// Splits the API's comma-joined actor list into cast members.
pub fn parse_cast(actors: &str) -> Vec<CastMember> {
    if is_absent(actors) {
        return Vec::new();
    }
    actors.split(',').filter_map(CastMember::parse).collect()
}

/// Everything the generator knows about one movie.
///
/// Text fields hold the API's raw values; an absent value is stored as
/// [`ABSENT`] and resolved to a display fallback at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    pub year: String,
    pub genre: String,
    pub director: String,
    pub tagline: String,
    pub rating: String,
    pub plot: String,
    pub runtime: String,
    pub language: String,
    pub released: String,
    pub poster: String,
    pub cast: Vec<CastMember>,
    /// A full trailer URL or a bare video id.
    pub trailer: String,
    pub imdb_id: String,
}

impl Default for MovieRecord {
    fn default() -> Self {
        Self {
            title: absent(),
            year: absent(),
            genre: absent(),
            director: absent(),
            tagline: absent(),
            rating: absent(),
            plot: absent(),
            runtime: absent(),
            language: absent(),
            released: absent(),
            poster: absent(),
            cast: Vec::new(),
            trailer: absent(),
            imdb_id: absent(),
        }
    }
}

impl MovieRecord {
    /// `"Title (Year)"`, used for the page title and hero heading.
    pub fn heading(&self) -> String {
        if is_absent(&self.year) {
            self.title.clone()
        } else {
            format!("{} ({})", self.title, self.year)
        }
    }

    pub fn has_poster(&self) -> bool {
        !is_absent(&self.poster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_absent() {
        assert!(is_absent("N/A"));
        assert!(is_absent("  N/A "));
        assert!(is_absent(""));
        assert!(!is_absent("n/a movie"));
        assert!(!is_absent("8.8"));
    }

    #[test]
    fn test_or_fallback() {
        assert_eq!(or_fallback("N/A", "No plot available."), "No plot available.");
        assert_eq!(or_fallback("A heist.", "No plot available."), "A heist.");
    }

    #[test]
    fn test_cast_member_parse_with_role() {
        let member = CastMember::parse(" Leonardo DiCaprio as Dom Cobb ").unwrap();
        assert_eq!(member.name, "Leonardo DiCaprio");
        assert_eq!(member.role.as_deref(), Some("Dom Cobb"));
        assert_eq!(member.label(), "Leonardo DiCaprio as Dom Cobb");
        assert_eq!(member.initials(), "LD");
    }

    #[test]
    fn test_cast_member_parse_bare_name() {
        let member = CastMember::parse("Zendaya").unwrap();
        assert_eq!(member.role, None);
        assert_eq!(member.label(), "Zendaya");
        assert_eq!(member.initials(), "Z");
        assert!(CastMember::parse("   ").is_none());
    }

    #[test]
    fn test_parse_cast() {
        let cast = parse_cast("Leonardo DiCaprio, Joseph Gordon-Levitt, Elliot Page");
        assert_eq!(cast.len(), 3);
        assert_eq!(cast[1].name, "Joseph Gordon-Levitt");

        assert!(parse_cast("N/A").is_empty());
        assert_eq!(parse_cast("A,, B").len(), 2);
    }

    #[test]
    fn test_heading() {
        let record = MovieRecord {
            title: "Inception".to_owned(),
            year: "2010".to_owned(),
            ..MovieRecord::default()
        };
        assert_eq!(record.heading(), "Inception (2010)");
        assert!(!record.has_poster());

        let undated = MovieRecord {
            title: "Untitled".to_owned(),
            ..MovieRecord::default()
        };
        assert_eq!(undated.heading(), "Untitled");
    }
}
