// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Converts a title into a lowercase `[a-z0-9-]` identifier.
///
/// Whitespace and hyphen runs become a single `-`, every other character
/// outside `[a-z0-9]` is dropped, and the result never starts or ends with
/// `-`. Symbol-only input yields an empty string.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_separator = true;
        }
    }

    slug
}

/// A non-empty slug. Keys the poster file, the page file and the catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Derives the slug for `title`, or `None` if nothing usable is left.
    pub fn new(title: &str) -> Option<Self> {
        let slug = slugify(title);
        if slug.is_empty() { None } else { Some(Self(slug)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn poster_file_name(&self) -> String {
        format!("{}.jpg", self.0)
    }

    pub fn page_file_name(&self) -> String {
        format!("{}.html", self.0)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_simple() {
        assert_eq!(slugify("Inception"), "inception");
        assert_eq!(slugify("The Dark Knight"), "the-dark-knight");
    }

    #[test]
    fn test_slugify_punctuation() {
        assert_eq!(slugify("Dune: Part Two"), "dune-part-two");
        assert_eq!(slugify("Spider-Man: No Way Home"), "spider-man-no-way-home");
        assert_eq!(slugify("WALL·E"), "walle");
        assert_eq!(slugify("Amélie"), "amlie");
    }

    #[test]
    fn test_slugify_collapses_and_trims_separators() {
        assert_eq!(
            slugify("  Mission: Impossible – Dead Reckoning  "),
            "mission-impossible-dead-reckoning"
        );
        assert_eq!(slugify("a - b"), "a-b");
        assert_eq!(slugify("--Se7en--"), "se7en");
    }

    #[test]
    fn test_slugify_is_deterministic() {
        let title = "Everything Everywhere All at Once";
        assert_eq!(slugify(title), slugify(title));
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("?!"), "");
    }

    #[test]
    fn test_slug_file_names() {
        let slug = Slug::new("Inception").unwrap();
        assert_eq!(slug.as_str(), "inception");
        assert_eq!(slug.poster_file_name(), "inception.jpg");
        assert_eq!(slug.page_file_name(), "inception.html");
        assert_eq!(slug.to_string(), "inception");
    }

    #[test]
    fn test_slug_rejects_empty() {
        assert!(Slug::new("").is_none());
        assert!(Slug::new("???").is_none());
    }
}
