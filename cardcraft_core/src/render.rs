// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! HTML rendering for movie detail pages.
//!
//! Templates are plain text with `{{name}}` placeholders. A template is parsed
//! once into literal and placeholder segments and rendered against a
//! [`PageContext`]; every placeholder must be bound, so a page can never ship
//! with a marker left in it. Values are HTML-escaped when they are bound,
//! except for fragments the renderer builds itself.

use crate::error::RenderError;
use crate::layout::poster_url;
use crate::slug::Slug;
use crate::types::{CastMember, MovieRecord, is_absent, or_fallback};
use indexmap::IndexMap;

pub const DEFAULT_TAGLINE: &str = "Discover the story.";
pub const NO_PLOT: &str = "No plot available.";
pub const NOT_AVAILABLE: &str = "N/A";
pub const DEFAULT_TRAILER: &str = "https://www.youtube.com/embed/dQw4w9WgXcQ";
pub const DEFAULT_SITE_URL: &str = "https://your-domain.com";
pub const MAX_CAST: usize = 5;
const DESCRIPTION_CHARS: usize = 150;
const YOUTUBE_EMBED: &str = "https://www.youtube.com/embed/";

const MOVIE_PAGE: &str = include_str!("../templates/movie.html");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTemplate<'a> {
    segments: Vec<Segment<'a>>,
}

impl<'a> PageTemplate<'a> {
    /// Splits `source` into literal text and `{{name}}` placeholders.
    ///
    /// Names may contain ASCII letters, digits and `_`, with optional
    /// surrounding spaces.
    pub fn parse(source: &'a str) -> Result<Self, RenderError> {
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(start) = rest.find("{{") {
            let offset = source.len() - rest.len() + start;
            if start > 0 {
                segments.push(Segment::Literal(&rest[..start]));
            }

            let after_open = &rest[start + 2..];
            let end = after_open
                .find("}}")
                .ok_or(RenderError::Unterminated { offset })?;
            let name = after_open[..end].trim();

            if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(RenderError::InvalidPlaceholder(name.to_owned()));
            }

            segments.push(Segment::Placeholder(name));
            rest = &after_open[end + 2..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest));
        }

        Ok(Self { segments })
    }

    /// Placeholder names in order of appearance (repeats included).
    pub fn placeholders(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(*name),
            Segment::Literal(_) => None,
        })
    }

    pub fn render(&self, context: &PageContext) -> Result<String, RenderError> {
        let mut out = String::with_capacity(
            self.segments
                .iter()
                .map(|segment| match segment {
                    Segment::Literal(text) => text.len(),
                    Segment::Placeholder(_) => 32,
                })
                .sum(),
        );

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    let value = context
                        .get(name)
                        .ok_or_else(|| RenderError::MissingBinding((*name).to_owned()))?;
                    out.push_str(value);
                }
            }
        }

        Ok(out)
    }
}

/// Named values for a template render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    bindings: IndexMap<&'static str, String>,
}

impl PageContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a value that will appear as element text.
    pub fn text(&mut self, name: &'static str, value: &str) -> &mut Self {
        self.raw(name, html_escape::encode_text(value).into_owned())
    }

    /// Binds a value that will appear inside a double-quoted attribute.
    pub fn attribute(&mut self, name: &'static str, value: &str) -> &mut Self {
        self.raw(
            name,
            html_escape::encode_double_quoted_attribute(value).into_owned(),
        )
    }

    /// Binds markup verbatim. Callers are responsible for escaping.
    pub fn raw(&mut self, name: &'static str, html: String) -> &mut Self {
        self.bindings.insert(name, html);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings.get(name).map(String::as_str)
    }
}

/// Renders [`MovieRecord`]s into standalone detail pages.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    template: PageTemplate<'static>,
    site_url: String,
}

impl PageRenderer {
    /// * `site_url` - public origin of the site, used for `og:image`.
    pub fn new(site_url: &str) -> Result<Self, RenderError> {
        Ok(Self {
            template: PageTemplate::parse(MOVIE_PAGE)?,
            site_url: site_url.trim_end_matches('/').to_owned(),
        })
    }

    pub fn render(&self, record: &MovieRecord, slug: &Slug) -> Result<String, RenderError> {
        self.template.render(&self.context(record, slug))
    }

    /// Resolves every field of `record` to its display value.
    pub fn context(&self, record: &MovieRecord, slug: &Slug) -> PageContext {
        let heading = record.heading();
        let page_title = format!("{heading} - CardCraft Movies");
        let plot = or_fallback(&record.plot, NO_PLOT);
        let poster = poster_url(slug.as_str());

        let mut context = PageContext::new();
        context
            .text("page_title", &page_title)
            .attribute("og_title", &page_title)
            .attribute("meta_description", &description(plot))
            .attribute("og_image", &format!("{}/{poster}", self.site_url))
            .attribute("poster_url", &format!("/{poster}"))
            .text("heading", &heading)
            .text("tagline", or_fallback(&record.tagline, DEFAULT_TAGLINE))
            .text("title", &record.title)
            .text("rating", or_fallback(&record.rating, NOT_AVAILABLE))
            .text("genre", or_fallback(&record.genre, NOT_AVAILABLE))
            .text("director", or_fallback(&record.director, NOT_AVAILABLE))
            .text("runtime", or_fallback(&record.runtime, NOT_AVAILABLE))
            .text("language", or_fallback(&record.language, NOT_AVAILABLE))
            .text("released", or_fallback(&record.released, NOT_AVAILABLE))
            .text("plot", plot)
            .raw("cast_cards", cast_cards(&record.cast))
            .attribute("trailer_url", &trailer_embed_url(&record.trailer))
            .text("trailer_search", &format!("{heading} trailer"));
        context
    }
}

/// First [`DESCRIPTION_CHARS`] characters of the plot for meta tags.
fn description(plot: &str) -> String {
    let mut chars = plot.chars();
    let mut summary: String = chars.by_ref().take(DESCRIPTION_CHARS).collect();
    if chars.next().is_some() {
        summary.push_str("...");
    }
    summary
}

/// The cast grid: at most [`MAX_CAST`] cards, escaped.
fn cast_cards(cast: &[CastMember]) -> String {
    if cast.is_empty() {
        return "\n            <p>Cast information unavailable.</p>".to_owned();
    }

    cast.iter()
        .take(MAX_CAST)
        .map(|member| {
            format!(
                r#"
            <div class="actor-card">
                <div class="actor-img">{}</div>
                <p>{}</p>
            </div>"#,
                html_escape::encode_text(&member.initials()),
                html_escape::encode_text(&member.label()),
            )
        })
        .collect()
}

fn is_video_id(reference: &str) -> bool {
    reference.len() == 11
        && reference
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Turns a trailer reference into an embeddable URL.
///
/// Accepts YouTube watch/short links, other full URLs (used as-is) and bare
/// YouTube video ids. Anything else falls back to [`DEFAULT_TRAILER`].
pub fn trailer_embed_url(reference: &str) -> String {
    let reference = reference.trim();
    if is_absent(reference) {
        return DEFAULT_TRAILER.to_owned();
    }

    if reference.starts_with("https://") || reference.starts_with("http://") {
        let video_id = reference
            .split_once("youtube.com/watch?v=")
            .or_else(|| reference.split_once("youtu.be/"))
            .and_then(|(_, rest)| rest.split(['&', '?', '#']).next())
            .filter(|id| is_video_id(id));

        return match video_id {
            Some(id) => format!("{YOUTUBE_EMBED}{id}"),
            None => reference.to_owned(),
        };
    }

    if is_video_id(reference) {
        return format!("{YOUTUBE_EMBED}{reference}");
    }

    log::warn!("Unrecognised trailer reference '{reference}', using the placeholder video");
    DEFAULT_TRAILER.to_owned()
}
