// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
//! Static movie page generation for the CardCraft Movies site.
//!
//! Looks movies up in the OMDb API, downloads their posters, renders detail
//! pages from a template and keeps the site's movie catalog up to date.
pub mod asset;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod file_io;
pub mod layout;
pub mod pipeline;
pub mod render;
pub mod slug;
pub mod types;
