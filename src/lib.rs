//! Terminal browser for job skill catalogs.
//!
//! A JSON dataset of jobs and their skills is loaded from a file or URL into a
//! [`catalog::CatalogIndex`]. A navigation token (a job key, or a search query)
//! is resolved by [`router::resolve`] into a view, which
//! [`render::RenderEngine`] turns into the title, description and skill cards
//! shown by the terminal surface in [`ui`].

pub mod app;
pub mod catalog;
pub mod config;
pub mod hover;
pub mod render;
pub mod router;
pub mod ui;
pub mod util;
