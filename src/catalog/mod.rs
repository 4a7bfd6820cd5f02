//! Skill catalog: dataset model, index, search and loading.
//!
//! - `types` - Raw dataset shape (`Category`, `Skill`) and catalog errors
//! - `index` - [`CatalogIndex`], the loaded dataset plus its flat skill list
//! - `search` - Substring search over the flat list
//! - `source` - Fetching the dataset from a file or an HTTP URL

mod index;
mod search;
mod source;
mod types;

pub use index::{CatalogIndex, FlatSkill};
pub use search::{normalize_query, search};
pub use source::{DataSource, LoadError, MAX_DATASET_SIZE};
pub use types::{AdditionalEffects, AttrValue, CatalogError, Category, Skill};
