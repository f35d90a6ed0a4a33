//! Ad catalog, request/response types, and context-keyed selection.

pub mod catalog;
pub mod model;
pub mod random;
pub mod selector;

pub use catalog::{AdCatalog, CatalogError};
pub use model::{Ad, AdRequest, AdResponse};
pub use random::{RandomSource, XorShiftRng};
pub use selector::{AdSelector, SelectionPolicy, MAX_ADS_TO_SERVE};
