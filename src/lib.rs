mod error;
mod merger;
mod schema;

pub use error::DefaultsError;
pub use merger::fill_defaults::fill_defaults;
pub use schema::{Schema, SchemaPool};
