//! Search module.
//!
//! Contains product queries and pagination.

mod query;
mod results;

pub use query::ProductQuery;
pub use results::{Pagination, SearchResults};
