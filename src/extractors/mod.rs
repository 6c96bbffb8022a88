//! Request extractors that reject with the fixed JSON error bodies.

mod body;
mod page;
pub use body::JsonObject;
pub use page::PageQuery;
