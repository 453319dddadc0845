/// Tag domain layer: the tag model, lookup requests, and the service seam.
pub mod errors;
pub mod lookup;
pub mod model;

pub use errors::TagError;
pub use lookup::{LookupRequest, TagService, fetch};
pub use model::Tag;
