//! Domain types for the Aria library index

mod ids;
mod source;
mod track;

pub use ids::{SourceId, TrackId};
pub use source::SourceConfig;
pub use track::{Track, TrackMetadata};
