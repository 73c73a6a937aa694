//! Instagram feed relay with sample fallback

pub mod graph;
pub mod handler;
pub mod normalize;
pub mod query;
pub mod sample;

pub use graph::MediaSource;
pub use handler::{FeedService, handler};
