pub mod aggregate;
mod builder;
mod document;
pub mod excerpt;
mod feed;
mod markdown;
mod paths;
pub mod pipeline;
mod render;
mod search;
mod source;
mod summary;

pub use builder::Builder;
pub use paths::base_path_from_config;
pub use summary::parse_date;
