//! Default pipeline stages.
//!
//! Per-document stages:
//!
//! 1. **MarkdownStage** - Convert the markdown body to HTML
//! 2. **TemplateStage** - Wrap content in the post template
//! 3. **WriteStage** - Write final HTML to output directory
//!
//! **DateStage** rejects documents without a valid date; it is only
//! inserted when dates are required.
//!
//! Finalize stages, run once over the aggregate:
//!
//! 1. **IndexStage** - Home page with the embedded search index
//! 2. **TagsStage** - One page per tag plus the tag index
//! 3. **FeedStage** - RSS feed of the most recent posts

mod dates;
mod feed;
mod index;
mod markdown;
mod tags;
mod template;
mod write;

pub use dates::DateStage;
pub use feed::FeedStage;
pub use index::IndexStage;
pub use markdown::MarkdownStage;
pub use tags::TagsStage;
pub use template::TemplateStage;
pub use write::WriteStage;
