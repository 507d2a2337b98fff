//! Content module - loads markdown posts and orders them for display

pub mod collection;
mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use collection::PostCollection;
pub use error::ContentError;
pub use frontmatter::{FrontMatter, Split};
pub use markdown::MarkdownRenderer;
pub use post::Post;
