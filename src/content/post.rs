//! Post model

use serde::Serialize;

use super::FrontMatter;

/// A blog post loaded from `<posts_dir>/<slug>.md`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// File name without the `.md` extension
    pub slug: String,

    pub title: String,

    /// Publication date exactly as written in the front-matter
    pub date: String,

    /// Cover image file name, relative to the post's image folder
    pub image: String,

    pub excerpt: String,

    /// Shown on the landing page
    pub is_featured: bool,

    /// Raw markdown body
    pub content: String,

    /// Rendered HTML body
    pub html: String,
}

impl Post {
    /// Build a post from its parsed parts
    pub fn new(slug: String, front_matter: FrontMatter, content: String, html: String) -> Self {
        let FrontMatter {
            title,
            date,
            image,
            excerpt,
            is_featured,
        } = front_matter;

        Self {
            slug,
            title,
            date,
            image,
            excerpt,
            is_featured,
            content,
            html,
        }
    }
}
