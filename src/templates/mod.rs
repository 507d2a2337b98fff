//! Built-in site templates using the Tera template engine
//!
//! Templates and the default stylesheet are embedded in the binary.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{self, post_image_path, post_path, url_for};

/// Stylesheet written to `css/site.css` unless the static dir provides one
pub const DEFAULT_STYLESHEET: &str = include_str!("site/css/site.css");

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Text uses `escape`; attribute URLs use `escape_xml`, which keeps `/`
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("posts.html", include_str!("site/posts.html")),
            ("post.html", include_str!("site/post.html")),
            ("contact.html", include_str!("site/contact.html")),
            // Partials
            ("partials/nav.html", include_str!("site/partials/nav.html")),
            (
                "partials/posts_grid.html",
                include_str!("site/partials/posts_grid.html"),
            ),
        ])?;

        // Register custom filters
        tera.register_filter("long_date", long_date_filter);
        tera.register_filter("iso_date", iso_date_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: "2022-02-10" -> "February 10, 2022"
fn long_date_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("long_date", "value", String, value);
    Ok(tera::Value::String(helpers::long_date(&s)))
}

/// Tera filter: normalise a date for `<time datetime>`
fn iso_date_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("iso_date", "value", String, value);
    Ok(tera::Value::String(helpers::iso_date(&s)))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub home_url: String,
    pub posts_url: String,
    pub contact_url: String,
    pub stylesheet_url: String,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            home_url: url_for(&config.root, "/"),
            posts_url: url_for(&config.root, "posts/"),
            contact_url: url_for(&config.root, "contact/"),
            stylesheet_url: url_for(&config.root, "css/site.css"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HeroData {
    pub name: String,
    pub image: String,
    pub tagline: String,
}

impl HeroData {
    pub fn from_config(config: &SiteConfig) -> Self {
        let image = if config.hero.image.is_empty() {
            String::new()
        } else {
            url_for(&config.root, &config.hero.image)
        };
        Self {
            name: config.hero.name.clone(),
            image,
            tagline: config.hero.tagline.clone(),
        }
    }
}

/// A post as shown in grids and on its detail page
#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub path: String,
    /// Empty when the post has no cover image
    pub image_url: String,
    pub html: String,
}

impl PostData {
    pub fn from_post(post: &Post, root: &str) -> Self {
        let image_url = if post.image.is_empty() {
            String::new()
        } else {
            post_image_path(root, &post.slug, &post.image)
        };
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            date: post.date.clone(),
            excerpt: post.excerpt.clone(),
            path: post_path(root, &post.slug),
            image_url,
            html: post.html.clone(),
        }
    }
}
