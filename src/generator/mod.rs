//! Generator module - renders the site into the public directory

use anyhow::{Context as _, Result};
use std::fs;
use std::path::{Path, PathBuf};

use tera::Context;
use walkdir::WalkDir;

use crate::contact::{NotificationCopy, CONTACT_ROUTE};
use crate::content::collection::{featured, sort_by_date_desc};
use crate::content::Post;
use crate::helpers::url_for;
use crate::templates::{HeroData, PostData, SiteData, TemplateRenderer, DEFAULT_STYLESHEET};
use crate::Folio;

/// Static site generator using the embedded templates
pub struct Generator {
    folio: Folio,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;

        Ok(Self {
            folio: folio.clone(),
            renderer,
        })
    }

    /// Generate the entire site
    ///
    /// Returns the paths of the pages written.
    pub fn generate(&self, posts: &[Post]) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.folio.public_dir)?;

        let all_posts = sort_by_date_desc(posts.to_vec());
        let featured_posts = featured(&all_posts);

        let mut written = Vec::new();

        // Stylesheet first so a static/css/site.css can replace it
        self.write_file(Path::new("css/site.css"), DEFAULT_STYLESHEET)?;
        self.copy_static_assets()?;

        written.push(self.generate_home_page(&featured_posts)?);
        written.push(self.generate_posts_index(&all_posts)?);
        for post in &all_posts {
            written.push(self.generate_post_page(post)?);
        }
        written.push(self.generate_contact_page()?);

        Ok(written)
    }

    fn base_context(&self, current_path: &str) -> Context {
        let mut context = Context::new();
        context.insert("site", &SiteData::from_config(&self.folio.config));
        context.insert("current_path", current_path);
        context
    }

    fn post_data(&self, posts: &[Post]) -> Vec<PostData> {
        posts
            .iter()
            .map(|p| PostData::from_post(p, &self.folio.config.root))
            .collect()
    }

    /// `/` - hero and featured posts
    fn generate_home_page(&self, featured_posts: &[Post]) -> Result<PathBuf> {
        let mut context = self.base_context(&url_for(&self.folio.config.root, "/"));
        context.insert("hero", &HeroData::from_config(&self.folio.config));
        context.insert("posts", &self.post_data(featured_posts));

        let html = self.renderer.render("home.html", &context)?;
        self.write_page("", &html)
    }

    /// `/posts/` - every post
    fn generate_posts_index(&self, all_posts: &[Post]) -> Result<PathBuf> {
        let mut context = self.base_context(&url_for(&self.folio.config.root, "posts/"));
        context.insert("posts", &self.post_data(all_posts));

        let html = self.renderer.render("posts.html", &context)?;
        self.write_page("posts", &html)
    }

    /// `/posts/<slug>/`
    fn generate_post_page(&self, post: &Post) -> Result<PathBuf> {
        let data = PostData::from_post(post, &self.folio.config.root);
        let mut context = self.base_context(&data.path);
        context.insert("post", &data);

        let html = self
            .renderer
            .render("post.html", &context)
            .with_context(|| format!("Failed to render post {}", post.slug))?;
        self.write_page(&format!("posts/{}", post.slug), &html)
    }

    /// `/contact/`
    fn generate_contact_page(&self) -> Result<PathBuf> {
        let mut context = self.base_context(&url_for(&self.folio.config.root, "contact/"));
        context.insert(
            "contact_endpoint",
            &url_for(&self.folio.config.root, CONTACT_ROUTE),
        );
        context.insert("notification_copy", &NotificationCopy::new());

        let html = self.renderer.render("contact.html", &context)?;
        self.write_page("contact", &html)
    }

    /// Write `<dir>/index.html` under the public directory
    fn write_page(&self, dir: &str, html: &str) -> Result<PathBuf> {
        let relative = Path::new(dir.trim_matches('/')).join("index.html");
        let output_path = self.write_file(&relative, html)?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(output_path)
    }

    fn write_file(&self, relative: &Path, content: &str) -> Result<PathBuf> {
        let output_path = self.folio.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, content)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        Ok(output_path)
    }

    /// Copy the static directory (images, stylesheets) into the output
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.folio.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(static_dir).follow_links(true) {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.folio.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("Failed to copy {:?} to {:?}", path, dest))?;
        }

        Ok(())
    }
}
