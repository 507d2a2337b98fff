//! Content loader - reads posts from the markdown directory

use std::fs;
use std::path::{Path, PathBuf};

use super::frontmatter::Split;
use super::{ContentError, FrontMatter, MarkdownRenderer, Post};
use crate::helpers::post_image_dir;
use crate::Folio;

/// Loads posts from the posts directory
pub struct ContentLoader {
    posts_dir: PathBuf,
    root: String,
    renderer: MarkdownRenderer,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new(folio: &Folio) -> Self {
        let renderer = MarkdownRenderer::with_options(
            &folio.config.highlight.theme,
            folio.config.highlight.line_number,
        );
        Self {
            posts_dir: folio.posts_dir.clone(),
            root: folio.config.root.clone(),
            renderer,
        }
    }

    /// Directory the loader reads from
    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    /// File names of every markdown post, sorted by name
    pub fn post_files(&self) -> Result<Vec<String>, ContentError> {
        let entries = fs::read_dir(&self.posts_dir).map_err(|source| ContentError::Io {
            path: self.posts_dir.clone(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ContentError::Io {
                path: self.posts_dir.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(&path) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                files.push(name.to_string());
            }
        }

        // Directory order is platform dependent
        files.sort();
        Ok(files)
    }

    /// Load a single post by file name or slug
    pub fn post_data(&self, identifier: &str) -> Result<Post, ContentError> {
        let slug = slug_from_identifier(identifier);
        let path = self.posts_dir.join(format!("{}.md", slug));

        let raw = fs::read_to_string(&path).map_err(|source| ContentError::Io {
            path: path.clone(),
            source,
        })?;

        let (yaml, body) = match FrontMatter::split(&raw) {
            Split::Found { yaml, body } => (yaml, body),
            Split::Missing => return Err(ContentError::MissingFrontMatter { path }),
            Split::Unterminated => return Err(ContentError::UnterminatedFrontMatter { path }),
        };

        let front_matter =
            FrontMatter::from_yaml(yaml).map_err(|source| ContentError::InvalidFrontMatter {
                path: path.clone(),
                source,
            })?;

        let image_base = post_image_dir(&self.root, slug);
        let html = self
            .renderer
            .render_with_images(body, &image_base)
            .map_err(|e| ContentError::Render {
                path: path.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!("Loaded post {:?}", path);

        Ok(Post::new(slug.to_string(), front_matter, body.to_string(), html))
    }

    /// Load every post in file name order
    pub fn load_posts(&self) -> Result<Vec<Post>, ContentError> {
        self.post_files()?
            .iter()
            .map(|file| self.post_data(file))
            .collect()
    }
}

/// `getting-started.md` and `getting-started` name the same post
pub fn slug_from_identifier(identifier: &str) -> &str {
    identifier.strip_suffix(".md").unwrap_or(identifier)
}

/// Check if a file is a markdown post
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    fn site_with(posts: &[(&str, &str)]) -> (TempDir, Folio) {
        let dir = TempDir::new().unwrap();
        let folio = Folio::with_config(dir.path(), SiteConfig::default());
        fs::create_dir_all(&folio.posts_dir).unwrap();
        for (name, content) in posts {
            fs::write(folio.posts_dir.join(name), content).unwrap();
        }
        (dir, folio)
    }

    const FIRST: &str = "---\ntitle: Getting Started with NextJS\ndate: 2022-02-10\nimage: getting-started-nextjs.png\nexcerpt: NextJS is the React framework.\nisFeatured: true\n---\n\n# This is a first post\n\n![routes](routing.png)\n";

    #[test]
    fn test_post_files_lists_markdown_only() {
        let (_dir, folio) = site_with(&[("b.md", FIRST), ("a.md", FIRST), ("notes.txt", "x")]);
        let loader = ContentLoader::new(&folio);
        assert_eq!(loader.post_files().unwrap(), vec!["a.md", "b.md"]);
    }

    #[test]
    fn test_post_data_with_or_without_extension() {
        let (_dir, folio) = site_with(&[("getting-started-with-nextjs.md", FIRST)]);
        let loader = ContentLoader::new(&folio);

        let by_file = loader.post_data("getting-started-with-nextjs.md").unwrap();
        let by_slug = loader.post_data("getting-started-with-nextjs").unwrap();
        assert_eq!(by_file, by_slug);

        assert_eq!(by_slug.slug, "getting-started-with-nextjs");
        assert_eq!(by_slug.title, "Getting Started with NextJS");
        assert_eq!(by_slug.date, "2022-02-10");
        assert!(by_slug.is_featured);
        assert!(by_slug.content.starts_with("\n# This is a first post"));
        assert!(by_slug.html.contains("<h1>This is a first post</h1>"));
        assert!(by_slug
            .html
            .contains("/images/posts/getting-started-with-nextjs/routing.png"));
    }

    #[test]
    fn test_missing_post_is_an_error() {
        let (_dir, folio) = site_with(&[]);
        let loader = ContentLoader::new(&folio);
        assert!(matches!(
            loader.post_data("nope"),
            Err(ContentError::Io { .. })
        ));
    }

    #[test]
    fn test_missing_posts_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::with_config(dir.path(), SiteConfig::default());
        let loader = ContentLoader::new(&folio);
        assert!(loader.post_files().is_err());
    }

    #[test]
    fn test_malformed_post_fails_the_whole_load() {
        let (_dir, folio) = site_with(&[
            ("good.md", FIRST),
            ("no-frontmatter.md", "# Just a heading\n"),
        ]);
        let loader = ContentLoader::new(&folio);
        assert!(matches!(
            loader.load_posts(),
            Err(ContentError::MissingFrontMatter { .. })
        ));
    }

    #[test]
    fn test_invalid_yaml_is_reported() {
        let (_dir, folio) = site_with(&[("bad.md", "---\ntitle: [unclosed\n---\nbody\n")]);
        let loader = ContentLoader::new(&folio);
        assert!(matches!(
            loader.post_data("bad"),
            Err(ContentError::InvalidFrontMatter { .. })
        ));
    }

    #[test]
    fn test_slug_from_identifier() {
        assert_eq!(slug_from_identifier("a.md"), "a");
        assert_eq!(slug_from_identifier("a"), "a");
        assert_eq!(slug_from_identifier("a.md.md"), "a.md");
    }
}
