//! List posts

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::content::{Post, PostCollection};
use crate::Folio;

/// List posts in display order
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(folio);
    let collection = PostCollection::new(&loader);

    let (label, posts) = match content_type {
        "post" | "posts" => ("Posts", collection.all_posts()?),
        "featured" => ("Featured posts", collection.featured_posts()?),
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: posts, featured",
                content_type
            );
        }
    };

    println!("{} ({}):", label, posts.len());
    for line in format_lines(&posts) {
        println!("{}", line);
    }

    Ok(())
}

fn format_lines(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .map(|post| {
            let marker = if post.is_featured { " *" } else { "" };
            format!("  {} - {} [{}]{}", post.date, post.title, post.slug, marker)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_format_lines_marks_featured() {
        let post = Post {
            slug: "hello".to_string(),
            title: "Hello".to_string(),
            date: "2022-02-10".to_string(),
            image: String::new(),
            excerpt: String::new(),
            is_featured: true,
            content: String::new(),
            html: String::new(),
        };
        assert_eq!(format_lines(&[post]), vec!["  2022-02-10 - Hello [hello] *"]);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::with_config(dir.path(), SiteConfig::default());
        std::fs::create_dir_all(&folio.posts_dir).unwrap();
        assert!(run(&folio, "tags").is_err());
        assert!(run(&folio, "featured").is_ok());
    }
}
