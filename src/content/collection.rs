//! Post listings used by the page renderers

use super::loader::ContentLoader;
use super::{ContentError, Post};

/// All posts and the featured subset, in display order
pub struct PostCollection<'a> {
    loader: &'a ContentLoader,
}

impl<'a> PostCollection<'a> {
    pub fn new(loader: &'a ContentLoader) -> Self {
        Self { loader }
    }

    /// Every post, newest first
    pub fn all_posts(&self) -> Result<Vec<Post>, ContentError> {
        Ok(sort_by_date_desc(self.loader.load_posts()?))
    }

    /// Posts flagged `isFeatured`, newest first
    pub fn featured_posts(&self) -> Result<Vec<Post>, ContentError> {
        Ok(featured(&self.all_posts()?))
    }
}

/// Order posts by their date string, descending
///
/// Dates compare as plain strings, so `2022-10-01` sorts after `2022-9-30`.
/// The sort is stable: equal dates keep their input order.
pub fn sort_by_date_desc(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
    posts
}

/// Keep featured posts, preserving order
pub fn featured(posts: &[Post]) -> Vec<Post> {
    posts.iter().filter(|p| p.is_featured).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::Folio;
    use std::fs;
    use tempfile::TempDir;

    fn post(slug: &str, date: &str, is_featured: bool) -> Post {
        Post {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            date: date.to_string(),
            image: String::new(),
            excerpt: String::new(),
            is_featured,
            content: String::new(),
            html: String::new(),
        }
    }

    fn slugs(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_sorted_newest_first() {
        let sorted = sort_by_date_desc(vec![
            post("a", "2021-05-01", false),
            post("b", "2022-02-10", false),
            post("c", "2021-12-24", false),
        ]);
        assert_eq!(slugs(&sorted), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let sorted = sort_by_date_desc(vec![
            post("first", "2022-01-01", false),
            post("newer", "2023-01-01", false),
            post("second", "2022-01-01", false),
            post("third", "2022-01-01", false),
        ]);
        assert_eq!(slugs(&sorted), vec!["newer", "first", "second", "third"]);
    }

    #[test]
    fn test_dates_compare_as_strings() {
        let sorted = sort_by_date_desc(vec![
            post("october", "2022-10-01", false),
            post("september", "2022-9-30", false),
        ]);
        assert_eq!(slugs(&sorted), vec!["september", "october"]);
    }

    #[test]
    fn test_featured_is_ordered_subset() {
        let all = sort_by_date_desc(vec![
            post("a", "2020-01-01", true),
            post("b", "2022-01-01", false),
            post("c", "2021-01-01", true),
        ]);
        let featured = featured(&all);

        assert_eq!(slugs(&featured), vec!["c", "a"]);
        assert!(featured.iter().all(|p| p.is_featured));
        assert!(featured.iter().all(|p| all.contains(p)));
    }

    #[test]
    fn test_collection_reads_posts_dir() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::with_config(dir.path(), SiteConfig::default());
        fs::create_dir_all(&folio.posts_dir).unwrap();
        fs::write(
            folio.posts_dir.join("old.md"),
            "---\ntitle: Old\ndate: 2021-01-01\nisFeatured: true\n---\nold\n",
        )
        .unwrap();
        fs::write(
            folio.posts_dir.join("new.md"),
            "---\ntitle: New\ndate: 2022-01-01\n---\nnew\n",
        )
        .unwrap();

        let loader = ContentLoader::new(&folio);
        let collection = PostCollection::new(&loader);

        assert_eq!(slugs(&collection.all_posts().unwrap()), vec!["new", "old"]);
        assert_eq!(slugs(&collection.featured_posts().unwrap()), vec!["old"]);
    }
}
