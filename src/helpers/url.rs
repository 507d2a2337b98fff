//! URL helper functions

/// Prefix a site path with the configured root
///
/// # Examples
/// ```ignore
/// url_for("/blog/", "/posts/") // -> "/blog/posts/"
/// ```
pub fn url_for(root: &str, path: &str) -> String {
    let root = root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Public URL of a post detail page
pub fn post_path(root: &str, slug: &str) -> String {
    url_for(root, &format!("posts/{}/", slug))
}

/// Folder holding a post's images, without trailing slash
pub fn post_image_dir(root: &str, slug: &str) -> String {
    url_for(root, &format!("images/posts/{}", slug))
}

/// Public URL of a post's cover image
pub fn post_image_path(root: &str, slug: &str, image: &str) -> String {
    format!("{}/{}", post_image_dir(root, slug), image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for() {
        assert_eq!(url_for("/", "/posts/"), "/posts/");
        assert_eq!(url_for("/", ""), "/");
        assert_eq!(url_for("/blog/", "contact/"), "/blog/contact/");
        assert_eq!(url_for("/blog", "/"), "/blog/");
    }

    #[test]
    fn test_post_urls() {
        assert_eq!(post_path("/", "hello"), "/posts/hello/");
        assert_eq!(post_image_dir("/", "hello"), "/images/posts/hello");
        assert_eq!(
            post_image_path("/blog/", "hello", "cover.png"),
            "/blog/images/posts/hello/cover.png"
        );
    }
}
