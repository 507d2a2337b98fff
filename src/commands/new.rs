//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::FrontMatter;
use crate::Folio;

/// Scaffold `<posts_dir>/<slug>.md` with the required front-matter
pub fn create_post(folio: &Folio, title: &str) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    fs::create_dir_all(&folio.posts_dir)?;
    let file_path = folio.posts_dir.join(format!("{}.md", slug));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let front_matter = FrontMatter {
        title: title.to_string(),
        date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        image: String::new(),
        excerpt: String::new(),
        is_featured: false,
    };
    let content = format!("{}\n", front_matter.to_block()?);

    fs::write(&file_path, content)?;

    Ok(file_path)
}

/// Run the new command
pub fn run(folio: &Folio, title: &str) -> Result<()> {
    let path = create_post(folio, title)?;
    println!("Created: {:?}", path);
    Ok(())
}
