//! Generate static files

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::Folio;

/// Load every post and render the site
///
/// Any post that cannot be read or parsed aborts the build.
pub fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    let loader = ContentLoader::new(folio);
    let posts = loader.load_posts()?;
    tracing::info!(
        "Loaded {} posts from {:?}",
        posts.len(),
        loader.posts_dir()
    );

    let generator = Generator::new(folio)?;
    let pages = generator.generate(&posts)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} pages in {:.2}s",
        pages.len(),
        duration.as_secs_f64()
    );

    Ok(())
}
