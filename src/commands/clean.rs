//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Folio;

/// Delete the generated site
///
/// Stored contact messages under the data directory are left alone.
pub fn run(folio: &Folio) -> Result<()> {
    if folio.public_dir.exists() {
        fs::remove_dir_all(&folio.public_dir)?;
        tracing::info!("Deleted: {:?}", folio.public_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_public_only() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::with_config(dir.path(), SiteConfig::default());
        fs::create_dir_all(folio.public_dir.join("posts")).unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();

        run(&folio).unwrap();
        assert!(!folio.public_dir.exists());
        assert!(dir.path().join("data").exists());

        // Nothing to clean is fine
        run(&folio).unwrap();
    }
}
