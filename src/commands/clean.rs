//! Clean the data directory

use anyhow::Result;
use std::fs;

use crate::Blog;

/// Delete the generated data directory
pub fn run(blog: &Blog) -> Result<()> {
    if blog.data_dir.exists() {
        fs::remove_dir_all(&blog.data_dir)?;
        tracing::info!("Deleted: {:?}", blog.data_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_data_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let blog = Blog::new(tmp.path()).unwrap();
        fs::create_dir_all(&blog.data_dir).unwrap();
        fs::write(blog.data_dir.join("posts.json"), "[]").unwrap();

        run(&blog).unwrap();
        assert!(!blog.data_dir.exists());

        // Cleaning an already-clean tree is fine
        run(&blog).unwrap();
    }
}
