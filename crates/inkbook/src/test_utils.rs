use crate::config::BookConfig;
use crate::model::Page;
use std::path::PathBuf;
use tempfile::TempDir;
use uuid::Uuid;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub root: PathBuf,
    pub config: BookConfig,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let config = BookConfig::with_data_dir(root.clone());
        Self {
            _temp_dir: temp_dir,
            root,
            config,
        }
    }

    pub fn book_dir(&self, id: &Uuid) -> PathBuf {
        self.config.book_dir(id).expect("data dir is configured")
    }

    pub fn archive_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.inkbook"))
    }
}

/// A page with `content` carrying `tags`.
pub fn tagged_page(content: &str, tags: &[&str]) -> Page {
    let mut page = Page::new();
    page.set_content(content);
    for tag in tags {
        page.tags_mut().insert(*tag);
    }
    page
}
