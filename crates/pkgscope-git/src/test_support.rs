//! Throwaway repositories for unit tests

use std::path::Path;

use git2::{Oid, Repository, Signature};
use tempfile::TempDir;

pub struct RepoFixture {
    pub temp: TempDir,
    pub repo: Repository,
}

impl RepoFixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        Self { temp, repo }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Write and delete files, then commit on HEAD
    pub fn commit(&self, message: &str, writes: &[(&str, &str)], removes: &[&str]) -> Oid {
        let mut index = self.repo.index().unwrap();

        for (file, content) in writes {
            let full = self.path().join(file);
            std::fs::create_dir_all(full.parent().unwrap()).unwrap();
            std::fs::write(&full, content).unwrap();
            index.add_path(Path::new(file)).unwrap();
        }
        for file in removes {
            std::fs::remove_file(self.path().join(file)).unwrap();
            index.remove_path(Path::new(file)).unwrap();
        }
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = self.repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("Test", "test@example.com").unwrap();

        let parent = self.repo.head().ok().map(|h| h.peel_to_commit().unwrap());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    /// Lightweight tag on a commit
    pub fn tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).unwrap();
        self.repo.tag_lightweight(name, &object, false).unwrap();
    }
}
