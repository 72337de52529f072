//! Release tag lookup

use regex::Regex;
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;
use pkgscope_core::error::GitError;

impl GitRepo {
    /// Get all tags, peeled to the commits they mark
    pub fn tags(&self) -> Result<Vec<TagInfo>> {
        let names = self.repo.tag_names(None)?;
        let mut tags = Vec::new();

        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{name}"))?;
            // Tags on trees or blobs cannot mark a release
            if let Ok(commit) = reference.peel_to_commit() {
                tags.push(TagInfo::new(name, commit.id().to_string()));
            }
        }

        debug!(count = tags.len(), "listed tags");
        Ok(tags)
    }

    /// Find the highest-versioned tag, optionally restricted by a regex
    #[instrument(skip(self))]
    pub fn find_latest_tag(&self, pattern: Option<&str>) -> Result<Option<TagInfo>> {
        let regex = pattern
            .map(|p| {
                Regex::new(p).map_err(|e| GitError::InvalidTagPattern {
                    pattern: p.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        let latest = self
            .tags()?
            .into_iter()
            .filter(|t| regex.as_ref().map_or(true, |r| r.is_match(&t.name)))
            .filter(|t| t.version.is_some())
            .max_by(|a, b| a.version.cmp(&b.version));

        debug!(latest = ?latest.as_ref().map(|t| &t.name), "found latest tag");
        Ok(latest)
    }

    /// Find the latest release of one package.
    ///
    /// Only `name@1.2.3` and `name-v1.2.3` tags count, so another package's
    /// release never hides this one's unreleased commits. Without a name every
    /// tag is considered.
    pub fn find_latest_release(&self, package: Option<&str>) -> Result<Option<TagInfo>> {
        match package {
            Some(name) => self.find_latest_tag(Some(&package_tag_pattern(name))),
            None => self.find_latest_tag(None),
        }
    }
}

fn package_tag_pattern(package: &str) -> String {
    format!("^{}(@|-v)", regex::escape(package))
}

#[cfg(test)]
mod tests {
    use crate::test_support::RepoFixture;
    use crate::GitRepo;
    use pkgscope_core::error::GitError;

    #[test]
    fn test_latest_tag_by_version_not_name() {
        let fixture = RepoFixture::new();
        let c1 = fixture.commit("chore: init", &[("readme.md", "hi")], &[]);
        let c2 = fixture.commit("feat: a", &[("packages/a/x.js", "x")], &[]);
        fixture.tag("v1.9.0", c1);
        fixture.tag("v1.10.0", c2);
        fixture.tag("nightly", c2);

        let repo = GitRepo::open(fixture.path()).unwrap();
        let latest = repo.find_latest_tag(None).unwrap().unwrap();
        assert_eq!(latest.name, "v1.10.0");
        assert_eq!(latest.commit_hash, c2.to_string());
    }

    #[test]
    fn test_latest_tag_with_pattern() {
        let fixture = RepoFixture::new();
        let c1 = fixture.commit("chore: init", &[("readme.md", "hi")], &[]);
        fixture.tag("a@1.0.0", c1);
        fixture.tag("b@2.0.0", c1);

        let repo = GitRepo::open(fixture.path()).unwrap();
        let latest = repo.find_latest_tag(Some("^a@")).unwrap().unwrap();
        assert_eq!(latest.name, "a@1.0.0");
        assert!(repo.find_latest_tag(Some("^c@")).unwrap().is_none());
    }

    #[test]
    fn test_latest_release_ignores_other_packages() {
        let fixture = RepoFixture::new();
        let init = fixture.commit("chore: init", &[("readme.md", "hi")], &[]);
        fixture.tag("a@1.0.0", init);
        fixture.commit("feat(a): unreleased", &[("packages/a/x.js", "x")], &[]);
        let b = fixture.commit("feat(b): ship", &[("packages/b/y.js", "y")], &[]);
        fixture.tag("b@2.0.0", b);
        fixture.tag("ab@3.0.0", b);

        let repo = GitRepo::open(fixture.path()).unwrap();
        let release = repo.find_latest_release(Some("a")).unwrap().unwrap();
        assert_eq!(release.name, "a@1.0.0");

        let pending = repo.commits_since(&release.commit_hash).unwrap();
        let subjects: Vec<_> = pending.iter().map(|c| c.subject.as_str()).collect();
        assert_eq!(subjects, ["feat(b): ship", "feat(a): unreleased"]);

        let unnamed = repo.find_latest_release(None).unwrap().unwrap();
        assert_eq!(unnamed.name, "ab@3.0.0");
    }

    #[test]
    fn test_latest_release_scoped_and_dash_tags() {
        let fixture = RepoFixture::new();
        let c1 = fixture.commit("chore: init", &[("readme.md", "hi")], &[]);
        let c2 = fixture.commit("feat: more", &[("src/lib.rs", "")], &[]);
        fixture.tag("@acme/a@1.0.0", c1);
        fixture.tag("@acme/a-v1.1.0", c2);
        fixture.tag("@acme/b@9.0.0", c2);

        let repo = GitRepo::open(fixture.path()).unwrap();
        let release = repo.find_latest_release(Some("@acme/a")).unwrap().unwrap();
        assert_eq!(release.name, "@acme/a-v1.1.0");
        assert!(repo.find_latest_release(Some("c")).unwrap().is_none());
    }

    #[test]
    fn test_invalid_pattern() {
        let fixture = RepoFixture::new();
        fixture.commit("chore: init", &[("readme.md", "hi")], &[]);

        let repo = GitRepo::open(fixture.path()).unwrap();
        assert!(matches!(
            repo.find_latest_tag(Some("(")),
            Err(GitError::InvalidTagPattern { .. })
        ));
    }
}
