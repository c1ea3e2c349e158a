use crate::error::{ReleaseError, Result};
use git2::{BranchType, Oid, Repository, StashFlags};
use std::path::Path;

/// Wrapper around git2 Repository for the release workflow.
///
/// Provides high-level abstractions for the git operations the workflow
/// needs: fetching, stashing, branch checkout, fast-forward sync, staging,
/// tagging, and pushing.
pub struct GitRepo {
    repo: Repository,
}

/// Outcome of a fast-forward-only sync against the remote-tracking branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FastForward {
    /// Local and remote point at the same commit
    UpToDate,
    /// Local branch was moved forward to the remote commit
    Advanced,
    /// Local has commits the remote lacks; they ride along with the push
    LocalAhead,
}

impl GitRepo {
    /// Opens the repository containing the current working directory.
    ///
    /// Discovers the git repository in the current directory or parent
    /// directories.
    ///
    /// # Returns
    /// * `Ok(GitRepo)` - Successfully initialized repository wrapper
    /// * `Err` - If not in a git repository
    pub fn discover() -> Result<Self> {
        Self::open(".")
    }

    /// Opens the repository containing `path`, walking parent directories.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path.as_ref())
            .map_err(|e| ReleaseError::environment(format!("not in a git repository: {}", e)))?;
        Ok(GitRepo { repo })
    }

    /// Name of the branch HEAD currently points at, if HEAD is not detached.
    ///
    /// Reads the symbolic target of HEAD, so it also works in a repository
    /// whose current branch has no commits yet.
    pub fn head_branch(&self) -> Result<Option<String>> {
        let head = self.repo.find_reference("HEAD")?;
        Ok(head
            .symbolic_target()
            .and_then(|target| target.strip_prefix("refs/heads/"))
            .map(str::to_string))
    }

    /// Fetches all branches and tags from a remote repository.
    ///
    /// Supports SSH authentication via keys from ~/.ssh/, the SSH agent, or
    /// default credential helpers.
    ///
    /// # Arguments
    /// * `remote_name` - Name of the remote (e.g., "origin")
    ///
    /// # Returns
    /// * `Ok(())` - Successfully fetched
    /// * `Err` - If the remote is missing or the fetch fails
    pub fn fetch(&self, remote_name: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|_| ReleaseError::sync(format!("remote '{}' not found", remote_name)))?;

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(remote_callbacks());

        // Use explicit refspecs to fetch all branches and tags from the remote.
        // The refspecs mean:
        // - "+refs/heads/*:refs/remotes/{remote_name}/*" - Fetch all remote branches
        // - "+refs/tags/*:refs/tags/*" - Fetch all tags
        let refspec_heads = format!("+refs/heads/*:refs/remotes/{}/*", remote_name);
        let refspecs = &[refspec_heads.as_str(), "+refs/tags/*:refs/tags/*"];
        remote
            .fetch(refspecs, Some(&mut fetch_options), None)
            .map_err(|e| {
                ReleaseError::sync(format!(
                    "failed to fetch from remote '{}': {}",
                    remote_name, e
                ))
            })?;

        Ok(())
    }

    /// Whether the working tree has modifications or untracked files.
    pub fn has_local_changes(&self) -> Result<bool> {
        let mut options = git2::StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true);
        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(!statuses.is_empty())
    }

    /// Stashes working-tree changes, including untracked files.
    ///
    /// # Arguments
    /// * `label` - Message recorded on the stash entry
    pub fn stash_changes(&mut self, label: &str) -> Result<Oid> {
        let signature = self.repo.signature()?;
        let oid = self
            .repo
            .stash_save(&signature, label, Some(StashFlags::INCLUDE_UNTRACKED))?;
        Ok(oid)
    }

    /// Re-applies the most recent stash entry and drops it on clean apply.
    ///
    /// If re-application fails or leaves conflicts in the index, the stash
    /// entry is kept so no work is lost, and a stash-conflict error is
    /// returned.
    pub fn restore_stash(&mut self) -> Result<()> {
        self.repo.stash_apply(0, None).map_err(|e| {
            ReleaseError::stash_conflict(format!(
                "could not reapply stashed changes: {}; resolve the conflicts by hand and re-run (the stash entry was kept)",
                e
            ))
        })?;

        if self.repo.index()?.has_conflicts() {
            return Err(ReleaseError::stash_conflict(
                "stashed changes conflict with the updated branch; resolve the conflicts by hand and re-run (the stash entry was kept)",
            ));
        }

        self.repo.stash_drop(0)?;
        Ok(())
    }

    /// Checks out a local branch, updating index and working tree.
    ///
    /// # Returns
    /// * `Ok(())` - Branch checked out
    /// * `Err` - Environment error if the branch does not exist
    pub fn checkout_branch(&self, branch_name: &str) -> Result<()> {
        match self.repo.find_branch(branch_name, BranchType::Local) {
            Ok(_) => {}
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                return Err(ReleaseError::environment(format!(
                    "branch '{}' does not exist",
                    branch_name
                )));
            }
            Err(e) => return Err(e.into()),
        }

        let ref_name = format!("refs/heads/{}", branch_name);
        let target = self.repo.revparse_single(&ref_name)?;
        self.repo
            .checkout_tree(&target, Some(git2::build::CheckoutBuilder::new().safe()))?;
        self.repo.set_head(&ref_name)?;
        Ok(())
    }

    /// Aligns a local branch with its remote-tracking branch, fast-forward only.
    ///
    /// Never creates a merge commit and never rewrites history. A missing
    /// remote-tracking ref means the branch has no upstream on that remote
    /// and is reported as an environment error; diverged histories are a
    /// divergence error instructing manual resolution.
    ///
    /// # Arguments
    /// * `branch_name` - Name of the local branch to update
    /// * `remote_name` - Name of the remote (e.g., "origin")
    pub fn fast_forward(&self, branch_name: &str, remote_name: &str) -> Result<FastForward> {
        let remote_tracking = format!("{}/{}", remote_name, branch_name);
        let remote_ref = match self
            .repo
            .find_reference(&format!("refs/remotes/{}", remote_tracking))
        {
            Ok(r) => r,
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                return Err(ReleaseError::environment(format!(
                    "branch '{}' has no upstream: 'refs/remotes/{}' does not exist on this clone",
                    branch_name, remote_tracking
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let remote_oid = remote_ref.target().ok_or_else(|| {
            ReleaseError::environment(format!("remote ref '{}' is invalid", remote_tracking))
        })?;

        let branch_ref_name = format!("refs/heads/{}", branch_name);
        let local_oid = self
            .repo
            .find_reference(&branch_ref_name)?
            .target()
            .ok_or_else(|| {
                ReleaseError::environment(format!("branch ref '{}' is invalid", branch_ref_name))
            })?;

        if local_oid == remote_oid {
            return Ok(FastForward::UpToDate);
        }

        let (ahead, behind) = self.repo.graph_ahead_behind(local_oid, remote_oid)?;
        if ahead > 0 && behind > 0 {
            return Err(ReleaseError::divergence(format!(
                "'{}' and '{}' have diverged ({} local and {} remote commits the other lacks); rebase or merge the branch by hand, then re-run",
                branch_name, remote_tracking, ahead, behind
            )));
        }
        if behind == 0 {
            return Ok(FastForward::LocalAhead);
        }

        let mut reference = self.repo.find_reference(&branch_ref_name)?;
        reference.set_target(
            remote_oid,
            &format!("fast-forward from {}", remote_tracking),
        )?;
        self.repo.set_head(&branch_ref_name)?;
        // The working tree is clean at this point (local work was stashed),
        // so the forced checkout only realigns index and worktree with HEAD.
        self.repo
            .checkout_head(Some(git2::build::CheckoutBuilder::new().force()))?;
        Ok(FastForward::Advanced)
    }

    /// Stages every working-tree change and commits if the result differs
    /// from HEAD.
    ///
    /// Staging covers additions, modifications, and deletions. When the
    /// staged tree is identical to HEAD's tree, no commit is created.
    ///
    /// # Returns
    /// * `Ok(Some(oid))` - A commit was created
    /// * `Ok(None)` - Nothing to commit
    pub fn commit_staged_if_changed(&self, message: &str) -> Result<Option<Oid>> {
        let mut index = self.repo.index()?;
        index.add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"].iter(), None)?;
        index.write()?;
        let tree_id = index.write_tree()?;

        let head_commit = self.repo.head()?.peel_to_commit()?;
        if head_commit.tree_id() == tree_id {
            return Ok(None);
        }

        let signature = self.repo.signature()?;
        let tree = self.repo.find_tree(tree_id)?;
        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&head_commit],
        )?;
        Ok(Some(oid))
    }

    /// Lists every tag name in the repository.
    pub fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;
        Ok(tags.iter().flatten().map(|t| t.to_string()).collect())
    }

    /// Whether a tag with the given name exists.
    pub fn tag_exists(&self, tag_name: &str) -> Result<bool> {
        match self.repo.find_reference(&format!("refs/tags/{}", tag_name)) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Creates an annotated tag on the current HEAD commit.
    ///
    /// # Arguments
    /// * `tag_name` - Name of the tag to create
    /// * `message` - Message stored in the tag object
    ///
    /// # Returns
    /// * `Ok(oid)` - OID of the created tag object
    /// * `Err` - Tag-collision error if the name already exists
    pub fn create_annotated_tag(&self, tag_name: &str, message: &str) -> Result<Oid> {
        if self.tag_exists(tag_name)? {
            return Err(ReleaseError::tag_collision(format!(
                "tag '{}' already exists",
                tag_name
            )));
        }

        let head = self.repo.head()?.peel_to_commit()?;
        let signature = self.repo.signature()?;
        let oid = self
            .repo
            .tag(tag_name, head.as_object(), &signature, message, false)?;
        Ok(oid)
    }

    /// Pushes a branch to a remote.
    pub fn push_branch(&self, branch_name: &str, remote_name: &str) -> Result<()> {
        let refspec = format!("refs/heads/{0}:refs/heads/{0}", branch_name);
        self.push_refspec(remote_name, &refspec, &format!("branch '{}'", branch_name))
    }

    /// Pushes a tag to a remote.
    pub fn push_tag(&self, tag_name: &str, remote_name: &str) -> Result<()> {
        let refspec = format!("refs/tags/{0}:refs/tags/{0}", tag_name);
        self.push_refspec(remote_name, &refspec, &format!("tag '{}'", tag_name))
    }

    fn push_refspec(&self, remote_name: &str, refspec: &str, what: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|_| ReleaseError::push(format!("no remote named '{}' found", remote_name)))?;

        let mut push_options = git2::PushOptions::new();
        let mut callbacks = remote_callbacks();

        // Catch per-reference rejections reported during the push.
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                Err(git2::Error::from_str(&format!(
                    "{} was rejected: {}",
                    refname, status
                )))
            } else {
                Ok(())
            }
        });

        push_options.remote_callbacks(callbacks);

        match remote.push(&[refspec], Some(&mut push_options)) {
            Ok(_) => Ok(()),
            Err(e) if e.class() == git2::ErrorClass::Net => Err(ReleaseError::push(format!(
                "network error while pushing {}: {}",
                what, e
            ))),
            Err(e) if e.class() == git2::ErrorClass::Reference => Err(ReleaseError::push(
                format!("reference error while pushing {}: {}", what, e),
            )),
            Err(e) => Err(ReleaseError::push(format!(
                "failed to push {}: {}",
                what, e
            ))),
        }
    }

    /// Checks out a tag's commit, leaving HEAD detached at the release.
    pub fn checkout_tag_detached(&self, tag_name: &str) -> Result<()> {
        let object = self
            .repo
            .revparse_single(&format!("refs/tags/{}", tag_name))?;
        let commit = object.peel(git2::ObjectType::Commit)?;
        self.repo
            .checkout_tree(&commit, Some(git2::build::CheckoutBuilder::new().safe()))?;
        self.repo.set_head_detached(commit.id())?;
        Ok(())
    }
}

/// Credential callbacks shared by fetch and push.
///
/// Tries SSH keys from ~/.ssh/ in order of preference, then the SSH agent,
/// then default credentials.
fn remote_callbacks() -> git2::RemoteCallbacks<'static> {
    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        if allowed_types.contains(git2::CredentialType::SSH_KEY) {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            let key_paths = vec![
                format!("{}/.ssh/id_ed25519", home),
                format!("{}/.ssh/id_rsa", home),
                format!("{}/.ssh/id_ecdsa", home),
            ];

            for key_path in key_paths {
                let path = std::path::Path::new(&key_path);
                if path.exists() {
                    if let Ok(cred) =
                        git2::Cred::ssh_key(username_from_url.unwrap_or("git"), None, path, None)
                    {
                        return Ok(cred);
                    }
                }
            }

            // Try SSH agent as fallback
            if let Ok(cred) = git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git")) {
                return Ok(cred);
            }
        }

        // Fall back to default credentials
        git2::Cred::default()
    });
    callbacks
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn init_repo(dir: &Path) -> git2::Repository {
        let mut opts = git2::RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = git2::Repository::init_opts(dir, &opts).unwrap();
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
        repo
    }

    fn commit_file(repo: &git2::Repository, name: &str, content: &str, message: &str) -> Oid {
        let workdir = repo.workdir().unwrap();
        fs::write(workdir.join(name), content).unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let signature = repo.signature().unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .unwrap()
    }

    fn stash_count(path: &Path) -> usize {
        let mut repo = git2::Repository::open(path).unwrap();
        let mut count = 0;
        repo.stash_foreach(|_, _, _| {
            count += 1;
            true
        })
        .unwrap();
        count
    }

    #[test]
    fn test_open_rejects_non_repository() {
        let dir = TempDir::new().unwrap();
        let err = GitRepo::open(dir.path()).err().unwrap();
        assert!(matches!(err, ReleaseError::Environment(_)));
    }

    #[test]
    fn test_head_branch_before_first_commit() {
        let dir = TempDir::new().unwrap();
        init_repo(dir.path());
        let repo = GitRepo::open(dir.path()).unwrap();
        assert_eq!(repo.head_branch().unwrap(), Some("main".to_string()));
    }

    #[test]
    fn test_has_local_changes() {
        let dir = TempDir::new().unwrap();
        let raw = init_repo(dir.path());
        commit_file(&raw, "file.txt", "one\n", "init");

        let repo = GitRepo::open(dir.path()).unwrap();
        assert!(!repo.has_local_changes().unwrap());

        fs::write(dir.path().join("untracked.txt"), "new\n").unwrap();
        assert!(repo.has_local_changes().unwrap());

        fs::remove_file(dir.path().join("untracked.txt")).unwrap();
        fs::write(dir.path().join("file.txt"), "changed\n").unwrap();
        assert!(repo.has_local_changes().unwrap());
    }

    #[test]
    fn test_stash_round_trip() {
        let dir = TempDir::new().unwrap();
        let raw = init_repo(dir.path());
        commit_file(&raw, "file.txt", "one\n", "init");
        drop(raw);

        fs::write(dir.path().join("file.txt"), "two\n").unwrap();
        fs::write(dir.path().join("untracked.txt"), "new\n").unwrap();

        let mut repo = GitRepo::open(dir.path()).unwrap();
        repo.stash_changes("test stash").unwrap();
        assert!(!repo.has_local_changes().unwrap());
        assert_eq!(stash_count(dir.path()), 1);

        repo.restore_stash().unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("file.txt")).unwrap(),
            "two\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("untracked.txt")).unwrap(),
            "new\n"
        );
        assert_eq!(stash_count(dir.path()), 0);
    }

    #[test]
    fn test_commit_staged_if_changed() {
        let dir = TempDir::new().unwrap();
        let raw = init_repo(dir.path());
        commit_file(&raw, "file.txt", "one\n", "init");

        let repo = GitRepo::open(dir.path()).unwrap();
        assert!(repo.commit_staged_if_changed("noop").unwrap().is_none());

        fs::write(dir.path().join("file.txt"), "two\n").unwrap();
        let oid = repo.commit_staged_if_changed("update").unwrap();
        assert!(oid.is_some());
        assert_eq!(raw.head().unwrap().peel_to_commit().unwrap().id(), oid.unwrap());

        assert!(repo.commit_staged_if_changed("noop").unwrap().is_none());
    }

    #[test]
    fn test_commit_staged_records_deletions() {
        let dir = TempDir::new().unwrap();
        let raw = init_repo(dir.path());
        commit_file(&raw, "a.txt", "a\n", "init");
        commit_file(&raw, "b.txt", "b\n", "second");

        fs::remove_file(dir.path().join("b.txt")).unwrap();
        let repo = GitRepo::open(dir.path()).unwrap();
        assert!(repo.commit_staged_if_changed("remove b").unwrap().is_some());

        let head_tree = raw.head().unwrap().peel_to_commit().unwrap().tree().unwrap();
        assert!(head_tree.get_name("a.txt").is_some());
        assert!(head_tree.get_name("b.txt").is_none());
    }

    #[test]
    fn test_create_annotated_tag_and_collision() {
        let dir = TempDir::new().unwrap();
        let raw = init_repo(dir.path());
        commit_file(&raw, "file.txt", "one\n", "init");

        let repo = GitRepo::open(dir.path()).unwrap();
        repo.create_annotated_tag("v0.1.0", "Release v0.1.0").unwrap();
        assert!(repo.tag_exists("v0.1.0").unwrap());

        let object = raw.revparse_single("refs/tags/v0.1.0").unwrap();
        assert_eq!(object.kind(), Some(git2::ObjectType::Tag));

        let err = repo
            .create_annotated_tag("v0.1.0", "Release v0.1.0")
            .unwrap_err();
        assert!(matches!(err, ReleaseError::TagCollision(_)));
    }

    #[test]
    fn test_list_tags() {
        let dir = TempDir::new().unwrap();
        let raw = init_repo(dir.path());
        commit_file(&raw, "file.txt", "one\n", "init");

        let repo = GitRepo::open(dir.path()).unwrap();
        assert!(repo.list_tags().unwrap().is_empty());

        repo.create_annotated_tag("v0.1.0", "Release v0.1.0").unwrap();
        repo.create_annotated_tag("v0.2.0", "Release v0.2.0").unwrap();
        let mut tags = repo.list_tags().unwrap();
        tags.sort();
        assert_eq!(tags, vec!["v0.1.0".to_string(), "v0.2.0".to_string()]);
    }

    #[test]
    fn test_checkout_branch_missing() {
        let dir = TempDir::new().unwrap();
        let raw = init_repo(dir.path());
        commit_file(&raw, "file.txt", "one\n", "init");

        let repo = GitRepo::open(dir.path()).unwrap();
        let err = repo.checkout_branch("release").unwrap_err();
        assert!(matches!(err, ReleaseError::Environment(_)));
    }

    #[test]
    fn test_checkout_tag_detaches_head() {
        let dir = TempDir::new().unwrap();
        let raw = init_repo(dir.path());
        commit_file(&raw, "file.txt", "one\n", "init");

        let repo = GitRepo::open(dir.path()).unwrap();
        repo.create_annotated_tag("v0.1.0", "Release v0.1.0").unwrap();
        repo.checkout_tag_detached("v0.1.0").unwrap();

        assert!(raw.head_detached().unwrap());
        assert_eq!(repo.head_branch().unwrap(), None);
    }

    #[test]
    fn test_fast_forward_missing_upstream() {
        let dir = TempDir::new().unwrap();
        let raw = init_repo(dir.path());
        commit_file(&raw, "file.txt", "one\n", "init");

        let repo = GitRepo::open(dir.path()).unwrap();
        let err = repo.fast_forward("main", "origin").unwrap_err();
        assert!(matches!(err, ReleaseError::Environment(_)));
        assert!(err.to_string().contains("origin/main"));
    }

    #[test]
    fn test_fast_forward_up_to_date() {
        let dir = TempDir::new().unwrap();
        let raw = init_repo(dir.path());
        let c1 = commit_file(&raw, "file.txt", "one\n", "init");
        raw.reference("refs/remotes/origin/main", c1, true, "test")
            .unwrap();

        let repo = GitRepo::open(dir.path()).unwrap();
        assert_eq!(
            repo.fast_forward("main", "origin").unwrap(),
            FastForward::UpToDate
        );
    }

    #[test]
    fn test_fast_forward_advances_branch_and_worktree() {
        let dir = TempDir::new().unwrap();
        let raw = init_repo(dir.path());
        let c1 = commit_file(&raw, "file.txt", "one\n", "init");
        let c2 = commit_file(&raw, "file.txt", "two\n", "second");

        // Rewind local main to c1 and mark c2 as the remote state.
        raw.reference("refs/remotes/origin/main", c2, true, "test")
            .unwrap();
        raw.reference("refs/heads/main", c1, true, "rewind").unwrap();
        raw.checkout_head(Some(git2::build::CheckoutBuilder::new().force()))
            .unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("file.txt")).unwrap(),
            "one\n"
        );

        let repo = GitRepo::open(dir.path()).unwrap();
        assert_eq!(
            repo.fast_forward("main", "origin").unwrap(),
            FastForward::Advanced
        );
        assert_eq!(raw.head().unwrap().peel_to_commit().unwrap().id(), c2);
        assert_eq!(
            fs::read_to_string(dir.path().join("file.txt")).unwrap(),
            "two\n"
        );
    }

    #[test]
    fn test_fast_forward_local_ahead() {
        let dir = TempDir::new().unwrap();
        let raw = init_repo(dir.path());
        let c1 = commit_file(&raw, "file.txt", "one\n", "init");
        commit_file(&raw, "file.txt", "two\n", "second");
        raw.reference("refs/remotes/origin/main", c1, true, "test")
            .unwrap();

        let repo = GitRepo::open(dir.path()).unwrap();
        assert_eq!(
            repo.fast_forward("main", "origin").unwrap(),
            FastForward::LocalAhead
        );
    }

    #[test]
    fn test_fast_forward_diverged() {
        let dir = TempDir::new().unwrap();
        let raw = init_repo(dir.path());
        let c1 = commit_file(&raw, "file.txt", "one\n", "init");
        commit_file(&raw, "file.txt", "two\n", "second");

        // Build a sibling commit on top of c1 and pretend it is the remote.
        let base = raw.find_commit(c1).unwrap();
        let tree = base.tree().unwrap();
        let signature = raw.signature().unwrap();
        let divergent = raw
            .commit(None, &signature, &signature, "divergent", &tree, &[&base])
            .unwrap();
        raw.reference("refs/remotes/origin/main", divergent, true, "test")
            .unwrap();

        let repo = GitRepo::open(dir.path()).unwrap();
        let err = repo.fast_forward("main", "origin").unwrap_err();
        assert!(matches!(err, ReleaseError::Divergence(_)));
        assert!(err.to_string().contains("diverged"));
    }
}
