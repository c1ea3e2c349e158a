//! Release workflow orchestration.
//!
//! Runs the release steps strictly in order and stops at the first failure.
//! Side effects live in `GitRepo`; this module sequences them, threads the
//! in-process state through the steps, and reports progress.

use crate::error::Result;
use crate::git_ops::{FastForward, GitRepo};
use crate::ui;
use crate::version;

/// Arguments for one release run
///
/// Mirrors the CLI flags and configuration in a format suitable for the
/// orchestration logic, so the workflow can be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseRequest {
    /// Remote to sync with and push to
    pub remote: String,

    /// Branch the release is cut from
    pub branch: String,

    /// Message used when pending changes are committed
    pub commit_message: String,

    /// Preview mode - no stash, commit, tag, or push
    pub dry_run: bool,
}

/// Result of a successful release run
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseSummary {
    /// The tag that was created (or would be, in a dry run)
    pub tag: String,

    /// The branch that was released
    pub branch: String,

    /// Whether branch and tag were pushed to the remote
    pub pushed: bool,

    /// Whether local changes went through a stash round-trip
    pub stashed: bool,

    /// Whether a release commit was created
    pub committed: bool,
}

/// In-process state threaded through the workflow steps.
///
/// Never persisted; an aborted run leaves nothing behind except what git
/// itself records (stash entries, commits, tags).
#[derive(Debug, Default)]
struct WorkflowState {
    start_branch: Option<String>,
    made_stash: bool,
    committed: bool,
}

/// Runs the release workflow.
///
/// Steps, strictly ordered: fetch, conditional stash, branch checkout,
/// fast-forward-only sync, conditional unstash, conditional commit, tag
/// resolution, annotated tag creation, push branch then tag, final detached
/// checkout. The first failing step aborts the run; nothing is rolled back.
pub fn run_release(repo: &mut GitRepo, request: &ReleaseRequest) -> Result<ReleaseSummary> {
    let mut state = WorkflowState {
        start_branch: repo.head_branch()?,
        ..WorkflowState::default()
    };
    match &state.start_branch {
        Some(branch) => ui::display_status(&format!(
            "Releasing '{}' (currently on '{}')",
            request.branch, branch
        )),
        None => ui::display_status(&format!(
            "Releasing '{}' (currently on a detached HEAD)",
            request.branch
        )),
    }

    sync_remote(repo, request)?;

    if request.dry_run {
        return dry_run_plan(repo, request);
    }

    stash_local_changes(repo, &mut state)?;

    // From here until the restore, local work lives only in the stash. If a
    // step fails in that window, point the operator at the entry.
    let synced = switch_branch(repo, request).and_then(|_| fast_forward_branch(repo, request));
    if let Err(e) = synced {
        if state.made_stash {
            ui::display_warning("Your uncommitted changes are still in the stash list (stash@{0})");
        }
        return Err(e);
    }

    restore_stashed_changes(repo, &state)?;
    commit_pending_changes(repo, request, &mut state)?;

    let tag = resolve_release_tag(repo)?;
    create_release_tag(repo, &tag)?;
    push_release(repo, request, &tag)?;
    finalize_checkout(repo, &tag)?;

    ui::display_success(&format!("Released {} from branch '{}'", tag, request.branch));

    Ok(ReleaseSummary {
        tag,
        branch: request.branch.clone(),
        pushed: true,
        stashed: state.made_stash,
        committed: state.committed,
    })
}

fn sync_remote(repo: &GitRepo, request: &ReleaseRequest) -> Result<()> {
    ui::display_status(&format!(
        "Fetching branches and tags from '{}'...",
        request.remote
    ));
    repo.fetch(&request.remote)?;
    ui::display_success(&format!("Fetched latest refs from '{}'", request.remote));
    Ok(())
}

fn stash_local_changes(repo: &mut GitRepo, state: &mut WorkflowState) -> Result<()> {
    if !repo.has_local_changes()? {
        ui::display_status("Working tree is clean, nothing to stash");
        return Ok(());
    }

    let label = format!(
        "git-release auto-stash {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    repo.stash_changes(&label)?;
    state.made_stash = true;
    ui::display_success(&format!("Stashed local changes ({})", label));
    Ok(())
}

fn switch_branch(repo: &GitRepo, request: &ReleaseRequest) -> Result<()> {
    ui::display_status(&format!("Checking out '{}'...", request.branch));
    repo.checkout_branch(&request.branch)?;
    Ok(())
}

fn fast_forward_branch(repo: &GitRepo, request: &ReleaseRequest) -> Result<()> {
    ui::display_status(&format!(
        "Syncing '{}' with '{}/{}' (fast-forward only)...",
        request.branch, request.remote, request.branch
    ));

    match repo.fast_forward(&request.branch, &request.remote)? {
        FastForward::UpToDate => {
            ui::display_success(&format!(
                "'{}' is up to date with '{}/{}'",
                request.branch, request.remote, request.branch
            ));
        }
        FastForward::Advanced => {
            ui::display_success(&format!(
                "Fast-forwarded '{}' to '{}/{}'",
                request.branch, request.remote, request.branch
            ));
        }
        FastForward::LocalAhead => {
            ui::display_status(&format!(
                "'{}' has local commits '{}/{}' lacks; they will be pushed with the release",
                request.branch, request.remote, request.branch
            ));
        }
    }
    Ok(())
}

fn restore_stashed_changes(repo: &mut GitRepo, state: &WorkflowState) -> Result<()> {
    if !state.made_stash {
        return Ok(());
    }

    ui::display_status("Restoring stashed changes...");
    repo.restore_stash()?;
    ui::display_success("Restored stashed changes");
    Ok(())
}

fn commit_pending_changes(
    repo: &GitRepo,
    request: &ReleaseRequest,
    state: &mut WorkflowState,
) -> Result<()> {
    match repo.commit_staged_if_changed(&request.commit_message)? {
        Some(_) => {
            state.committed = true;
            ui::display_success(&format!(
                "Committed pending changes ({})",
                request.commit_message
            ));
        }
        None => {
            ui::display_status("Nothing to commit, tree matches HEAD");
        }
    }
    Ok(())
}

fn resolve_release_tag(repo: &GitRepo) -> Result<String> {
    let tags = repo.list_tags()?;
    let latest = version::latest_tag(&tags).map(str::to_string);
    let next = version::next_release_tag(&tags)?;
    ui::display_proposed_tag(latest.as_deref(), &next.to_string());
    Ok(next.to_string())
}

fn create_release_tag(repo: &GitRepo, tag: &str) -> Result<()> {
    ui::display_status(&format!("Creating annotated tag {}...", tag));
    repo.create_annotated_tag(tag, &format!("Release {}", tag))?;
    ui::display_success(&format!("Created tag {}", tag));
    Ok(())
}

fn push_release(repo: &GitRepo, request: &ReleaseRequest, tag: &str) -> Result<()> {
    ui::display_status(&format!(
        "Pushing branch '{}' to '{}'...",
        request.branch, request.remote
    ));
    with_retry_hint(repo.push_branch(&request.branch, &request.remote), request, tag)?;
    ui::display_success(&format!("Pushed branch '{}'", request.branch));

    ui::display_status(&format!("Pushing tag {} to '{}'...", tag, request.remote));
    with_retry_hint(repo.push_tag(tag, &request.remote), request, tag)?;
    ui::display_success(&format!("Pushed tag {}", tag));
    Ok(())
}

/// On push failure the local commit and tag stay behind; tell the operator
/// how to retry by hand before propagating the error.
fn with_retry_hint(result: Result<()>, request: &ReleaseRequest, tag: &str) -> Result<()> {
    if result.is_err() {
        ui::display_manual_push_instruction(&request.branch, tag, &request.remote);
    }
    result
}

fn finalize_checkout(repo: &GitRepo, tag: &str) -> Result<()> {
    ui::display_status(&format!("Checking out {} (detached HEAD)...", tag));
    repo.checkout_tag_detached(tag)?;
    Ok(())
}

fn dry_run_plan(repo: &GitRepo, request: &ReleaseRequest) -> Result<ReleaseSummary> {
    let dirty = repo.has_local_changes()?;
    let tags = repo.list_tags()?;
    let latest = version::latest_tag(&tags).map(str::to_string);
    let next = version::next_release_tag(&tags)?;

    ui::display_status("Dry run, nothing will be changed:");
    if dirty {
        ui::display_success("  would stash local changes and restore them after the sync");
    } else {
        ui::display_success("  working tree is clean, no stash needed");
    }
    ui::display_success(&format!(
        "  would fast-forward '{}' onto '{}/{}'",
        request.branch, request.remote, request.branch
    ));
    ui::display_success(&format!(
        "  would commit pending changes as '{}'",
        request.commit_message
    ));
    ui::display_proposed_tag(latest.as_deref(), &next.to_string());
    ui::display_success(&format!(
        "  would create tag {0} and push '{1}' and {0} to '{2}'",
        next, request.branch, request.remote
    ));

    Ok(ReleaseSummary {
        tag: next.to_string(),
        branch: request.branch.clone(),
        pushed: false,
        stashed: false,
        committed: false,
    })
}
