use anyhow::{Context, Result};
use clap::Parser;

use git_release::workflow::{self, ReleaseRequest};
use git_release::{config, git_ops, ui};

#[derive(clap::Parser)]
#[command(
    name = "git-release",
    version,
    about = "Sync the release branch, commit pending work, and push the next minor tag"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Remote to sync with and push to")]
    remote: Option<String>,

    #[arg(short, long, help = "Branch to release from")]
    branch: Option<String>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config =
        config::load_config(args.config.as_deref()).context("failed to load configuration")?;
    config::apply_env_overrides(&mut config);

    // Command-line flags take precedence over environment and file settings
    if let Some(remote) = args.remote {
        config.remote = remote;
    }
    if let Some(branch) = args.branch {
        config.branch = branch;
    }

    let mut repo = match git_ops::GitRepo::discover() {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let request = ReleaseRequest {
        remote: config.remote,
        branch: config.branch,
        commit_message: config.commit_message,
        dry_run: args.dry_run,
    };

    if let Err(e) = workflow::run_release(&mut repo, &request) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
