use anyhow::Result;
use clap::Parser;

use release_rotate::boundary::BoundaryWarning;
use release_rotate::cli::{run_replace_workflow, WorkflowArgs, WorkflowOutcome};
use release_rotate::config;
use release_rotate::domain::RepoSlug;
use release_rotate::git_ops::GitRepo;
use release_rotate::host::GithubHost;
use release_rotate::trigger::{self, ResolvedTrigger};
use release_rotate::ui;

#[derive(clap::Parser)]
#[command(
    name = "release-rotate",
    about = "Replace a floating release with one pointing at the latest commit"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Explicitly specify branch to publish")]
    branch: Option<String>,

    #[arg(short, long, help = "Floating tag to replace (overrides configuration)")]
    tag: Option<String>,

    #[arg(short, long, help = "Repository as owner/name (default: derived from origin)")]
    repo: Option<String>,

    #[arg(short, long, help = "Skip confirmation prompts")]
    force: bool,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(long, help = "Show configured branches and exit")]
    list: bool,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("release-rotate {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.list {
        list_configured_branches(args.config.as_deref())?;
        return Ok(());
    }

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize git operations
    let git_repo = match GitRepo::discover() {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    // Resolve the trigger event. Under GitHub Actions everything comes from
    // the workflow environment; for manual runs the branch tip is used.
    let trigger = if trigger::in_actions_env() {
        match trigger::from_actions_env(&git_repo) {
            Ok(trigger) => trigger,
            Err(e) => {
                ui::display_error(&format!("Cannot resolve trigger event: {}", e));
                std::process::exit(1);
            }
        }
    } else {
        let branch = match select_branch(&args, &config, &git_repo) {
            Ok(branch) => branch,
            Err(e) => {
                ui::display_error(&e.to_string());
                std::process::exit(1);
            }
        };

        // Verify the selected branch has a configured tag, unless overridden
        if !config.branches.contains_key(&branch) && args.tag.is_none() {
            eprintln!(
                "Error: Branch '{}' is not configured for publishing",
                branch
            );
            std::process::exit(1);
        }

        match trigger::from_repository(&git_repo, &branch) {
            Ok(event) => ResolvedTrigger::Publish(event),
            Err(e) => {
                ui::display_error(&format!(
                    "Cannot resolve branch tip for '{}': {}",
                    branch, e
                ));
                std::process::exit(1);
            }
        }
    };

    // Resolve the hosted repository slug
    let slug = match resolve_slug(&args, &git_repo) {
        Ok(slug) => slug,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    // Opaque credential; passed through to the host untouched
    let token = std::env::var("RELEASE_ROTATE_TOKEN")
        .or_else(|_| std::env::var("GITHUB_TOKEN"))
        .unwrap_or_default();

    if token.is_empty() && !args.dry_run {
        ui::display_error(
            "No release host token found; set RELEASE_ROTATE_TOKEN or GITHUB_TOKEN",
        );
        std::process::exit(1);
    }

    let host = match GithubHost::new(slug.clone(), token) {
        Ok(host) => host,
        Err(e) => {
            ui::display_error(&format!("Cannot initialize release host: {}", e));
            std::process::exit(1);
        }
    };

    ui::display_status(&format!("Publishing to {}", slug));

    let workflow_args = WorkflowArgs {
        tag_override: args.tag.clone(),
        force: args.force,
        dry_run: args.dry_run,
    };

    match run_replace_workflow(&workflow_args, &config, &host, trigger) {
        Ok(WorkflowOutcome::Published(result)) => {
            println!(
                "\n\x1b[32m✓\x1b[0m Successfully replaced release '{}' with commit {}\n",
                result.tag, result.sha
            );
            Ok(())
        }
        Ok(WorkflowOutcome::Skipped(_)) => Ok(()),
        Ok(WorkflowOutcome::DryRun { .. }) => Ok(()),
        Ok(WorkflowOutcome::Cancelled) => Ok(()),
        Err(e) => {
            ui::display_error(&format!("Replacement failed: {}", e));
            std::process::exit(1);
        }
    }
}

/// Pick the branch to publish for: explicit flag, current checkout when
/// configured, or interactive selection.
fn select_branch(args: &Args, config: &config::Config, git_repo: &GitRepo) -> Result<String> {
    if let Some(branch) = &args.branch {
        return Ok(branch.clone());
    }

    match git_repo.current_branch()? {
        Some(current) if config.branches.contains_key(&current) => Ok(current),
        other => {
            if other.is_none() {
                let sha = git_repo.head_sha().unwrap_or_default();
                ui::display_boundary_warning(&BoundaryWarning::DetachedHead { sha });
            }

            let mut configured: Vec<String> = config.branches.keys().cloned().collect();
            configured.sort();
            if configured.is_empty() {
                anyhow::bail!("No branches configured for publishing in releaserotate.toml");
            }

            ui::select_branch(&configured)
        }
    }
}

/// Derive owner/repo from --repo or the origin remote.
fn resolve_slug(args: &Args, git_repo: &GitRepo) -> Result<RepoSlug> {
    if let Some(repo) = &args.repo {
        return Ok(RepoSlug::parse(repo)?);
    }

    let url = git_repo.remote_url("origin").map_err(|e| {
        ui::display_boundary_warning(&BoundaryWarning::MissingRemote {
            remote: "origin".to_string(),
        });
        anyhow::anyhow!(e)
    })?;

    Ok(RepoSlug::from_remote_url(&url)?)
}

fn list_configured_branches(config_path: Option<&str>) -> Result<()> {
    let config = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let mut branches: Vec<(String, String)> = config
        .branches
        .iter()
        .map(|(branch, tag)| (branch.clone(), tag.clone()))
        .collect();
    branches.sort();

    if branches.is_empty() {
        ui::display_error("No branches configured for publishing in releaserotate.toml");
        std::process::exit(1);
    }

    ui::display_configured_branches(&branches);
    Ok(())
}
