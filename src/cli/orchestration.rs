//! Main workflow orchestration logic
//!
//! This module contains the core replace workflow, separated from CLI
//! argument parsing. The host is passed in as a trait object bound so the
//! whole flow can be driven programmatically against a mock in tests.

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{BodyTemplate, FloatingTag};
use crate::error::{ReleaseRotateError, Result};
use crate::hooks::{HookContext, HookExecutor, HookType};
use crate::host::{DeleteOutcome, ReleaseHost};
use crate::publisher::{ReleasePublisher, RetryPolicy};
use crate::trigger::ResolvedTrigger;
use crate::ui;

/// Arguments for the replace workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkflowArgs {
    /// Floating tag to use instead of the configured one
    pub tag_override: Option<String>,

    /// Skip confirmation prompts
    pub force: bool,

    /// Preview mode - don't delete or create anything
    pub dry_run: bool,
}

/// Result of a successful replacement
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The floating tag that was replaced
    pub tag: String,

    /// The commit the tag now resolves to
    pub sha: String,

    /// Host id of the created release
    pub release_id: u64,

    /// Whether a previous release existed and was removed
    pub replaced_existing: bool,
}

/// How a workflow run ended
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    /// The floating release was replaced
    Published(WorkflowResult),
    /// Sanctioned no-op (non-push trigger)
    Skipped(BoundaryWarning),
    /// Preview only; nothing touched
    DryRun { tag: String, sha: String },
    /// User declined the confirmation prompt
    Cancelled,
}

/// Main replace workflow
///
/// Orchestrates the replacement:
/// 1. Bail out (successfully) on non-push triggers
/// 2. Resolve the floating tag for the pushed branch
/// 3. Look up the existing release and show the plan
/// 4. Confirm, unless forced or configured off
/// 5. Run the pre-replace hook, then delete-and-create via the publisher
/// 6. Run the post-publish hook permissively
///
/// # Arguments
///
/// * `args` - Workflow arguments (tag override, force, dry_run)
/// * `config` - Release-rotate configuration
/// * `host` - Release hosting service
/// * `trigger` - Resolved trigger event
pub fn run_replace_workflow<H: ReleaseHost>(
    args: &WorkflowArgs,
    config: &Config,
    host: &H,
    trigger: ResolvedTrigger,
) -> Result<WorkflowOutcome> {
    let event = match trigger {
        ResolvedTrigger::Skip(warning) => {
            ui::display_boundary_warning(&warning);
            return Ok(WorkflowOutcome::Skipped(warning));
        }
        ResolvedTrigger::Publish(event) => event,
    };

    let tag_name = match &args.tag_override {
        Some(tag) => tag.clone(),
        None => config.branches.get(&event.branch).cloned().ok_or_else(|| {
            ReleaseRotateError::config(format!(
                "Branch '{}' is not configured for publishing",
                event.branch
            ))
        })?,
    };
    let tag = FloatingTag::new(tag_name)?;
    let template = BodyTemplate::new(&config.template.body);

    let existing = host.find_release(tag.name())?;

    ui::display_trigger(&event);
    ui::display_replacement_plan(existing.as_ref(), tag.name(), &event);
    if existing.is_none() {
        ui::display_boundary_warning(&BoundaryWarning::TagAlreadyAbsent {
            tag: tag.name().to_string(),
        });
    }

    if args.dry_run {
        ui::display_status("Dry run; no changes will be made:");
        ui::display_success(&format!(
            "  Step 1: would delete release and tag '{}'",
            tag
        ));
        ui::display_success(&format!(
            "  Step 2: would create release '{}' at {}",
            tag,
            event.short_sha()
        ));
        return Ok(WorkflowOutcome::DryRun {
            tag: tag.name().to_string(),
            sha: event.sha.clone(),
        });
    }

    if !args.force
        && !config.behavior.skip_confirmation
        && !ui::confirm_action(&format!("Replace release '{}'?", tag))
            .map_err(|e| ReleaseRotateError::config(e.to_string()))?
    {
        println!("Operation cancelled by user.");
        return Ok(WorkflowOutcome::Cancelled);
    }

    if let Some(script) = &config.hooks.pre_replace {
        HookExecutor::execute(
            script,
            &HookContext {
                hook_type: HookType::PreReplace,
                tag: tag.name().to_string(),
                branch: event.branch.clone(),
                sha: event.sha.clone(),
                timestamp: event.timestamp.clone(),
                release_id: None,
            },
        )?;
    }

    let retry = RetryPolicy::from_behavior(&config.behavior);
    let publisher = ReleasePublisher::with_retry(host, retry);

    ui::display_status(&format!("Replacing release '{}'", tag));
    let report = publisher.replace_release(&tag, &event, &template)?;
    ui::display_success(&format!(
        "Release {} now holds tag '{}' at {}",
        report.release.id,
        tag,
        event.short_sha()
    ));

    if let Some(script) = &config.hooks.post_publish {
        HookExecutor::execute_permissive(
            script,
            &HookContext {
                hook_type: HookType::PostPublish,
                tag: tag.name().to_string(),
                branch: event.branch.clone(),
                sha: event.sha.clone(),
                timestamp: event.timestamp.clone(),
                release_id: Some(report.release.id),
            },
        );
    }

    Ok(WorkflowOutcome::Published(WorkflowResult {
        tag: tag.name().to_string(),
        sha: event.sha.clone(),
        release_id: report.release.id,
        replaced_existing: report.deleted == DeleteOutcome::Deleted,
    }))
}
