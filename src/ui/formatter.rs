//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::{ReleaseRecord, TriggerEvent};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display the trigger event being published.
pub fn display_trigger(event: &TriggerEvent) {
    println!(
        "\n{}",
        style(format!("Publishing push to '{}'", event.branch)).bold()
    );
    println!("  Commit:  {}", event.short_sha());
    println!("  Updated: {}", event.timestamp);
}

/// Display the replacement plan for a floating tag.
///
/// Shows either:
/// - If replacing: the existing release id and the commit the tag moves to
/// - If initial: just the new tag and commit
///
/// # Arguments
/// * `existing` - Release currently holding the tag (None if absent)
/// * `tag` - The floating tag name
/// * `event` - The trigger the new release is created for
pub fn display_replacement_plan(existing: Option<&ReleaseRecord>, tag: &str, event: &TriggerEvent) {
    match existing {
        Some(release) => {
            println!("\n{}", style("Replacement Plan:").bold());
            println!(
                "  Delete: release {} ({})",
                style(release.id).red(),
                release.tag_name
            );
            println!(
                "  Create: '{}' at {}",
                style(tag).green(),
                event.short_sha()
            );
        }
        None => {
            println!("\n{}", style("Initial Release:").bold());
            println!(
                "  Create: '{}' at {}",
                style(tag).green(),
                event.short_sha()
            );
        }
    }
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    println!("{} {}", style("⚠").yellow(), warning);
}

/// Display the configured branch-to-tag mappings.
pub fn display_configured_branches(branches: &[(String, String)]) {
    println!("{}", style("Configured branches:").bold());
    for (branch, tag) in branches {
        println!("  - {} -> {}", branch, tag);
    }
}
