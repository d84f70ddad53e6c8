//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::io::{self, Write};

use anyhow::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_configured_branches, display_error,
    display_replacement_plan, display_status, display_success, display_trigger,
};

/// Prompts user to select a branch from available options.
///
/// If only one branch is available, returns it directly without prompting.
/// Otherwise displays numbered list and accepts 1-based index selection.
///
/// # Arguments
/// * `available_branches` - List of branch names to choose from
///
/// # Returns
/// * `Ok(String)` - The selected branch name
/// * `Err` - If selection is invalid
pub fn select_branch(available_branches: &[String]) -> Result<String> {
    if available_branches.len() == 1 {
        return Ok(available_branches[0].clone());
    }

    println!(
        "\n{}",
        console::style("Available branches for publishing:").bold()
    );
    for (i, branch) in available_branches.iter().enumerate() {
        println!("  {}. {}", i + 1, branch);
    }

    print!("\nSelect a branch (1-{}): ", available_branches.len());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let selection = input.trim().parse::<usize>().unwrap_or(0);

    if selection > 0 && selection <= available_branches.len() {
        Ok(available_branches[selection - 1].clone())
    } else {
        Err(anyhow::anyhow!("Invalid selection"))
    }
}

/// Asks a yes/no question, defaulting to no.
pub fn confirm_action(prompt: &str) -> Result<bool> {
    print!("\n{} (y/N): ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
