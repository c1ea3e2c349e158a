//! Terminal output helpers.
//!
//! Progress goes to stdout, errors and warnings to stderr. Styling is done
//! with `console` so it degrades cleanly on non-tty output.

use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print a warning message in yellow.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// Display the proposed tag change (or initial tag).
///
/// Shows either:
/// - If updating: "From: old_tag -> To: new_tag"
/// - If initial: "Initial Tag: new_tag"
///
/// # Arguments
/// * `old_tag` - Latest existing tag (None if the repository has no tags)
/// * `new_tag` - The release tag about to be created
pub fn display_proposed_tag(old_tag: Option<&str>, new_tag: &str) {
    match old_tag {
        Some(old) => {
            println!("\n{}", style("Proposed Tag Change:").bold());
            println!("  From: {}", style(old).red());
            println!("  To:   {}", style(new_tag).green());
        }
        None => {
            println!("\n{}", style("Initial Tag:").bold());
            println!("  New tag: {}", style(new_tag).green());
        }
    }
}

/// Display the manual retry instruction after a failed push.
///
/// The failed run keeps the local commit and tag, so the operator can push
/// them by hand once the underlying problem is fixed.
///
/// # Arguments
/// * `branch` - Branch that was being released
/// * `tag` - The tag that was created locally
/// * `remote` - The remote name (e.g., "origin")
pub fn display_manual_push_instruction(branch: &str, tag: &str, remote: &str) {
    println!(
        "\n{} The local release commit and tag were kept. To push them later, run:\n  {}",
        style("→").yellow(),
        style(format!(
            "git push {} {} && git push {} {}",
            remote, branch, remote, tag
        ))
        .cyan()
    );
}
