use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Chapbook".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Download a web novel into a XeLaTeX book\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Print the run summary
pub fn print_report(report: &chapbook_core::BookReport, elapsed: std::time::Duration) {
    eprintln!("\n{}", "═".repeat(60).dimmed());
    eprintln!("{}", "Book Summary".bold().cyan());
    eprintln!("{}", "═".repeat(60).dimmed());
    eprintln!(
        "  {} {}",
        "Master:".dimmed(),
        report.master_path.display().bright_white()
    );
    eprintln!(
        "  {} {}",
        "Chapters:".dimmed(),
        report.chapters.to_string().bright_white()
    );
    if !report.degraded.is_empty() {
        let ids: Vec<String> = report.degraded.iter().map(ToString::to_string).collect();
        eprintln!("  {} {}", "Title only:".dimmed(), ids.join(", ").bright_yellow());
    }
    eprintln!(
        "  {} {:.1}s\n",
        "Elapsed:".dimmed(),
        elapsed.as_secs_f64()
    );
}
