//! Output formatting for CLI commands
//!
//! Provides utilities for formatting command output in human-readable
//! or JSON formats. Supports colored output (respects NO_COLOR env var).

use crate::core::types::{Entity, SearchResultPage};

/// Color scheme for CLI output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Style for labels/headers
    pub fn label(s: &str) -> ColoredString {
        s.bold()
    }

    /// Style for entity names
    pub fn name(s: &str) -> ColoredString {
        s.cyan().bold()
    }

    /// Style for identifiers
    pub fn identifier(s: &str) -> ColoredString {
        s.blue()
    }

    /// Style for numbers/counts
    pub fn number(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for success messages
    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    /// Style for warning messages
    pub fn warning(s: &str) -> ColoredString {
        s.yellow()
    }

    /// Style for error messages
    pub fn error(s: &str) -> ColoredString {
        s.red().bold()
    }

    /// Style for dim/secondary text
    pub fn dim(s: &str) -> ColoredString {
        s.dimmed()
    }

    /// Style for relevance scores
    pub fn score(s: &str) -> ColoredString {
        s.magenta()
    }

    /// Style for rank numbers
    pub fn rank(s: &str) -> ColoredString {
        s.green().bold()
    }
}

/// Format duration into human-readable string
pub fn format_duration(secs: f64) -> String {
    if secs >= 60.0 {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs - (mins * 60.0);
        format!("{mins:.0}m {remaining_secs:.1}s")
    } else if secs >= 1.0 {
        format!("{secs:.2}s")
    } else {
        let ms = secs * 1000.0;
        format!("{ms:.0}ms")
    }
}

/// Format relative time (e.g., "2h ago", "3d ago")
pub fn format_relative_time(timestamp: &chrono::DateTime<chrono::Utc>) -> String {
    let now = chrono::Utc::now();
    let duration = now.signed_duration_since(*timestamp);

    if duration.num_seconds() < 0 {
        return "in the future".to_string();
    }

    let mins = duration.num_minutes();
    let hours = duration.num_hours();
    let days = duration.num_days();

    if days > 0 {
        format!("{days}d ago")
    } else if hours > 0 {
        format!("{hours}h ago")
    } else if mins > 0 {
        format!("{mins}m ago")
    } else {
        "just now".to_string()
    }
}

/// Format an optional nutrient amount, `-` when unknown
pub fn format_amount(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{v:.0}{unit}"),
        Some(v) => format!("{v:.1}{unit}"),
        None => "-".to_string(),
    }
}

/// One-line summary of an entity: class, region and key nutrients
pub fn entity_summary(entity: &Entity) -> String {
    let mut parts = Vec::new();
    if let Some(class) = entity.class_label.as_ref().or(entity.class_id.as_ref()) {
        parts.push(class.clone());
    }
    if let Some(region) = &entity.region {
        parts.push(region.replace('_', " "));
    }
    parts.push(format!(
        "{} kcal, {} protein",
        format_amount(entity.nutrition.calories, ""),
        format_amount(entity.nutrition.protein, "g")
    ));
    parts.join(" | ")
}

/// Print a result page as a numbered list with its pagination footer
pub fn print_page(page: &SearchResultPage) {
    if page.entities().is_empty() {
        println!("No foods found");
        return;
    }

    let offset = page.current_page().saturating_mul(page.size());
    for (i, entity) in page.entities().iter().enumerate() {
        let score = entity
            .relevance_score
            .map(|s| format!(" {}", colors::score(&format!("(score: {s:.2})"))))
            .unwrap_or_default();
        println!(
            "[{}] {}{}",
            colors::rank(&(offset + i + 1).to_string()),
            colors::name(&entity.name),
            score
        );
        println!("    {}", colors::dim(&entity_summary(entity)));
        println!("    {}", colors::identifier(&entity.uri));
    }

    println!(
        "\nPage {} of {} ({} total)",
        colors::number(&(page.current_page() + 1).to_string()),
        colors::number(&page.total_pages().max(1).to_string()),
        colors::number(&page.total_elements().to_string())
    );
}

/// Print a plain list of values, one per line
pub fn print_values(title: &str, values: &[String]) {
    print_header(&format!("{title} ({})", values.len()));
    for value in values {
        println!("  {value}");
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{}", colors::success(message));
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{}: {}", colors::warning("Warning"), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{}: {}", colors::error("Error"), message);
}

/// Print a header/title
pub fn print_header(title: &str) {
    println!("{}", colors::label(title));
}
