use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::roster::{AddOutcome, Category, Severity, Team, MAX_LEVEL};
use crate::stats::{CategoryStats, Eligibility};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
pub fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format an average for display: two decimals at most, at least one
/// ("5.0", "5.5", "1.67")
pub fn format_average(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    if formatted.ends_with('0') {
        formatted[..formatted.len() - 1].to_string()
    } else {
        formatted
    }
}

/// Horizontal bar for a value on the 0-10 competency scale
pub fn level_bar(value: f64, width: usize) -> String {
    let ratio = (value / f64::from(MAX_LEVEL)).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Format a user-facing notice, prefixed by its severity
pub fn format_notice(severity: Severity, message: &str, use_colors: bool) -> String {
    let label = match severity {
        Severity::Warning => "warning:",
        Severity::Error => "error:",
    };
    if use_colors {
        match severity {
            Severity::Warning => format!("{} {}", label.yellow().bold(), message),
            Severity::Error => format!("{} {}", label.red().bold(), message),
        }
    } else {
        format!("{} {}", label, message)
    }
}

/// Summarize a bulk add ("Members added to team 'Alpha': Ana, Ben")
pub fn format_add_outcome(what: &str, team: &str, outcome: &AddOutcome) -> String {
    let mut message = if outcome.added.is_empty() {
        format!("No new {} added to team '{}'", what.to_lowercase(), team)
    } else {
        format!("{} added to team '{}': {}", what, team, outcome.added.join(", "))
    };
    if !outcome.skipped.is_empty() {
        message.push_str(&format!(" (already present: {})", outcome.skipped.join(", ")));
    }
    message
}

/// Format teams as one line each: name, member count, recorded scores
pub fn format_team_list(teams: &[Team], use_colors: bool) -> String {
    if teams.is_empty() {
        return "No teams added yet. Please add a team first.".to_string();
    }

    let name_width = teams
        .iter()
        .map(|t| t.name.chars().count())
        .max()
        .unwrap_or(0)
        .min(40);

    teams
        .iter()
        .map(|team| {
            let name = truncate_name(&team.name, name_width);
            let padded = format!("{:<width$}", name, width = name_width);
            let summary = format!(
                "{} members  {} skills  {} scores",
                team.members.len(),
                team.skills.total(),
                team.scored_pairs()
            );
            if use_colors {
                format!("{}  {}", padded.bold(), summary.dimmed())
            } else {
                format!("{}  {}", padded, summary)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a team's members and per-category skills
pub fn format_team_detail(team: &Team, use_colors: bool) -> String {
    let members: Vec<&str> = team.members.iter().map(|m| m.name.as_str()).collect();
    let mut lines = Vec::new();

    if use_colors {
        lines.push(format!("Team: {}", team.name.bold()));
    } else {
        lines.push(format!("Team: {}", team.name));
    }
    lines.push(format!("  Members: {}", join_or_none(&members)));
    for category in Category::ALL {
        let skills: Vec<&str> = team.skills.get(category).iter().map(String::as_str).collect();
        let label = format!("{} Skills:", category);
        if use_colors {
            lines.push(format!("  {} {}", label.cyan(), join_or_none(&skills)));
        } else {
            lines.push(format!("  {} {}", label, join_or_none(&skills)));
        }
    }
    lines.join("\n")
}

fn join_or_none(items: &[&str]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

/// Format a skills x members grid for one category; `-` marks unscored
pub fn format_score_matrix(team: &Team, category: Category, use_colors: bool) -> String {
    let skills = team.skills.get(category);
    if skills.is_empty() {
        return format!("No {} skills in team '{}'.", category, team.name);
    }
    if team.members.is_empty() {
        return format!("No members in team '{}'.", team.name);
    }

    let skill_width = skills.iter().map(|s| s.chars().count()).max().unwrap_or(0).min(24);
    let column_width = |name: &str| name.chars().count().clamp(3, 12);

    let mut header = format!("{:<width$}", "", width = skill_width);
    for member in &team.members {
        let width = column_width(&member.name);
        header.push_str(&format!("  {:>width$}", truncate_name(&member.name, width), width = width));
    }
    let mut lines = vec![if use_colors {
        header.bold().to_string()
    } else {
        header
    }];

    for skill in skills {
        let mut line = format!("{:<width$}", truncate_name(skill, skill_width), width = skill_width);
        for member in &team.members {
            let width = column_width(&member.name);
            let cell = member
                .level(skill)
                .map(|l| l.to_string())
                .unwrap_or_else(|| "-".to_string());
            line.push_str(&format!("  {:>width$}", cell, width = width));
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Format aggregated statistics for a category as a table with bars
pub fn format_stats_table(stats: &CategoryStats, use_colors: bool) -> String {
    let mut lines = Vec::new();
    let heading = format!("{} ({} eligible skills)", stats.category, stats.skills.len());
    lines.push(if use_colors {
        heading.bold().to_string()
    } else {
        heading
    });

    if stats.skills.is_empty() {
        lines.push("  No competency levels recorded.".to_string());
        return lines.join("\n");
    }

    let term_width = get_terminal_width();
    let bar_width = 10;
    // "  " + name + "  min  max   avg  " + bar
    let fixed = 2 + 2 + 3 + 2 + 3 + 2 + 5 + 2 + bar_width;
    let longest = stats.skills.iter().map(|s| s.skill.chars().count()).max().unwrap_or(0);
    let name_width = match term_width {
        Some(w) if w > fixed + 8 => longest.min(w - fixed),
        Some(_) => longest.min(8),
        None => longest,
    };

    lines.push(format!(
        "  {:<nw$}  {:>3}  {:>3}  {:>5}",
        "Skill",
        "Min",
        "Max",
        "Avg",
        nw = name_width
    ));
    for skill in &stats.skills {
        let name = truncate_name(&skill.skill, name_width);
        let bar = level_bar(skill.average, bar_width);
        let row = format!(
            "  {:<nw$}  {:>3}  {:>3}  {:>5}  ",
            name,
            skill.min,
            skill.max,
            format_average(skill.average),
            nw = name_width
        );
        if use_colors {
            lines.push(format!("{}{}", row, bar.green()));
        } else {
            lines.push(format!("{}{}", row, bar));
        }
    }

    if let Eligibility::NotRenderable { count } = stats.eligibility {
        let note = format!("  Not renderable as a radar chart (count: {})", count);
        lines.push(if use_colors {
            note.yellow().to_string()
        } else {
            note
        });
    }

    lines.join("\n")
}
