//! Non-interactive subcommands.
//!
//! Every mutating command loads the session, applies one roster operation and
//! saves the result. Validation failures leave the session file untouched.

use serde::Serialize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::Config;
use crate::export::{export_to_path, export_to_string, ExportError};
use crate::output::{
    format_add_outcome, format_notice, format_score_matrix, format_stats_table,
    format_team_detail, format_team_list,
};
use crate::roster::{
    Category, CompetencyLevel, ParseCategoryError, Roster, RosterError, Severity,
};
use crate::stats::{category_stats, radar_chart, CategoryStats, ChartError, RadarChart};
use crate::storage::{load_session, save_session};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_VALIDATION: i32 = 1;
pub const EXIT_STORAGE: i32 = 2;
pub const EXIT_WARNING: i32 = 3;
pub const EXIT_CONFIG: i32 = 4;

/// Why a command did not complete
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Category(#[from] ParseCategoryError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error("No data to export.")]
    NothingToExport,

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl CommandError {
    pub fn severity(&self) -> Severity {
        match self {
            CommandError::Roster(e) => e.severity(),
            CommandError::Chart(_) | CommandError::NothingToExport => Severity::Warning,
            CommandError::Category(_) | CommandError::Storage(_) => Severity::Error,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Storage(_) => EXIT_STORAGE,
            _ if self.severity() == Severity::Warning => EXIT_WARNING,
            _ => EXIT_VALIDATION,
        }
    }

    fn message(&self) -> String {
        match self {
            // Keep the context chain for filesystem failures
            CommandError::Storage(e) => format!("{:#}", e),
            other => other.to_string(),
        }
    }
}

impl From<ExportError> for CommandError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::Empty => CommandError::NothingToExport,
            other => CommandError::Storage(other.into()),
        }
    }
}

pub type CommandResult = Result<i32, CommandError>;

/// Print a failed command's notice to stderr and map the outcome to an exit code
pub fn report(result: CommandResult) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            let use_colors = std::io::stderr().is_terminal();
            eprintln!("{}", format_notice(e.severity(), &e.message(), use_colors));
            e.exit_code()
        }
    }
}

/// Resolved session and settings shared by every subcommand
pub struct CommandContext {
    pub session_path: PathBuf,
    pub config: Config,
    pub use_colors: bool,
}

impl CommandContext {
    pub fn new(session_path: PathBuf, config: Config) -> Self {
        Self {
            session_path,
            config,
            use_colors: crate::output::should_use_colors(),
        }
    }

    fn load(&self) -> Result<Roster, CommandError> {
        Ok(load_session(&self.session_path)?)
    }

    /// Run `op` against the stored roster and save the result if it succeeds
    fn apply<T>(
        &self,
        op: impl FnOnce(&mut Roster) -> Result<T, RosterError>,
    ) -> Result<T, CommandError> {
        let mut roster = self.load()?;
        let value = op(&mut roster)?;
        save_session(&self.session_path, &roster)?;
        Ok(value)
    }
}

pub fn init_config(path: &Path, force: bool) -> CommandResult {
    crate::config::write_default_config(path, force)?;
    println!("Wrote default config to {}", path.display());
    Ok(EXIT_SUCCESS)
}

pub fn team_add(ctx: &CommandContext, name: &str) -> CommandResult {
    let defaults = &ctx.config.default_skills;
    ctx.apply(|r| r.add_team(name, defaults))?;
    println!("Team '{}' added with default skills.", name.trim());
    Ok(EXIT_SUCCESS)
}

pub fn team_delete(ctx: &CommandContext, name: &str) -> CommandResult {
    let removed = ctx.apply(|r| r.delete_team(name))?;
    println!(
        "Team '{}' deleted ({} members, {} scores).",
        removed.name,
        removed.members.len(),
        removed.scored_pairs()
    );
    Ok(EXIT_SUCCESS)
}

pub fn team_list(ctx: &CommandContext) -> CommandResult {
    let roster = ctx.load()?;
    println!("{}", format_team_list(roster.teams(), ctx.use_colors));
    Ok(EXIT_SUCCESS)
}

pub fn team_show(ctx: &CommandContext, name: &str) -> CommandResult {
    let roster = ctx.load()?;
    let team = roster
        .team(name)
        .ok_or_else(|| RosterError::TeamNotFound(name.to_string()))?;

    println!("{}", format_team_detail(team, ctx.use_colors));
    for category in Category::ALL {
        println!();
        println!("{}", category);
        println!("{}", format_score_matrix(team, category, ctx.use_colors));
    }
    Ok(EXIT_SUCCESS)
}

pub fn member_add(ctx: &CommandContext, team: &str, names: &[String]) -> CommandResult {
    let input = names.join(",");
    let outcome = ctx.apply(|r| r.add_members(team, &input))?;
    println!("{}", format_add_outcome("Members", team, &outcome));
    Ok(if outcome.added.is_empty() {
        EXIT_WARNING
    } else {
        EXIT_SUCCESS
    })
}

pub fn skill_add(
    ctx: &CommandContext,
    team: &str,
    category: &str,
    names: &[String],
) -> CommandResult {
    let category: Category = category.parse()?;
    let input = names.join(",");
    let outcome = ctx.apply(|r| r.add_skills(team, category, &input))?;
    let what = format!("{} skills", category);
    println!("{}", format_add_outcome(&what, team, &outcome));
    Ok(if outcome.added.is_empty() {
        EXIT_WARNING
    } else {
        EXIT_SUCCESS
    })
}

pub fn score_set(
    ctx: &CommandContext,
    team: &str,
    member: &str,
    skill: &str,
    level: &str,
) -> CommandResult {
    let level: CompetencyLevel = level.parse()?;
    let previous = ctx.apply(|r| r.set_competency(team, member, skill, level))?;
    match previous {
        Some(prev) if prev != level => println!("{}: {} = {} (was {})", member, skill, level, prev),
        _ => println!("{}: {} = {}", member, skill, level),
    }
    Ok(EXIT_SUCCESS)
}

pub fn score_clear(ctx: &CommandContext, team: &str, member: &str, skill: &str) -> CommandResult {
    let mut roster = ctx.load()?;
    match roster.clear_competency(team, member, skill)? {
        Some(prev) => {
            save_session(&ctx.session_path, &roster)?;
            println!("{}: {} cleared (was {})", member, skill, prev);
            Ok(EXIT_SUCCESS)
        }
        None => {
            println!("{}: {} was not scored", member, skill);
            Ok(EXIT_WARNING)
        }
    }
}

/// Machine-readable view of one category
#[derive(Debug, Serialize)]
pub struct ChartReport {
    pub stats: CategoryStats,
    pub chart: Option<RadarChart>,
    pub notice: Option<String>,
}

impl ChartReport {
    fn build(roster: &Roster, team: &str, category: Category) -> Result<Self, CommandError> {
        let team = roster
            .team(team)
            .ok_or_else(|| RosterError::TeamNotFound(team.to_string()))?;
        let stats = category_stats(team, category);
        let (chart, notice) = match radar_chart(team, category) {
            Ok(chart) => (Some(chart), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Ok(Self {
            stats,
            chart,
            notice,
        })
    }
}

/// Print aggregated statistics and radar chart eligibility for a team.
///
/// With an explicit category, a chart that can't be drawn is a warning.
pub fn chart(
    ctx: &CommandContext,
    team: &str,
    category: Option<&str>,
    json: bool,
) -> CommandResult {
    let roster = ctx.load()?;
    let categories = match category {
        Some(c) => vec![c.parse::<Category>()?],
        None => Category::ALL.to_vec(),
    };
    let reports = categories
        .iter()
        .map(|c| ChartReport::build(&roster, team, *c))
        .collect::<Result<Vec<_>, _>>()?;

    if json {
        let text = match reports.as_slice() {
            [single] if category.is_some() => serde_json::to_string_pretty(single),
            all => serde_json::to_string_pretty(all),
        }
        .map_err(anyhow::Error::from)?;
        println!("{}", text);
    } else {
        for (i, report) in reports.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("{}", format_stats_table(&report.stats, ctx.use_colors));
            match (&report.chart, &report.notice) {
                (Some(chart), _) => println!("  {} ({} axes)", chart.title, chart.axes.len()),
                (None, Some(notice)) if category.is_none() => {
                    println!("  {}", format_notice(Severity::Warning, notice, ctx.use_colors))
                }
                _ => {}
            }
        }
    }

    if category.is_some() {
        if let Some(team_ref) = roster.team(team) {
            radar_chart(team_ref, categories[0])?;
        }
    }
    Ok(EXIT_SUCCESS)
}

/// Export every recorded level as CSV, to a file or stdout
pub fn export(ctx: &CommandContext, output: Option<PathBuf>, to_stdout: bool) -> CommandResult {
    let roster = ctx.load()?;
    if to_stdout {
        print!("{}", export_to_string(&roster)?);
        return Ok(EXIT_SUCCESS);
    }

    let path = output.unwrap_or_else(|| ctx.config.export_path.clone());
    match export_to_path(&roster, &path) {
        Ok(rows) => {
            println!("Exported {} rows to {}", rows, path.display());
            Ok(EXIT_SUCCESS)
        }
        Err(e) => match e.downcast::<ExportError>() {
            Ok(export_error) => Err(export_error.into()),
            Err(other) => Err(CommandError::Storage(other)),
        },
    }
}
