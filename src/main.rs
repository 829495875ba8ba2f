use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{prelude::*, EnvFilter};

use skill_radar::commands::{self, CommandContext, EXIT_CONFIG, EXIT_STORAGE};
use skill_radar::stderr_buffer::fmt_layer;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive editor with radar charts (default if no subcommand)
    Tui,
    /// Write the default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Create, remove and inspect teams
    #[command(subcommand)]
    Team(TeamCommand),
    /// Manage team members
    #[command(subcommand)]
    Member(MemberCommand),
    /// Manage a team's skills
    #[command(subcommand)]
    Skill(SkillCommand),
    /// Record competency levels
    #[command(subcommand)]
    Score(ScoreCommand),
    /// Show per-skill statistics and radar chart eligibility
    Chart {
        team: String,
        /// Technical, Domain or Operational (all when omitted)
        category: Option<String>,
        /// Print chart data as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export recorded levels as CSV
    Export {
        /// Output file (defaults to export_path from config)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,
        /// Write CSV to stdout instead of a file
        #[arg(long)]
        stdout: bool,
    },
}

#[derive(Subcommand, Debug)]
enum TeamCommand {
    /// Add a team with the default skill lists
    Add { name: String },
    /// Delete a team with its members and scores
    Delete { name: String },
    /// List teams
    List,
    /// Show a team's members, skills and levels
    Show { name: String },
}

#[derive(Subcommand, Debug)]
enum MemberCommand {
    /// Add members (names may also be comma separated)
    Add {
        team: String,
        #[arg(required = true)]
        names: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
enum SkillCommand {
    /// Add skills to one category
    Add {
        team: String,
        category: String,
        #[arg(required = true)]
        names: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ScoreCommand {
    /// Set a member's level (0-10) for a skill
    Set {
        team: String,
        member: String,
        skill: String,
        level: String,
    },
    /// Return a member's skill to unscored
    Clear {
        team: String,
        member: String,
        skill: String,
    },
}

#[derive(Parser, Debug)]
#[command(name = "skill-radar")]
#[command(about = "Team competency tracker with radar charts", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file (defaults to ~/.config/skill-radar/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to session file (overrides session_path from config)
    #[arg(short, long, global = true)]
    session: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "info,skill_radar=debug",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Routed through the stderr buffer so log lines don't tear the TUI
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer(std::io::stderr().is_terminal()))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Tui);

    // Init runs before loading config, it creates it
    if let Commands::Init { force } = command {
        let path = match cli.config.clone().map_or_else(skill_radar::config::get_config_path, Ok) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        };
        std::process::exit(commands::report(commands::init_config(&path, force)));
    }

    // Load config
    let config = match skill_radar::config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = skill_radar::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    // Session path: --session, then config, then the default location
    let session_path = match cli
        .session
        .or_else(|| config.session_path.clone())
        .map_or_else(skill_radar::storage::get_session_path, Ok)
    {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Session error: {:#}", e);
            std::process::exit(EXIT_STORAGE);
        }
    };
    tracing::debug!(session = %session_path.display(), "session resolved");

    let ctx = CommandContext::new(session_path, config);

    let result = match command {
        Commands::Tui => return run_tui(ctx).await,
        // Handled before the config was loaded
        Commands::Init { .. } => Ok(commands::EXIT_SUCCESS),
        Commands::Team(TeamCommand::Add { name }) => commands::team_add(&ctx, &name),
        Commands::Team(TeamCommand::Delete { name }) => commands::team_delete(&ctx, &name),
        Commands::Team(TeamCommand::List) => commands::team_list(&ctx),
        Commands::Team(TeamCommand::Show { name }) => commands::team_show(&ctx, &name),
        Commands::Member(MemberCommand::Add { team, names }) => {
            commands::member_add(&ctx, &team, &names)
        }
        Commands::Skill(SkillCommand::Add {
            team,
            category,
            names,
        }) => commands::skill_add(&ctx, &team, &category, &names),
        Commands::Score(ScoreCommand::Set {
            team,
            member,
            skill,
            level,
        }) => commands::score_set(&ctx, &team, &member, &skill, &level),
        Commands::Score(ScoreCommand::Clear {
            team,
            member,
            skill,
        }) => commands::score_clear(&ctx, &team, &member, &skill),
        Commands::Chart {
            team,
            category,
            json,
        } => commands::chart(&ctx, &team, category.as_deref(), json),
        Commands::Export { output, stdout } => commands::export(&ctx, output, stdout),
    };

    std::process::exit(commands::report(result));
}

async fn run_tui(ctx: CommandContext) {
    let roster = match skill_radar::storage::load_session(&ctx.session_path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Session error: {:#}", e);
            std::process::exit(EXIT_STORAGE);
        }
    };

    // Detect the background before raw mode is entered
    let theme = skill_radar::tui::resolve_theme(ctx.config.theme);
    let app = skill_radar::tui::App::new(roster, ctx.session_path, ctx.config, theme);

    if let Err(e) = skill_radar::tui::run_tui(app).await {
        eprintln!("TUI error: {:#}", e);
        std::process::exit(EXIT_STORAGE);
    }
}
