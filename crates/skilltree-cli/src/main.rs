use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use skilltree_core::{Config, DefaultCatalog, FileStore, Session};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod render;

use render::{achievement_line, progress_bar, skill_line, TerminalSink};

#[derive(Parser)]
#[command(name = "skilltree")]
#[command(about = "Level up skills, unlock achievements", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show player level and every skill
    Status,
    /// Award experience to a skill
    Train {
        /// Skill id, e.g. "java"
        skill: String,
        /// Experience to award (defaults to progression.exp_per_action)
        #[arg(short, long)]
        amount: Option<u32>,
    },
    /// List achievements
    Achievements,
    /// Discard all progress
    Reset,
    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;
    debug!(data_dir = %config.storage.data_dir, "loaded configuration");

    let store = FileStore::with_config(&config.storage);
    let mut session = Session::open(store, DefaultCatalog, &config);

    match cli.command {
        Commands::Status => {
            let state = session.state();
            let player = state.player_progress();
            println!(
                "🎮 Developer Lv.{}  {} EXP  {}",
                player.level,
                state.total_exp,
                progress_bar(player.current_exp, player.next_level_exp)
            );
            if !state.is_valid() {
                println!("State looks damaged. Run 'skilltree reset' to start over.");
            }

            for (category, skills) in state.skills_by_category() {
                let (unlocked, total) = state.category_progress(category);
                println!();
                println!("{} ({}/{})", category.display_name(), unlocked, total);
                for skill in skills {
                    println!("{}", skill_line(skill));
                }
            }
        }
        Commands::Train { skill, amount } => {
            let mut sink = TerminalSink::default();
            let amount = amount.unwrap_or(session.exp_per_action());
            let outcome = session.apply_experience(&skill, amount, &mut sink)?;

            if let Some(node) = outcome.state.skill(&skill) {
                println!("+{} EXP → {}", amount, skill_line(node).trim_start());
            }
            if outcome.levels_gained > 0 {
                println!("⬆ {} level(s) gained", outcome.levels_gained);
            }
            for id in &outcome.unlocked_skills {
                if let Some(node) = outcome.state.skill(id) {
                    println!("🔓 Unlocked {} {}", node.icon, node.name);
                }
            }
            debug!(shown = sink.shown, "achievement notifications");
        }
        Commands::Achievements => {
            let state = session.state();
            let (unlocked, total) = state.achievement_progress();
            println!("🏆 UNLOCKED: {} / {}", unlocked, total);
            println!("{}", progress_bar(unlocked as u64, total as u64));
            println!();
            for achievement in state.achievements.values() {
                println!("{}", achievement_line(achievement));
            }
        }
        Commands::Reset => {
            session.reset()?;
            println!("Skill tree reset to its starting state.");
        }
        Commands::Config => {
            print!("{}", config.to_toml_string());
        }
    }

    Ok(())
}
