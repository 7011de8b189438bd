//! CLI frontend for the Grimwood roll engine.

mod commands;
mod prompt;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use commands::Context;

/// Largest boon or bane count accepted on the command line.
const MAX_MODIFIER: i64 = 12;

#[derive(Parser)]
#[command(
    name = "gw",
    about = "Grimwood: resolve checks, damage and destiny for a table of actors",
    version,
    propagate_version = true
)]
struct Cli {
    /// JSON file holding the actor sheets
    #[arg(short, long, global = true, default_value = "actors.json")]
    actors: PathBuf,

    /// JSON file with engine settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// RNG seed for reproducible rolls (overrides the config file)
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Append every posted record to this markdown journal
    #[arg(short, long, global = true)]
    journal: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an actor with a default sheet
    New {
        /// Actor id
        actor: String,

        /// Display name
        name: String,
    },

    /// Show actor pools and destiny
    Show {
        /// Actor id (default: every actor)
        actor: Option<String>,
    },

    /// Roll a check, weapon attack or spell
    Check {
        /// Actor id
        actor: String,

        /// Pool points are spent from: arcane, physical, mental
        #[arg(short, long, default_value = "physical")]
        pool: String,

        /// Action kind: weapon, attack, cast
        #[arg(short, long, default_value = "attack")]
        kind: String,

        /// Boons (positive) or banes (negative) on the action
        #[arg(
            short,
            long,
            default_value = "0",
            allow_hyphen_values = true,
            value_parser = clap::value_parser!(i32).range(-MAX_MODIFIER..=MAX_MODIFIER)
        )]
        modifier: i32,

        /// Point cost of a spell
        #[arg(long)]
        cost: Option<u32>,

        /// Defense rating of a selected opponent (repeatable)
        #[arg(short, long = "target")]
        targets: Vec<i32>,

        /// Label for the activity log
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Discharge a wand or read a scroll
    Cast {
        /// Actor id
        actor: String,

        /// Item kind
        #[arg(short, long, value_enum)]
        kind: ItemKind,

        /// Arcane points the item costs
        #[arg(long, default_value = "0")]
        cost: u32,

        /// Damage formula, e.g. 2d6+1
        #[arg(short, long)]
        formula: String,

        /// Label for the activity log
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Roll damage
    Damage {
        /// Actor id
        actor: String,

        /// Damage formula, e.g. 1d8+2
        formula: String,

        /// Add the actor's power die
        #[arg(short, long)]
        extra: bool,

        /// Critical hit: double the base dice
        #[arg(long)]
        critical: bool,
    },

    /// Roll initiative
    Init {
        /// Actor id
        actor: String,
    },

    /// Roll or manage destiny dice
    Destiny {
        /// Actor id
        actor: String,

        /// What to do
        #[arg(value_enum)]
        action: DestinyAction,
    },

    /// Roll the actor's power die
    Power {
        /// Actor id
        actor: String,
    },

    /// Reset or adjust a pool
    Pool {
        /// Actor id
        actor: String,

        /// Pool: arcane, physical, mental
        pool: String,

        #[command(subcommand)]
        action: PoolAction,
    },

    /// Toggle shapeshift
    Shapeshift {
        /// Actor id
        actor: String,
    },
}

/// Items that skip the check and roll damage.
#[derive(Clone, Copy, ValueEnum)]
enum ItemKind {
    Wand,
    Scroll,
}

/// Destiny subcommands.
#[derive(Clone, Copy, ValueEnum)]
enum DestinyAction {
    Roll,
    Add,
    Remove,
    Save,
    Reset,
}

#[derive(Subcommand)]
enum PoolAction {
    /// Refill the pool to its base
    Reset,
    /// Move the current value up or down
    Adjust {
        /// Points to add (negative to remove)
        #[arg(allow_hyphen_values = true)]
        delta: i32,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let ctx = Context {
        actors: cli.actors,
        config: cli.config,
        seed: cli.seed,
        journal: cli.journal,
    };

    let result = match cli.command {
        Commands::New { actor, name } => commands::new::run(&ctx, &actor, &name),
        Commands::Show { actor } => commands::show::run(&ctx, actor.as_deref()),
        Commands::Check {
            actor,
            pool,
            kind,
            modifier,
            cost,
            targets,
            label,
        } => {
            let args = commands::check::CheckArgs {
                pool,
                kind,
                modifier,
                cost,
                targets,
                label,
            };
            commands::check::run(&ctx, &actor, args).await
        }
        Commands::Cast {
            actor,
            kind,
            cost,
            formula,
            label,
        } => {
            let scroll = matches!(kind, ItemKind::Scroll);
            commands::cast::run(&ctx, &actor, scroll, cost, &formula, label).await
        }
        Commands::Damage {
            actor,
            formula,
            extra,
            critical,
        } => commands::damage::run(&ctx, &actor, &formula, extra, critical).await,
        Commands::Init { actor } => commands::initiative::run(&ctx, &actor).await,
        Commands::Destiny { actor, action } => {
            let action = match action {
                DestinyAction::Roll => commands::destiny::Action::Roll,
                DestinyAction::Add => commands::destiny::Action::Add,
                DestinyAction::Remove => commands::destiny::Action::Remove,
                DestinyAction::Save => commands::destiny::Action::Save,
                DestinyAction::Reset => commands::destiny::Action::Reset,
            };
            commands::destiny::run(&ctx, &actor, action).await
        }
        Commands::Power { actor } => commands::power::run(&ctx, &actor).await,
        Commands::Pool {
            actor,
            pool,
            action,
        } => {
            let delta = match action {
                PoolAction::Reset => None,
                PoolAction::Adjust { delta } => Some(delta),
            };
            commands::pool::run(&ctx, &actor, &pool, delta).await
        }
        Commands::Shapeshift { actor } => commands::shapeshift::run(&ctx, &actor).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
