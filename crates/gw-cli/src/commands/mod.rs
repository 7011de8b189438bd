pub mod cast;
pub mod check;
pub mod damage;
pub mod destiny;
pub mod initiative;
pub mod new;
pub mod pool;
pub mod power;
pub mod shapeshift;
pub mod show;

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use colored::Colorize;

use gw_mechanics::engine::{Collaborators, RollEngine};
use gw_mechanics::host::{MemoryActorStore, StaticTargets};
use gw_mechanics::{ActivityRecord, ActorId, ActorSheet, Classification, EngineConfig, Journal, PoolKind};

use crate::prompt::TerminalPrompter;

/// Global options shared by every command.
pub struct Context {
    pub actors: PathBuf,
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub journal: Option<PathBuf>,
}

/// An engine wired to the actors file, the terminal and a fresh journal.
pub struct Session {
    actors_path: PathBuf,
    journal_path: Option<PathBuf>,
    store: Arc<MemoryActorStore>,
    journal: Arc<Journal>,
    pub engine: RollEngine,
}

impl Session {
    /// Load actors and config. `targets` are the defense ratings of the
    /// selected opponents.
    pub fn open(ctx: &Context, targets: Vec<i32>) -> Result<Self, String> {
        let config = load_config(ctx)?;
        let store = Arc::new(MemoryActorStore::from_sheets(load_actors(&ctx.actors)?));
        let journal = Arc::new(Journal::new());
        let host = Collaborators {
            actors: store.clone(),
            targets: Arc::new(StaticTargets::new(targets)),
            prompter: Arc::new(TerminalPrompter::default()),
            log: journal.clone(),
        };
        Ok(Self {
            actors_path: ctx.actors.clone(),
            journal_path: ctx.journal.clone(),
            store,
            journal,
            engine: RollEngine::new(config, host),
        })
    }

    /// Print what was posted, append it to the journal file, and save the
    /// actors.
    pub fn finish(self) -> Result<(), String> {
        for record in self.journal.entries() {
            print_record(&record);
        }
        if let Some(path) = &self.journal_path {
            append_journal(path, &self.journal)?;
        }
        save_actors(&self.actors_path, &self.store.snapshot())
    }
}

/// Load the actors file. A missing file is an empty table.
pub fn load_actors(path: &Path) -> Result<BTreeMap<ActorId, ActorSheet>, String> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let text = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&text).map_err(|e| format!("invalid actors file {}: {e}", path.display()))
}

/// Write the actors file.
pub fn save_actors(path: &Path, actors: &BTreeMap<ActorId, ActorSheet>) -> Result<(), String> {
    let json = serde_json::to_string_pretty(actors).map_err(|e| e.to_string())?;
    fs::write(path, json).map_err(|e| format!("failed to write {}: {e}", path.display()))
}

/// Load the config file if given, then apply `--seed`.
fn load_config(ctx: &Context) -> Result<EngineConfig, String> {
    let mut config = match &ctx.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
            serde_json::from_str(&text)
                .map_err(|e| format!("invalid config {}: {e}", path.display()))?
        }
        None => EngineConfig::default(),
    };
    if let Some(seed) = ctx.seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

fn append_journal(path: &Path, journal: &Journal) -> Result<(), String> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("failed to open {}: {e}", path.display()))?;
    file.write_all(journal.export_markdown().as_bytes())
        .map_err(|e| format!("failed to write {}: {e}", path.display()))
}

fn print_record(record: &ActivityRecord) {
    let line = record.to_string();
    let line = match record.classification() {
        Some(Classification::CriticalSuccess) => line.green().bold(),
        Some(Classification::CriticalFailure) => line.red().bold(),
        Some(c) if c.is_success() => line.green(),
        Some(_) => line.red(),
        None => line.normal(),
    };
    println!("  {line}");
}

/// Parse a pool name given on the command line.
pub fn parse_pool(s: &str) -> Result<PoolKind, String> {
    PoolKind::parse(s).ok_or_else(|| format!("unknown pool '{s}' (expected arcane, physical or mental)"))
}
