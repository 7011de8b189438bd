//! In-memory host adapters.
//!
//! Used by the terminal host and by tests; a real tabletop plugs its own
//! document model in behind the same traits.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::dice::Die;
use crate::error::{MechError, MechResult};
use crate::ports::{ActorStore, TargetSelector};
use crate::sheet::{ActorId, ActorSheet, FieldPath};

/// Actor sheets held in memory.
#[derive(Debug, Default)]
pub struct MemoryActorStore {
    actors: Mutex<BTreeMap<ActorId, ActorSheet>>,
}

impl MemoryActorStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from existing sheets.
    pub fn from_sheets(sheets: BTreeMap<ActorId, ActorSheet>) -> Self {
        Self {
            actors: Mutex::new(sheets),
        }
    }

    /// Add or replace an actor.
    pub fn insert(&self, id: impl Into<ActorId>, sheet: ActorSheet) {
        self.lock().insert(id.into(), sheet);
    }

    /// A copy of one actor's sheet.
    pub fn get(&self, id: &ActorId) -> Option<ActorSheet> {
        self.lock().get(id).cloned()
    }

    /// A copy of every sheet.
    pub fn snapshot(&self) -> BTreeMap<ActorId, ActorSheet> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<ActorId, ActorSheet>> {
        self.actors.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_actor<T>(&self, id: &ActorId, f: impl FnOnce(&mut ActorSheet) -> T) -> MechResult<T> {
        let mut actors = self.lock();
        let sheet = actors
            .get_mut(id)
            .ok_or_else(|| MechError::UnknownActor(id.to_string()))?;
        Ok(f(sheet))
    }
}

#[async_trait]
impl ActorStore for MemoryActorStore {
    async fn name(&self, actor: &ActorId) -> MechResult<String> {
        self.with_actor(actor, |sheet| sheet.name.clone())
    }

    async fn power_die(&self, actor: &ActorId) -> MechResult<Die> {
        self.with_actor(actor, |sheet| sheet.power_die)
    }

    async fn read(&self, actor: &ActorId, path: FieldPath) -> MechResult<i32> {
        self.with_actor(actor, |sheet| sheet.get(path))
    }

    async fn write(&self, actor: &ActorId, path: FieldPath, value: i32) -> MechResult<()> {
        self.with_actor(actor, |sheet| sheet.set(path, value))
    }
}

/// A fixed selection of opposing defense ratings.
#[derive(Debug, Clone, Default)]
pub struct StaticTargets {
    ratings: Vec<i32>,
}

impl StaticTargets {
    /// Nothing selected.
    pub fn none() -> Self {
        Self::default()
    }

    /// Select targets with these defense ratings.
    pub fn new(ratings: impl IntoIterator<Item = i32>) -> Self {
        Self {
            ratings: ratings.into_iter().collect(),
        }
    }
}

#[async_trait]
impl TargetSelector for StaticTargets {
    async fn current(&self) -> MechResult<Vec<i32>> {
        Ok(self.ratings.clone())
    }
}
