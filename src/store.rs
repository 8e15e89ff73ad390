//! The routines collection and every operation that changes it.
//!
//! `RoutineStore` owns the in-memory collection and its storage backend.
//! Each mutation is applied in memory and then the whole collection is
//! written back under [`STORAGE_KEY`]. Nothing is written incrementally.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, info, warn};

use crate::error::{InputField, Result, StoreError};
use crate::models::{parse_sets, Exercise, ExerciseId, Reps, Routine};
use crate::routines::default_routines;
use crate::storage::{KeyValueStore, STORAGE_KEY};

/// Addresses one exercise within a routine, either by its current position
/// or by the id it was given when created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExerciseSelector {
    Index(usize),
    Id(ExerciseId),
}

impl From<usize> for ExerciseSelector {
    fn from(index: usize) -> Self {
        ExerciseSelector::Index(index)
    }
}

impl From<ExerciseId> for ExerciseSelector {
    fn from(id: ExerciseId) -> Self {
        ExerciseSelector::Id(id)
    }
}

impl fmt::Display for ExerciseSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseSelector::Index(i) => write!(f, "at position {}", i),
            ExerciseSelector::Id(id) => write!(f, "with id {}", id),
        }
    }
}

/// Stored ids above this are renumbered, which keeps the id counter far
/// from `u64::MAX`.
const MAX_KEPT_EXERCISE_ID: u64 = u32::MAX as u64;

pub struct RoutineStore<S> {
    storage: S,
    routines: Vec<Routine>,
    next_exercise_id: u64,
}

impl<S: KeyValueStore> RoutineStore<S> {
    /// Loads the collection once and takes ownership of the storage.
    pub fn open(storage: S) -> Self {
        let mut store = RoutineStore {
            storage,
            routines: Vec::new(),
            next_exercise_id: 1,
        };
        let routines = store.load();
        store.install(routines);
        store
    }

    /// Reads the stored collection, or a fresh copy of the defaults when
    /// nothing usable is stored. Never fails.
    pub fn load(&self) -> Vec<Routine> {
        let raw = match self.storage.get(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored routines, using defaults");
                return default_routines();
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stored routines, using defaults");
                return default_routines();
            }
        };

        let routines: Vec<Routine> = match serde_json::from_str(&raw) {
            Ok(routines) => routines,
            Err(e) => {
                warn!(error = %e, "Stored routines are malformed, using defaults");
                return default_routines();
            }
        };

        if let Some(dup) = first_duplicate_id(&routines) {
            warn!(routine = %dup, "Stored routines repeat an id, using defaults");
            return default_routines();
        }

        debug!(count = routines.len(), "Loaded stored routines");
        routines
    }

    /// Replaces the in-memory collection with whatever storage holds now.
    pub fn reload(&mut self) {
        let routines = self.load();
        self.install(routines);
    }

    /// Replaces the whole collection and writes it to storage.
    pub fn save(&mut self, routines: Vec<Routine>) -> Result<()> {
        if let Some(dup) = first_duplicate_id(&routines) {
            return Err(StoreError::DuplicateRoutine(dup.to_string()));
        }
        self.install(routines);
        self.persist()
    }

    pub fn routines(&self) -> &[Routine] {
        &self.routines
    }

    pub fn routine(&self, id: &str) -> Option<&Routine> {
        self.routines.iter().find(|r| r.id == id)
    }

    /// `(id, name)` pairs in display order, for a routine picker.
    pub fn choices(&self) -> impl Iterator<Item = (&str, &str)> {
        self.routines.iter().map(|r| (r.id.as_str(), r.name.as_str()))
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Sets the set count from raw field text. Invalid text leaves the
    /// exercise untouched.
    pub fn set_sets(
        &mut self,
        routine_id: &str,
        exercise: impl Into<ExerciseSelector>,
        raw: &str,
    ) -> Result<u32> {
        let sets = parse_sets(raw)?;
        let ex = self.exercise_mut(routine_id, exercise.into())?;
        ex.sets = sets;
        debug!(routine = routine_id, exercise = %ex.name, sets, "Updated sets");
        self.persist()?;
        Ok(sets)
    }

    /// Sets the reps from raw field text. Any text is accepted.
    pub fn set_reps(
        &mut self,
        routine_id: &str,
        exercise: impl Into<ExerciseSelector>,
        raw: &str,
    ) -> Result<Reps> {
        let reps = Reps::normalize(raw);
        let ex = self.exercise_mut(routine_id, exercise.into())?;
        ex.reps = reps.clone();
        debug!(routine = routine_id, exercise = %ex.name, reps = %reps, "Updated reps");
        self.persist()?;
        Ok(reps)
    }

    /// Appends a new exercise to the routine and returns its id.
    pub fn add_exercise(
        &mut self,
        routine_id: &str,
        name: &str,
        sets: &str,
        reps: &str,
    ) -> Result<ExerciseId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::invalid(InputField::Name, "exercise name is empty"));
        }
        let sets = parse_sets(sets)?;
        let reps = reps.trim();
        if reps.is_empty() {
            return Err(StoreError::invalid(InputField::Reps, "reps are empty"));
        }

        let index = self.routine_index(routine_id)?;
        let id = self.allocate_id();
        let mut exercise = Exercise::new(name, sets, Reps::normalize(reps));
        exercise.id = id;
        self.routines[index].exercises.push(exercise);
        info!(routine = routine_id, exercise = name, %id, "Added exercise");
        self.persist()?;
        Ok(id)
    }

    /// Removes one exercise. Later exercises move up one position.
    pub fn delete_exercise(
        &mut self,
        routine_id: &str,
        exercise: impl Into<ExerciseSelector>,
    ) -> Result<Exercise> {
        let selector = exercise.into();
        let index = self.routine_index(routine_id)?;
        let position = self.position(index, selector)?;
        let removed = self.routines[index].exercises.remove(position);
        info!(routine = routine_id, exercise = %removed.name, "Deleted exercise");
        self.persist()?;
        Ok(removed)
    }

    /// Drops all edits and goes back to the built-in routines.
    pub fn reset(&mut self) -> Result<()> {
        self.install(default_routines());
        info!("Reset routines to defaults");
        self.persist()
    }

    fn install(&mut self, mut routines: Vec<Routine>) {
        let usable = |id: ExerciseId| id.is_assigned() && id.0 <= MAX_KEPT_EXERCISE_ID;
        let highest = routines
            .iter()
            .flat_map(|r| r.exercises.iter())
            .map(|ex| ex.id)
            .filter(|id| usable(*id))
            .map(|id| id.0)
            .max()
            .unwrap_or(0);
        // never hand out an id twice in one session, even across reset/reload
        let mut next = self.next_exercise_id.max(highest + 1);

        let mut seen = HashSet::new();
        for routine in &mut routines {
            seen.clear();
            for ex in &mut routine.exercises {
                if !usable(ex.id) || !seen.insert(ex.id) {
                    if ex.id.0 > MAX_KEPT_EXERCISE_ID {
                        warn!(routine = %routine.id, exercise = %ex.name, id = ex.id.0, "Exercise id out of range, renumbering");
                    }
                    ex.id = ExerciseId(next);
                    seen.insert(ex.id);
                    next = next.saturating_add(1);
                }
            }
        }
        self.routines = routines;
        self.next_exercise_id = next;
    }

    fn allocate_id(&mut self) -> ExerciseId {
        let id = ExerciseId(self.next_exercise_id);
        self.next_exercise_id = self.next_exercise_id.saturating_add(1);
        id
    }

    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.routines)?;
        if let Err(e) = self.storage.set(STORAGE_KEY, &json) {
            warn!(error = %e, "Failed to persist routines");
            return Err(e.into());
        }
        debug!(count = self.routines.len(), "Persisted routines");
        Ok(())
    }

    fn routine_index(&self, routine_id: &str) -> Result<usize> {
        self.routines
            .iter()
            .position(|r| r.id == routine_id)
            .ok_or_else(|| StoreError::UnknownRoutine(routine_id.to_string()))
    }

    fn position(&self, routine: usize, selector: ExerciseSelector) -> Result<usize> {
        let r = &self.routines[routine];
        let found = match selector {
            ExerciseSelector::Index(i) if i < r.exercises.len() => Some(i),
            ExerciseSelector::Index(_) => None,
            ExerciseSelector::Id(id) => r.position_of(id),
        };
        found.ok_or_else(|| StoreError::UnknownExercise {
            routine: r.id.clone(),
            selector,
        })
    }

    fn exercise_mut(&mut self, routine_id: &str, selector: ExerciseSelector) -> Result<&mut Exercise> {
        let index = self.routine_index(routine_id)?;
        let position = self.position(index, selector)?;
        Ok(&mut self.routines[index].exercises[position])
    }
}

fn first_duplicate_id(routines: &[Routine]) -> Option<&str> {
    let mut seen = HashSet::new();
    routines
        .iter()
        .map(|r| r.id.as_str())
        .find(|id| !seen.insert(*id))
}
