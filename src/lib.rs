//! Workout routine editor
//!
//! Keeps a small set of named routines (exercises with sets and reps),
//! normalizes what the user types into typed rep targets, and persists the
//! whole collection to a key-value storage after every change.

pub mod app;
pub mod cli;
pub mod error;
pub mod models;
pub mod routines;
pub mod storage;
pub mod store;
pub mod theme;

pub use app::RoutineApp;
pub use error::{InputField, StorageError, StoreError};
pub use models::{Exercise, ExerciseId, RepTarget, Reps, Routine};
pub use routines::default_routines;
pub use storage::{FileStorage, KeyValueStore, MemoryStorage, STORAGE_KEY};
pub use store::{ExerciseSelector, RoutineStore};
