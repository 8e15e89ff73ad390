//models.rs
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{InputField, StoreError};

/// Stable handle for one exercise inside a routine. `0` means "not assigned
/// yet" and only shows up in data written before ids existed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseId(pub u64);

impl ExerciseId {
    pub fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    pub id: String,
    pub name: String,
    pub color_class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    pub exercises: Vec<Exercise>,
}

impl Routine {
    pub fn position_of(&self, id: ExerciseId) -> Option<usize> {
        self.exercises.iter().position(|ex| ex.id == id)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(default)]
    pub id: ExerciseId,
    pub name: String,
    pub sets: u32,
    pub reps: Reps,
}

impl Exercise {
    pub fn new(name: impl Into<String>, sets: u32, reps: Reps) -> Self {
        Exercise {
            id: ExerciseId::default(),
            name: name.into(),
            sets,
            reps,
        }
    }
}

/// Rep target for an exercise: a plain count, free text such as `"30s"`, or
/// one target per set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Reps {
    Count(u32),
    Text(String),
    PerSet(Vec<RepTarget>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RepTarget {
    Count(u32),
    Text(String),
}

/// Stored reps may hold any JSON number (`2.5`, `-1`, ...). Only numbers
/// that fit a count become one; the rest keep their JSON spelling as text.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredTarget {
    Number(serde_json::Number),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredReps {
    Number(serde_json::Number),
    Text(String),
    List(Vec<RepTarget>),
}

fn number_target(n: serde_json::Number) -> RepTarget {
    match n.as_u64().and_then(|v| u32::try_from(v).ok()) {
        Some(count) => RepTarget::Count(count),
        None => RepTarget::Text(n.to_string()),
    }
}

impl<'de> Deserialize<'de> for RepTarget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match StoredTarget::deserialize(deserializer)? {
            StoredTarget::Number(n) => number_target(n),
            StoredTarget::Text(s) => RepTarget::Text(s),
        })
    }
}

impl<'de> Deserialize<'de> for Reps {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match StoredReps::deserialize(deserializer)? {
            StoredReps::Number(n) => match number_target(n) {
                RepTarget::Count(count) => Reps::Count(count),
                RepTarget::Text(text) => Reps::Text(text),
            },
            StoredReps::Text(s) => Reps::Text(s),
            StoredReps::List(targets) => Reps::PerSet(targets),
        })
    }
}

impl RepTarget {
    fn from_segment(segment: &str) -> Self {
        match parse_count(segment) {
            Some(n) => RepTarget::Count(n),
            None => RepTarget::Text(segment.to_string()),
        }
    }
}

impl Reps {
    /// Turns text typed by the user into a rep target.
    ///
    /// Input containing a comma becomes a per-set list: every segment is
    /// trimmed and kept as a number only if the whole segment is numeric.
    /// Anything else becomes a single count when numeric, or stays text.
    pub fn normalize(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.contains(',') {
            Reps::PerSet(raw.split(',').map(|s| RepTarget::from_segment(s.trim())).collect())
        } else {
            match parse_count(raw) {
                Some(n) => Reps::Count(n),
                None => Reps::Text(raw.to_string()),
            }
        }
    }

    pub fn is_mixed(&self) -> bool {
        match self {
            Reps::PerSet(targets) => {
                targets.iter().any(|t| matches!(t, RepTarget::Count(_)))
                    && targets.iter().any(|t| matches!(t, RepTarget::Text(_)))
            }
            _ => false,
        }
    }
}

impl From<u32> for Reps {
    fn from(n: u32) -> Self {
        Reps::Count(n)
    }
}

impl From<&str> for Reps {
    fn from(s: &str) -> Self {
        Reps::Text(s.to_string())
    }
}

impl fmt::Display for RepTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepTarget::Count(n) => write!(f, "{}", n),
            RepTarget::Text(s) => f.write_str(s),
        }
    }
}

/// Renders the value the way the edit field shows it. For anything produced
/// by [`Reps::normalize`], normalizing the rendered text gives it back.
impl fmt::Display for Reps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reps::Count(n) => write!(f, "{}", n),
            Reps::Text(s) => f.write_str(s),
            Reps::PerSet(targets) => {
                for (i, target) in targets.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", target)?;
                }
                Ok(())
            }
        }
    }
}

// Accepts a leading '+'. Digits past u32::MAX are not a count and stay text.
fn parse_count(segment: &str) -> Option<u32> {
    segment.parse().ok()
}

/// Parses a sets field. Only non-negative whole numbers are accepted.
pub fn parse_sets(raw: &str) -> Result<u32, StoreError> {
    let trimmed = raw.trim();
    trimmed.parse::<u32>().map_err(|_| StoreError::InvalidInput {
        field: InputField::Sets,
        reason: format!("'{}' is not a non-negative whole number", trimmed),
    })
}
