use crate::models::{Exercise, RepTarget, Reps, Routine};

fn routine(id: &str, name: &str, info: &str, exercises: Vec<Exercise>) -> Routine {
    Routine {
        id: id.to_string(),
        name: name.to_string(),
        color_class: format!("routine-{}", id),
        info: Some(info.to_string()),
        exercises,
    }
}

fn ex(name: &str, sets: u32, reps: u32) -> Exercise {
    Exercise::new(name, sets, Reps::Count(reps))
}

fn timed(name: &str, sets: u32, reps: &str) -> Exercise {
    Exercise::new(name, sets, Reps::Text(reps.to_string()))
}

/// Built-in routines used on first start and after a reset. Exercise ids are
/// left unassigned; the store numbers them.
pub fn default_routines() -> Vec<Routine> {
    vec![
        routine(
            "rings",
            "Rings Workout",
            "3×30s Ring Supports, 5×1 Skin the Cat, 3×5 Ring Dips, 3×5 Ring Rows, 3×10 Ring Press-ups, 3×10 Ring Squats.",
            vec![
                timed("Ring Supports", 3, "30s"),
                ex("Skin the Cat", 5, 1),
                ex("Ring Dips", 3, 5),
                ex("Ring Rows", 3, 5),
                ex("Ring Press-ups", 3, 10),
                ex("Ring Squats", 3, 10),
            ],
        ),
        routine(
            "park",
            "Park Workout",
            "Circuit includes squats, pull-ups, push-ups, dips, knee raises, and jogging.",
            vec![
                ex("Squats", 1, 10),
                Exercise::new(
                    "Pull-Ups",
                    4,
                    Reps::PerSet(vec![
                        RepTarget::Count(3),
                        RepTarget::Count(3),
                        RepTarget::Count(3),
                        RepTarget::Count(1),
                    ]),
                ),
                ex("Push-Ups", 1, 10),
                ex("Dips", 2, 5),
                ex("Knee Raises", 1, 10),
                timed("Jog", 1, "10 min"),
            ],
        ),
        routine(
            "home",
            "Home Workout",
            "Home workout with press-ups, assisted squats, burpees and planks.",
            vec![
                ex("Press-Ups", 5, 10),
                ex("Assisted Squats", 5, 10),
                ex("Burpees", 5, 10),
                timed("Plank", 5, "1 min"),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_ids_are_unique() {
        let routines = default_routines();
        let ids: HashSet<_> = routines.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), routines.len());
        assert_eq!(routines[0].id, "rings");
    }

    #[test]
    fn test_defaults_are_fresh_copies() {
        let mut a = default_routines();
        a[0].exercises.clear();
        assert_eq!(default_routines()[0].exercises.len(), 6);
    }

    #[test]
    fn test_pull_ups_use_per_set_reps() {
        let park = &default_routines()[1];
        assert_eq!(park.exercises[1].reps.to_string(), "3, 3, 3, 1");
        assert_eq!(park.color_class, "routine-park");
    }
}
