//! Single-step moves within a sibling list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use edudash_core::error::AppError;
use edudash_entity::ordering::{OrdUpdate, Ordered};

/// Which neighbour to trade places with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards the start of the list.
    Up,
    /// Towards the end of the list.
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

impl FromStr for Direction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(AppError::validation(format!(
                "Invalid direction: '{s}'. Expected 'up' or 'down'"
            ))),
        }
    }
}

/// The order-key changes a single step produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepPlan {
    /// The entity had `ord == 0` and is placed after every sibling.
    Bootstrap(OrdUpdate),
    /// The entity and its neighbour exchange `ord` values.
    Swap(OrdUpdate, OrdUpdate),
    /// The neighbour shares the entity's `ord`, so exchanging values would
    /// change nothing; every sibling gets a fresh `ord` from 1 with the two
    /// positions exchanged.
    Renumber(Vec<OrdUpdate>),
    /// The entity is already first (up) or last (down).
    Unchanged,
}

impl StepPlan {
    /// Updates to persist, in one transaction.
    pub fn updates(&self) -> Vec<OrdUpdate> {
        match self {
            Self::Bootstrap(update) => vec![*update],
            Self::Swap(a, b) => vec![*a, *b],
            Self::Renumber(updates) => updates.clone(),
            Self::Unchanged => Vec::new(),
        }
    }
}

/// The `ord` placing an item after a sibling whose `ord` is `max`.
///
/// Fails once the key space is exhausted; a bulk reorder renumbers the
/// siblings from zero.
pub fn ord_after(max: i32) -> Result<i32, AppError> {
    max.checked_add(1).ok_or_else(|| {
        AppError::validation("Order key out of range; bulk reorder the siblings to renumber them")
    })
}

/// Plan one step of `target` within `siblings`.
///
/// `siblings` must be in canonical sibling order and contain `target`.
/// The neighbour is chosen by position in that order, never by `ord` value.
pub fn plan_step<T: Ordered>(
    siblings: &[T],
    target: Uuid,
    direction: Direction,
) -> Result<StepPlan, AppError> {
    let position = siblings
        .iter()
        .position(|s| s.id() == target)
        .ok_or_else(|| AppError::not_found("Item not found among its siblings"))?;
    let current = &siblings[position];

    if current.ord() == 0 {
        let max = siblings.iter().map(Ordered::ord).max().unwrap_or(0);
        return Ok(StepPlan::Bootstrap(OrdUpdate::new(target, ord_after(max)?)));
    }

    let neighbour = match direction {
        Direction::Up => position.checked_sub(1),
        Direction::Down => Some(position + 1).filter(|&p| p < siblings.len()),
    };

    Ok(match neighbour {
        Some(p) if siblings[p].ord() == current.ord() => {
            StepPlan::Renumber(renumber_exchanging(siblings, position, p))
        }
        Some(p) => StepPlan::Swap(
            OrdUpdate::new(target, siblings[p].ord()),
            OrdUpdate::new(siblings[p].id(), current.ord()),
        ),
        None => StepPlan::Unchanged,
    })
}

fn renumber_exchanging<T: Ordered>(siblings: &[T], a: usize, b: usize) -> Vec<OrdUpdate> {
    let mut ids: Vec<Uuid> = siblings.iter().map(Ordered::id).collect();
    ids.swap(a, b);
    ids.into_iter()
        .zip(1..)
        .map(|(id, ord)| OrdUpdate::new(id, ord))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use edudash_core::error::ErrorKind;

    #[derive(Debug)]
    struct Item {
        id: Uuid,
        ord: i32,
        created_at: DateTime<Utc>,
    }

    impl Ordered for Item {
        fn id(&self) -> Uuid {
            self.id
        }
        fn ord(&self) -> i32 {
            self.ord
        }
        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }
    }

    fn items(ords: &[i32]) -> Vec<Item> {
        let start = Utc::now();
        ords.iter()
            .enumerate()
            .map(|(i, &ord)| Item {
                id: Uuid::new_v4(),
                ord,
                created_at: start + Duration::seconds(i as i64),
            })
            .collect()
    }

    #[test]
    fn test_unpositioned_goes_to_end_in_either_direction() {
        let list = items(&[0, 3, 7]);
        for direction in [Direction::Up, Direction::Down] {
            let plan = plan_step(&list, list[0].id, direction).unwrap();
            assert_eq!(plan, StepPlan::Bootstrap(OrdUpdate::new(list[0].id, 8)));
        }
    }

    #[test]
    fn test_swap_with_previous() {
        let list = items(&[1, 2, 3]);
        let plan = plan_step(&list, list[1].id, Direction::Up).unwrap();
        assert_eq!(
            plan,
            StepPlan::Swap(OrdUpdate::new(list[1].id, 1), OrdUpdate::new(list[0].id, 2))
        );
        assert_eq!(plan.updates().len(), 2);
    }

    #[test]
    fn test_neighbour_chosen_by_position_not_ord() {
        let list = items(&[2, 10, 40]);
        let plan = plan_step(&list, list[1].id, Direction::Down).unwrap();
        assert_eq!(
            plan,
            StepPlan::Swap(OrdUpdate::new(list[1].id, 40), OrdUpdate::new(list[2].id, 10))
        );
    }

    #[test]
    fn test_boundaries_are_unchanged() {
        let list = items(&[1, 2]);
        assert_eq!(
            plan_step(&list, list[0].id, Direction::Up).unwrap(),
            StepPlan::Unchanged
        );
        assert_eq!(
            plan_step(&list, list[1].id, Direction::Down).unwrap(),
            StepPlan::Unchanged
        );
        assert!(StepPlan::Unchanged.updates().is_empty());
    }

    #[test]
    fn test_equal_ord_neighbours_are_renumbered() {
        let list = items(&[5, 5, 5]);
        let plan = plan_step(&list, list[2].id, Direction::Up).unwrap();
        assert_eq!(
            plan,
            StepPlan::Renumber(vec![
                OrdUpdate::new(list[0].id, 1),
                OrdUpdate::new(list[2].id, 2),
                OrdUpdate::new(list[1].id, 3),
            ])
        );
        assert_eq!(plan.updates().len(), 3);
    }

    #[test]
    fn test_bootstrap_past_max_ord_fails() {
        let list = items(&[0, i32::MAX]);
        let err = plan_step(&list, list[0].id, Direction::Down).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(ord_after(i32::MAX - 1).unwrap(), i32::MAX);
    }

    #[test]
    fn test_target_must_be_listed() {
        let list = items(&[1]);
        let err = plan_step(&list, Uuid::new_v4(), Direction::Up).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("up".parse::<Direction>().unwrap(), Direction::Up);
        assert_eq!("down".parse::<Direction>().unwrap(), Direction::Down);
        assert!("sideways".parse::<Direction>().is_err());
        let json: Direction = serde_json::from_str("\"down\"").unwrap();
        assert_eq!(json, Direction::Down);
    }
}
