use itertools::Itertools;
use thiserror::Error;

use crate::instance::{PlacedRectangle, Rectangle};

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ValidationError {
    #[error("expected {expected} placed rectangles, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("rectangle {index} is {expected} but was placed as {actual}")]
    ChangedExtents {
        index: usize,
        expected: Rectangle,
        actual: Rectangle,
    },

    #[error("rectangle {index} at ({x_min}, {y_min}) is not inside the {container} container")]
    OutsideContainer {
        index: usize,
        x_min: u64,
        y_min: u64,
        container: Rectangle,
    },

    #[error("rectangles {first} and {second} overlap")]
    Overlap { first: usize, second: usize },
}

/// Check that `solution` places each of `rectangles`, in order and with unchanged extents, inside
/// `container` without any two of them overlapping. Reports the first problem found.
pub fn validate_solution(
    container: &Rectangle,
    rectangles: &[Rectangle],
    solution: &[PlacedRectangle],
) -> Result<(), ValidationError> {
    if rectangles.len() != solution.len() {
        return Err(ValidationError::WrongLength {
            expected: rectangles.len(),
            actual: solution.len(),
        });
    }
    for (index, (expected, placed)) in rectangles.iter().zip(solution).enumerate() {
        if *expected != placed.rect {
            return Err(ValidationError::ChangedExtents {
                index,
                expected: *expected,
                actual: placed.rect,
            });
        }
        if !container.contains(placed) {
            return Err(ValidationError::OutsideContainer {
                index,
                x_min: placed.x_min,
                y_min: placed.y_min,
                container: *container,
            });
        }
    }
    // TODO replace O(n^2) with a sweep if this is ever used on large solutions
    for ((first, a), (second, b)) in solution.iter().enumerate().tuple_combinations() {
        if a.intersects_open(b) {
            return Err(ValidationError::Overlap { first, second });
        }
    }
    Ok(())
}
