use crate::instance::PlacedRectangle;

pub const NO_FEASIBLE_PLACEMENT: &str = "no feasible placement exists";

/// One `x_min y_min` line per rectangle, in input order.
pub fn format_solution(solution: &[PlacedRectangle]) -> String {
    solution
        .iter()
        .map(|placed| format!("{} {}\n", placed.x_min, placed.y_min))
        .collect()
}
