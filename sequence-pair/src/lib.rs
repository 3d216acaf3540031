//! Exact placement of axis-aligned rectangles into a container. Every candidate placement is encoded as a
//! sequence pair, i.e. two permutations of the rectangles, and checked with two longest-path computations
//! over constraint graphs, one per axis.
//!
//! Murata, H., Fujiyoshi, K., Nakatake, S. and Kajitani, Y. "VLSI module placement based on
//! rectangle-packing by the sequence-pair." IEEE Transactions on CAD 15.12 (1996).
#[macro_use]
extern crate derivative;

pub mod digraph;
pub mod fixed_max_vec;
pub mod instance;
pub mod output;
pub mod parser;
pub mod permutation;
pub mod validation;

pub use instance::{Instance, PlacedRectangle, Rectangle, SearchOptions, Solution};
