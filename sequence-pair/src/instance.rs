use std::fmt::{Display, Formatter};

use itertools::Itertools;
use tracing::{debug, debug_span, trace};

use crate::digraph::{Cost, Digraph};
use crate::permutation::{invert, Permutations};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Rectangle {
    pub width: u32,
    pub height: u32,
}

impl Rectangle {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Whether this rectangle, on its own, fits inside `container`.
    pub fn fits_inside(&self, container: &Rectangle) -> bool {
        self.width <= container.width && self.height <= container.height
    }

    /// Whether `placed` lies fully inside this rectangle when it is anchored at the origin.
    pub fn contains(&self, placed: &PlacedRectangle) -> bool {
        placed.x_max() <= u64::from(self.width) && placed.y_max() <= u64::from(self.height)
    }
}

impl Display for Rectangle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A rectangle together with the position of its lower left corner.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct PlacedRectangle {
    pub rect: Rectangle,
    pub x_min: u64,
    pub y_min: u64,
}

impl PlacedRectangle {
    pub fn x_max(&self) -> u64 {
        self.x_min + u64::from(self.rect.width)
    }

    pub fn y_max(&self) -> u64 {
        self.y_min + u64::from(self.rect.height)
    }

    /// Whether the open interiors of the two rectangles intersect. Rectangles that only share an edge or
    /// a corner do not intersect.
    pub fn intersects_open(&self, other: &PlacedRectangle) -> bool {
        let intersect_x = self.x_min < other.x_max() && other.x_min < self.x_max();
        let intersect_y = self.y_min < other.y_max() && other.y_min < self.y_max();
        intersect_x && intersect_y
    }
}

/// Placed rectangles, in the same order as the rectangles of the instance.
pub type Solution = Vec<PlacedRectangle>;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Derivative)]
#[derivative(Default)]
pub struct SearchOptions {
    /// Skip a whole outer permutation when one of its constraint graphs has a chain holding more
    /// rectangles than could ever fit side by side. Never changes the result, only the running time.
    #[derivative(Default(value = "true"))]
    pub prune_structures: bool,
}

#[derive(Clone, Copy, Debug)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn extent(self, rectangle: &Rectangle) -> u32 {
        match self {
            Axis::X => rectangle.width,
            Axis::Y => rectangle.height,
        }
    }
}

/// A container and the rectangles that have to be placed in it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Instance {
    container: Rectangle,
    rectangles: Vec<Rectangle>,
    options: SearchOptions,
}

impl Instance {
    pub fn new(container: Rectangle) -> Self {
        Self {
            container,
            rectangles: vec![],
            options: SearchOptions::default(),
        }
    }

    pub fn with_rectangles(container: Rectangle, rectangles: Vec<Rectangle>) -> Self {
        Self {
            container,
            rectangles,
            options: SearchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn add_rectangle(&mut self, rectangle: Rectangle) {
        self.rectangles.push(rectangle);
    }

    pub fn container(&self) -> &Rectangle {
        &self.container
    }

    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Find a placement of all rectangles inside the container such that no two of them overlap, or
    /// return None if there is none.
    ///
    /// Every placement can be described by a sequence pair, so trying all (n!)^2 sequence pairs and
    /// computing the tightest packing for each is exact. It is also exponential; only use this for a
    /// handful of rectangles.
    pub fn place(&self) -> Option<Solution> {
        let span = debug_span!("place", n = self.rectangles.len());
        let _enter = span.enter();

        if let Some(index) = self
            .rectangles
            .iter()
            .position(|rectangle| !rectangle.fits_inside(&self.container))
        {
            debug!(index, "rectangle does not fit into the container on its own");
            return None;
        }
        let total_area: u128 = self.rectangles.iter().map(|r| u128::from(r.area())).sum();
        if total_area > u128::from(self.container.area()) {
            debug!(%total_area, "rectangles cover more area than the container");
            return None;
        }

        let mut search = PlacementSearch::new(self);
        let solution = search.run();
        debug!(
            structures = search.stats.structures,
            pruned_structures = search.stats.pruned_structures,
            evaluated_pairs = search.stats.evaluated_pairs,
            feasible = solution.is_some(),
            "sequence pair search finished"
        );
        solution
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct SearchStats {
    structures: u64,
    pruned_structures: u64,
    evaluated_pairs: u64,
}

/// The constraint graph for one axis. Node k stands for the k-th slot of the current sequence pair,
/// holding whichever rectangle the inner permutation puts there.
struct AxisGraph {
    axis: Axis,
    graph: Digraph,
    container_extent: Cost,
    max_chain: Cost,
}

impl AxisGraph {
    fn new(axis: Axis, instance: &Instance) -> Self {
        let container_extent = axis.extent(&instance.container);
        Self {
            axis,
            graph: Digraph::new(instance.rectangles.len()),
            container_extent: Cost::from(container_extent),
            max_chain: max_chain_length(
                instance.rectangles.iter().map(|rectangle| axis.extent(rectangle)),
                container_extent,
            ),
        }
    }

    /// Whether every chain of the current structure holds at most `max_chain` rectangles.
    fn chains_can_fit(&mut self) -> bool {
        for node in 0..self.graph.num_nodes() {
            self.graph.set_node_weight(node, 1);
        }
        self.graph.compute_longest_paths(self.max_chain).is_some()
    }

    fn assign(&mut self, rectangles: &[Rectangle], assignment: &[usize]) {
        for (slot, &rectangle) in assignment.iter().enumerate() {
            self.graph
                .set_node_weight(slot, Cost::from(self.axis.extent(&rectangles[rectangle])));
        }
    }
}

/// The largest k such that the k smallest extents fit next to each other into `container_extent`. No
/// chain in a feasible constraint graph can hold more rectangles than that.
fn max_chain_length(extents: impl Iterator<Item = u32>, container_extent: u32) -> Cost {
    let mut total: Cost = 0;
    let mut count = 0;
    for extent in extents.sorted_unstable() {
        total += Cost::from(extent);
        if total > Cost::from(container_extent) {
            break;
        }
        count += 1;
    }
    count
}

/// Enumerates sequence pairs as (structure, assignment). Slot k is the k-th position of the first
/// sequence and `structure[k]` its position in the second one. For slots a < b, the rectangle in slot a
/// is west of the one in slot b if structure[a] < structure[b] and south of it otherwise. So both axis
/// graphs only have edges from lower to higher slots, and their edges depend on `structure` alone.
/// `assignment[k]` is the rectangle sitting in slot k and only decides the node weights.
struct PlacementSearch<'a> {
    instance: &'a Instance,
    x: AxisGraph,
    y: AxisGraph,
    stats: SearchStats,
}

impl<'a> PlacementSearch<'a> {
    fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            x: AxisGraph::new(Axis::X, instance),
            y: AxisGraph::new(Axis::Y, instance),
            stats: SearchStats::default(),
        }
    }

    fn run(&mut self) -> Option<Solution> {
        let num_rectangles = self.instance.rectangles.len();
        for structure in Permutations::new(num_rectangles) {
            self.stats.structures += 1;
            self.build_structure(&structure);
            if self.instance.options.prune_structures && !self.structure_can_fit() {
                trace!(?structure, "pruned structure");
                self.stats.pruned_structures += 1;
                continue;
            }
            for assignment in Permutations::new(num_rectangles) {
                self.stats.evaluated_pairs += 1;
                if let Some(solution) = self.evaluate(&assignment) {
                    trace!(?structure, ?assignment, "found placement");
                    return Some(solution);
                }
            }
        }
        None
    }

    fn build_structure(&mut self, structure: &[usize]) {
        self.x.graph.reset();
        self.y.graph.reset();
        for (lower, higher) in (0..structure.len()).tuple_combinations() {
            if structure[lower] < structure[higher] {
                self.x.graph.add_edge(lower, higher);
            } else {
                self.y.graph.add_edge(lower, higher);
            }
        }
    }

    fn structure_can_fit(&mut self) -> bool {
        self.x.chains_can_fit() && self.y.chains_can_fit()
    }

    fn evaluate(&mut self, assignment: &[usize]) -> Option<Solution> {
        let instance = self.instance;
        let rectangles = instance.rectangles();
        self.x.assign(rectangles, assignment);
        let x_min = self.x.graph.compute_longest_paths(self.x.container_extent)?;
        self.y.assign(rectangles, assignment);
        let y_min = self.y.graph.compute_longest_paths(self.y.container_extent)?;

        let slot_of = invert(assignment);
        Some(
            rectangles
                .iter()
                .zip(slot_of)
                .map(|(&rect, slot)| PlacedRectangle {
                    rect,
                    x_min: x_min[slot],
                    y_min: y_min[slot],
                })
                .collect(),
        )
    }
}
