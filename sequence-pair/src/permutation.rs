/// An ordered sequence of the integers 0..n, each used exactly once.
pub type Permutation = Vec<usize>;

enum PermutationsState {
    Start,
    Running,
    End,
}

/// Iterate over all permutations of {0, ..., n - 1} in increasing lexicographic order, starting at the
/// identity and ending at the reverse-sorted permutation. There is one (empty) permutation of zero
/// elements. To start over, create a new Permutations.
pub struct Permutations {
    state: PermutationsState,
    current: Permutation,
    remaining: Option<usize>,
}

impl Permutations {
    pub fn new(num_elements: usize) -> Self {
        Self {
            state: PermutationsState::Start,
            current: (0..num_elements).collect(),
            remaining: factorial(num_elements),
        }
    }

    fn emit(&mut self) -> Option<Permutation> {
        self.remaining = self.remaining.map(|remaining| remaining.saturating_sub(1));
        Some(self.current.clone())
    }
}

impl Iterator for Permutations {
    type Item = Permutation;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            PermutationsState::Start => {
                self.state = PermutationsState::Running;
                self.emit()
            }
            PermutationsState::Running => {
                if next_permutation(&mut self.current) {
                    self.emit()
                } else {
                    self.state = PermutationsState::End;
                    None
                }
            }
            PermutationsState::End => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            PermutationsState::End => (0, Some(0)),
            _ => match self.remaining {
                Some(remaining) => (remaining, Some(remaining)),
                None => (usize::MAX, None),
            },
        }
    }
}

impl std::iter::FusedIterator for Permutations {}

/// n!, or None if it does not fit in a usize.
fn factorial(n: usize) -> Option<usize> {
    (1..=n).try_fold(1usize, |acc, k| acc.checked_mul(k))
}

/// Rearrange `order` into the lexicographically next permutation. Returns false and leaves `order`
/// untouched if it is already the last one.
fn next_permutation(order: &mut [usize]) -> bool {
    // Everything after the pivot is non-increasing.
    let pivot = match order.windows(2).rposition(|pair| pair[0] < pair[1]) {
        Some(pivot) => pivot,
        None => return false,
    };
    let mut successor = order.len() - 1;
    while order[successor] <= order[pivot] {
        successor -= 1;
    }
    order.swap(pivot, successor);
    order[pivot + 1..].reverse();
    true
}

/// Inverse of a permutation, i.e. `inverse[permutation[i]] == i`.
pub fn invert(permutation: &[usize]) -> Permutation {
    let mut inverse = vec![0; permutation.len()];
    for (index, &value) in permutation.iter().enumerate() {
        inverse[value] = index;
    }
    inverse
}
