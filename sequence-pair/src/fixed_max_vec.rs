/// A buffer whose capacity is fixed when it is created. Elements can only be appended, or all dropped at
/// once with `reset`, so the backing storage is allocated exactly once and reused afterwards.
#[derive(Clone, Debug)]
pub struct FixedMaxVec<T>
where
    T: Copy + Default,
{
    storage: Vec<T>,
    len: usize,
}

impl<T> FixedMaxVec<T>
where
    T: Copy + Default,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            storage: vec![T::default(); capacity],
            len: 0,
        }
    }

    /// Panics if the buffer is full.
    pub fn push(&mut self, value: T) {
        assert!(
            self.len < self.storage.len(),
            "FixedMaxVec capacity {} exceeded",
            self.storage.len()
        );
        self.storage[self.len] = value;
        self.len += 1;
    }

    pub fn reset(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.storage[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}
