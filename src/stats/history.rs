/// Sizes of the most recent processed fields, with a running total so the
/// mean costs nothing to read.
pub struct FieldHistory {
    sizes: Vec<usize>,
    capacity: usize,
    next: usize,
    total: usize,
}

impl FieldHistory {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "FieldHistory capacity must be non-zero");
        Self {
            sizes: Vec::with_capacity(capacity),
            capacity,
            next: 0,
            total: 0,
        }
    }

    /// Record a field size, overwriting the oldest once full.
    pub fn record(&mut self, size: usize) {
        if self.sizes.len() < self.capacity {
            self.sizes.push(size);
        } else {
            self.total -= self.sizes[self.next];
            self.sizes[self.next] = size;
        }
        self.total += size;
        self.next = (self.next + 1) % self.capacity;
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Most recently recorded size.
    pub fn latest(&self) -> Option<usize> {
        if self.sizes.is_empty() {
            return None;
        }
        let idx = (self.next + self.capacity - 1) % self.capacity;
        self.sizes.get(idx).copied()
    }

    /// Largest size still in the window.
    pub fn peak(&self) -> Option<usize> {
        self.sizes.iter().copied().max()
    }

    pub fn mean(&self) -> f64 {
        if self.sizes.is_empty() {
            return 0.0;
        }
        self.total as f64 / self.sizes.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_drops_oldest() {
        let mut history = FieldHistory::new(3);
        assert!(history.is_empty());
        assert_eq!(history.latest(), None);
        assert_eq!(history.mean(), 0.0);

        for size in [10, 20, 30, 40, 50] {
            history.record(size);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.latest(), Some(50));
        assert_eq!(history.peak(), Some(50));
        assert_eq!(history.mean(), 40.0);
    }

    #[test]
    fn latest_before_wrap() {
        let mut history = FieldHistory::new(4);
        history.record(7);
        history.record(3);
        assert_eq!(history.latest(), Some(3));
        assert_eq!(history.peak(), Some(7));
        assert_eq!(history.mean(), 5.0);
    }
}
