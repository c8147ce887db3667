use std::collections::VecDeque;

/// Fixed-length window of an entity's most recent positions.
///
/// Index 0 is the newest point, the back is the oldest. The length never
/// changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: VecDeque<(f32, f32)>,
}

impl Trail {
    /// Creates a trail of `len` points all sitting at `(x, y)`.
    pub fn new(len: usize, x: f32, y: f32) -> Self {
        let len = len.max(1);
        Self {
            points: std::iter::repeat_n((x, y), len).collect(),
        }
    }

    /// Drops the oldest point and records `(x, y)` as the newest.
    pub fn push(&mut self, x: f32, y: f32) {
        self.points.pop_back();
        self.points.push_front((x, y));
    }

    pub fn oldest(&self) -> (f32, f32) {
        // Never empty: `new` clamps the length to at least one point.
        self.points.back().copied().unwrap_or_default()
    }

    pub fn newest(&self) -> (f32, f32) {
        self.points.front().copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(f32, f32)> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trail_is_filled_with_origin() {
        let trail = Trail::new(3, 10.0, 20.0);
        assert_eq!(trail.len(), 3);
        assert!(trail.iter().all(|&p| p == (10.0, 20.0)));
    }

    #[test]
    fn test_push_slides_window() {
        let mut trail = Trail::new(3, 0.0, 0.0);
        trail.push(1.0, 1.0);
        trail.push(2.0, 2.0);
        assert_eq!(trail.len(), 3);
        assert_eq!(trail.newest(), (2.0, 2.0));
        assert_eq!(trail.oldest(), (0.0, 0.0));

        trail.push(3.0, 3.0);
        assert_eq!(trail.oldest(), (1.0, 1.0));
        assert_eq!(trail.len(), 3);
    }

    #[test]
    fn test_zero_length_is_clamped() {
        let trail = Trail::new(0, 5.0, 5.0);
        assert_eq!(trail.len(), 1);
        assert!(!trail.is_empty());
    }
}
