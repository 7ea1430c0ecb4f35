//! Playlist traversal order.
//!
//! Sequential mode walks indices modulo the playlist length. Shuffle mode walks
//! a random permutation of the same indices, wrapping at both ends.

use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaylistCursor {
    len: usize,
    index: usize,
    shuffle: bool,
    order: Vec<usize>,
    order_pos: usize,
}

impl PlaylistCursor {
    /// Build a cursor for a playlist of `len` songs positioned at `index`.
    ///
    /// A fresh permutation is always drawn so that turning shuffle on later
    /// has an order ready even if the caller never regenerates it.
    pub fn new<R: Rng + ?Sized>(len: usize, index: usize, shuffle: bool, rng: &mut R) -> Self {
        let mut cursor = Self {
            len,
            index: if index < len { index } else { 0 },
            shuffle,
            order: Vec::new(),
            order_pos: 0,
        };
        cursor.regenerate(rng);
        cursor
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Next/previous only make sense with more than one song.
    pub fn can_traverse(&self) -> bool {
        self.len > 1
    }

    pub fn next(&mut self) -> Option<usize> {
        if !self.can_traverse() {
            return None;
        }
        if self.shuffle && !self.order.is_empty() {
            self.order_pos = (self.order_pos + 1) % self.order.len();
            self.index = self.order[self.order_pos];
        } else {
            self.index = (self.index + 1) % self.len;
        }
        Some(self.index)
    }

    pub fn previous(&mut self) -> Option<usize> {
        if !self.can_traverse() {
            return None;
        }
        if self.shuffle && !self.order.is_empty() {
            self.order_pos = if self.order_pos == 0 {
                self.order.len() - 1
            } else {
                self.order_pos - 1
            };
            self.index = self.order[self.order_pos];
        } else {
            self.index = (self.index + self.len - 1) % self.len;
        }
        Some(self.index)
    }

    /// Move to an explicit index within the same playlist without reshuffling.
    pub fn jump_to(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        self.index = index;
        if let Some(pos) = self.order.iter().position(|&i| i == index) {
            self.order_pos = pos;
        }
    }

    /// Turning shuffle on always draws a new permutation.
    pub fn set_shuffle<R: Rng + ?Sized>(&mut self, enabled: bool, rng: &mut R) {
        self.shuffle = enabled;
        if enabled {
            self.regenerate(rng);
        }
    }

    fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.order = (0..self.len).collect();
        self.order.shuffle(rng);
        self.order_pos = self
            .order
            .iter()
            .position(|&i| i == self.index)
            .unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn sequential_next_wraps_back_to_start() {
        let mut cursor = PlaylistCursor::new(5, 0, false, &mut rng());
        for _ in 0..5 {
            cursor.next();
        }
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn sequential_previous_wraps_to_end() {
        let mut cursor = PlaylistCursor::new(4, 0, false, &mut rng());
        assert_eq!(cursor.previous(), Some(3));
        assert_eq!(cursor.previous(), Some(2));
    }

    #[test]
    fn single_song_does_not_traverse() {
        let mut cursor = PlaylistCursor::new(1, 0, false, &mut rng());
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.previous(), None);
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn shuffle_order_is_a_permutation() {
        let mut rng = rng();
        let mut cursor = PlaylistCursor::new(12, 4, false, &mut rng);
        cursor.set_shuffle(true, &mut rng);

        let seen: HashSet<usize> = cursor.order().iter().copied().collect();
        assert_eq!(cursor.order().len(), 12);
        assert_eq!(seen.len(), 12);
        assert!(seen.iter().all(|&i| i < 12));
        // Current song keeps its place in the new order.
        assert_eq!(cursor.index(), 4);
    }

    #[test]
    fn shuffle_walk_visits_order_and_wraps() {
        let mut rng = rng();
        let mut cursor = PlaylistCursor::new(6, 2, true, &mut rng);
        let order = cursor.order().to_vec();
        let start = order.iter().position(|&i| i == 2).unwrap();

        for step in 1..=6 {
            let expected = order[(start + step) % 6];
            assert_eq!(cursor.next(), Some(expected));
        }
        assert_eq!(cursor.index(), 2);

        let expected_prev = order[(start + 5) % 6];
        assert_eq!(cursor.previous(), Some(expected_prev));
    }

    #[test]
    fn jump_keeps_existing_permutation() {
        let mut rng = rng();
        let mut cursor = PlaylistCursor::new(8, 0, true, &mut rng);
        let order = cursor.order().to_vec();
        cursor.jump_to(5);
        assert_eq!(cursor.order(), order.as_slice());
        assert_eq!(cursor.index(), 5);
        let pos = order.iter().position(|&i| i == 5).unwrap();
        assert_eq!(cursor.next(), Some(order[(pos + 1) % 8]));
    }

    #[test]
    fn out_of_range_start_falls_back_to_zero() {
        let cursor = PlaylistCursor::new(3, 9, false, &mut rng());
        assert_eq!(cursor.index(), 0);
    }
}
