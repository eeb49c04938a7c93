//! A checkpointed value: a shadow-copy save/restore/commit protocol.
//!
//! The placer mutates element placements and wire bounding boxes
//! speculatively, then either commits the mutation (on an accepted move)
//! or restores the prior value (on a rejected move). Modeling this as a
//! plain pair of `current`/`saved` values, rather than as an undo log,
//! keeps each mutation O(1) regardless of how many moves preceded it.

/// A value paired with a shadow copy, supporting save/restore/commit.
#[derive(Debug, Clone, Default)]
pub struct Checkpoint<T: Clone> {
    current: T,
    saved: T,
}

impl<T: Clone> Checkpoint<T> {
    /// Creates a checkpoint whose current and saved values both start at `value`.
    pub fn new(value: T) -> Self {
        Self {
            current: value.clone(),
            saved: value,
        }
    }

    /// Returns a reference to the current (possibly speculative) value.
    pub fn current(&self) -> &T {
        &self.current
    }

    /// Returns a mutable reference to the current value.
    pub fn current_mut(&mut self) -> &mut T {
        &mut self.current
    }

    /// Overwrites the current value, without touching the saved shadow.
    pub fn set(&mut self, value: T) {
        self.current = value;
    }

    /// Copies `current` into `saved`, before a speculative mutation.
    pub fn save(&mut self) {
        self.saved = self.current.clone();
    }

    /// Copies `saved` back into `current`, undoing a rejected mutation.
    pub fn restore(&mut self) {
        self.current = self.saved.clone();
    }

    /// Copies `current` into `saved`, confirming an accepted mutation.
    pub fn commit(&mut self) {
        self.saved = self.current.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_restore_undoes_mutation() {
        let mut c = Checkpoint::new(10);
        c.save();
        c.set(20);
        assert_eq!(*c.current(), 20);
        c.restore();
        assert_eq!(*c.current(), 10);
    }

    #[test]
    fn save_then_commit_keeps_mutation() {
        let mut c = Checkpoint::new(10);
        c.save();
        c.set(20);
        c.commit();
        c.restore();
        assert_eq!(*c.current(), 20);
    }

    #[test]
    fn new_starts_consistent() {
        let c = Checkpoint::new("x".to_string());
        assert_eq!(c.current(), "x");
    }
}
