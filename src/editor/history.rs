use super::cursor::Position;

/// Immutable copy of the buffer contents plus the cursor, as stored in
/// history. Copies are structural; nothing aliases the live buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub lines: Vec<String>,
    pub pos: Position,
}

/// Bounded linear undo/redo over full-state snapshots. The undo stack is
/// seeded with the initial state, which is never popped.
#[derive(Debug)]
pub struct History {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_depth: usize,
}

impl History {
    pub fn new(lines: &[String], pos: Position, max_depth: usize) -> Self {
        Self {
            undo_stack: vec![Snapshot {
                lines: lines.to_vec(),
                pos,
            }],
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Record the post-edit state. New edits invalidate any redo future. A
    /// state structurally identical to the undo top is discarded, so no-op
    /// edits do not grow history.
    pub fn save_state(&mut self, lines: &[String], pos: Position) {
        self.redo_stack.clear();

        if let Some(top) = self.undo_stack.last() {
            if top.pos == pos && top.lines.as_slice() == lines {
                return;
            }
        }

        self.undo_stack.push(Snapshot {
            lines: lines.to_vec(),
            pos,
        });
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
    }

    /// Step back, returning the state to restore. `None` when only the seed
    /// state remains.
    pub fn undo(&mut self) -> Option<Snapshot> {
        if self.undo_stack.len() <= 1 {
            return None;
        }
        let current = self.undo_stack.pop()?;
        self.redo_stack.push(current);
        self.undo_stack.last().cloned()
    }

    /// Step forward again. `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<Snapshot> {
        let state = self.redo_stack.pop()?;
        self.undo_stack.push(state);
        self.undo_stack.last().cloned()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_undo_on_seed_state_returns_none() {
        let mut history = History::new(&lines(&[""]), Position::default(), 100);
        assert!(history.undo().is_none());
    }

    #[test]
    fn test_undo_then_redo_walks_states() {
        let mut history = History::new(&lines(&[""]), Position::default(), 100);
        history.save_state(&lines(&["a"]), Position::new(0, 1));
        history.save_state(&lines(&["ab"]), Position::new(0, 2));

        let state = history.undo().unwrap();
        assert_eq!(state.lines, lines(&["a"]));
        assert_eq!(state.pos, Position::new(0, 1));

        let state = history.redo().unwrap();
        assert_eq!(state.lines, lines(&["ab"]));
        assert_eq!(state.pos, Position::new(0, 2));
    }

    #[test]
    fn test_undo_all_reaches_seed() {
        let seed = lines(&["seed"]);
        let mut history = History::new(&seed, Position::default(), 100);
        for i in 1..=5 {
            history.save_state(&lines(&[&"x".repeat(i)]), Position::new(0, i));
        }
        let mut last = None;
        while let Some(state) = history.undo() {
            last = Some(state);
        }
        assert_eq!(last.unwrap().lines, seed);
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut history = History::new(&lines(&[""]), Position::default(), 100);
        history.save_state(&lines(&["a"]), Position::new(0, 1));
        history.undo();
        assert_eq!(history.redo_depth(), 1);

        history.save_state(&lines(&["b"]), Position::new(0, 1));
        assert_eq!(history.redo_depth(), 0);
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_identical_state_is_coalesced() {
        let mut history = History::new(&lines(&[""]), Position::default(), 100);
        history.save_state(&lines(&["a"]), Position::new(0, 1));
        history.save_state(&lines(&["a"]), Position::new(0, 1));
        assert_eq!(history.undo_depth(), 2);
    }

    #[test]
    fn test_cursor_change_alone_is_a_new_state() {
        let mut history = History::new(&lines(&["ab"]), Position::default(), 100);
        history.save_state(&lines(&["ab"]), Position::new(0, 2));
        assert_eq!(history.undo_depth(), 2);
    }

    #[test]
    fn test_depth_cap_evicts_oldest() {
        let mut history = History::new(&lines(&["seed"]), Position::default(), 3);
        for i in 1..=10 {
            history.save_state(&lines(&[&format!("state {i}")]), Position::new(0, 0));
        }
        assert_eq!(history.undo_depth(), 3);

        // Walking all the way back now bottoms out at the oldest retained
        // state, not the seed.
        let mut last = None;
        while let Some(state) = history.undo() {
            last = Some(state);
        }
        assert_eq!(last.unwrap().lines, lines(&["state 8"]));
    }
}
