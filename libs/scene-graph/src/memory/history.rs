//! Snapshot-based undo stack for [`MemoryScene`](super::MemoryScene).

/// Nested batch bracket; only the outermost batch takes a snapshot.
#[derive(Debug, Clone)]
pub(crate) struct History<S> {
    depth: usize,
    pending: Option<(String, S)>,
    done: Vec<(String, S)>,
}

impl<S> Default for History<S> {
    fn default() -> Self {
        Self {
            depth: 0,
            pending: None,
            done: Vec::new(),
        }
    }
}

impl<S: Clone> History<S> {
    pub(crate) fn begin(&mut self, label: &str, state: &S) {
        if self.depth == 0 {
            self.pending = Some((label.to_string(), state.clone()));
        }
        self.depth += 1;
    }

    pub(crate) fn end(&mut self) {
        if self.depth == 0 {
            tracing::warn!("end_batch without a matching begin_batch");
            return;
        }
        self.depth -= 1;
        if self.depth == 0 {
            if let Some(entry) = self.pending.take() {
                self.done.push(entry);
            }
        }
    }

    pub(crate) fn pop(&mut self) -> Option<(String, S)> {
        self.done.pop()
    }

    pub(crate) fn is_open(&self) -> bool {
        self.depth > 0
    }

    pub(crate) fn labels(&self) -> impl Iterator<Item = &str> {
        self.done.iter().map(|(label, _)| label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_batches_record_one_entry() {
        let mut history = History::default();
        history.begin("outer", &1);
        history.begin("inner", &2);
        history.end();
        assert!(history.is_open());
        history.end();
        assert!(!history.is_open());
        assert_eq!(history.labels().collect::<Vec<_>>(), vec!["outer"]);
        assert_eq!(history.pop(), Some(("outer".to_string(), 1)));
        assert_eq!(history.pop(), None);
    }

    #[test]
    fn unbalanced_end_is_ignored() {
        let mut history: History<u8> = History::default();
        history.end();
        assert!(!history.is_open());
        assert_eq!(history.pop(), None);
    }
}
