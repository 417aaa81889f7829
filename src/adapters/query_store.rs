use crate::domain::ports::QueryStore;

/// In-memory query string with a navigation history stack.
///
/// `replace` overwrites the current entry, `push` appends one.
#[derive(Debug, Clone)]
pub struct MemoryQueryStore {
    history: Vec<String>,
    replace_count: usize,
}

impl MemoryQueryStore {
    pub fn new(initial: &str) -> Self {
        Self {
            history: vec![initial.strip_prefix('?').unwrap_or(initial).to_string()],
            replace_count: 0,
        }
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn replace_count(&self) -> usize {
        self.replace_count
    }

    /// Steps back one entry, if there is one to step back to.
    pub fn back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            false
        }
    }
}

impl Default for MemoryQueryStore {
    fn default() -> Self {
        Self::new("")
    }
}

impl QueryStore for MemoryQueryStore {
    fn read(&self) -> String {
        self.history.last().cloned().unwrap_or_default()
    }

    fn replace(&mut self, query: &str) {
        self.replace_count += 1;
        match self.history.last_mut() {
            Some(current) => *current = query.to_string(),
            None => self.history.push(query.to_string()),
        }
    }

    fn push(&mut self, query: &str) {
        self.history.push(query.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_query_strips_question_mark() {
        let store = MemoryQueryStore::new("?sort=fees");
        assert_eq!(store.read(), "sort=fees");
    }

    #[test]
    fn test_replace_does_not_grow_history() {
        let mut store = MemoryQueryStore::default();
        store.replace("search=a");
        store.replace("search=ab");

        assert_eq!(store.read(), "search=ab");
        assert_eq!(store.history(), ["search=ab"]);
        assert_eq!(store.replace_count(), 2);
    }

    #[test]
    fn test_push_and_back() {
        let mut store = MemoryQueryStore::new("mode=video");
        store.push("mode=in-clinic");
        assert_eq!(store.history_len(), 2);

        assert!(store.back());
        assert_eq!(store.read(), "mode=video");
        assert!(!store.back());
    }
}
