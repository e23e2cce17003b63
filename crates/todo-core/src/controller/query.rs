//! Query Cache
//!
//! The slice of a data-fetching cache the list relies on: one keyed query,
//! a loading state, and invalidation that marks the data for refetch while
//! keeping the last good result visible.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStatus<T> {
    /// Nothing fetched yet
    Loading,
    Ready(T),
    /// First fetch failed; there is no data to show
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Query<T> {
    key: &'static str,
    status: QueryStatus<T>,
    stale: bool,
    fetches: u32,
}

impl<T> Query<T> {
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            status: QueryStatus::Loading,
            stale: true,
            fetches: 0,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn status(&self) -> &QueryStatus<T> {
        &self.status
    }

    pub fn data(&self) -> Option<&T> {
        match &self.status {
            QueryStatus::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Completed fetches, successful or not
    pub fn fetches(&self) -> u32 {
        self.fetches
    }

    /// Mark the data out of date; the next load refetches.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    pub fn resolve(&mut self, data: T) {
        self.fetches += 1;
        self.stale = false;
        self.status = QueryStatus::Ready(data);
    }

    /// Record a failed fetch. Earlier data survives a failed refetch; the
    /// query stays stale either way so the next load retries.
    pub fn reject(&mut self, message: String) {
        self.fetches += 1;
        self.stale = true;
        if !matches!(self.status, QueryStatus::Ready(_)) {
            self.status = QueryStatus::Failed(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut query: Query<Vec<u32>> = Query::new("todos");
        assert_eq!(query.key(), "todos");
        assert_eq!(query.status(), &QueryStatus::Loading);
        assert!(query.is_stale());

        query.resolve(vec![1, 2]);
        assert!(!query.is_stale());
        assert_eq!(query.data(), Some(&vec![1, 2]));

        query.invalidate();
        assert!(query.is_stale());
        assert_eq!(query.data(), Some(&vec![1, 2]));
        assert_eq!(query.fetches(), 1);
    }

    #[test]
    fn test_failed_first_fetch() {
        let mut query: Query<Vec<u32>> = Query::new("todos");
        query.reject("offline".into());
        assert_eq!(query.status(), &QueryStatus::Failed("offline".into()));
        assert!(query.is_stale());
    }

    #[test]
    fn test_failed_refetch_keeps_data() {
        let mut query = Query::new("todos");
        query.resolve(vec![1]);
        query.invalidate();
        query.reject("offline".into());
        assert_eq!(query.data(), Some(&vec![1]));
        assert_eq!(query.fetches(), 2);
    }
}
