use crate::jobs::JobRegistry;
use crate::search_path::SearchList;

/// Default byte count read per iteration of the redirect drain loop.
pub const DEFAULT_DRAIN_CHUNK_SIZE: usize = 0x10000;

/// State that lives for the whole interpreter session.
///
/// Owned by the interpreter loop and handed by reference to the router,
/// the launcher, the built-ins and shutdown. Only the interpreter thread
/// touches it, so no locking is involved.
#[derive(Debug)]
pub struct Session {
    /// Prefixes used to resolve bare program names.
    pub search_list: SearchList,
    /// Background children, signalled at shutdown.
    pub jobs: JobRegistry,
    /// Chunk size of the redirect drain loop, never zero.
    pub drain_chunk_size: usize,
}

impl Session {
    pub fn new(search_list: SearchList) -> Self {
        Self {
            search_list,
            jobs: JobRegistry::new(),
            drain_chunk_size: DEFAULT_DRAIN_CHUNK_SIZE,
        }
    }

    pub fn with_drain_chunk_size(mut self, size: usize) -> Self {
        self.drain_chunk_size = size.max(1);
        self
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SearchList::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_starts_with_default_search_list() {
        let session = Session::default();
        assert_eq!(session.search_list.to_string(), ":/bin/:/usr/bin/");
        assert!(session.jobs.is_empty());
        assert_eq!(session.drain_chunk_size, DEFAULT_DRAIN_CHUNK_SIZE);
    }

    #[test]
    fn test_zero_chunk_size_is_clamped() {
        let session = Session::default().with_drain_chunk_size(0);
        assert_eq!(session.drain_chunk_size, 1);
    }
}
