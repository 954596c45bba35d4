//! Process-wide match table handle.

use std::sync::Arc;

use parking_lot::RwLock;
use procapi_core::{GenerateError, Router};
use tracing::info;

use crate::table::MatchTable;

/// Shares one compiled [`MatchTable`] across request handlers.
///
/// Readers take a snapshot with [`load`](Self::load) and match against it
/// without holding any lock. [`rebuild`](Self::rebuild) compiles a complete
/// new table first and only then swaps it in, so a reader sees either the old
/// table or the new one, never a partial one. A failed rebuild leaves the
/// current table in place.
#[derive(Debug)]
pub struct SharedMatcher {
    current: RwLock<Arc<MatchTable>>,
}

impl SharedMatcher {
    /// Wrap an already compiled table.
    #[must_use]
    pub fn new(table: MatchTable) -> Self {
        Self {
            current: RwLock::new(Arc::new(table)),
        }
    }

    /// Compile `router` and wrap the result.
    pub fn from_router(router: &Router) -> Result<Self, GenerateError> {
        MatchTable::compile(router).map(Self::new)
    }

    /// Snapshot of the current table.
    #[must_use]
    pub fn load(&self) -> Arc<MatchTable> {
        self.current.read().clone()
    }

    /// Replace the current table.
    pub fn store(&self, table: MatchTable) {
        let table = Arc::new(table);
        *self.current.write() = table;
    }

    /// Recompile from a changed router and swap the result in.
    pub fn rebuild(&self, router: &Router) -> Result<(), GenerateError> {
        let table = MatchTable::compile(router)?;
        let routes = table.len();
        self.store(table);
        info!(routes, "match table swapped");
        Ok(())
    }
}

impl Default for SharedMatcher {
    fn default() -> Self {
        Self::new(MatchTable::default())
    }
}
