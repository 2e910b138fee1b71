use rustc_hash::FxHashSet;

use super::Result;

/// Persisted set of solved scenario ids.
pub trait CompletionStore: Send + Sync {
    fn load(&self) -> Result<FxHashSet<String>>;
    fn mark_completed(&self, id: &str) -> Result<()>;
}
