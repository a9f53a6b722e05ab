pub mod analysis;
pub mod backend;
pub mod session;

#[cfg(test)]
pub mod testing;

pub use analysis::{AnalysisClient, AnalysisError};
pub use backend::{BackendError, HttpBackend};
pub use session::{HistoryEntry, SessionStore};
