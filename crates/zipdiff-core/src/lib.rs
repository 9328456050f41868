pub mod config;
pub mod diff;
pub mod engine;
pub mod entry;
pub mod error;
pub mod expect;
pub mod filter;
pub mod matcher;
pub mod provider;
pub mod scanner;

pub use config::AppConfig;
pub use diff::DiffResult;
pub use engine::{DiffEngine, Validation};
pub use error::Error;
pub use expect::{ExpectFailure, ExpectMode, Expectations, Verdict};
pub use provider::{ArchiveProvider, LocalDirProvider};
