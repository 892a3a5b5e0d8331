pub mod config;
pub mod logging;

// Pipeline: fetch -> extract -> filter -> (generate) -> report
pub mod check;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod generate;
pub mod report;
pub mod resolve;
pub mod sri;
pub mod tag;

pub use check::{CheckReport, SriCheck};
pub use error::{ResourceFailure, ResourceFetchError, SriError};
pub use tag::ScriptTag;
