//! Pipeline entry points for slot watching.
//!
//! - `run_check`: Fetch and classify every configured month once
//! - `Watcher`: Repeat the check forever, reporting and alerting

pub mod check;
pub mod watch;

pub use check::run_check;
pub use watch::Watcher;
