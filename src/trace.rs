//! The 11 verbosity channels, implemented as `log` targets rather than a bespoke flag struct.
//!
//! A consumer enables exactly the channels it wants the way any `env_logger`-based binary does,
//! e.g. `RUST_LOG=nonogram_solver::trace::probe=trace cargo run -- puzzle.txt`. Each constant
//! below is meant to be passed as the `target:` of a `log::debug!`/`log::trace!` call at the
//! corresponding call site; this module doesn't do any logging itself.

pub const TOP: &str = "nonogram_solver::trace::top";
pub const BACKTRACK: &str = "nonogram_solver::trace::backtrack";
pub const EXHAUST: &str = "nonogram_solver::trace::exhaust";
pub const GUESS: &str = "nonogram_solver::trace::guess";
pub const JOBS: &str = "nonogram_solver::trace::jobs";
pub const LINE: &str = "nonogram_solver::trace::line";
pub const MERGE: &str = "nonogram_solver::trace::merge";
pub const PROBE: &str = "nonogram_solver::trace::probe";
pub const UNDO: &str = "nonogram_solver::trace::undo";
pub const STATE: &str = "nonogram_solver::trace::state";
pub const VERBOSE: &str = "nonogram_solver::trace::verbose";
