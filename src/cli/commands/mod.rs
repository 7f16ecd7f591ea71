//! Command implementations for the lexner CLI
//!
//! Each command has its own module. `run_*` functions return the text to
//! print so they can be tested in-process; `cmd_*` print it.

pub mod batch;
pub mod check;
pub mod recognize;
pub mod tokenize;

pub use batch::{cmd_batch, run_batch, BatchArgs};
pub use check::{cmd_check, run_check, CheckArgs};
pub use recognize::{cmd_recognize, run_recognize, RecognizeArgs};
pub use tokenize::{cmd_tokenize, run_tokenize, TokenizeArgs};
