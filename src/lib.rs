//! Evaluate Python snippets REPL-style in a fresh, time-bounded interpreter.
//!
//! The core is [`balance::is_complete`], which decides whether typed input is
//! closed enough to run, and [`process::BoundedProcessRunner`], which runs it
//! with a hard timeout. [`execution::evaluate`] chains the two.

pub mod balance;
pub mod cli;
pub mod config;
pub mod execution;
pub mod handlers;
pub mod printer;
pub mod process;
pub mod utils;

pub use balance::is_complete;
pub use execution::{evaluate, Evaluation, ExecutionRequest, ExecutionResult, Outcome};
pub use process::BoundedProcessRunner;
