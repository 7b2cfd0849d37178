//! Host-side handlers: wire config and CLI flags into the evaluation pipeline
//! and render what comes back.

use std::time::Duration;

use anyhow::Result;

use crate::{
    cli::Cli,
    config::Config,
    execution::{evaluate, Evaluation},
    printer::{print_json, OutcomePrinter},
    process::BoundedProcessRunner,
};

pub mod eval;
pub mod interactive;

/// Everything a handler needs to evaluate and render queries.
pub struct EvalContext {
    pub runner: BoundedProcessRunner,
    pub timeout: Duration,
    pub printer: OutcomePrinter,
    pub json: bool,
}

impl EvalContext {
    /// CLI flags override config values.
    pub fn from_config(cfg: &Config, args: &Cli) -> Result<Self> {
        let interpreter = args.interpreter.clone().unwrap_or_else(|| cfg.interpreter());
        let timeout = match args.timeout {
            Some(ms) => Duration::from_millis(ms),
            None => cfg.timeout()?,
        };
        let display_limit = if args.full { None } else { Some(cfg.display_limit()?) };

        Ok(Self {
            runner: BoundedProcessRunner::new(interpreter).with_drain_grace(cfg.drain_grace()?),
            timeout,
            printer: OutcomePrinter { display_limit, timeout },
            json: args.json,
        })
    }

    /// Evaluate one query and print it. Returns whether it succeeded.
    pub async fn evaluate_and_print(&self, query: &str) -> Result<bool> {
        let evaluation = evaluate(&self.runner, query, self.timeout).await;
        self.render(&evaluation)?;
        Ok(evaluation.outcome().is_success())
    }

    pub fn render(&self, evaluation: &Evaluation) -> Result<()> {
        if self.json {
            print_json(evaluation)
        } else {
            self.printer.print(&evaluation.outcome());
            Ok(())
        }
    }
}
