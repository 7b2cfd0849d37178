//! Line-driven loop: every complete snippet is a fresh, isolated evaluation.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use is_terminal::IsTerminal;

use super::EvalContext;
use crate::{balance, execution::Evaluation};

const PROMPT: &str = ">>> ";
const CONTINUATION: &str = "... ";

/// Accumulates typed lines until brackets and quotes balance.
#[derive(Debug, Default)]
pub struct LineAccumulator {
    buffer: String,
}

/// What to do after feeding one line.
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    /// Nothing to run yet; keep prompting.
    Pending,
    /// A balanced snippet ready to evaluate.
    Ready(String),
    /// A blank line ended an unbalanced snippet; it was dropped.
    Abandoned,
}

impl LineAccumulator {
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn push(&mut self, line: &str) -> Step {
        let line = line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            if self.buffer.is_empty() {
                return Step::Pending;
            }
            self.buffer.clear();
            return Step::Abandoned;
        }

        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.buffer.push_str(line);

        if balance::is_complete(&self.buffer) {
            Step::Ready(std::mem::take(&mut self.buffer))
        } else {
            Step::Pending
        }
    }
}

/// No prompts in JSON mode or when stdin is piped.
fn shows_prompts(json: bool, stdin_is_tty: bool) -> bool {
    !json && stdin_is_tty
}

pub async fn run(ctx: &EvalContext) -> Result<bool> {
    let stdin = io::stdin();
    let prompts = shows_prompts(ctx.json, stdin.is_terminal());
    let mut acc = LineAccumulator::default();
    let mut all_ok = true;

    loop {
        if prompts {
            print!("{}", if acc.is_empty() { PROMPT } else { CONTINUATION });
            io::stdout().flush().ok();
        }

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match acc.push(&line) {
            Step::Pending => {}
            Step::Abandoned => ctx.render(&Evaluation::Incomplete)?,
            Step::Ready(snippet) => {
                all_ok &= ctx.evaluate_and_print(&snippet).await?;
            }
        }
    }

    if !acc.is_empty() {
        ctx.render(&Evaluation::Incomplete)?;
        all_ok = false;
    }
    if prompts {
        println!();
    }
    Ok(all_ok)
}
