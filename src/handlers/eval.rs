//! One-shot evaluation of a single query.

use anyhow::{bail, Result};

use super::EvalContext;

pub async fn run(ctx: &EvalContext, query: &str) -> Result<bool> {
    if query.trim().is_empty() {
        bail!("Provide an expression as an argument or via stdin");
    }
    tracing::debug!(interpreter = %ctx.runner.interpreter().display(), "evaluating query");
    ctx.evaluate_and_print(query).await
}
