use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::Result;
use is_terminal::IsTerminal;
use tracing_subscriber::EnvFilter;

use pyrun::{cli::Cli, config::Config, handlers};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    let cfg = Config::load();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let ctx = handlers::EvalContext::from_config(&cfg, &args)?;

    let ok = if args.interactive {
        handlers::interactive::run(&ctx).await?
    } else {
        // Positional argument wins; otherwise take the whole of piped stdin
        let query = match args.expr {
            Some(expr) => expr,
            None if !io::stdin().is_terminal() => {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                buf
            }
            None => String::new(),
        };
        handlers::eval::run(&ctx, &query).await?
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
