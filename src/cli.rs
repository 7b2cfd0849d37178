use std::path::PathBuf;

use clap::{ArgGroup, Parser};

#[derive(Parser, Debug, Clone)]
#[command(name = "pyrun", about = "Evaluate Python expressions REPL-style", version)]
#[command(group(ArgGroup::new("input").args(["expr", "interactive"]).multiple(false)))]
pub struct Cli {
    /// Expression to evaluate. Read from stdin when omitted.
    #[arg(value_name = "EXPR")]
    pub expr: Option<String>,

    /// Wall-clock budget for one evaluation, in milliseconds.
    #[arg(short = 't', long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Python interpreter to run (name on PATH or full path).
    #[arg(long, value_name = "PATH")]
    pub interpreter: Option<PathBuf>,

    /// Print the raw execution result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Do not truncate output and error text.
    #[arg(long)]
    pub full: bool,

    /// Read snippets line by line from stdin; open brackets or quotes
    /// continue onto the next line.
    #[arg(short = 'i', long)]
    pub interactive: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
