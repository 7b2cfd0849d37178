//! Python interpreter invocation.

use std::{path::Path, process::Stdio};

use tokio::process::Command;

use crate::execution::python::auto_print;

/// Interpreter used when nothing else is configured.
pub fn default_interpreter() -> &'static str {
    if cfg!(windows) {
        "py"
    } else {
        "python3"
    }
}

/// Build `<interpreter> -u -c <program>` for a snippet.
///
/// The snippet is always wrapped by [`auto_print`]; the resulting program is
/// handed over as a single argv element so no shell ever re-splits it.
pub fn command(interpreter: &Path, snippet: &str) -> Command {
    let mut cmd = Command::new(interpreter);
    cmd.arg("-u") // unbuffered
        .arg("-c")
        .arg(auto_print(snippet))
        .env("PYTHONIOENCODING", "utf-8")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    #[cfg(windows)]
    {
        const CREATE_NO_WINDOW: u32 = 0x0800_0000;
        cmd.creation_flags(CREATE_NO_WINDOW);
    }

    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_passes_wrapped_program_as_one_argument() {
        let cmd = command(Path::new("python3"), r#"print("a b")"#);
        let std_cmd = cmd.as_std();
        assert_eq!(std_cmd.get_program(), "python3");

        let args: Vec<_> = std_cmd.get_args().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(args.len(), 3);
        assert_eq!(args[0], "-u");
        assert_eq!(args[1], "-c");
        assert_eq!(args[2], auto_print(r#"print("a b")"#));
    }

    #[test]
    fn command_forces_utf8_streams() {
        let cmd = command(Path::new("python3"), "1");
        let encoding = cmd
            .as_std()
            .get_envs()
            .find(|(k, _)| *k == "PYTHONIOENCODING")
            .and_then(|(_, v)| v);
        assert_eq!(encoding.map(|v| v.to_string_lossy().into_owned()), Some("utf-8".to_string()));
    }
}
