use std::process::Command;
use std::time::Duration;

use pyrun::{process::python::default_interpreter, BoundedProcessRunner};

/// Runner for the platform's default interpreter, or `None` when it is not
/// installed (the calling test then skips itself).
pub fn python_runner() -> Option<BoundedProcessRunner> {
    let interpreter = default_interpreter();
    let available = Command::new(interpreter)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);

    if !available {
        println!("{interpreter} not found on PATH, skipping");
        return None;
    }
    Some(BoundedProcessRunner::new(interpreter).with_drain_grace(Duration::from_secs(1)))
}

#[allow(dead_code)]
pub const GENEROUS: Duration = Duration::from_secs(20);
