//! Printers: outcome notices (colored text) and JSON.

use std::time::Duration;

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::{execution::Outcome, utils::truncate_display};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
    Success,
}

/// A rendered outcome: one headline plus a detail line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub detail: String,
}

pub struct OutcomePrinter {
    /// `None` shows full text.
    pub display_limit: Option<usize>,
    pub timeout: Duration,
}

impl OutcomePrinter {
    pub fn notice(&self, outcome: &Outcome) -> Notice {
        match outcome {
            Outcome::Incomplete => Notice {
                kind: NoticeKind::Info,
                title: "waiting for input...".into(),
                detail: "brackets or quotes not closed".into(),
            },
            Outcome::TimedOut => Notice {
                kind: NoticeKind::Error,
                title: "execution timed out".into(),
                detail: format!("Python code ran longer than {}", format_seconds(self.timeout)),
            },
            Outcome::Failed { message, .. } => Notice {
                kind: NoticeKind::Error,
                title: "execution error".into(),
                detail: self.clip(message.trim()),
            },
            Outcome::Output(text) => Notice {
                kind: NoticeKind::Success,
                title: self.clip(text.trim()),
                detail: "execution succeeded".into(),
            },
            Outcome::NoOutput => Notice {
                kind: NoticeKind::Success,
                title: "execution succeeded".into(),
                detail: "no output".into(),
            },
        }
    }

    pub fn print(&self, outcome: &Outcome) {
        let notice = self.notice(outcome);
        match notice.kind {
            NoticeKind::Info => println!("{}", notice.title.cyan()),
            NoticeKind::Error => println!("{}", notice.title.red()),
            NoticeKind::Success => println!("{}", notice.title.green()),
        }
        println!("{}", notice.detail.dimmed());
    }

    fn clip(&self, text: &str) -> String {
        match self.display_limit {
            Some(limit) => truncate_display(text, limit),
            None => text.to_string(),
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn format_seconds(d: Duration) -> String {
    let ms = d.as_millis();
    if ms % 1000 == 0 {
        let secs = ms / 1000;
        format!("{} second{}", secs, if secs == 1 { "" } else { "s" })
    } else {
        format!("{:.1} seconds", d.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printer(limit: Option<usize>) -> OutcomePrinter {
        OutcomePrinter {
            display_limit: limit,
            timeout: Duration::from_millis(3000),
        }
    }

    #[test]
    fn incomplete_notice() {
        let n = printer(Some(200)).notice(&Outcome::Incomplete);
        assert_eq!(n.kind, NoticeKind::Info);
        assert_eq!(n.detail, "brackets or quotes not closed");
    }

    #[test]
    fn timeout_notice_states_budget() {
        let n = printer(Some(200)).notice(&Outcome::TimedOut);
        assert_eq!(n.kind, NoticeKind::Error);
        assert_eq!(n.detail, "Python code ran longer than 3 seconds");

        let p = OutcomePrinter {
            display_limit: None,
            timeout: Duration::from_millis(1500),
        };
        assert_eq!(p.notice(&Outcome::TimedOut).detail, "Python code ran longer than 1.5 seconds");
    }

    #[test]
    fn errors_are_trimmed_and_clipped_for_display_only() {
        let message = format!("Traceback:\n{}\n", "x".repeat(300));
        let outcome = Outcome::Failed {
            message: message.clone(),
            exit_code: 1,
        };
        let n = printer(Some(200)).notice(&outcome);
        assert_eq!(n.kind, NoticeKind::Error);
        assert!(n.detail.ends_with("..."));
        assert!(n.detail.chars().count() <= 200);

        let full = printer(None).notice(&outcome);
        assert_eq!(full.detail, message.trim());
        if let Outcome::Failed { message: kept, .. } = &outcome {
            assert_eq!(kept, &message);
        }
    }

    #[test]
    fn output_becomes_title() {
        let n = printer(Some(200)).notice(&Outcome::Output("42\n".into()));
        assert_eq!(n.kind, NoticeKind::Success);
        assert_eq!(n.title, "42");
    }

    #[test]
    fn no_output_notice() {
        let n = printer(Some(200)).notice(&Outcome::NoOutput);
        assert_eq!(n.title, "execution succeeded");
        assert_eq!(n.detail, "no output");
    }
}
