//! Lexical balance check: decides whether partially typed input is closed
//! enough to be worth executing.
//!
//! This is not a parser. It only tracks bracket nesting and string quoting,
//! so prefixes like `r"..."` or f-string braces get no special treatment.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ScanMode {
    #[default]
    Normal,
    InSingle,
    InDouble,
    InTripleSingle,
    InTripleDouble,
}

impl ScanMode {
    /// Mode entered by a `quote` triple delimiter, or `None` when the
    /// delimiter means nothing in the current mode.
    fn after_triple(self, quote: char) -> Option<Self> {
        match (self, quote) {
            (Self::Normal, '"') => Some(Self::InTripleDouble),
            (Self::InTripleDouble, '"') => Some(Self::Normal),
            (Self::Normal, '\'') => Some(Self::InTripleSingle),
            (Self::InTripleSingle, '\'') => Some(Self::Normal),
            _ => None,
        }
    }

    fn is_triple(self) -> bool {
        matches!(self, Self::InTripleSingle | Self::InTripleDouble)
    }
}

#[derive(Debug, Default)]
struct ScanState {
    stack: Vec<char>,
    mode: ScanMode,
}

fn opener_for(closer: char) -> char {
    match closer {
        ')' => '(',
        ']' => '[',
        _ => '{',
    }
}

/// Returns `true` when every bracket and quote opened in `text` is closed.
///
/// A closing bracket with no opener, or with an opener of another kind, is
/// malformed input and yields `false` immediately.
pub fn is_complete(text: &str) -> bool {
    if text.is_empty() {
        return true;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut state = ScanState::default();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if (c == '"' || c == '\'') && chars.get(i + 1) == Some(&c) && chars.get(i + 2) == Some(&c) {
            if let Some(next) = state.mode.after_triple(c) {
                state.mode = next;
                i += 3;
                continue;
            }
        }

        if state.mode.is_triple() {
            i += 1;
            continue;
        }

        match (c, state.mode) {
            // A trailing backslash has nothing to consume; stepping past the end is fine.
            ('\\', _) => {
                i += 2;
                continue;
            }
            ('\'', ScanMode::Normal) => state.mode = ScanMode::InSingle,
            ('\'', ScanMode::InSingle) => state.mode = ScanMode::Normal,
            ('"', ScanMode::Normal) => state.mode = ScanMode::InDouble,
            ('"', ScanMode::InDouble) => state.mode = ScanMode::Normal,
            (_, ScanMode::InSingle | ScanMode::InDouble) => {}
            ('(' | '[' | '{', _) => state.stack.push(c),
            (')' | ']' | '}', _) => match state.stack.pop() {
                Some(open) if open == opener_for(c) => {}
                _ => return false,
            },
            _ => {}
        }
        i += 1;
    }

    state.stack.is_empty() && state.mode == ScanMode::Normal
}
