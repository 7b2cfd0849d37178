//! Python REPL emulation: wrap a snippet so its value is echoed the way an
//! interactive session would echo it.

/// Escape `code` for use between double quotes in a Python string literal.
///
/// Backslashes are doubled and double quotes escaped, so the literal always
/// evaluates back to exactly `code`. Line breaks and NUL are escaped as well
/// since they cannot appear raw inside a `"..."` literal or a process argument.
pub fn escape_literal(code: &str) -> String {
    let mut escaped = String::with_capacity(code.len() + code.len() / 8);
    for c in code.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\0' => escaped.push_str("\\x00"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Build the program that compiles `code` as one interactive statement
/// (newline-terminated, as the interactive prompt submits it), evaluates it
/// and passes any value through `sys.displayhook`.
///
/// Blank input is returned as is.
pub fn auto_print(code: &str) -> String {
    let code = code.trim();
    if code.is_empty() {
        return code.to_string();
    }

    format!(
        "code = compile(\"{}\\n\", \"<stdin>\", \"single\")\n\
         value = eval(code)\n\
         if value is not None:\n    \
         import sys\n    \
         sys.displayhook(value)",
        escape_literal(code)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_doubles_backslashes_before_quotes() {
        assert_eq!(escape_literal(r#"a\"b"#), r#"a\\\"b"#);
        assert_eq!(escape_literal(r"\\"), r"\\\\");
        assert_eq!(escape_literal("plain 'single'"), "plain 'single'");
    }

    #[test]
    fn escape_removes_raw_line_breaks() {
        let escaped = escape_literal("for i in x:\r\n    print(i)");
        assert!(!escaped.contains('\n'));
        assert!(!escaped.contains('\r'));
        assert_eq!(escaped, r"for i in x:\r\n    print(i)");
    }

    #[test]
    fn escaped_literal_has_no_unescaped_quote() {
        let escaped = escape_literal(r#"print("\"", '\\"')"#);
        let bytes = escaped.as_bytes();
        for (i, b) in bytes.iter().enumerate() {
            if *b == b'"' {
                let backslashes = bytes[..i].iter().rev().take_while(|c| **c == b'\\').count();
                assert_eq!(backslashes % 2, 1, "quote at {i} terminates the literal: {escaped}");
            }
        }
    }

    #[test]
    fn auto_print_wraps_trimmed_code() {
        let program = auto_print("  1 + 2\n");
        assert_eq!(
            program,
            "code = compile(\"1 + 2\\n\", \"<stdin>\", \"single\")\n\
             value = eval(code)\n\
             if value is not None:\n    import sys\n    sys.displayhook(value)"
        );
    }

    #[test]
    fn auto_print_escapes_embedded_quotes() {
        let program = auto_print(r#"len("abc")"#);
        assert!(program.starts_with(r#"code = compile("len(\"abc\")\n", "<stdin>", "single")"#));
    }

    #[test]
    fn auto_print_leaves_blank_input_alone() {
        assert_eq!(auto_print(""), "");
        assert_eq!(auto_print("   "), "");
    }
}
