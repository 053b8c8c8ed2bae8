//! Shell-style line splitting for the test harness.
//!
//! Splits on unquoted whitespace, honoring single quotes (literal), double
//! quotes (backslash may escape `"` and `\`), and bare backslash escapes.
//! An unterminated quote extends to the end of the line rather than
//! erroring; the harness favors accepting half-typed input over rejecting
//! it.

/// Splits a command line into tokens.
///
/// # Examples
///
/// ```
/// use cmdtree_engine::split_line;
///
/// assert_eq!(split_line("db migrate --steps=3"), ["db", "migrate", "--steps=3"]);
/// assert_eq!(split_line(r#"add --title "hello world""#), ["add", "--title", "hello world"]);
/// assert_eq!(split_line("add 'it''s'"), ["add", "its"]);
/// ```
pub fn split_line(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match quote {
            Some('\'') => {
                if ch == '\'' {
                    quote = None;
                } else {
                    current.push(ch);
                }
            }
            Some(_) => {
                if ch == '"' {
                    quote = None;
                } else if ch == '\\' {
                    match chars.next() {
                        Some(escaped @ ('"' | '\\')) => current.push(escaped),
                        Some(other) => {
                            current.push('\\');
                            current.push(other);
                        }
                        None => current.push('\\'),
                    }
                } else {
                    current.push(ch);
                }
            }
            None => match ch {
                '\'' | '"' => {
                    quote = Some(ch);
                    in_token = true;
                }
                '\\' => {
                    in_token = true;
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                    }
                }
                _ if ch.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                _ => {
                    in_token = true;
                    current.push(ch);
                }
            },
        }
    }

    if in_token {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_whitespace_split() {
        assert_eq!(split_line("a b  c"), ["a", "b", "c"]);
        assert_eq!(split_line("  a  "), ["a"]);
        assert!(split_line("").is_empty());
        assert!(split_line("   ").is_empty());
    }

    #[test]
    fn test_double_quotes_keep_spaces() {
        assert_eq!(
            split_line(r#"--title "a b" rest"#),
            ["--title", "a b", "rest"]
        );
    }

    #[test]
    fn test_single_quotes_are_literal() {
        assert_eq!(split_line(r#"'--flag="x y"'"#), [r#"--flag="x y""#]);
    }

    #[test]
    fn test_escapes_inside_double_quotes() {
        assert_eq!(split_line(r#""say \"hi\"""#), [r#"say "hi""#]);
        assert_eq!(split_line(r#""back\\slash""#), [r"back\slash"]);
        // unknown escapes pass through untouched
        assert_eq!(split_line(r#""a\nb""#), [r"a\nb"]);
    }

    #[test]
    fn test_bare_backslash_escapes_next_char() {
        assert_eq!(split_line(r"a\ b"), ["a b"]);
    }

    #[test]
    fn test_empty_quotes_yield_empty_token() {
        assert_eq!(split_line(r#"a "" b"#), ["a", "", "b"]);
    }

    #[test]
    fn test_unterminated_quote_extends_to_end() {
        assert_eq!(split_line(r#"--title "half done"#), ["--title", "half done"]);
    }

    #[test]
    fn test_adjacent_quoted_pieces_join() {
        assert_eq!(split_line(r#"a"b c"d"#), ["ab cd"]);
    }
}
