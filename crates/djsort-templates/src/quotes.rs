/// Split `s` on whitespace while respecting quoted regions (with escape handling).
///
/// This is the splitting behind [`Token::split_contents`](crate::Token::split_contents):
/// `anchor name "Full name"` yields three bits, and so does
/// `anchor name _("Full name")` since a quote may open mid-bit.
pub(crate) fn split_on_whitespace(s: &str) -> Vec<String> {
    let mut pieces = Vec::with_capacity((s.len() / 8).clamp(2, 8));
    let mut start = None;
    let mut quote: Option<char> = None;
    let mut escape = false;

    for (idx, ch) in s.char_indices() {
        if escape {
            escape = false;
            if start.is_none() {
                start = Some(idx.saturating_sub(1));
            }
            continue;
        }
        match ch {
            '\\' if quote.is_some() => {
                escape = true;
                if start.is_none() {
                    start = Some(idx);
                }
            }
            '"' | '\'' if quote == Some(ch) => {
                quote = None;
                if start.is_none() {
                    start = Some(idx);
                }
            }
            '"' | '\'' if quote.is_none() => {
                quote = Some(ch);
                if start.is_none() {
                    start = Some(idx);
                }
            }
            _ if quote.is_some() => {
                if start.is_none() {
                    start = Some(idx);
                }
            }
            _ if ch.is_whitespace() => {
                if let Some(s_start) = start.take() {
                    pieces.push(s[s_start..idx].to_owned());
                }
            }
            _ => {
                if start.is_none() {
                    start = Some(idx);
                }
            }
        }
    }
    if let Some(s_start) = start {
        pieces.push(s[s_start..].to_owned());
    }
    pieces
}

/// Strip every leading and trailing `"` or `'` from a tag bit.
///
/// Matches what tag authors conventionally do with `bit.strip('"\'')`: the
/// quotes do not need to be balanced and are not unescaped.
#[must_use]
pub fn strip_quotes(bit: &str) -> &str {
    bit.trim_matches(|c| c == '"' || c == '\'')
}

/// If `s` is wrapped in a matching pair of quotes, return the inner text.
pub(crate) fn unquote(s: &str) -> Option<&str> {
    let mut chars = s.chars();
    let first = chars.next()?;
    let last = chars.next_back()?;
    if (first == '"' || first == '\'') && first == last {
        Some(&s[1..s.len() - 1])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_whitespace_simple() {
        assert_eq!(
            split_on_whitespace("load sorting_tags"),
            vec!["load", "sorting_tags"]
        );
    }

    #[test]
    fn split_whitespace_quoted() {
        assert_eq!(
            split_on_whitespace(r#"anchor first_name "First name""#),
            vec!["anchor", "first_name", r#""First name""#]
        );
    }

    #[test]
    fn split_whitespace_translated() {
        assert_eq!(
            split_on_whitespace(r#"anchor name _("Full name")"#),
            vec!["anchor", "name", r#"_("Full name")"#]
        );
    }

    #[test]
    fn split_whitespace_escaped() {
        assert_eq!(
            split_on_whitespace(r#"anchor title "it\"s fine""#),
            vec!["anchor", "title", r#""it\"s fine""#]
        );
    }

    #[test]
    fn split_whitespace_empty() {
        assert!(split_on_whitespace("").is_empty());
        assert!(split_on_whitespace("   ").is_empty());
    }

    #[test]
    fn strip_quotes_unbalanced() {
        assert_eq!(strip_quotes(r#""Name""#), "Name");
        assert_eq!(strip_quotes("'Name"), "Name");
        assert_eq!(strip_quotes(r#"'"Name"'"#), "Name");
        assert_eq!(strip_quotes("name"), "name");
    }

    #[test]
    fn unquote_requires_matching_pair() {
        assert_eq!(unquote("'abc'"), Some("abc"));
        assert_eq!(unquote(r#""a b""#), Some("a b"));
        assert_eq!(unquote(r#"'abc""#), None);
        assert_eq!(unquote("'"), None);
        assert_eq!(unquote("abc"), None);
    }
}
