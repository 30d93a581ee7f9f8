//! Quote-aware splitting and small list helpers used by the tokenizer.

const QUOTES: [char; 2] = ['\'', '"'];

/// Split `text` on `sep`, keeping quoted spans together.
///
/// Single- and double-quoted spans are never split, and a backslash makes the
/// next character literal. Once split, a token wrapped in a matching pair of
/// unescaped quotes loses them, and escapes are resolved. An unterminated quote
/// runs to the end of the input and is kept as written.
///
/// With `filter_empty`, empty tokens are dropped.
///
/// ```
/// use cmdrouter::split::advance_split;
///
/// assert_eq!(advance_split("command 'a b c'", " ", true), vec!["command", "a b c"]);
/// assert_eq!(advance_split("1,,3", ",", false), vec!["1", "", "3"]);
/// ```
pub fn advance_split(text: &str, sep: &str, filter_empty: bool) -> Vec<String> {
    let mut raw_tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        if quote.is_none() && !sep.is_empty() && rest.starts_with(sep) {
            raw_tokens.push(std::mem::take(&mut current));
            rest = &rest[sep.len()..];
            continue;
        }
        rest = &rest[ch.len_utf8()..];

        if ch == '\\' {
            // Escape pairs stay intact until the token is finished.
            current.push(ch);
            if let Some(next) = rest.chars().next() {
                current.push(next);
                rest = &rest[next.len_utf8()..];
            }
            continue;
        }

        match quote {
            Some(open) => {
                if ch == open {
                    quote = None;
                }
                current.push(ch);
            }
            None if QUOTES.contains(&ch) => {
                quote = Some(ch);
                current.push(ch);
            }
            None => current.push(ch),
        }
    }
    raw_tokens.push(current);

    raw_tokens
        .iter()
        .map(|token| unescape(strip_quotes(token)))
        .filter(|token| !filter_empty || !token.is_empty())
        .collect()
}

/// Remove one pair of matching, unescaped surrounding quotes.
fn strip_quotes(token: &str) -> &str {
    let first = match token.chars().next() {
        Some(c) if QUOTES.contains(&c) => c,
        _ => return token,
    };
    if token.len() < 2 || !token.ends_with(first) {
        return token;
    }
    let inner = &token[1..token.len() - 1];
    let trailing_backslashes = inner.chars().rev().take_while(|c| *c == '\\').count();
    if trailing_backslashes % 2 == 1 {
        // The closing quote is escaped.
        return token;
    }
    inner
}

fn unescape(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some(next) => out.push(next),
                None => out.push(ch),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Drop entries that are empty or whitespace-only.
pub fn drop_empty<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items
        .iter()
        .map(AsRef::as_ref)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Plain split on `sep`, trimming each piece and dropping blanks.
pub fn split_and_drop_empty(text: &str, sep: &str) -> Vec<String> {
    text.split(sep)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
