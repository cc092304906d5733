//! Rendering helpers for diagnostic messages: argument lists and truncation.
//!
//! All lengths are counted in characters, not bytes.

use crate::value::{Kwargs, Value};

/// Default `maxlen` for [`shortrepr`].
pub const DEFAULT_SHORTREPR_LEN: usize = 10;
/// Default `maxlen` for [`argrepr`] and the runner's call texts.
pub const DEFAULT_ARGREPR_LEN: usize = 18;

const ELLIPSIS: &str = "..";

/// `1, "a", [2]`
pub fn argsrepr(values: &[Value]) -> String {
    values.iter().map(Value::repr).collect::<Vec<_>>().join(", ")
}

/// `x=1, y="a"`
///
/// [`Kwargs`] is ordered by name, so `y="a", x=1` renders as `x=1, y="a"`.
pub fn kwargsrepr(kwargs: &Kwargs) -> String {
    kwargs
        .iter()
        .map(|(name, value)| format!("{}={}", name, value.repr()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Truncates `text` to roughly `maxlen` characters.
///
/// Text without line breaks that is longer than `maxlen` keeps a head of
/// `(maxlen + 1) / 2` characters and a tail making up the rest, joined by
/// `..`, for a total of `maxlen + 2`.
///
/// Text with line breaks keeps everything through the first line break, then
/// a tail whose start is computed from the first and last line break. This is
/// not a "first and last line" truncator: when the first line is longer than
/// `maxlen` the tail is dropped entirely.
///
/// ```rust
/// use tabletest::format::shorten;
/// assert_eq!(shorten("abcdefghij", 4), "ab..ij");
/// assert_eq!(shorten("short", 10), "short");
/// ```
pub fn shorten(text: &str, maxlen: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    if let Some(first) = chars.iter().position(|&c| c == '\n') {
        let last = chars.iter().rposition(|&c| c == '\n').unwrap_or(first);
        let maxlen = isize::try_from(maxlen).unwrap_or(isize::MAX);
        let keep = (maxlen - first as isize).min((len - last) as isize);
        let tail_start = (len as isize - keep + 1).clamp(0, len as isize) as usize;
        return chars[..=first].iter().chain(&chars[tail_start..]).collect();
    }

    if len > maxlen {
        let head = (maxlen + 1) / 2;
        let tail_start = len - (maxlen - head);
        let mut out: String = chars[..head].iter().collect();
        out.push_str(ELLIPSIS);
        out.extend(&chars[tail_start..]);
        return out;
    }

    text.to_string()
}

/// `shorten(value.repr(), maxlen)`
pub fn shortrepr(value: &Value, maxlen: usize) -> String {
    shorten(&value.repr(), maxlen)
}

/// Renders positional and named arguments as one comma separated list,
/// shortened to `maxlen` unless it is `None` or `Some(0)`.
pub fn argrepr(args: &[Value], kwargs: &Kwargs, maxlen: Option<usize>) -> String {
    let text = args
        .iter()
        .map(Value::repr)
        .chain(
            kwargs
                .iter()
                .map(|(name, value)| format!("{}={}", name, value.repr())),
        )
        .collect::<Vec<_>>()
        .join(", ");
    match maxlen {
        Some(n) if n > 0 => shorten(&text, n),
        _ => text,
    }
}
