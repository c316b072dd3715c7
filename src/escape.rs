use once_cell::sync::Lazy;
use regex::Regex;

/// ECMAScript `\s`: WhiteSpace plus LineTerminator. Differs from Unicode
/// `White_Space` (U+FEFF is in, U+0085 is out).
const JS_SPACE: &str = r"[\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]";

static BACKSLASH_OR_BACKTICK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\\`]").unwrap());
static NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"\n+{JS_SPACE}+")).unwrap());
static LEADING_TAB: Lazy<Regex> = Lazy::new(|| Regex::new(r"\t?").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(&format!("{JS_SPACE}+")).unwrap());

/// Prepare one literal piece for a template quasi.
///
/// Backslashes and backticks are escaped everywhere. The whitespace rules
/// only rewrite the first match in the piece: the first newline run (with the
/// indentation after it) is dropped, a leading tab is dropped (`\t?` matches
/// empty at offset 0 otherwise), and the first remaining whitespace run
/// becomes one space. Later runs are kept as written; generated output
/// depends on this exact shape.
pub fn escape_literal(text: &str) -> String {
    let escaped = BACKSLASH_OR_BACKTICK.replace_all(text, r"\$0");
    let collapsed = NEWLINE_RUN.replacen(&escaped, 1, "");
    let untabbed = LEADING_TAB.replacen(&collapsed, 1, "");
    WHITESPACE_RUN.replacen(&untabbed, 1, " ").into_owned()
}
