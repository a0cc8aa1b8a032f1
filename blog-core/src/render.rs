//! Markdown-to-markup conversion and the optional icon pass. Both are
//! pure string transforms; how the produced markup is displayed is the
//! frontend's business.

use pulldown_cmark::{html, Options, Parser};

/// Converts raw markdown to HTML. Supports the common superset the
/// articles use: headings, lists, emphasis, code, links, plus tables,
/// strikethrough and footnotes.
pub fn render_markdown(raw: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(raw, options);
    let mut out = String::with_capacity(raw.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Replaces `:shortcode:` sequences with their Unicode emoji. Unknown
/// codes and stray colons pass through untouched.
#[cfg(feature = "icons")]
pub fn replace_icon_codes(input: &str) -> String {
    fn is_shortcode_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-')
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find(':') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        if let Some(end) = after.find(':') {
            let code = &after[..end];
            if !code.is_empty() && code.chars().all(is_shortcode_char) {
                if let Some(emoji) = emojis::get_by_shortcode(code) {
                    out.push_str(emoji.as_str());
                    rest = &after[end + 1..];
                    continue;
                }
            }
        }
        out.push(':');
        rest = after;
    }
    out.push_str(rest);
    out
}

/// Without the `icons` feature the pass is absent; markup is left as-is.
#[cfg(not(feature = "icons"))]
pub fn replace_icon_codes(input: &str) -> String {
    input.to_owned()
}
