/// Escapes the five HTML-significant characters so stored text renders
/// inert when later injected into markup.
///
/// Not idempotent: re-escaping double-escapes `&`. Applied exactly once,
/// at write time, never on read.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
