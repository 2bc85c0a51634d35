//! Bordered-text formatter (double-line box glyphs).

/// Wrap `content` in a double-line box with one space of margin.
///
/// Every line is padded to the widest line, measured in chars.
///
/// ```
/// use cybermaint_core::ascii_box;
///
/// assert_eq!(
///     ascii_box("Welcome, Operator."),
///     "╔════════════════════╗\n║ Welcome, Operator. ║\n╚════════════════════╝"
/// );
/// ```
pub fn ascii_box(content: &str) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let inner = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let width = inner + 2;

    let rule = "═".repeat(width);
    let mut out = String::with_capacity((width + 2) * (lines.len() + 2) * 3);
    out.push('╔');
    out.push_str(&rule);
    out.push('╗');
    for line in &lines {
        out.push_str("\n║ ");
        out.push_str(line);
        for _ in line.chars().count()..inner {
            out.push(' ');
        }
        out.push_str(" ║");
    }
    out.push_str("\n╚");
    out.push_str(&rule);
    out.push('╝');
    out
}
