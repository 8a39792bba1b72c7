/// Undo the spreadsheet-literal wrapping the SUA export puts around cells.
///
/// Strips, in order, a leading `="`, a single trailing `,` and a trailing `"`.
/// Anything else is returned unchanged, so plain cells pass straight through.
pub fn trim_value(raw: &str) -> &str {
    let value = raw.strip_prefix("=\"").unwrap_or(raw);
    let value = value.strip_suffix(',').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}
