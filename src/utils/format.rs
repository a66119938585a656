//! Formatting helpers for terminal output.

/// Lay names out in two columns.
///
/// The column width is the longest name plus two spaces. Each row is
/// right-trimmed, so an odd final row carries no padding.
pub fn two_columns(names: &[String]) -> Vec<String> {
    let width = names
        .iter()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0)
        + 2;

    names
        .chunks(2)
        .map(|row| {
            let left = &row[0];
            let right = row.get(1).map(String::as_str).unwrap_or("");
            format!("{:<width$}{}", left, right, width = width)
                .trim_end()
                .to_string()
        })
        .collect()
}

/// Number lines the way `history` prints them: `  1  entry`.
pub fn numbered<'a>(entries: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| format!("{:>3}  {}", i + 1, entry))
        .collect()
}
