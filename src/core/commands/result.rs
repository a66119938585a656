//! Command execution result type.

/// Output of a successful command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutput {
    /// Nothing to print.
    None,
    /// Exactly one output line. Embedded line breaks are kept, not split.
    Line(String),
    /// One output line per element.
    Lines(Vec<String>),
}

impl CommandOutput {
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Lines(lines.into_iter().map(Into::into).collect())
    }

    /// Flatten into output lines.
    pub fn into_lines(self) -> Vec<String> {
        match self {
            Self::None => Vec::new(),
            Self::Line(line) => vec![line],
            Self::Lines(lines) => lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_has_no_lines() {
        assert!(CommandOutput::None.into_lines().is_empty());
    }

    #[test]
    fn test_single_line_keeps_line_breaks() {
        let lines = CommandOutput::line("a\nb").into_lines();
        assert_eq!(lines, vec!["a\nb"]);
    }

    #[test]
    fn test_lines_one_per_element() {
        let lines = CommandOutput::lines(["a", "", "b"]).into_lines();
        assert_eq!(lines, vec!["a", "", "b"]);
    }
}
