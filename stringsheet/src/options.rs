//! Options controlling how a model is written to a spreadsheet.

/// Export behavior options for [`crate::converter::export_to_xlsx`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Applies the review layout: column widths, highlighted blanks, hidden
    /// non-translatable rows, comments, frozen panes and an auto-filter.
    /// Cell text is the same either way.
    pub format_sheet: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { format_sheet: true }
    }
}

impl ExportOptions {
    /// Creates default export options (formatting enabled).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables/disables the review layout.
    pub fn with_formatting(mut self, format_sheet: bool) -> Self {
        self.format_sheet = format_sheet;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatting_enabled_by_default() {
        assert!(ExportOptions::new().format_sheet);
        assert!(!ExportOptions::new().with_formatting(false).format_sheet);
    }
}
