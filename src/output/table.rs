//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Format rows as a rounded table with centered headers.
///
/// An empty slice renders as `empty_message` rather than a header-only table.
pub fn format_table<T: Tabled>(rows: &[T], empty_message: &str) -> String {
    if rows.is_empty() {
        return empty_message.to_string();
    }

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Tabled)]
    struct HookRow {
        #[tabled(rename = "NAME")]
        name: String,
        #[tabled(rename = "SCOPE")]
        scope: String,
    }

    fn row(name: &str, scope: &str) -> HookRow {
        HookRow {
            name: name.to_string(),
            scope: scope.to_string(),
        }
    }

    #[test]
    fn test_format_table_empty() {
        let rows: Vec<HookRow> = vec![];
        assert_eq!(
            format_table(&rows, "No webhooks on registry contoso."),
            "No webhooks on registry contoso."
        );
    }

    #[test]
    fn test_format_table_rows_and_headers() {
        let rows = vec![row("myapp0a1b2c", "widgets:v1"), row("other9f8e7d", "gadgets:*")];

        let result = format_table(&rows, "unused");

        assert!(result.contains("NAME"));
        assert!(result.contains("SCOPE"));
        assert!(result.contains("myapp0a1b2c"));
        assert!(result.contains("gadgets:*"));
        assert!(!result.contains("unused"));
        // Rounded style corners
        assert!(result.contains("╭"));
        assert!(result.contains("╰"));
    }
}
