//! Table rendering for CLI output

use super::{ColorTheme, StatusIcon};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

/// Existence of one manifest's resource in the cluster
#[derive(Debug, Clone, Serialize)]
pub struct ResourceStatus {
    pub kind: String,
    pub name: String,
    pub namespace: String,
    pub exists: bool,
}

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render resource statuses as a formatted table followed by a summary line
    pub fn render_statuses(&self, statuses: &[ResourceStatus]) -> String {
        if statuses.is_empty() {
            return "No resources found in manifests".to_string();
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("KIND").set_alignment(CellAlignment::Left),
                Cell::new("NAME").set_alignment(CellAlignment::Left),
                Cell::new("NAMESPACE").set_alignment(CellAlignment::Left),
                Cell::new("STATUS").set_alignment(CellAlignment::Center),
            ]);

        for status in statuses {
            let text = format!(
                "{} {}",
                StatusIcon::get_presence_icon(status.exists),
                StatusIcon::get_presence_text(status.exists)
            );

            table.add_row(vec![
                Cell::new(&status.kind),
                Cell::new(&status.name),
                Cell::new(&status.namespace).fg(self.theme.muted),
                Cell::new(text)
                    .fg(self.theme.get_presence_color(status.exists))
                    .set_alignment(CellAlignment::Center),
            ]);
        }

        let present = statuses.iter().filter(|s| s.exists).count();
        let summary = format!("{}/{} resources present", present, statuses.len());
        let summary = if present == statuses.len() {
            summary.green().to_string()
        } else {
            summary.yellow().to_string()
        };

        format!("{}\n{}", table, summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty_statuses() {
        let renderer = TableRenderer::new();
        let output = renderer.render_statuses(&[]);
        assert!(output.contains("No resources found"));
    }

    #[test]
    fn test_render_statuses() {
        colored::control::set_override(false);

        let renderer = TableRenderer::new();
        let statuses = vec![
            ResourceStatus {
                kind: "deployment".to_string(),
                name: "web".to_string(),
                namespace: "prod".to_string(),
                exists: true,
            },
            ResourceStatus {
                kind: "job".to_string(),
                name: "batch-1".to_string(),
                namespace: "prod".to_string(),
                exists: false,
            },
        ];

        let output = renderer.render_statuses(&statuses);
        assert!(output.contains("web"));
        assert!(output.contains("batch-1"));
        assert!(output.contains("Present"));
        assert!(output.contains("Missing"));
        assert!(output.contains("1/2 resources present"));
    }
}
