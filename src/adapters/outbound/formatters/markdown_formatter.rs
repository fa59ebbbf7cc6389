use crate::application::read_models::{
    ComponentView, CycleReportView, DecompositionReadModel, MetaView, SummaryView,
    VulnerabilityView,
};
use crate::ports::outbound::SbomFormatter;
use crate::shared::Result;

/// Markdown table header for the vulnerability list
const VULN_TABLE_HEADER: &str = "| ID | Severity | Score | Affected Components | Advisory |\n";

/// Markdown table separator line for the vulnerability list
const VULN_TABLE_SEPARATOR: &str = "|----|----------|-------|---------------------|----------|\n";

/// MarkdownFormatter adapter - human-readable decomposition report
///
/// Renders a summary table, the dependency tree with severity and cycle
/// markers, the vulnerability list and the cycle report.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn plural<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
        if count == 1 {
            singular
        } else {
            plural
        }
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, meta: &MetaView) {
        match &meta.project {
            Some(project) => output.push_str(&format!(
                "# SBOM Decomposition: {} {}\n\n",
                project.name, project.version
            )),
            None => output.push_str("# SBOM Decomposition\n\n"),
        }
    }

    fn render_summary(&self, output: &mut String, summary: &SummaryView, meta: &MetaView) {
        output.push_str("## Summary\n\n");
        output.push_str("| Property | Value |\n");
        output.push_str("|----------|-------|\n");

        let mut row = |name: &str, value: String| {
            output.push_str(&format!(
                "| {} | {} |\n",
                name,
                Self::escape_table_cell(&value)
            ));
        };

        if let Some(serial) = &meta.serial_number {
            row("Serial number", serial.clone());
        }
        if let Some(version) = &meta.bom_version {
            row("CycloneDX version", version.clone());
        }
        if let Some(created_at) = &meta.created_at {
            row("Created", created_at.clone());
        }
        row("MD5", meta.md5.clone());
        row("Tree nodes", summary.total_nodes.to_string());
        row(
            "Reachable components",
            summary.reachable_components.to_string(),
        );
        row("Deepest level", summary.max_level.to_string());
        row(
            "Vulnerabilities",
            summary.total_vulnerabilities.to_string(),
        );
        row(
            "Exposure threshold",
            format!("{:.1}", summary.min_transitive_severity),
        );
        row(
            "Transitive exposure",
            if summary.has_transitive_vulnerabilities {
                "⚠️ yes".to_string()
            } else {
                "no".to_string()
            },
        );
        output.push('\n');
    }

    fn render_tree(&self, output: &mut String, tree: &ComponentView) {
        output.push_str("## Dependency Tree\n\n");
        output.push_str(
            "⚠️ marks components carrying vulnerabilities, 🔴 subtrees exposed at or above the threshold, 🔁 cycle members.\n\n",
        );
        output.push_str("```text\n");
        output.push_str(&Self::node_label(tree));
        output.push('\n');
        Self::render_children(output, tree, "");
        output.push_str("```\n\n");
    }

    fn render_children(output: &mut String, node: &ComponentView, prefix: &str) {
        let last = node.children.len().saturating_sub(1);
        for (i, child) in node.children.iter().enumerate() {
            let (branch, indent) = if i == last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            output.push_str(prefix);
            output.push_str(branch);
            output.push_str(&Self::node_label(child));
            output.push('\n');
            Self::render_children(output, child, &format!("{}{}", prefix, indent));
        }
    }

    fn node_label(node: &ComponentView) -> String {
        let mut label = match &node.group {
            Some(group) if !group.is_empty() => format!("{}/{}", group, node.name),
            _ => node.name.clone(),
        };
        if !node.version.is_empty() {
            label.push('@');
            label.push_str(&node.version);
        }
        if node.total_cve_count > 0 {
            label.push_str(&format!(
                " ⚠️ {} {} (max {:.1})",
                node.total_cve_count,
                Self::plural(node.total_cve_count, "CVE", "CVEs"),
                node.max_severity
            ));
        }
        if node.has_transitive_vulnerabilities {
            label.push_str(" 🔴");
        }
        if node.in_cycle {
            label.push_str(" 🔁");
        }
        label
    }

    fn render_vulnerabilities(&self, output: &mut String, vulns: &[VulnerabilityView]) {
        output.push_str("## Vulnerabilities\n\n");
        if vulns.is_empty() {
            output.push_str("*No vulnerabilities declared*\n\n");
            return;
        }

        output.push_str(&format!(
            "**{} {} declared.**\n\n",
            vulns.len(),
            Self::plural(vulns.len(), "vulnerability", "vulnerabilities")
        ));
        output.push_str(VULN_TABLE_HEADER);
        output.push_str(VULN_TABLE_SEPARATOR);

        for vuln in vulns {
            let score = vuln
                .max_score
                .map(|s| format!("{:.1}", s))
                .unwrap_or_else(|| "N/A".to_string());
            let affected = vuln
                .affects
                .iter()
                .map(|a| a.bom_ref.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let advisory = vuln
                .advisories
                .first()
                .map(|a| format!("[link]({})", a.url))
                .unwrap_or_default();

            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                Self::escape_table_cell(&vuln.id),
                vuln.severity,
                score,
                Self::escape_table_cell(&affected),
                advisory
            ));
        }
        output.push('\n');
    }

    fn render_cycles(&self, output: &mut String, cycles: &CycleReportView) {
        output.push_str("## Dependency Cycles\n\n");
        if cycles.cycles.is_empty() {
            output.push_str("*No dependency cycles found*\n");
            return;
        }

        if let Some(summary) = &cycles.summary {
            output.push_str(&format!("**{}.**\n\n", summary));
        }
        for (i, cycle) in cycles.cycles.iter().enumerate() {
            output.push_str(&format!(
                "{}. `{}` ({} {})\n",
                i + 1,
                cycle.display,
                cycle.path.len().saturating_sub(1),
                Self::plural(cycle.path.len().saturating_sub(1), "component", "components")
            ));
        }
        output.push('\n');

        if !cycles.broken_edges.is_empty() {
            output.push_str("Removed edges:\n\n");
            for edge in &cycles.broken_edges {
                output.push_str(&format!("- `{}`\n", edge));
            }
        }
    }
}

impl SbomFormatter for MarkdownFormatter {
    fn format(&self, model: &DecompositionReadModel) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output, &model.meta);
        self.render_summary(&mut output, &model.summary, &model.meta);
        self.render_tree(&mut output, &model.tree);
        self.render_vulnerabilities(&mut output, &model.vulnerabilities);
        self.render_cycles(&mut output, &model.cycles);

        Ok(output)
    }
}
