//! Builder for constructing DecompositionReadModel from domain objects

use super::component_view::ComponentView;
use super::decomposition_read_model::{
    CycleReportView, CycleView, DecompositionReadModel, SummaryView,
};
use super::meta_view::{AuthorView, LifecycleView, MetaView, ProjectView, ToolView};
use super::vulnerability_view::{
    AdvisoryView, AffectView, RatingView, SourceView, VulnerabilityView,
};
use crate::application::dto::DecomposeResponse;
use crate::decomposition::domain::dependency_graph::format_cycle_path;
use crate::decomposition::domain::{
    Affect, BomMetadata, ProjectedNode, Rating, Source, Vulnerability,
};
use chrono::{DateTime, FixedOffset};

/// Turns a use-case response into the serializable read model.
pub struct DecompositionReadModelBuilder;

impl DecompositionReadModelBuilder {
    pub fn build(response: &DecomposeResponse) -> DecompositionReadModel {
        let graph = &response.clean_graph;

        let summary = SummaryView {
            total_nodes: graph.total_nodes,
            reachable_components: graph.topological_order.len(),
            total_vulnerabilities: graph.vulnerabilities.len(),
            min_transitive_severity: response.min_transitive_severity,
            has_transitive_vulnerabilities: graph.root.has_transitive_vulnerabilities,
            max_level: graph.root.max_level(),
        };

        let cycles = CycleReportView {
            summary: graph.cycle_summary.clone(),
            cycles: graph
                .detected_cycles
                .iter()
                .zip(&graph.cycle_paths)
                .map(|(path, traversal)| CycleView {
                    path: path.clone(),
                    traversal: traversal.clone(),
                    display: format_cycle_path(path),
                })
                .collect(),
            broken_edges: graph.broken_edges.clone(),
            details: graph.cycles_details.clone(),
        };

        DecompositionReadModel {
            summary,
            meta: Self::build_meta(response),
            tree: Self::build_component(&graph.root),
            topological_order: graph.topological_order.clone(),
            cycles,
            vulnerabilities: graph.vulnerabilities.iter().map(Self::build_vulnerability).collect(),
        }
    }

    fn build_component(node: &ProjectedNode) -> ComponentView {
        let component = &node.component;
        ComponentView {
            bom_ref: component.bom_ref.clone(),
            name: component.name.clone(),
            group: component.group.clone(),
            version: component.version.clone(),
            component_type: component.component_type.as_str().to_string(),
            purl: component.purl.clone(),
            description: component.description.clone(),
            level: node.level,
            max_severity: node.max_severity,
            has_transitive_vulnerabilities: node.has_transitive_vulnerabilities,
            in_cycle: node.in_cycle,
            total_cve_count: node.total_cve_count,
            vulnerabilities: node.vulnerabilities.iter().map(Self::build_vulnerability).collect(),
            children: node.children.iter().map(Self::build_component).collect(),
        }
    }

    fn build_meta(response: &DecomposeResponse) -> MetaView {
        let mut meta = MetaView {
            serial_number: response.serial_number.clone(),
            bom_version: response.spec_version.clone(),
            md5: response.md5.clone(),
            ..Default::default()
        };

        let Some(metadata) = &response.metadata else {
            return meta;
        };
        let BomMetadata {
            timestamp,
            component,
            tools,
            authors,
            lifecycles,
            properties,
        } = metadata;

        meta.created_at = timestamp.as_ref().map(rfc3339);
        meta.project = component.as_ref().map(|c| ProjectView {
            bom_ref: c.bom_ref.clone(),
            name: c.name.clone(),
            version: c.version.clone(),
            component_type: c.component_type.as_str().to_string(),
        });
        meta.tools = tools
            .iter()
            .map(|t| ToolView {
                name: t.name.clone(),
                version: t.version.clone(),
            })
            .collect();
        meta.authors = authors
            .iter()
            .map(|a| AuthorView {
                name: a.name.clone(),
                email: a.email.clone(),
            })
            .collect();
        meta.lifecycles = lifecycles
            .iter()
            .map(|l| LifecycleView {
                phase: l
                    .phase
                    .clone()
                    .or_else(|| l.name.clone())
                    .unwrap_or_else(|| "unknown".to_string()),
                description: l.description.clone(),
            })
            .collect();
        // later duplicates win, as in a plain key/value map
        meta.properties = properties
            .iter()
            .map(|p| (p.name.clone(), p.value.clone()))
            .collect();

        meta
    }

    fn build_vulnerability(vuln: &Vulnerability) -> VulnerabilityView {
        VulnerabilityView {
            id: vuln.id.clone(),
            severity: vuln.max_severity().as_str().to_string(),
            max_score: vuln.max_score(),
            description: vuln.description.clone(),
            detail: vuln.detail.clone(),
            recommendation: vuln.recommendation.clone(),
            ratings: vuln.ratings.iter().map(Self::build_rating).collect(),
            cwes: vuln.cwes.clone(),
            advisories: vuln
                .advisories
                .iter()
                .map(|a| AdvisoryView {
                    title: a.title.clone(),
                    url: a.url.clone(),
                })
                .collect(),
            affects: vuln.affects.iter().map(Self::build_affect).collect(),
            source: vuln.source.as_ref().map(Self::build_source),
            created: vuln.created.as_ref().map(rfc3339),
            updated: vuln.updated.as_ref().map(rfc3339),
            published: vuln.published.as_ref().map(rfc3339),
            rejected: vuln.rejected.as_ref().map(rfc3339),
        }
    }

    fn build_rating(rating: &Rating) -> RatingView {
        RatingView {
            severity: rating.severity.as_str().to_string(),
            method: rating.method.as_str().to_string(),
            score: rating.score,
            vector: rating.vector.clone(),
            justification: rating.justification.clone(),
            source: rating.source.as_ref().map(Self::build_source),
        }
    }

    fn build_source(source: &Source) -> SourceView {
        SourceView {
            name: source.name.clone(),
            url: source.url.clone(),
        }
    }

    fn build_affect(affect: &Affect) -> AffectView {
        AffectView {
            bom_ref: affect.bom_ref.clone(),
            versions: affect
                .versions
                .iter()
                .filter_map(|v| {
                    let label = v.version.as_deref().or(v.range.as_deref())?;
                    Some(format!("{} ({})", label, v.status.as_str()))
                })
                .collect(),
        }
    }
}

fn rfc3339(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.to_rfc3339()
}
