use super::document::{
    AffectDocument, BomDocument, ComponentDocument, MetadataDocument, RatingDocument,
    SourceDocument, ToolsDocument, VulnerabilityDocument,
};
use crate::decomposition::domain::vulnerability::checked_score;
use crate::decomposition::domain::{
    Advisory, Affect, AffectedStatus, AffectedVersion, Bom, BomMetadata, Component,
    ComponentType, Contact, Dependency, Lifecycle, Property, Rating, ScoringMethod, Severity,
    Source, Vulnerability,
};
use crate::shared::error::SbomError;
use crate::shared::Result;
use chrono::{DateTime, FixedOffset};
use std::path::Path;
use uuid::Uuid;

const BOM_FORMAT: &str = "CycloneDX";
const SERIAL_PREFIX: &str = "urn:uuid:";

/// Decodes CycloneDX JSON into the domain model.
///
/// Trusting decoder: structural problems inside the graph (dangling refs,
/// cycles) are left for the decomposition core to tolerate or reject.
pub struct CycloneDxDecoder;

impl CycloneDxDecoder {
    /// Decodes one document. `path` is only used for error messages.
    pub fn decode(bytes: &[u8], path: &Path) -> Result<Bom> {
        let document: BomDocument =
            serde_json::from_slice(bytes).map_err(|e| SbomError::BomParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;

        if let Some(format) = document.bom_format.as_deref() {
            if format != BOM_FORMAT {
                return Err(SbomError::BomParseError {
                    path: path.to_path_buf(),
                    details: format!("unsupported bomFormat '{}'", format),
                }
                .into());
            }
        }

        let serial_number = document.serial_number.map(|serial| {
            if !Self::is_valid_serial(&serial) {
                tracing::warn!(serial = %serial, "serial number is not a urn:uuid, passing it through");
            }
            serial
        });

        let mut components = Vec::new();
        for component in document.components {
            Self::flatten_component(component, &mut components);
        }

        Ok(Bom {
            serial_number,
            spec_version: document.spec_version,
            metadata: document.metadata.map(Self::metadata),
            components,
            dependencies: document
                .dependencies
                .into_iter()
                .map(|d| Dependency::new(d.bom_ref, d.depends_on))
                .collect(),
            vulnerabilities: document
                .vulnerabilities
                .into_iter()
                .enumerate()
                .map(|(i, v)| Self::vulnerability(i, v))
                .collect(),
        })
    }

    fn is_valid_serial(serial: &str) -> bool {
        serial
            .strip_prefix(SERIAL_PREFIX)
            .is_some_and(|id| Uuid::parse_str(id).is_ok())
    }

    fn metadata(metadata: MetadataDocument) -> BomMetadata {
        let tools = match metadata.tools {
            Some(ToolsDocument::Components { components }) => {
                components.into_iter().map(Self::component).collect()
            }
            Some(ToolsDocument::Legacy(tools)) => tools
                .into_iter()
                .filter_map(|tool| {
                    let name = tool.name?;
                    let component = Component::new(
                        name.clone(),
                        name,
                        tool.version.unwrap_or_default(),
                        ComponentType::Application,
                    );
                    Some(match tool.vendor {
                        Some(vendor) => component.with_group(vendor),
                        None => component,
                    })
                })
                .collect(),
            None => Vec::new(),
        };

        BomMetadata {
            timestamp: metadata
                .timestamp
                .as_deref()
                .and_then(|t| parse_timestamp("metadata.timestamp", t)),
            component: metadata.component.map(Self::component),
            tools,
            authors: metadata
                .authors
                .into_iter()
                .map(|a| Contact {
                    name: a.name,
                    email: a.email,
                    phone: a.phone,
                    bom_ref: a.bom_ref,
                })
                .collect(),
            lifecycles: metadata
                .lifecycles
                .into_iter()
                .map(|l| Lifecycle {
                    phase: l.phase,
                    name: l.name,
                    description: l.description,
                })
                .collect(),
            properties: metadata
                .properties
                .into_iter()
                .map(|p| Property {
                    name: p.name,
                    value: p.value,
                })
                .collect(),
        }
    }

    /// Appends the component and, depth-first, its sub-components.
    fn flatten_component(mut document: ComponentDocument, out: &mut Vec<Component>) {
        let nested = std::mem::take(&mut document.components);
        out.push(Self::component(document));
        for child in nested {
            Self::flatten_component(child, out);
        }
    }

    fn component(document: ComponentDocument) -> Component {
        let version = document.version.unwrap_or_default();
        // bom-ref is optional in CycloneDX; fall back to the purl, then to name@version
        let bom_ref = document
            .bom_ref
            .or_else(|| document.purl.clone())
            .unwrap_or_else(|| format!("{}@{}", document.name, version));

        Component {
            bom_ref,
            name: document.name,
            group: document.group,
            version,
            description: document.description,
            component_type: document
                .component_type
                .as_deref()
                .map(ComponentType::parse)
                .unwrap_or_default(),
            purl: document.purl,
        }
    }

    fn vulnerability(index: usize, document: VulnerabilityDocument) -> Vulnerability {
        let id = document
            .id
            .or(document.bom_ref)
            .unwrap_or_else(|| format!("vulnerability-{}", index + 1));

        let timestamp = |field: &str, value: Option<String>| {
            value
                .as_deref()
                .and_then(|v| parse_timestamp(&format!("{}.{}", id, field), v))
        };

        Vulnerability {
            created: timestamp("created", document.created),
            updated: timestamp("updated", document.updated),
            published: timestamp("published", document.published),
            rejected: timestamp("rejected", document.rejected),
            detail: document.detail,
            description: document.description,
            recommendation: document.recommendation,
            ratings: document.ratings.into_iter().map(Self::rating).collect(),
            cwes: document.cwes,
            advisories: document
                .advisories
                .into_iter()
                .map(|a| Advisory {
                    title: a.title,
                    url: a.url,
                })
                .collect(),
            affects: document.affects.into_iter().map(Self::affect).collect(),
            source: document.source.map(Self::source),
            id,
        }
    }

    fn rating(document: RatingDocument) -> Rating {
        let score = document.score.and_then(|s| {
            let checked = checked_score(s);
            if checked.is_none() {
                tracing::warn!(score = s, "ignoring rating score outside 0.0 - 10.0");
            }
            checked
        });

        Rating {
            severity: document
                .severity
                .as_deref()
                .map(Severity::parse)
                .unwrap_or_default(),
            method: document
                .method
                .as_deref()
                .map(ScoringMethod::parse)
                .unwrap_or_default(),
            score,
            vector: document.vector,
            justification: document.justification,
            source: document.source.map(Self::source),
        }
    }

    fn affect(document: AffectDocument) -> Affect {
        Affect {
            bom_ref: document.bom_ref,
            versions: document
                .versions
                .into_iter()
                .map(|v| AffectedVersion {
                    version: v.version,
                    range: v.range,
                    status: v
                        .status
                        .as_deref()
                        .map(AffectedStatus::parse)
                        .unwrap_or_default(),
                })
                .collect(),
        }
    }

    fn source(document: SourceDocument) -> Source {
        Source {
            name: document.name,
            url: document.url,
        }
    }
}

/// Parses an RFC 3339 timestamp; anything else is logged and treated as unknown.
fn parse_timestamp(field: &str, value: &str) -> Option<DateTime<FixedOffset>> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(timestamp) => Some(timestamp),
        Err(e) => {
            tracing::warn!(field, value, error = %e, "ignoring unparsable timestamp");
            None
        }
    }
}
