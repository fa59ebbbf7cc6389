use crate::application::dto::{DecomposeRequest, DecomposeResponse};
use crate::decomposition::domain::DependencyGraph;
use crate::decomposition::services::{
    CleanGraphProjector, CycleResolver, GraphBuilder, TopologicalOrderer,
};
use crate::ports::inbound::SbomDecompositionPort;
use crate::ports::outbound::{BomDocument, BomReader, ProgressReporter};
use crate::shared::Result;
use anyhow::Context;

/// Stages reported to the progress reporter, in execution order
const STAGES: [&str; 4] = [
    "Reading SBOM",
    "Building dependency graph",
    "Resolving dependency cycles",
    "Projecting clean graph",
];

/// DecomposeSbomUseCase - turns one SBOM file into a clean dependency tree
///
/// Orchestrates the decomposition core using generic dependency injection
/// for its infrastructure.
///
/// # Type Parameters
/// * `R` - BomReader implementation
/// * `P` - ProgressReporter implementation
pub struct DecomposeSbomUseCase<R, P> {
    bom_reader: R,
    progress_reporter: P,
}

impl<R, P> DecomposeSbomUseCase<R, P>
where
    R: BomReader,
    P: ProgressReporter,
{
    pub fn new(bom_reader: R, progress_reporter: P) -> Self {
        Self {
            bom_reader,
            progress_reporter,
        }
    }

    /// Executes the decomposition
    ///
    /// Nothing partial is returned: any failing stage aborts the run.
    pub fn execute(&self, request: DecomposeRequest) -> Result<DecomposeResponse> {
        request.options.validate()?;

        // Step 1: Read and decode the SBOM
        let document = self.read_document(&request)?;

        // Step 2: Build the rooted dependency graph
        let mut graph = self.build_graph(&document)?;

        // Step 3: Break cycles and make sure the result can be ordered
        self.resolve_cycles(&mut graph)?;

        // Step 4: Project for presentation
        self.stage(3);
        let clean_graph = CleanGraphProjector::project(&graph, &request.options)
            .context("Failed to project the dependency graph")?;

        self.progress_reporter.report_completion(&format!(
            "✅ Decomposed {} component(s) into {} tree node(s)",
            graph.registry().len(),
            clean_graph.total_nodes
        ));

        let BomDocument { bom, md5, .. } = document;
        Ok(DecomposeResponse {
            clean_graph,
            metadata: bom.metadata,
            serial_number: bom.serial_number,
            spec_version: bom.spec_version,
            md5,
            min_transitive_severity: request.options.min_transitive_severity,
        })
    }

    fn stage(&self, index: usize) {
        self.progress_reporter
            .report_stage(index + 1, STAGES.len(), STAGES[index]);
    }

    fn read_document(&self, request: &DecomposeRequest) -> Result<BomDocument> {
        self.stage(0);
        self.progress_reporter.report(&format!(
            "📖 Loading SBOM from: {}",
            request.input_path.display()
        ));

        let document = self.bom_reader.read_bom(&request.input_path)?;

        self.progress_reporter.report(&format!(
            "✅ Detected {} component(s), {} dependency edge(s), {} vulnerability record(s)",
            document.bom.components.len(),
            document.bom.edge_count(),
            document.bom.vulnerabilities.len()
        ));
        Ok(document)
    }

    fn build_graph(&self, document: &BomDocument) -> Result<DependencyGraph> {
        self.stage(1);
        let graph = GraphBuilder::build(&document.bom).with_context(|| {
            format!(
                "Failed to build dependency graph from {}",
                document.source.display()
            )
        })?;

        if graph.dropped_edges() > 0 {
            self.progress_reporter.report_warning(&format!(
                "⚠️  Skipped {} dependency edge(s) naming unknown components",
                graph.dropped_edges()
            ));
        }
        Ok(graph)
    }

    fn resolve_cycles(&self, graph: &mut DependencyGraph) -> Result<()> {
        self.stage(2);
        let cycles = CycleResolver::resolve(graph);
        if cycles > 0 {
            self.progress_reporter.report_warning(&format!(
                "⚠️  Broke {} dependency cycle(s): {}",
                cycles,
                graph.broken_edges().join(", ")
            ));
        }

        TopologicalOrderer::order_ids(graph)
            .context("Dependency graph still contains a cycle after resolution")?;
        Ok(())
    }
}

impl<R, P> SbomDecompositionPort for DecomposeSbomUseCase<R, P>
where
    R: BomReader,
    P: ProgressReporter,
{
    fn decompose(&self, request: DecomposeRequest) -> Result<DecomposeResponse> {
        self.execute(request)
    }
}
