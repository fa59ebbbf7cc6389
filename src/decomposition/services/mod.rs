mod clean_graph_projector;
mod cycle_resolver;
mod graph_builder;
mod topological_orderer;

pub use clean_graph_projector::CleanGraphProjector;
pub use cycle_resolver::CycleResolver;
pub use graph_builder::GraphBuilder;
pub use topological_orderer::TopologicalOrderer;
