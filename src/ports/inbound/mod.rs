/// Inbound ports (Driving ports) - Use case interfaces
pub mod sbom_decomposition_port;

pub use sbom_decomposition_port::SbomDecompositionPort;
