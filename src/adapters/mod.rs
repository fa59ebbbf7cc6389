/// Adapters layer - Infrastructure implementations
///
/// Concrete implementations of the outbound ports: file system, CycloneDX
/// decoding, output formats and console progress.
pub mod outbound;
