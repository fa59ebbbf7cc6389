/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod console;
pub mod cyclonedx;
pub mod filesystem;
pub mod formatters;
