/// Data Transfer Objects for application layer
///
/// DTOs carry data between the CLI, the use case and the formatters,
/// keeping the decomposition core free of presentation concerns.
mod decompose_request;
mod decompose_response;
mod output_format;

pub use decompose_request::DecomposeRequest;
pub use decompose_response::DecomposeResponse;
pub use output_format::OutputFormat;
