/// Result alias used outside the decomposition core.
///
/// The core returns `DecompositionError` directly; application and adapter
/// code propagates everything as `anyhow::Error` so context can be attached.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
