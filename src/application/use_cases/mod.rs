/// Use cases module containing application business logic orchestration
mod decompose_sbom;

pub use decompose_sbom::DecomposeSbomUseCase;
