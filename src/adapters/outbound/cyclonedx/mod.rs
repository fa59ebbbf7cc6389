/// CycloneDX JSON decoding into the domain `Bom`
mod decoder;
mod document;

pub use decoder::CycloneDxDecoder;
