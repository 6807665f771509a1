//! Port definitions (trait interfaces for adapters)

pub mod filesystem;

pub use filesystem::IFileSystem;
