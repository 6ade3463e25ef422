pub mod generator;

pub use generator::{generate, generate_with, GeneratedBlocks, DEFAULT_PLACEHOLDERS};
