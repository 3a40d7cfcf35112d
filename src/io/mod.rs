pub mod loader;
pub mod reader;
pub mod writer;
