pub mod definition;
pub mod document;
pub mod loader;

pub use definition::*;
pub use document::*;
pub use loader::read_json;
