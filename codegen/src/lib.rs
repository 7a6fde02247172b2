mod error;
pub use error::CodegenError;

mod generator;
pub use generator::*;

mod story_id;
pub use story_id::story_id;

mod template;
pub use template::*;

mod bundle;
pub use bundle::*;

#[cfg(test)]
mod tests;

/// Written into the header of every generated story.js.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
