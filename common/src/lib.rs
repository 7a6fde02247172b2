mod named_map;
pub use named_map::*;

mod section;
pub use section::*;

mod story;
pub use story::*;

mod warning;
pub use warning::*;

mod config;
pub use config::*;

pub mod test_case;
