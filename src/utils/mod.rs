pub mod display;
pub mod markdown;

pub use display::*;
pub use markdown::render_markdown;
