pub mod config;
pub mod logger;
pub mod prelude;
pub mod rendering;
pub mod resources;

pub use glow;
