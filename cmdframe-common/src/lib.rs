pub mod config;
pub mod macros;
pub mod util;

#[doc(hidden)]
pub use tracing;
