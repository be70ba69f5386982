#[cfg(feature = "ssr")]
pub mod generate;

#[cfg(feature = "ssr")]
pub use generate::*;
