#[cfg(feature = "ssr")]
pub mod tracing;
