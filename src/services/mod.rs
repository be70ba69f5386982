#[cfg(feature = "ssr")]
pub mod relay;
#[cfg(feature = "ssr")]
pub mod runtime;

#[cfg(feature = "ssr")]
pub use relay::*;
#[cfg(feature = "ssr")]
pub use runtime::*;
