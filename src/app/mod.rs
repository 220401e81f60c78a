#[cfg(feature = "cli")]
pub mod runner;
