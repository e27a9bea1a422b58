pub mod driver;
pub mod executor;
pub mod image_config;

pub use driver::{RunOptions, Runner};
pub use executor::{fan_out, Launcher, ProcessLauncher};
