/// Static catalog of libraries, build items and makefile text
pub mod catalog;
/// Error taxonomy shared by every module
pub mod error;
/// Console logger
pub mod log;

pub use catalog::{BuildItem, Catalog, Library, ProjectConfig, Templates};
pub use error::{Error, Result};
pub use log::{log, LogLevel};
