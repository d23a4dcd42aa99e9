pub mod error;
pub mod logging;

pub mod auth;
pub mod config;
pub mod fs;
pub mod metadata;
pub mod registry;
pub mod terminus;
pub mod uri;

pub use error::Result;
pub use terminus::{ModuleFilesTerminus, ModuleFilesTerminusBuilder};
pub use uri::ModuleFileUri;
