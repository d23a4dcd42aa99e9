pub mod mount;

pub use mount::{MountAuthorizer, MountRule};
