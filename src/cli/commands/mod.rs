//! CLI command implementations

pub mod export;
pub mod init;
pub mod kinds;
pub mod validate;
