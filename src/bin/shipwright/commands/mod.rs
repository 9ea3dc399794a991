//! Command implementations

pub mod configure;
pub mod options;
pub mod platforms;
