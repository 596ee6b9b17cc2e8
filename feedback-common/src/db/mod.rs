//! Database initialization and data access

pub mod courses;
pub mod feedback;
pub mod init;
pub mod models;

pub use courses::*;
pub use feedback::*;
pub use init::*;
pub use models::*;
