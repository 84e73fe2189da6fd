pub mod announcements;
pub mod error;
pub mod health;
pub mod teams;

pub use error::AppError;
