mod category;
mod error;
mod sport;

pub use category::Category;
pub use error::CategoryError;
pub use sport::Sport;
