//! Application use cases.
//!
//! Each use case coordinates the core domain with the repositories it is
//! handed. Handlers translate HTTP in and out; nothing here knows about HTTP.

mod change_status;
mod create_announcement;
mod create_team;
mod error;
mod find_announcements;
#[cfg(test)]
mod testing;

pub use change_status::change_status;
pub use create_announcement::create_announcement;
pub use create_team::create_team;
pub use error::UseCaseError;
pub use find_announcements::find_announcements;
