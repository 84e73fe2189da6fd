mod error;
mod requests;
mod types;

pub use error::TeamError;
pub use requests::CreateTeamRequest;
pub use types::{any_team_prefix, name_from_id, sport_prefix, team_id, Team, TeamQuery};
