mod category_range;
mod error;
mod location;
mod query;
mod requests;
mod response;
mod status;
mod time_slot;
mod types;
mod validation;

pub use category_range::{CategoryBounds, CategoryRange, RangeType};
pub use error::{AnnouncementError, QueryParamError, RequestError, StatusError};
pub use location::{Location, LocationTimezone, DEFAULT_TIMEZONE};
pub use query::{AnnouncementQuery, LocationField, PostFilter};
pub use requests::{
    CategoryRangeInput, ChangeStatusRequest, CreateAnnouncementRequest, FindAnnouncementsParams,
    TimeSlotInput,
};
pub use response::{
    AnnouncementResponse, CategoryRangeResponse, PaginatedAnnouncementsResponse, TimeSlotResponse,
};
pub use status::Status;
pub use time_slot::TimeSlot;
pub use types::{MatchAnnouncement, NewAnnouncement, ANNOUNCEMENT_TTL_DAYS};
pub use validation::AnnouncementValidator;
