mod error;
mod http_mapping;
mod page;
mod traits;

pub use error::{RepositoryError, Result, StorePhase};
pub use http_mapping::repository_error_to_status_code;
pub use page::{calculate_page_info, paginate, Page, PageInfo};
pub use traits::{AnnouncementRepository, TeamRepository};
