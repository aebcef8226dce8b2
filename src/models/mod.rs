//! Typed records for every table of the row store. Rows are validated when
//! they are mapped from SQLite, so the rest of the crate never handles an
//! unknown role, category or malformed date.

pub mod announcement;
pub mod complaint;
pub mod profile;
pub mod session;
pub mod settings;
pub mod shift;

pub use announcement::{Announcement, AnnouncementCategory, Priority};
pub use complaint::{Complaint, ComplaintCategory, ComplaintStatus, Urgency};
pub use profile::{Profile, Role};
pub use session::Session;
pub use settings::StoreSettings;
pub use shift::{NewShift, Shift, ShiftRole};
