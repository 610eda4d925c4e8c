//! Data models for the AlumniConnect application.
//!
//! Wire names are camelCase to match the frontend TypeScript interfaces.
//! Records are flat; cross-collection references (`sponsorId`, `partnerId`,
//! mentorship member ids) are plain string ids with no enforced integrity.

mod application;
mod chapter;
mod event;
mod mentorship;
mod opportunity;
mod partner;
mod qa;
mod spotlight;
mod sponsor;
mod user;

pub use application::*;
pub use chapter::*;
pub use event::*;
pub use mentorship::*;
pub use opportunity::*;
pub use partner::*;
pub use qa::*;
pub use spotlight::*;
pub use sponsor::*;
pub use user::*;

use chrono::Utc;
use uuid::Uuid;

/// Mint a fresh record id.
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current time as an RFC 3339 string, the timestamp format used on the wire.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339()
}
