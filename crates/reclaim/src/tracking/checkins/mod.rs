//! Daily check-in recording and streak maintenance.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Checkin, CheckinReceipt, NewCheckin, StreakSnapshot};
pub use repository::CheckinStore;
pub use router::checkin_router;
pub use service::{CheckinError, CheckinService};
