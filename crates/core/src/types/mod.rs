//! Shared domain types.

pub mod email;
pub mod hub;
pub mod id;
pub mod phone;
pub mod status;

pub use email::{Email, EmailError};
pub use hub::{ALLOWED_DATES, Hub, HubInfo};
pub use id::*;
pub use phone::{Phone, PhoneError};
pub use status::{SignupStatus, StatusFilter};
