//! Side-effecting services: SMTP email and post-commit notification fan-out.

pub mod email;
pub mod notify;

pub use email::{EmailError, EmailService};
