//! One-time password management

mod service;
mod traits;


pub use service::{IssueOutcome, OtpCheck, OtpService};
pub use traits::OtpSender;
