//! Form intake and mail relay for Royal Post branch submissions.
//!
//! The library validates inbound form submissions (a generic contact form and
//! the Royal Post applicant-intake form), assembles validated field data plus
//! optional photo attachments into a transport-ready payload, and relays the
//! result as a formatted email through a transactional mail provider.

pub mod config;
pub mod error;
pub mod intake;
pub mod mailer;
pub mod telemetry;
