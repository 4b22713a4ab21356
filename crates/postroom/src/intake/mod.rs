//! The form intake pipeline: validation, payload assembly, body rendering,
//! and the HTTP surface for the two submission endpoints.
//!
//! Control flow per submission is strictly sequential: validate the raw
//! request, encode any photo attachments, render the email, dispatch once.
//! Nothing is persisted; a record lives for the duration of its request.

pub mod assembly;
pub mod domain;
pub mod render;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use assembly::{
    assemble, AssemblyError, BinaryFile, PhotoAttachment, TransportPayload, MAX_PHOTO_BYTES,
};
pub use domain::{
    ContactMessage, ContactRequest, FieldError, PersonDetails, RoyalPostRequest, SubmissionRecord,
    ValidationErrors,
};
pub use router::intake_router;
pub use service::{MailSettings, SubmissionError, SubmissionService};
pub use validation::{IntakeValidator, ValidationPolicy};
