use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use super::assembly::{assemble, AssemblyError, BinaryFile};
use super::domain::{ContactRequest, RoyalPostRequest, ValidationErrors};
use super::render;
use super::validation::{IntakeValidator, ValidationPolicy};
use crate::config::MailConfig;
use crate::mailer::{DispatchError, DispatchReceipt, EmailAttachment, EmailMessage, MailDispatcher};

/// Sender and recipient identities for relayed mail.
#[derive(Debug, Clone)]
pub struct MailSettings {
    pub from: String,
    pub to: String,
}

impl From<&MailConfig> for MailSettings {
    fn from(config: &MailConfig) -> Self {
        Self {
            from: config.from_address.clone(),
            to: config.to_address.clone(),
        }
    }
}

/// Composes the validator, assembler, renderer, and mail dispatcher.
///
/// Each submission runs strictly in that order and makes at most one dispatch
/// call; validation and assembly failures are reported before any network
/// traffic.
pub struct SubmissionService<M> {
    validator: IntakeValidator,
    mailer: Arc<M>,
    settings: MailSettings,
}

impl<M> SubmissionService<M>
where
    M: MailDispatcher + 'static,
{
    pub fn new(mailer: Arc<M>, policy: ValidationPolicy, settings: MailSettings) -> Self {
        Self {
            validator: IntakeValidator::new(policy),
            mailer,
            settings,
        }
    }

    /// Validate a Royal Post submission, assemble the payload, and relay it.
    pub async fn submit_royal_post(
        &self,
        request: RoyalPostRequest,
        today: NaiveDate,
    ) -> Result<DispatchReceipt, SubmissionError> {
        let record = self.validator.validate(&request, today)?;

        let photo_one = request
            .photo1
            .as_deref()
            .map(|raw| BinaryFile::from_data_url("person1-photo.jpg", raw))
            .transpose()?;
        // A second photo is never decoded for a single-person submission.
        let photo_two = if record.include_second_person {
            request
                .photo2
                .as_deref()
                .map(|raw| BinaryFile::from_data_url("person2-photo.jpg", raw))
                .transpose()?
        } else {
            None
        };

        let payload = assemble(&record, photo_one, photo_two)?;
        let html = render::royal_post_body(&payload, today);
        let attachments = payload
            .photo_attachments()
            .into_iter()
            .map(|photo| EmailAttachment {
                filename: photo.filename,
                content: photo.content,
            })
            .collect();

        let message = EmailMessage {
            from: self.settings.from.clone(),
            to: self.settings.to.clone(),
            subject: render::royal_post_subject(&record.branch_number),
            html,
            attachments,
        };

        let receipt = self.mailer.send(message).await.map_err(|err| {
            warn!(branch = %record.branch_number, error = %err, "royal post dispatch failed");
            err
        })?;

        info!(branch = %record.branch_number, id = %receipt.id, "royal post submission relayed");
        Ok(receipt)
    }

    /// Validate a contact form message and relay it.
    pub async fn submit_contact(
        &self,
        request: ContactRequest,
    ) -> Result<DispatchReceipt, SubmissionError> {
        let message = self.validator.validate_contact(&request)?;

        let email = EmailMessage {
            from: self.settings.from.clone(),
            to: self.settings.to.clone(),
            subject: render::contact_subject(&message),
            html: render::contact_body(&message),
            attachments: Vec::new(),
        };

        let receipt = self.mailer.send(email).await.map_err(|err| {
            warn!(error = %err, "contact dispatch failed");
            err
        })?;

        info!(id = %receipt.id, "contact message relayed");
        Ok(receipt)
    }
}

/// Error raised by the submission pipeline.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}
