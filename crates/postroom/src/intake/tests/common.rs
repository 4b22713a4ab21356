use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::NaiveDate;

use crate::intake::domain::RoyalPostRequest;
use crate::intake::service::{MailSettings, SubmissionService};
use crate::intake::validation::ValidationPolicy;
use crate::mailer::{DispatchError, DispatchReceipt, EmailMessage, MailDispatcher};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 29).expect("valid date")
}

/// Scenario baseline: single-person submission that passes the strict policy.
pub(super) fn valid_request() -> RoyalPostRequest {
    RoyalPostRequest {
        branch_number: "100".to_string(),
        first_name1: "John".to_string(),
        last_name1: "Doe".to_string(),
        phone1: "03001234567".to_string(),
        dob1: "1990-01-01".to_string(),
        ..RoyalPostRequest::default()
    }
}

pub(super) fn two_person_request() -> RoyalPostRequest {
    RoyalPostRequest {
        show_second_person: true,
        first_name2: "Jane".to_string(),
        last_name2: "Doe".to_string(),
        phone2: "03007654321".to_string(),
        dob2: "1992-06-15".to_string(),
        ..valid_request()
    }
}

pub(super) fn data_url(bytes: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", BASE64.encode(bytes))
}

pub(super) fn settings() -> MailSettings {
    MailSettings {
        from: "Royal Post <no-reply@royalpost.example>".to_string(),
        to: "intake@royalpost.example".to_string(),
    }
}

/// Captures every dispatched message and hands back sequential receipt ids.
#[derive(Default)]
pub(super) struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
    sequence: AtomicU64,
}

impl RecordingMailer {
    pub(super) fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().expect("mailer mutex poisoned").clone()
    }
}

impl MailDispatcher for RecordingMailer {
    fn send(
        &self,
        message: EmailMessage,
    ) -> impl Future<Output = Result<DispatchReceipt, DispatchError>> + Send {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.sent
            .lock()
            .expect("mailer mutex poisoned")
            .push(message);
        async move {
            Ok(DispatchReceipt {
                id: format!("email-{id:04}"),
            })
        }
    }
}

/// Always reports a provider failure, without recording anything.
#[derive(Default)]
pub(super) struct FailingMailer;

impl MailDispatcher for FailingMailer {
    fn send(
        &self,
        _message: EmailMessage,
    ) -> impl Future<Output = Result<DispatchReceipt, DispatchError>> + Send {
        async move {
            Err(DispatchError::Provider {
                status: 503,
                message: "provider unavailable".to_string(),
            })
        }
    }
}

pub(super) fn recording_service() -> (Arc<SubmissionService<RecordingMailer>>, Arc<RecordingMailer>)
{
    let mailer = Arc::new(RecordingMailer::default());
    let service = Arc::new(SubmissionService::new(
        mailer.clone(),
        ValidationPolicy::default(),
        settings(),
    ));
    (service, mailer)
}

pub(super) fn failing_service() -> Arc<SubmissionService<FailingMailer>> {
    Arc::new(SubmissionService::new(
        Arc::new(FailingMailer),
        ValidationPolicy::default(),
        settings(),
    ))
}
