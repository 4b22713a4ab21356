use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;
use postroom::mailer::{DispatchError, DispatchReceipt, EmailMessage, MailDispatcher};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Dispatcher that records messages instead of relaying them, used by the
/// preview command and route tests.
#[derive(Default)]
pub(crate) struct RecordingMailer {
    messages: Arc<Mutex<Vec<EmailMessage>>>,
    sequence: AtomicU64,
}

impl RecordingMailer {
    pub(crate) fn messages(&self) -> Vec<EmailMessage> {
        self.messages.lock().expect("mailer mutex poisoned").clone()
    }
}

impl MailDispatcher for RecordingMailer {
    fn send(
        &self,
        message: EmailMessage,
    ) -> impl Future<Output = Result<DispatchReceipt, DispatchError>> + Send {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.messages
            .lock()
            .expect("mailer mutex poisoned")
            .push(message);
        async move {
            Ok(DispatchReceipt {
                id: format!("preview-{id:04}"),
            })
        }
    }
}
