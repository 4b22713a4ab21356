use crate::infra::RecordingMailer;
use chrono::Local;
use clap::Args;
use postroom::error::AppError;
use postroom::intake::{MailSettings, RoyalPostRequest, SubmissionService, ValidationPolicy};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct PreviewArgs {
    /// Include a second person in the sample submission
    #[arg(long)]
    pub(crate) second_person: bool,
}

fn sample_request(second_person: bool) -> RoyalPostRequest {
    let mut request = RoyalPostRequest {
        branch_number: "214".to_string(),
        first_name1: "John".to_string(),
        last_name1: "Doe".to_string(),
        phone1: "03001234567".to_string(),
        dob1: "1990-01-01".to_string(),
        ..RoyalPostRequest::default()
    };
    if second_person {
        request.show_second_person = true;
        request.first_name2 = "Jane".to_string();
        request.last_name2 = "Doe".to_string();
        request.phone2 = "03007654321".to_string();
        request.dob2 = "1992-06-15".to_string();
    }
    request
}

/// Run a sample submission through the full pipeline against the recording
/// mailer and print the rendered email.
pub(crate) async fn run_preview(args: PreviewArgs) -> Result<(), AppError> {
    let mailer = Arc::new(RecordingMailer::default());
    let service = SubmissionService::new(
        mailer.clone(),
        ValidationPolicy::default(),
        MailSettings {
            from: "Royal Post <no-reply@royalpost.example>".to_string(),
            to: "intake@royalpost.example".to_string(),
        },
    );

    let today = Local::now().date_naive();
    let receipt = match service
        .submit_royal_post(sample_request(args.second_person), today)
        .await
    {
        Ok(receipt) => receipt,
        Err(err) => {
            eprintln!("preview submission failed: {err}");
            return Ok(());
        }
    };

    for message in mailer.messages() {
        println!("Subject: {}", message.subject);
        println!("From: {}", message.from);
        println!("To: {}", message.to);
        println!();
        println!("{}", message.html);
    }
    println!("receipt id: {}", receipt.id);

    Ok(())
}
