use chrono::NaiveDate;

use super::assembly::TransportPayload;
use super::domain::ContactMessage;

/// Labels for the person field groups, in presentation order.
const PERSON_FIELDS: [(&str, &str); 4] = [
    ("firstName", "First Name"),
    ("lastName", "Last Name"),
    ("phone", "Phone"),
    ("dob", "Date of Birth"),
];

pub fn royal_post_subject(branch_number: &str) -> String {
    format!("New Royal Post Form - Branch {branch_number}")
}

/// Render the HTML body for a Royal Post submission.
///
/// Every populated payload field appears in the body; photo attachments are
/// referenced by presence only, never inlined. The output is a deterministic
/// function of the payload and the submission date.
pub fn royal_post_body(payload: &TransportPayload, submitted_on: NaiveDate) -> String {
    let branch = escape(payload.get("branchNumber").unwrap_or_default());

    let mut body = String::new();
    body.push_str("<div style=\"font-family: Arial, sans-serif; color: #333;\">\n");
    body.push_str("<h2>Royal Post Form Submission</h2>\n");
    body.push_str(&format!("<p>Branch Number: {branch}</p>\n"));

    push_person_section(&mut body, payload, '1', "Person 1");
    if payload.get("showSecondPerson") == Some("true") {
        body.push_str("<hr />\n");
        push_person_section(&mut body, payload, '2', "Person 2");
    }

    body.push_str("<hr />\n");
    body.push_str(&format!(
        "<p>Submitted on: {}</p>\n",
        submitted_on.format("%Y-%m-%d")
    ));
    body.push_str("</div>\n");
    body
}

fn push_person_section(body: &mut String, payload: &TransportPayload, suffix: char, title: &str) {
    body.push_str(&format!("<h3>{title}</h3>\n"));
    for (key, label) in PERSON_FIELDS {
        if let Some(value) = payload.get(&format!("{key}{suffix}")) {
            if !value.is_empty() {
                body.push_str(&format!(
                    "<p><strong>{label}:</strong> {}</p>\n",
                    escape(value)
                ));
            }
        }
    }
    if payload.contains(&format!("photo{suffix}")) {
        body.push_str(&format!("<p>Photo ID {suffix} attached</p>\n"));
    }
}

pub fn contact_subject(message: &ContactMessage) -> String {
    if message.subject.is_empty() {
        "New Contact Form Message".to_string()
    } else {
        format!("Contact Form: {}", message.subject)
    }
}

/// Render the HTML body for a contact form message.
pub fn contact_body(message: &ContactMessage) -> String {
    let mut body = String::new();
    body.push_str("<div style=\"font-family: Arial, sans-serif; color: #333;\">\n");
    body.push_str("<h2>Contact Form Message</h2>\n");
    body.push_str(&format!(
        "<p><strong>Name:</strong> {}</p>\n",
        escape(&message.name)
    ));
    body.push_str(&format!(
        "<p><strong>Email:</strong> {}</p>\n",
        escape(&message.email)
    ));
    if !message.subject.is_empty() {
        body.push_str(&format!(
            "<p><strong>Subject:</strong> {}</p>\n",
            escape(&message.subject)
        ));
    }
    body.push_str(&format!("<p>{}</p>\n", escape(&message.message)));
    body.push_str("</div>\n");
    body
}

/// Field values are client-supplied; keep them inert in the HTML body.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
