use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use mime::Mime;

use super::domain::{PersonDetails, SubmissionRecord};

/// Upper bound on a single photo attachment, enforced before encoding.
pub const MAX_PHOTO_BYTES: usize = 2 * 1024 * 1024;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A decoded client upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryFile {
    pub filename: String,
    pub content_type: Mime,
    pub bytes: Vec<u8>,
}

impl BinaryFile {
    pub fn new(filename: impl Into<String>, content_type: Mime, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            bytes,
        }
    }

    /// Decode a `data:<mime>;base64,<payload>` string as produced by the
    /// in-browser encoder. The decoded size is checked against the attachment
    /// limit before the file is accepted.
    pub fn from_data_url(filename: &str, data_url: &str) -> Result<Self, AssemblyError> {
        let malformed = |reason: &str| AssemblyError::MalformedPhoto {
            filename: filename.to_string(),
            reason: reason.to_string(),
        };

        let rest = data_url
            .strip_prefix("data:")
            .ok_or_else(|| malformed("missing 'data:' prefix"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| malformed("missing ',' separator"))?;
        let media_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| malformed("missing ';base64' marker"))?;

        let content_type: Mime = if media_type.is_empty() {
            mime::APPLICATION_OCTET_STREAM
        } else {
            media_type
                .parse()
                .map_err(|_| malformed("unparseable media type"))?
        };

        let bytes = BASE64
            .decode(payload)
            .map_err(|_| malformed("invalid base64 payload"))?;

        if bytes.len() > MAX_PHOTO_BYTES {
            return Err(AssemblyError::FileTooLarge {
                filename: filename.to_string(),
                limit: MAX_PHOTO_BYTES,
                found: bytes.len(),
            });
        }

        Ok(Self::new(filename, content_type, bytes))
    }

    /// Re-encode the content as a self-describing data URL.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            BASE64.encode(&self.bytes)
        )
    }
}

/// Errors raised while assembling the transport payload.
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    #[error("{filename} is {found} bytes; photo attachments are limited to {limit} bytes")]
    FileTooLarge {
        filename: String,
        limit: usize,
        found: usize,
    },
    #[error("{filename} is not a valid base64 data URL: {reason}")]
    MalformedPhoto { filename: String, reason: String },
}

/// Base64 attachment extracted from a payload, ready for the mail dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoAttachment {
    pub filename: String,
    /// Raw base64 payload without the data-URL header.
    pub content: String,
}

/// Flat field-name-to-string mapping handed to the mail dispatcher.
///
/// Photo fields hold self-describing data URLs; raw binary never leaves the
/// assembler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportPayload {
    fields: BTreeMap<String, String>,
}

impl TransportPayload {
    fn insert(&mut self, key: &str, value: String) {
        self.fields.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Attachments derived from the encoded photo fields, with the filenames
    /// the relay has always used.
    pub fn photo_attachments(&self) -> Vec<PhotoAttachment> {
        let mut attachments = Vec::new();
        for (key, filename) in [("photo1", "person1-photo.jpg"), ("photo2", "person2-photo.jpg")] {
            if let Some(data_url) = self.get(key) {
                if let Some((_, content)) = data_url.split_once(',') {
                    attachments.push(PhotoAttachment {
                        filename: filename.to_string(),
                        content: content.to_string(),
                    });
                }
            }
        }
        attachments
    }
}

fn insert_person(payload: &mut TransportPayload, suffix: char, person: &PersonDetails) {
    payload.insert(&format!("firstName{suffix}"), person.first_name.clone());
    payload.insert(&format!("lastName{suffix}"), person.last_name.clone());
    payload.insert(&format!("phone{suffix}"), person.phone_number.clone());
    payload.insert(
        &format!("dob{suffix}"),
        person.date_of_birth.format(DATE_FORMAT).to_string(),
    );
}

/// Build the transport payload for a validated record.
///
/// Each supplied photo is size-checked and re-encoded as a self-describing
/// data URL. A second photo is dropped without being encoded when the record
/// excludes person two, so the final payload never carries `photo2` for a
/// single-person submission.
pub fn assemble(
    record: &SubmissionRecord,
    photo_one: Option<BinaryFile>,
    photo_two: Option<BinaryFile>,
) -> Result<TransportPayload, AssemblyError> {
    let mut payload = TransportPayload::default();

    payload.insert("branchNumber", record.branch_number.clone());
    payload.insert(
        "showSecondPerson",
        record.include_second_person.to_string(),
    );
    insert_person(&mut payload, '1', &record.person_one);
    if let Some(person_two) = record.person_two.as_ref().filter(|_| record.include_second_person) {
        insert_person(&mut payload, '2', person_two);
    }

    if let Some(photo) = photo_one {
        payload.insert("photo1", encode_photo(photo)?);
    }
    if record.include_second_person {
        if let Some(photo) = photo_two {
            payload.insert("photo2", encode_photo(photo)?);
        }
    }

    Ok(payload)
}

fn encode_photo(photo: BinaryFile) -> Result<String, AssemblyError> {
    if photo.bytes.len() > MAX_PHOTO_BYTES {
        return Err(AssemblyError::FileTooLarge {
            filename: photo.filename,
            limit: MAX_PHOTO_BYTES,
            found: photo.bytes.len(),
        });
    }
    Ok(photo.to_data_url())
}
