use super::common::{data_url, today, two_person_request, valid_request};
use crate::intake::assembly::{assemble, AssemblyError, BinaryFile, MAX_PHOTO_BYTES};
use crate::intake::validation::{IntakeValidator, ValidationPolicy};

fn record(request: &crate::intake::domain::RoyalPostRequest) -> crate::intake::SubmissionRecord {
    IntakeValidator::new(ValidationPolicy::strict())
        .validate(request, today())
        .expect("fixture validates")
}

fn photo(filename: &str, bytes: Vec<u8>) -> BinaryFile {
    BinaryFile::new(filename, mime::IMAGE_JPEG, bytes)
}

#[test]
fn payload_carries_all_validated_fields() {
    let payload = assemble(&record(&two_person_request()), None, None).expect("assembles");

    assert_eq!(payload.get("branchNumber"), Some("100"));
    assert_eq!(payload.get("firstName1"), Some("John"));
    assert_eq!(payload.get("dob1"), Some("1990-01-01"));
    assert_eq!(payload.get("firstName2"), Some("Jane"));
    assert_eq!(payload.get("showSecondPerson"), Some("true"));
    assert!(!payload.contains("photo1"));
}

#[test]
fn encoded_photo_round_trips_to_original_bytes() {
    let bytes: Vec<u8> = (0u16..=255).map(|b| b as u8).cycle().take(4096).collect();
    let payload = assemble(
        &record(&valid_request()),
        Some(photo("person1-photo.jpg", bytes.clone())),
        None,
    )
    .expect("assembles");

    let encoded = payload.get("photo1").expect("photo1 present");
    let decoded = BinaryFile::from_data_url("person1-photo.jpg", encoded).expect("decodes");
    assert_eq!(decoded.bytes, bytes);
    assert_eq!(decoded.content_type, mime::IMAGE_JPEG);
}

#[test]
fn photo_at_exactly_the_limit_is_accepted() {
    let payload = assemble(
        &record(&valid_request()),
        Some(photo("person1-photo.jpg", vec![0xAB; MAX_PHOTO_BYTES])),
        None,
    )
    .expect("limit is inclusive");
    assert!(payload.contains("photo1"));
}

#[test]
fn oversized_photo_is_rejected_before_any_payload() {
    let result = assemble(
        &record(&valid_request()),
        Some(photo("person1-photo.jpg", vec![0xAB; 3 * 1024 * 1024])),
        None,
    );

    match result {
        Err(AssemblyError::FileTooLarge { limit, found, .. }) => {
            assert_eq!(limit, MAX_PHOTO_BYTES);
            assert_eq!(found, 3 * 1024 * 1024);
        }
        other => panic!("expected FileTooLarge, got {other:?}"),
    }
}

#[test]
fn second_photo_is_dropped_for_single_person_records() {
    let payload = assemble(
        &record(&valid_request()),
        None,
        Some(photo("person2-photo.jpg", vec![1, 2, 3])),
    )
    .expect("assembles");
    assert!(!payload.contains("photo2"));
}

#[test]
fn second_photo_is_kept_for_two_person_records() {
    let payload = assemble(
        &record(&two_person_request()),
        None,
        Some(photo("person2-photo.jpg", vec![1, 2, 3])),
    )
    .expect("assembles");
    assert!(payload.contains("photo2"));
}

#[test]
fn attachments_use_the_per_person_filenames() {
    let payload = assemble(
        &record(&two_person_request()),
        Some(photo("person1-photo.jpg", vec![1])),
        Some(photo("person2-photo.jpg", vec![2])),
    )
    .expect("assembles");

    let attachments = payload.photo_attachments();
    let filenames: Vec<&str> = attachments
        .iter()
        .map(|attachment| attachment.filename.as_str())
        .collect();
    assert_eq!(filenames, ["person1-photo.jpg", "person2-photo.jpg"]);
    // Attachment content is the bare base64 payload, not a data URL.
    assert!(!attachments[0].content.contains(','));
}

#[test]
fn data_url_decoding_checks_the_size_limit() {
    let oversized = data_url(&vec![0u8; MAX_PHOTO_BYTES + 1]);
    let result = BinaryFile::from_data_url("person1-photo.jpg", &oversized);
    assert!(matches!(result, Err(AssemblyError::FileTooLarge { .. })));
}

#[test]
fn malformed_data_urls_are_rejected() {
    for raw in [
        "image/jpeg;base64,AAAA",
        "data:image/jpeg,AAAA",
        "data:image/jpeg;base64",
        "data:image/jpeg;base64,%%not-base64%%",
    ] {
        let result = BinaryFile::from_data_url("person1-photo.jpg", raw);
        assert!(
            matches!(result, Err(AssemblyError::MalformedPhoto { .. })),
            "{raw} should be rejected"
        );
    }
}

#[test]
fn data_url_without_media_type_defaults_to_octet_stream() {
    let file = BinaryFile::from_data_url("person1-photo.jpg", "data:;base64,AQID")
        .expect("decodes with default media type");
    assert_eq!(file.content_type, mime::APPLICATION_OCTET_STREAM);
    assert_eq!(file.bytes, vec![1, 2, 3]);
}
