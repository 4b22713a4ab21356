use chrono::NaiveDate;

use super::domain::{
    ContactMessage, ContactRequest, PersonDetails, RoyalPostRequest, SubmissionRecord,
    ValidationErrors,
};

/// Rule set applied to name and phone fields.
///
/// Historical form variants disagreed on how strict these rules should be.
/// The canonical policy is the strict variant; the lenient constructor keeps
/// the non-empty-only behavior available for deployments that still rely on
/// it. Divergent variants are never merged into one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Restrict names to letters (plus spaces, hyphens, apostrophes) within
    /// the given character length bounds.
    pub alphabetic_names: Option<(usize, usize)>,
    /// Restrict phone numbers to digits-only strings within the given length
    /// bounds.
    pub phone_digits: Option<(usize, usize)>,
}

impl ValidationPolicy {
    /// Names alphabetic, 2-50 characters; phones digits-only, 11-15 digits.
    pub fn strict() -> Self {
        Self {
            alphabetic_names: Some((2, 50)),
            phone_digits: Some((11, 15)),
        }
    }

    /// Presence-only checks, matching the earliest form variant.
    pub fn lenient() -> Self {
        Self {
            alphabetic_names: None,
            phone_digits: None,
        }
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self::strict()
    }
}

/// Applies the unconditional and conditional field rules to a raw submission.
///
/// Validation is a pure function of the request and `today`: all applicable
/// rules are evaluated, every violation is collected, and the same input
/// always yields the same error list.
#[derive(Debug, Clone, Default)]
pub struct IntakeValidator {
    policy: ValidationPolicy,
}

/// Raw field values for one person slot, paired with the wire suffix used in
/// error paths (`firstName1`, `dob2`, ...).
struct PersonFields<'a> {
    suffix: char,
    first_name: &'a str,
    last_name: &'a str,
    phone: &'a str,
    dob: &'a str,
}

impl IntakeValidator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Validate a Royal Post submission against the two-phase rule set.
    ///
    /// Phase one always checks the branch number and person one. Phase two
    /// applies the identical per-person rules to person two, and runs only
    /// when `showSecondPerson` is set; when it is not, person-two content is
    /// never inspected.
    pub fn validate(
        &self,
        request: &RoyalPostRequest,
        today: NaiveDate,
    ) -> Result<SubmissionRecord, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if request.branch_number.trim().is_empty() {
            errors.push("branchNumber", "Branch number is required");
        }

        let person_one = self.check_person(
            PersonFields {
                suffix: '1',
                first_name: &request.first_name1,
                last_name: &request.last_name1,
                phone: &request.phone1,
                dob: &request.dob1,
            },
            today,
            &mut errors,
        );

        let person_two = if request.show_second_person {
            self.check_person(
                PersonFields {
                    suffix: '2',
                    first_name: &request.first_name2,
                    last_name: &request.last_name2,
                    phone: &request.phone2,
                    dob: &request.dob2,
                },
                today,
                &mut errors,
            )
        } else {
            None
        };

        match (person_one, errors.is_empty()) {
            (Some(person_one), true) => Ok(SubmissionRecord {
                branch_number: request.branch_number.trim().to_string(),
                person_one,
                include_second_person: request.show_second_person,
                person_two,
            }),
            _ => Err(errors),
        }
    }

    /// Validate a contact form submission.
    pub fn validate_contact(
        &self,
        request: &ContactRequest,
    ) -> Result<ContactMessage, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if request.name.trim().is_empty() {
            errors.push("name", "Name is required");
        }
        let email = request.email.trim();
        if email.is_empty() {
            errors.push("email", "Email is required");
        } else if !plausible_email(email) {
            errors.push("email", "Email must be a valid address");
        }
        if request.message.trim().is_empty() {
            errors.push("message", "Message is required");
        }

        if errors.is_empty() {
            Ok(ContactMessage {
                name: request.name.trim().to_string(),
                email: email.to_string(),
                subject: request.subject.trim().to_string(),
                message: request.message.trim().to_string(),
            })
        } else {
            Err(errors)
        }
    }

    /// Evaluate all per-person rules, collecting every violation.
    ///
    /// Returns the structured details only when no rule for this slot failed.
    fn check_person(
        &self,
        fields: PersonFields<'_>,
        today: NaiveDate,
        errors: &mut ValidationErrors,
    ) -> Option<PersonDetails> {
        let before = errors.len();
        let suffix = fields.suffix;

        let first_name = fields.first_name.trim();
        if first_name.is_empty() {
            errors.push(format!("firstName{suffix}"), "First name is required");
        } else if let Some(message) = self.name_violation(first_name) {
            errors.push(format!("firstName{suffix}"), message);
        }

        let last_name = fields.last_name.trim();
        if last_name.is_empty() {
            errors.push(format!("lastName{suffix}"), "Last name is required");
        } else if let Some(message) = self.name_violation(last_name) {
            errors.push(format!("lastName{suffix}"), message);
        }

        let phone = fields.phone.trim();
        if phone.is_empty() {
            errors.push(format!("phone{suffix}"), "Phone number is required");
        } else if let Some(message) = self.phone_violation(phone) {
            errors.push(format!("phone{suffix}"), message);
        }

        let dob = fields.dob.trim();
        let date_of_birth = if dob.is_empty() {
            errors.push(format!("dob{suffix}"), "Date of birth is required");
            None
        } else {
            match NaiveDate::parse_from_str(dob, "%Y-%m-%d") {
                Ok(date) if date > today => {
                    errors.push(
                        format!("dob{suffix}"),
                        "Date of birth must not be in the future",
                    );
                    None
                }
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push(
                        format!("dob{suffix}"),
                        "Date of birth must be a valid date (YYYY-MM-DD)",
                    );
                    None
                }
            }
        };

        if errors.len() != before {
            return None;
        }

        Some(PersonDetails {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phone_number: phone.to_string(),
            date_of_birth: date_of_birth?,
        })
    }

    fn name_violation(&self, name: &str) -> Option<&'static str> {
        let (min, max) = self.policy.alphabetic_names?;
        let length = name.chars().count();
        if length < min || length > max {
            return Some("Name must be 2-50 characters");
        }
        let alphabetic = name
            .chars()
            .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'');
        if !alphabetic {
            return Some("Name must contain only letters");
        }
        None
    }

    fn phone_violation(&self, phone: &str) -> Option<&'static str> {
        let (min, max) = self.policy.phone_digits?;
        let digits_only = phone.chars().all(|c| c.is_ascii_digit());
        if !digits_only || phone.len() < min || phone.len() > max {
            return Some("Phone number must be 11-15 digits");
        }
        None
    }
}

/// Minimal shape check: one `@` with a non-empty user part and a dotted
/// domain. Deliverability is the provider's concern.
fn plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((user, domain)) => {
            !user.is_empty()
                && !domain.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
        }
        None => false,
    }
}
