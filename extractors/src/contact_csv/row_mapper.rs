use std::collections::HashMap;

use shared_types::IMPORTED_CONTACT_GROUP;

use crate::phone::{normalize_phone, PhoneNormalization};

const NAME_COLUMNS: &[&str] = &["name", "fullname"];
const PHONE_COLUMNS: &[&str] = &["phone", "phonenumber", "mobile"];
const GROUP_COLUMNS: &[&str] = &["group", "category"];
const EMAIL_COLUMNS: &[&str] = &["email"];

/// A contact resolved from one CSV row, not yet stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactCandidate {
    pub name: String,
    /// Canonical `+digits`, or empty when the row had no dialable digits.
    pub phone_number: String,
    pub email: Option<String>,
    pub group: String,
    pub user_id: Option<i64>,
}

impl ContactCandidate {
    pub fn has_phone(&self) -> bool {
        !self.phone_number.is_empty()
    }
}

/// First column in `columns` holding a non-blank value.
fn resolve<'a>(row: &'a HashMap<String, String>, columns: &[&str]) -> Option<&'a str> {
    columns
        .iter()
        .filter_map(|column| row.get(*column))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
}

/// Map a header-keyed row to a contact, or `None` when the row has neither
/// a name nor a phone number.
pub fn map_row(row: &HashMap<String, String>, owner_id: Option<i64>) -> Option<ContactCandidate> {
    let name = resolve(row, NAME_COLUMNS).unwrap_or_default();
    let phone = resolve(row, PHONE_COLUMNS).unwrap_or_default();

    if name.is_empty() && phone.is_empty() {
        return None;
    }

    let phone_number = match normalize_phone(phone, PhoneNormalization::StripThenPrefix) {
        canonical if canonical.len() > 1 => canonical,
        _ => String::new(),
    };

    Some(ContactCandidate {
        name: name.to_string(),
        phone_number,
        email: resolve(row, EMAIL_COLUMNS).map(str::to_string),
        group: resolve(row, GROUP_COLUMNS)
            .unwrap_or(IMPORTED_CONTACT_GROUP)
            .to_string(),
        user_id: owner_id,
    })
}
