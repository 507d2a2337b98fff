//! Contact form payloads

use serde::{Deserialize, Serialize};

/// Body of `POST /api/contact`
///
/// Absent fields deserialize as empty strings so they fail validation
/// instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub email: String,
    pub name: String,
    pub message: String,
}

/// A validated message, ready to be stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMessage {
    pub email: String,
    pub name: String,
    pub message: String,
}

/// A message as stored, with the id the store assigned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: String,
    pub email: String,
    pub name: String,
    pub message: String,
}

impl ContactForm {
    /// Check the submission
    ///
    /// Every field must be present, `name` and `message` must not be blank,
    /// and `email` must contain an `@`. Values are stored as submitted.
    pub fn validate(self) -> Option<NewMessage> {
        let valid = !self.email.is_empty()
            && self.email.contains('@')
            && !self.name.trim().is_empty()
            && !self.message.trim().is_empty();

        valid.then(|| NewMessage {
            email: self.email,
            name: self.name,
            message: self.message,
        })
    }
}

impl NewMessage {
    pub fn with_id(self, id: String) -> ContactMessage {
        ContactMessage {
            id,
            email: self.email,
            name: self.name,
            message: self.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(email: &str, name: &str, message: &str) -> ContactForm {
        ContactForm {
            email: email.to_string(),
            name: name.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let msg = form("a@b.com", "A", "hi").validate().unwrap();
        assert_eq!(msg.email, "a@b.com");
        assert_eq!(msg.name, "A");
        assert_eq!(msg.message, "hi");
    }

    #[test]
    fn test_values_are_not_trimmed() {
        let msg = form("a@b.com", " A ", "hi\n").validate().unwrap();
        assert_eq!(msg.name, " A ");
        assert_eq!(msg.message, "hi\n");
    }

    #[test]
    fn test_invalid_forms() {
        assert!(form("bad", "", "").validate().is_none());
        assert!(form("bad", "A", "hi").validate().is_none());
        assert!(form("", "A", "hi").validate().is_none());
        assert!(form("a@b.com", "   ", "hi").validate().is_none());
        assert!(form("a@b.com", "A", "\t\n").validate().is_none());
    }

    #[test]
    fn test_missing_fields_deserialize_empty() {
        let form: ContactForm = serde_json::from_str(r#"{"email": "a@b.com"}"#).unwrap();
        assert_eq!(form.name, "");
        assert!(form.validate().is_none());
    }
}
