use serde::{Deserialize, Serialize};
use validator::Validate;

/// A customer of the workshop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Store-assigned identifier, increasing with creation order
    pub id: u64,

    pub name: String,

    /// National identity card number
    pub carnet: u64,

    pub email: String,

    pub address: String,
}

impl Client {
    pub fn from_draft(id: u64, draft: ClientDraft) -> Self {
        Self {
            id,
            name: draft.name,
            carnet: draft.carnet,
            email: draft.email,
            address: draft.address,
        }
    }

    /// Apply an edit, keeping the identifier.
    pub fn apply(&mut self, draft: ClientDraft) {
        self.name = draft.name;
        self.carnet = draft.carnet;
        self.email = draft.email;
        self.address = draft.address;
    }
}

/// Client fields as submitted for create or edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ClientDraft {
    #[validate(length(min = 8, max = 120, message = "name must be 8 to 120 characters"))]
    pub name: String,

    #[validate(range(min = 1, max = 999_999_999, message = "carnet must be between 1 and 999999999"))]
    pub carnet: u64,

    #[validate(
        length(min = 7, max = 320, message = "email must be 7 to 320 characters"),
        email(message = "email is not a valid address")
    )]
    pub email: String,

    #[validate(length(min = 7, max = 350, message = "address must be 7 to 350 characters"))]
    pub address: String,
}

impl ClientDraft {
    /// Strip surrounding whitespace from every text field.
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            carnet: self.carnet,
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
        }
    }

    /// Domain part of the email, if the address has one.
    pub fn email_domain(&self) -> Option<&str> {
        self.email
            .rsplit_once('@')
            .map(|(_, domain)| domain)
            .filter(|domain| !domain.is_empty())
    }
}
