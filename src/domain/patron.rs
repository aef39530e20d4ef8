use super::book::required;
use super::{PatronId, ValidationError};

/// Library member who can borrow books
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patron {
    pub id: PatronId,
    pub name: String,
    pub contact_information: String,
}

impl Patron {
    pub fn register(id: PatronId, details: NewPatron) -> Self {
        Self {
            id,
            name: details.name,
            contact_information: details.contact_information,
        }
    }
}

/// Validated patron fields, without identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPatron {
    name: String,
    contact_information: String,
}

impl NewPatron {
    pub fn new(name: &str, contact_information: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required("name", name)?,
            contact_information: required("contactInformation", contact_information)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact_information(&self) -> &str {
        &self.contact_information
    }
}
