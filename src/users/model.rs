use anyhow::Context;
use mongodb::bson::{self, doc, oid::ObjectId, DateTime, Document};
use serde::Deserialize;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("user name cannot be empty")]
    EmptyName,
    #[error("money amount must be a non-negative number")]
    InvalidMoney,
}

fn valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

fn valid_money(money: f64) -> bool {
    money.is_finite() && money >= 0.0
}

/// A persisted user. Wire field names match the existing collection layout
/// so documents written by other tools stay readable. Reads decode through
/// serde; writes go through `NewUser` and `UserPatch`, which build their
/// documents by hand.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UserRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "User")]
    pub name: String,
    #[serde(rename = "Money")]
    pub money: f64,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime>,
}

impl UserRecord {
    /// Decode-and-validate at the storage boundary. A stored document that
    /// violates the record invariants is a hard error, not a lenient read.
    pub fn from_document(document: Document) -> anyhow::Result<Self> {
        let record: UserRecord =
            bson::from_document(document).context("decode user document")?;
        record.validate()?;
        Ok(record)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if !valid_name(&self.name) {
            return Err(ValidationError::EmptyName);
        }
        if !valid_money(self.money) {
            return Err(ValidationError::InvalidMoney);
        }
        Ok(())
    }
}

/// A user about to be inserted; construction validates, so every value that
/// reaches storage already satisfies the invariants.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub money: f64,
    pub created_at: DateTime,
}

impl NewUser {
    pub fn new(name: impl Into<String>, money: f64) -> Result<Self, ValidationError> {
        let name = name.into();
        if !valid_name(&name) {
            return Err(ValidationError::EmptyName);
        }
        if !valid_money(money) {
            return Err(ValidationError::InvalidMoney);
        }
        Ok(Self {
            name,
            money,
            created_at: DateTime::now(),
        })
    }

    pub fn into_document(self) -> Document {
        doc! {
            "User": self.name,
            "Money": self.money,
            "createdAt": self.created_at,
        }
    }
}

/// Partial update: only the fields present end up in the `$set` document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    name: Option<String>,
    money: Option<f64>,
}

impl UserPatch {
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        if !valid_name(&name) {
            return Err(ValidationError::EmptyName);
        }
        self.name = Some(name);
        Ok(())
    }

    pub fn set_money(&mut self, money: f64) -> Result<(), ValidationError> {
        if !valid_money(money) {
            return Err(ValidationError::InvalidMoney);
        }
        self.money = Some(money);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.money.is_none()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn money(&self) -> Option<f64> {
        self.money
    }

    pub fn into_set_document(self) -> Document {
        let mut set = Document::new();
        if let Some(name) = self.name {
            set.insert("User", name);
        }
        if let Some(money) = self.money {
            set.insert("Money", money);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_rejects_empty_name() {
        assert_eq!(NewUser::new("", 10.0).unwrap_err(), ValidationError::EmptyName);
        assert_eq!(NewUser::new("   ", 10.0).unwrap_err(), ValidationError::EmptyName);
    }

    #[test]
    fn new_user_rejects_bad_money() {
        assert_eq!(
            NewUser::new("Dana", -0.01).unwrap_err(),
            ValidationError::InvalidMoney
        );
        assert_eq!(
            NewUser::new("Dana", f64::NAN).unwrap_err(),
            ValidationError::InvalidMoney
        );
    }

    #[test]
    fn new_user_carries_creation_time_into_document() {
        let user = NewUser::new("Dana", 100.25).unwrap();
        let doc = user.into_document();
        assert_eq!(doc.get_str("User").unwrap(), "Dana");
        assert_eq!(doc.get_f64("Money").unwrap(), 100.25);
        assert!(doc.get_datetime("createdAt").is_ok());
    }

    #[test]
    fn from_document_decodes_and_tolerates_missing_created_at() {
        let id = ObjectId::new();
        let record = UserRecord::from_document(doc! {
            "_id": id,
            "User": "Eve",
            "Money": 50.0,
        })
        .unwrap();
        assert_eq!(record.id, id);
        assert_eq!(record.name, "Eve");
        assert_eq!(record.money, 50.0);
        assert!(record.created_at.is_none());
    }

    #[test]
    fn from_document_accepts_integer_money() {
        let record = UserRecord::from_document(doc! {
            "_id": ObjectId::new(),
            "User": "Bob",
            "Money": 50_i32,
        })
        .unwrap();
        assert_eq!(record.money, 50.0);
    }

    #[test]
    fn from_document_rejects_invariant_violations() {
        assert!(UserRecord::from_document(doc! {
            "_id": ObjectId::new(),
            "User": "",
            "Money": 1.0,
        })
        .is_err());
        assert!(UserRecord::from_document(doc! {
            "_id": ObjectId::new(),
            "User": "Mallory",
            "Money": -5.0,
        })
        .is_err());
    }

    #[test]
    fn patch_collects_only_changed_fields() {
        let mut patch = UserPatch::default();
        assert!(patch.is_empty());
        patch.set_name("Eve2").unwrap();
        let set = patch.into_set_document();
        assert_eq!(set.get_str("User").unwrap(), "Eve2");
        assert!(!set.contains_key("Money"));
    }

    #[test]
    fn patch_setters_validate() {
        let mut patch = UserPatch::default();
        assert_eq!(patch.set_name("  "), Err(ValidationError::EmptyName));
        assert_eq!(patch.set_money(-1.0), Err(ValidationError::InvalidMoney));
        assert!(patch.is_empty());
    }
}
