//! Donation ("supply") records and their write-side inputs.

use std::cmp::Ordering;
use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Number, Value};

use super::document::{Fields, ID_FIELD, RecordId, null_as_default};
use super::user::Email;

/// Donated amount.
///
/// Stored documents written by older clients may hold the amount as a numeric
/// string, so decoding accepts both JSON numbers and strings that parse as
/// numbers. A blank string reads as zero. Whole amounts serialise as integers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Quantity(f64);

impl Quantity {
    /// Raw amount.
    pub fn value(self) -> f64 {
        self.0
    }

    /// JSON number for this amount, integral when the amount is whole.
    pub fn to_json(self) -> Value {
        match whole_number(self.0) {
            Some(whole) => Value::from(whole),
            None => Number::from_f64(self.0).map_or(Value::Null, Value::Number),
        }
    }

    /// Total ordering used for leaderboard sorting.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

// Whole values below 2^53 convert to i64 exactly.
fn whole_number(value: f64) -> Option<i64> {
    (value.fract() == 0.0 && value.abs() < 9.0e15).then_some(value as i64)
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match whole_number(self.0) {
            Some(whole) => serializer.serialize_i64(whole),
            None => serializer.serialize_f64(self.0),
        }
    }
}

struct QuantityVisitor;

impl Visitor<'_> for QuantityVisitor {
    type Value = Quantity;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Quantity, E> {
        Ok(Quantity(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Quantity, E> {
        Ok(Quantity(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Quantity, E> {
        Ok(Quantity(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Quantity, E> {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            return Ok(Quantity::default());
        }
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|parsed| parsed.is_finite())
            .map(Quantity)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(QuantityVisitor)
    }
}

/// Persisted donation record.
///
/// Undeclared stored fields are preserved in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyRecord {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: Quantity,
    #[serde(flatten)]
    pub extra: Fields,
}

impl SupplyRecord {
    /// Whether `email` owns this record.
    pub fn is_owned_by(&self, email: &Email) -> bool {
        self.email.as_deref() == Some(email.as_ref())
    }

    /// Whether applying `details` would leave the record unchanged.
    pub fn matches(&self, details: &SupplyDetails) -> bool {
        self.title == details.title
            && self.category == details.category
            && self.description == details.description
            && self.quantity == details.quantity
    }

    /// Overwrite the replaceable fields with `details`.
    pub fn apply(&mut self, details: &SupplyDetails) {
        self.title.clone_from(&details.title);
        self.category.clone_from(&details.category);
        self.description.clone_from(&details.description);
        self.quantity = details.quantity;
    }
}

/// Validation errors for donation inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SupplyValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("category must not be empty")]
    EmptyCategory,
    #[error("quantity must be a finite, non-negative number")]
    InvalidQuantity,
}

impl SupplyValidationError {
    /// Request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::EmptyCategory => "category",
            Self::InvalidQuantity => "quantity",
        }
    }
}

/// The replaceable part of a donation: `{title, category, description,
/// quantity}`.
///
/// ## Invariants
/// - `title` and `category` are trimmed and non-empty.
/// - `quantity` is finite and not negative.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplyDetails {
    title: String,
    category: String,
    description: String,
    quantity: Quantity,
}

impl SupplyDetails {
    /// Trim and validate the submitted fields.
    pub fn try_new(
        title: &str,
        category: &str,
        description: &str,
        quantity: Quantity,
    ) -> Result<Self, SupplyValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(SupplyValidationError::EmptyTitle);
        }
        let category = category.trim();
        if category.is_empty() {
            return Err(SupplyValidationError::EmptyCategory);
        }
        if !quantity.value().is_finite() || quantity.value() < 0.0 {
            return Err(SupplyValidationError::InvalidQuantity);
        }
        Ok(Self {
            title: title.to_owned(),
            category: category.to_owned(),
            description: description.to_owned(),
            quantity,
        })
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn category(&self) -> &str {
        self.category.as_str()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }
}

/// Donation about to be created on behalf of `owner`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSupply {
    owner: Email,
    details: SupplyDetails,
    extra: Fields,
}

impl NewSupply {
    pub fn new(owner: Email, details: SupplyDetails) -> Self {
        Self {
            owner,
            details,
            extra: Fields::new(),
        }
    }

    /// Attach undeclared form fields, dropping keys the record controls.
    pub fn with_extra(mut self, mut extra: Fields) -> Self {
        for key in [ID_FIELD, "email", "title", "category", "description", "quantity"] {
            extra.remove(key);
        }
        self.extra = extra;
        self
    }

    /// Donor the record will belong to.
    pub fn owner(&self) -> &Email {
        &self.owner
    }

    pub fn details(&self) -> &SupplyDetails {
        &self.details
    }

    /// Materialise the stored record once the store has assigned an id.
    pub fn into_record(self, id: RecordId) -> SupplyRecord {
        let SupplyDetails {
            title,
            category,
            description,
            quantity,
        } = self.details;
        SupplyRecord {
            id,
            email: Some(self.owner.into()),
            title,
            category,
            description,
            quantity,
            extra: self.extra,
        }
    }
}

/// Result of a replace-by-id update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The record existed and at least one field changed.
    Modified,
    /// The record existed but already held the submitted values.
    Unchanged,
    /// No record has the requested id.
    NotFound,
}

impl UpdateOutcome {
    /// Derive the outcome from store match/modify counters.
    pub fn from_counts(matched: u64, modified: u64) -> Self {
        match (matched, modified) {
            (0, _) => Self::NotFound,
            (_, 0) => Self::Unchanged,
            _ => Self::Modified,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn details() -> SupplyDetails {
        SupplyDetails::try_new("Rice", "Grains", "Two bags", Quantity::from(5.0))
            .expect("valid details")
    }

    #[rstest]
    #[case(json!(5), 5.0)]
    #[case(json!(2.5), 2.5)]
    #[case(json!("12"), 12.0)]
    #[case(json!(" 3.5 "), 3.5)]
    #[case(json!(""), 0.0)]
    fn quantity_accepts_numbers_and_numeric_strings(#[case] raw: serde_json::Value, #[case] expected: f64) {
        let quantity: Quantity = serde_json::from_value(raw).expect("numeric quantity");
        assert_eq!(quantity.value(), expected);
    }

    #[rstest]
    #[case(json!("plenty"))]
    #[case(json!(true))]
    fn quantity_rejects_non_numeric_values(#[case] raw: serde_json::Value) {
        assert!(serde_json::from_value::<Quantity>(raw).is_err());
    }

    #[rstest]
    fn stored_nulls_read_as_empty_fields() {
        let record: SupplyRecord = serde_json::from_value(json!({
            "_id": "65a1f0c2b3d4e5f60718293a",
            "title": null,
            "category": "Grains",
            "description": null,
            "quantity": null,
        }))
        .expect("record with nulls decodes");

        assert_eq!(record.title, "");
        assert_eq!(record.description, "");
        assert_eq!(record.quantity, Quantity::default());
    }

    #[rstest]
    fn whole_quantities_serialise_as_integers() {
        assert_eq!(serde_json::to_value(Quantity::from(9.0)).expect("serialises"), json!(9));
        assert_eq!(serde_json::to_value(Quantity::from(1.5)).expect("serialises"), json!(1.5));
    }

    #[rstest]
    #[case("", "Grains", 1.0, SupplyValidationError::EmptyTitle)]
    #[case("Rice", "  ", 1.0, SupplyValidationError::EmptyCategory)]
    #[case("Rice", "Grains", -1.0, SupplyValidationError::InvalidQuantity)]
    #[case("Rice", "Grains", f64::INFINITY, SupplyValidationError::InvalidQuantity)]
    fn details_validation(
        #[case] title: &str,
        #[case] category: &str,
        #[case] quantity: f64,
        #[case] expected: SupplyValidationError,
    ) {
        let err = SupplyDetails::try_new(title, category, "", Quantity::from(quantity))
            .expect_err("invalid details must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn record_round_trips_unknown_fields(details: SupplyDetails) {
        let owner = Email::new("ada@example.org").expect("email");
        let mut extra = Fields::new();
        extra.insert("location".to_owned(), json!("Dhaka"));
        extra.insert("email".to_owned(), json!("mallory@example.org"));
        let id = RecordId::new("65a1f0c2b3d4e5f60718293a").expect("id");
        let record = NewSupply::new(owner.clone(), details)
            .with_extra(extra)
            .into_record(id);

        assert!(record.is_owned_by(&owner));
        let value = serde_json::to_value(&record).expect("record serialises");
        assert_eq!(value["_id"], json!("65a1f0c2b3d4e5f60718293a"));
        assert_eq!(value["location"], json!("Dhaka"));
        assert_eq!(value["email"], json!("ada@example.org"));
        let decoded: SupplyRecord = serde_json::from_value(value).expect("record decodes");
        assert_eq!(decoded, record);
    }

    #[rstest]
    fn apply_then_matches(details: SupplyDetails) {
        let mut record: SupplyRecord = serde_json::from_value(json!({
            "_id": "65a1f0c2b3d4e5f60718293a",
            "email": "ada@example.org",
            "title": "Old",
            "category": "Grains",
            "quantity": "1",
        }))
        .expect("legacy record decodes");
        assert!(!record.matches(&details));
        record.apply(&details);
        assert!(record.matches(&details));
    }

    #[rstest]
    #[case(0, 0, UpdateOutcome::NotFound)]
    #[case(1, 0, UpdateOutcome::Unchanged)]
    #[case(1, 1, UpdateOutcome::Modified)]
    fn update_outcome_from_counts(
        #[case] matched: u64,
        #[case] modified: u64,
        #[case] expected: UpdateOutcome,
    ) {
        assert_eq!(UpdateOutcome::from_counts(matched, modified), expected);
    }
}
