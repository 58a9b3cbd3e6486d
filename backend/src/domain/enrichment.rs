//! Profile-join enrichment.
//!
//! Primary records (donations, posts) reference their donor by email. The
//! joiner resolves each distinct email to a [`Profile`] at most once and then
//! merges record and profile field-by-field in input order:
//!
//! - every input yields exactly one output, in the same relative order;
//! - a record without a resolvable profile is emitted unchanged;
//! - on a key collision the profile's value wins.
//!
//! The merge itself is pure. Resolution is supplied by the caller as a
//! [`ProfileIndex`] so services decide how profiles are fetched and how a
//! failed lookup degrades.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::Value;

use super::community::Post;
use super::document::{Fields, ID_FIELD};
use super::supply::SupplyRecord;
use super::user::Profile;

/// Record that can be joined against donor profiles.
pub trait PrimaryRecord {
    /// Email referencing the donor, when the record carries one.
    fn join_email(&self) -> Option<&str>;

    /// Flatten the record into its document fields, including `_id`.
    fn into_fields(self) -> Fields;
}

impl PrimaryRecord for SupplyRecord {
    fn join_email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    fn into_fields(self) -> Fields {
        let mut fields = self.extra;
        fields.insert(ID_FIELD.to_owned(), Value::String(self.id.into()));
        if let Some(email) = self.email {
            fields.insert("email".to_owned(), Value::String(email));
        }
        fields.insert("title".to_owned(), Value::String(self.title));
        fields.insert("category".to_owned(), Value::String(self.category));
        fields.insert("description".to_owned(), Value::String(self.description));
        fields.insert("quantity".to_owned(), self.quantity.to_json());
        fields
    }
}

impl PrimaryRecord for Post {
    fn join_email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    fn into_fields(self) -> Fields {
        let mut fields = self.fields;
        fields.insert(ID_FIELD.to_owned(), Value::String(self.id.into()));
        if let Some(email) = self.email {
            fields.insert("email".to_owned(), Value::String(email));
        }
        fields
    }
}

/// Distinct join emails of `records` in first-seen order.
pub fn distinct_emails<R: PrimaryRecord>(records: &[R]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|record| record.join_email())
        .filter(|email| seen.insert(*email))
        .map(str::to_owned)
        .collect()
}

/// Resolved profiles keyed by email.
#[derive(Debug, Clone, Default)]
pub struct ProfileIndex {
    by_email: HashMap<String, Profile>,
}

impl ProfileIndex {
    /// Index that resolves nothing; every record passes through unchanged.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Index profiles by their email; profiles without one are dropped.
    pub fn from_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let by_email = profiles
            .into_iter()
            .filter_map(|profile| {
                let email = profile.email()?.to_owned();
                Some((email, profile))
            })
            .collect();
        Self { by_email }
    }

    /// Profile for `email`, if one was resolved.
    pub fn get(&self, email: &str) -> Option<&Profile> {
        self.by_email.get(email)
    }

    /// Number of indexed profiles.
    pub fn len(&self) -> usize {
        self.by_email.len()
    }

    /// Whether no profile was resolved.
    pub fn is_empty(&self) -> bool {
        self.by_email.is_empty()
    }
}

/// Primary record merged with its donor profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EnrichedRecord(Fields);

impl EnrichedRecord {
    /// Merged fields, profile values taking precedence.
    pub fn fields(&self) -> &Fields {
        &self.0
    }

    /// Single merged field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// Merge each record with its resolved profile, preserving input order.
pub fn enrich<R: PrimaryRecord>(records: Vec<R>, profiles: &ProfileIndex) -> Vec<EnrichedRecord> {
    records
        .into_iter()
        .map(|record| {
            let profile = record.join_email().and_then(|email| profiles.get(email));
            let profile_fields = profile.map(Profile::fields).cloned();
            let mut fields = record.into_fields();
            if let Some(profile_fields) = profile_fields {
                fields.extend(profile_fields);
            }
            EnrichedRecord(fields)
        })
        .collect()
}

/// Order donations by quantity, largest first.
///
/// The sort is stable: equal quantities keep their store order.
pub fn rank_by_quantity(records: &mut [SupplyRecord]) {
    records.sort_by(|a, b| b.quantity.total_cmp(&a.quantity));
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{Email, PasswordHash, RecordId, User};
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn supply(id_suffix: u8, email: Option<&str>, quantity: f64) -> SupplyRecord {
        let mut value = json!({
            "_id": format!("65a1f0c2b3d4e5f6071829{id_suffix:02x}"),
            "title": "Rice",
            "category": "Grains",
            "quantity": quantity,
        });
        if let Some(email) = email {
            value["email"] = json!(email);
        }
        serde_json::from_value(value).expect("record decodes")
    }

    fn profile(email: &str, name: &str, extra: Value) -> Profile {
        let Value::Object(extra) = extra else {
            panic!("extra must be an object");
        };
        User::new(
            Email::new(email).expect("email"),
            name,
            PasswordHash::new("$argon2id$fixture"),
        )
        .with_extra(extra)
        .profile()
    }

    #[fixture]
    fn index() -> ProfileIndex {
        ProfileIndex::from_profiles([
            profile("ada@example.org", "Ada", json!({"title": "Countess"})),
            profile("grace@example.org", "Grace", json!({})),
        ])
    }

    #[rstest]
    fn dangling_records_pass_through_and_others_merge(index: ProfileIndex) {
        let records = vec![
            supply(1, Some("ada@example.org"), 1.0),
            supply(2, Some("ghost@example.org"), 2.0),
            supply(3, None, 3.0),
            supply(4, Some("grace@example.org"), 4.0),
        ];

        let enriched = enrich(records, &index);

        assert_eq!(enriched.len(), 4);
        let ids: Vec<_> = enriched.iter().map(|r| r.get(ID_FIELD).cloned()).collect();
        assert_eq!(
            ids,
            (1..=4_u8)
                .map(|n| Some(json!(format!("65a1f0c2b3d4e5f6071829{n:02x}"))))
                .collect::<Vec<_>>()
        );
        assert_eq!(enriched[0].get("name"), Some(&json!("Ada")));
        assert_eq!(enriched[0].get("title"), Some(&json!("Countess")));
        assert!(enriched[1].get("name").is_none());
        assert_eq!(enriched[1].get("title"), Some(&json!("Rice")));
        assert!(enriched[2].get("email").is_none());
        assert_eq!(enriched[3].get("name"), Some(&json!("Grace")));
    }

    #[rstest]
    fn empty_index_leaves_records_unchanged() {
        let record = supply(1, Some("ada@example.org"), 5.0);
        let expected = record.clone().into_fields();
        let enriched = enrich(vec![record], &ProfileIndex::empty());
        assert_eq!(enriched[0].fields(), &expected);
    }

    #[rstest]
    fn distinct_emails_deduplicate_in_first_seen_order() {
        let records = vec![
            supply(1, Some("b@example.org"), 1.0),
            supply(2, Some("a@example.org"), 1.0),
            supply(3, None, 1.0),
            supply(4, Some("b@example.org"), 1.0),
        ];
        assert_eq!(
            distinct_emails(&records),
            vec!["b@example.org".to_owned(), "a@example.org".to_owned()]
        );
    }

    #[rstest]
    fn ranking_is_descending_and_stable() {
        let mut records = vec![
            supply(1, None, 5.0),
            supply(2, None, 9.0),
            supply(3, None, 2.0),
            supply(4, None, 5.0),
        ];
        rank_by_quantity(&mut records);
        let order: Vec<_> = records.iter().map(|r| r.id.clone()).collect();
        let expected: Vec<_> = [2_u8, 1, 4, 3]
            .iter()
            .map(|n| RecordId::new(format!("65a1f0c2b3d4e5f6071829{n:02x}")).expect("id"))
            .collect();
        assert_eq!(order, expected);
    }

    #[rstest]
    fn posts_join_on_author_email(index: ProfileIndex) {
        let post: Post = serde_json::from_value(json!({
            "_id": "65a1f0c2b3d4e5f607182901",
            "email": "grace@example.org",
            "message": "Thanks!",
        }))
        .expect("post decodes");
        let enriched = enrich(vec![post], &index);
        assert_eq!(enriched[0].get("message"), Some(&json!("Thanks!")));
        assert_eq!(enriched[0].get("name"), Some(&json!("Grace")));
    }
}
