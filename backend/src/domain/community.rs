//! Gratitude-wall posts and append-only free-form entries.

use serde::{Deserialize, Serialize};

use super::document::{Fields, ID_FIELD, RecordId};
use super::user::Email;

/// Persisted community post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub fields: Fields,
}

/// Post about to be published by `author`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    author: Email,
    fields: Fields,
}

impl NewPost {
    /// The author always comes from the authenticated caller; any `email` or
    /// `_id` in the submitted body is discarded.
    pub fn new(author: Email, mut fields: Fields) -> Self {
        fields.remove(ID_FIELD);
        fields.remove("email");
        Self { author, fields }
    }

    /// Donor publishing the post.
    pub fn author(&self) -> &Email {
        &self.author
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Stored post once the store has assigned an id.
    pub fn into_record(self, id: RecordId) -> Post {
        Post {
            id,
            email: Some(self.author.into()),
            fields: self.fields,
        }
    }
}

/// Collections holding append-only free-form entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Volunteer sign-ups.
    Volunteer,
    /// Donor testimonials shown on the dashboard.
    Testimonial,
}

impl EntryKind {
    /// Name of the backing collection.
    pub fn collection(self) -> &'static str {
        match self {
            Self::Volunteer => "volunteer",
            Self::Testimonial => "review",
        }
    }
}

/// Persisted free-form entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "_id")]
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: Fields,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn new_post_uses_authenticated_author() {
        let mut fields = Fields::new();
        fields.insert("email".to_owned(), json!("mallory@example.org"));
        fields.insert("message".to_owned(), json!("Thank you!"));
        let author = Email::new("ada@example.org").expect("email");
        let id = RecordId::new("65a1f0c2b3d4e5f60718293a").expect("id");

        let post = NewPost::new(author, fields).into_record(id);
        assert_eq!(post.email.as_deref(), Some("ada@example.org"));
        assert_eq!(post.fields.get("message"), Some(&json!("Thank you!")));
        assert!(!post.fields.contains_key("email"));
    }

    #[rstest]
    #[case(EntryKind::Volunteer, "volunteer")]
    #[case(EntryKind::Testimonial, "review")]
    fn entry_kinds_map_to_collections(#[case] kind: EntryKind, #[case] collection: &str) {
        assert_eq!(kind.collection(), collection);
    }

    #[rstest]
    fn entries_serialise_flat() {
        let entry: Entry = serde_json::from_value(json!({
            "_id": "65a1f0c2b3d4e5f60718293a",
            "name": "Grace",
            "availability": "weekends",
        }))
        .expect("entry decodes");
        let value = serde_json::to_value(&entry).expect("entry serialises");
        assert_eq!(value["name"], json!("Grace"));
        assert_eq!(value["_id"], json!("65a1f0c2b3d4e5f60718293a"));
    }
}
