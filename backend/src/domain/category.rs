//! Static donation categories and per-category counts.

use serde::{Deserialize, Serialize};

use super::supply::SupplyRecord;

/// Entry of the category list file: `{"category": "<name>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryDefinition {
    pub category: String,
}

/// Immutable, ordered category list loaded once at start.
///
/// # Examples
/// ```
/// use feedforward::domain::CategoryCatalogue;
///
/// let catalogue = CategoryCatalogue::new(["Grains", "Produce"]);
/// assert_eq!(catalogue.names().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCatalogue {
    names: Vec<String>,
}

impl CategoryCatalogue {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Catalogue from parsed `{"category": ...}` entries, in file order.
    pub fn from_definitions(definitions: Vec<CategoryDefinition>) -> Self {
        Self::new(definitions.into_iter().map(|definition| definition.category))
    }

    /// Category names in catalogue order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Count `records` per listed category by exact name match.
    ///
    /// Output follows catalogue order and lists every category, including
    /// those with no records. Records whose category is not listed are not
    /// counted anywhere.
    pub fn count(&self, records: &[SupplyRecord]) -> Vec<CategoryCount> {
        self.names
            .iter()
            .map(|name| CategoryCount {
                name: name.clone(),
                value: records
                    .iter()
                    .filter(|record| record.category == *name)
                    .count() as u64,
            })
            .collect()
    }
}

/// Number of donations filed under a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub value: u64,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn record(category: &str) -> SupplyRecord {
        serde_json::from_value(json!({
            "_id": "65a1f0c2b3d4e5f60718293a",
            "category": category,
        }))
        .expect("record decodes")
    }

    #[rstest]
    fn counts_follow_catalogue_order_and_ignore_unknown_categories() {
        let catalogue = CategoryCatalogue::new(["X", "Y"]);
        let records = ["X", "X", "Y", "Z"].map(record);

        let counts = catalogue.count(&records);
        assert_eq!(
            counts,
            vec![
                CategoryCount { name: "X".to_owned(), value: 2 },
                CategoryCount { name: "Y".to_owned(), value: 1 },
            ]
        );
    }

    #[rstest]
    fn empty_categories_report_zero() {
        let catalogue = CategoryCatalogue::new(["Produce"]);
        let counts = catalogue.count(&[]);
        assert_eq!(counts, vec![CategoryCount { name: "Produce".to_owned(), value: 0 }]);
    }

    #[rstest]
    fn loads_from_definition_list() {
        let definitions: Vec<CategoryDefinition> =
            serde_json::from_value(json!([{"category": "Grains"}, {"category": "Dairy"}]))
                .expect("definitions decode");
        let catalogue = CategoryCatalogue::from_definitions(definitions);
        assert_eq!(catalogue.names(), ["Grains".to_owned(), "Dairy".to_owned()]);
    }
}
