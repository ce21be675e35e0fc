//! Decision factors grouped by category.

use serde::{Deserialize, Serialize};

/// A named group of decision factors. Items are identified by their text alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorCategory {
    pub category: String,
    pub items: Vec<String>,
}

impl FactorCategory {
    /// Creates a category from a name and its items.
    pub fn new<I, S>(category: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category: category.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Total number of factor items across categories.
pub fn total_factors(categories: &[FactorCategory]) -> usize {
    categories.iter().map(|c| c.items.len()).sum()
}

/// Topic-independent catalog used when the model cannot be reached.
///
/// Always three categories of four items each.
pub fn default_catalog() -> Vec<FactorCategory> {
    vec![
        FactorCategory::new(
            "Work Environment",
            [
                "Remote work flexibility",
                "Team culture",
                "Office location",
                "Work-life balance",
            ],
        ),
        FactorCategory::new(
            "Compensation",
            [
                "Base salary",
                "Equity/stock options",
                "Benefits package",
                "Bonus structure",
            ],
        ),
        FactorCategory::new(
            "Growth & Development",
            [
                "Learning opportunities",
                "Career advancement",
                "Mentorship",
                "Skill development",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_three_by_four() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.iter().all(|c| c.items.len() == 4));
        assert_eq!(total_factors(&catalog), 12);
    }

    #[test]
    fn default_catalog_order_is_fixed() {
        let names: Vec<_> = default_catalog().into_iter().map(|c| c.category).collect();
        assert_eq!(
            names,
            vec!["Work Environment", "Compensation", "Growth & Development"]
        );
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let json = serde_json::to_value(FactorCategory::new("Cost", ["Rent"])).unwrap();
        assert_eq!(json["category"], "Cost");
        assert_eq!(json["items"][0], "Rent");
    }
}
