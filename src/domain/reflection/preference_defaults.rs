//! Rule-based preference enrichment.
//!
//! Each factor is matched against a fixed keyword table (case-insensitive
//! substring, first entry wins). Unknown factors get position-derived values
//! so the output is always deterministic for the same input.

use crate::domain::foundation::Score;

use super::preference::Preference;

/// Trade-off note attached to factors found in the keyword table.
pub const KNOWN_FACTOR_TRADEOFF: &str = "Might accept lower on other preferences";

/// Trade-off note attached to factors not in the keyword table.
pub const UNKNOWN_FACTOR_TRADEOFF: &str = "Flexible depending on overall fit";

/// Limit given to unknown factors at even positions.
pub const UNKNOWN_FACTOR_LIMIT: &str = "Moderate preference";

/// Typical importance and threshold for a commonly chosen factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorDefault {
    pub keyword: &'static str,
    pub importance: u8,
    pub limit: Option<&'static str>,
}

/// Keyword table, searched in order.
pub const FACTOR_DEFAULTS: &[FactorDefault] = &[
    // Work
    FactorDefault { keyword: "salary", importance: 8, limit: Some("minimum $60k") },
    FactorDefault { keyword: "remote work", importance: 7, limit: Some("at least 3 days remote") },
    FactorDefault { keyword: "work-life balance", importance: 8, limit: Some("max 45 hours/week") },
    FactorDefault { keyword: "team culture", importance: 7, limit: None },
    FactorDefault { keyword: "career growth", importance: 6, limit: None },
    // Location
    FactorDefault { keyword: "cost of living", importance: 8, limit: Some("max 30% of income on rent") },
    FactorDefault { keyword: "commute time", importance: 7, limit: Some("max 45 minutes") },
    FactorDefault { keyword: "weather", importance: 5, limit: None },
    FactorDefault { keyword: "proximity to family", importance: 6, limit: Some("within 2 hour flight") },
    // Relationships
    FactorDefault { keyword: "shared values", importance: 9, limit: None },
    FactorDefault { keyword: "communication style", importance: 8, limit: None },
    FactorDefault { keyword: "life goals alignment", importance: 9, limit: None },
    FactorDefault { keyword: "physical attraction", importance: 6, limit: None },
];

/// Finds the first table entry whose keyword occurs in `factor`.
pub fn lookup(factor: &str) -> Option<&'static FactorDefault> {
    let lowered = factor.to_lowercase();
    FACTOR_DEFAULTS
        .iter()
        .find(|entry| lowered.contains(entry.keyword))
}

/// Enriches one selection at position `index` of its batch.
pub fn enrich_one(index: usize, selection: &Preference) -> Preference {
    match lookup(&selection.factor) {
        Some(entry) => Preference {
            factor: selection.factor.clone(),
            importance: Score::new(entry.importance),
            has_limit: entry.limit.is_some(),
            limit: entry.limit.map(String::from),
            tradeoff: Some(KNOWN_FACTOR_TRADEOFF.to_string()),
        },
        None => {
            let even = index % 2 == 0;
            Preference {
                factor: selection.factor.clone(),
                importance: Score::new(5 + (index % 3) as u8),
                has_limit: even,
                limit: even.then(|| UNKNOWN_FACTOR_LIMIT.to_string()),
                tradeoff: Some(UNKNOWN_FACTOR_TRADEOFF.to_string()),
            }
        }
    }
}

/// Enriches a batch. Output has the same length, order and factor names as the input.
pub fn fallback_enrichment(selections: &[Preference]) -> Vec<Preference> {
    selections
        .iter()
        .enumerate()
        .map(|(i, p)| enrich_one(i, p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn known_factor_uses_table_values() {
        let out = fallback_enrichment(&[Preference::selection("Base Salary")]);

        assert_eq!(out[0].factor, "Base Salary");
        assert_eq!(out[0].importance.value(), 8);
        assert!(out[0].has_limit);
        assert_eq!(out[0].limit.as_deref(), Some("minimum $60k"));
        assert_eq!(out[0].tradeoff.as_deref(), Some(KNOWN_FACTOR_TRADEOFF));
    }

    #[test]
    fn known_factor_without_limit() {
        let out = fallback_enrichment(&[Preference::selection("Shared values")]);
        assert_eq!(out[0].importance.value(), 9);
        assert!(!out[0].has_limit);
        assert!(out[0].limit.is_none());
    }

    #[test]
    fn first_table_entry_wins() {
        // Contains both "salary" and "remote work"; salary comes first in the table.
        let entry = lookup("Remote work salary premium").unwrap();
        assert_eq!(entry.keyword, "salary");
    }

    #[test]
    fn unknown_factors_vary_by_position() {
        let selections: Vec<_> = ["Mentorship", "Gym", "Pets", "Garden"]
            .into_iter()
            .map(Preference::selection)
            .collect();
        let out = fallback_enrichment(&selections);

        let importances: Vec<u8> = out.iter().map(|p| p.importance.value()).collect();
        assert_eq!(importances, vec![5, 6, 7, 5]);

        assert!(out[0].has_limit);
        assert_eq!(out[0].limit.as_deref(), Some(UNKNOWN_FACTOR_LIMIT));
        assert!(!out[1].has_limit);
        assert!(out[1].limit.is_none());
        assert!(out[2].has_limit);
        assert!(out.iter().all(|p| p.tradeoff.as_deref() == Some(UNKNOWN_FACTOR_TRADEOFF)));
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(fallback_enrichment(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn enrichment_is_deterministic_and_preserves_factors(
            factors in proptest::collection::vec("[A-Za-z -]{1,24}", 0..12)
        ) {
            let selections: Vec<_> = factors.iter().map(Preference::selection).collect();

            let first = fallback_enrichment(&selections);
            let second = fallback_enrichment(&selections);

            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.len(), selections.len());
            for (out, input) in first.iter().zip(&selections) {
                prop_assert_eq!(&out.factor, &input.factor);
                prop_assert!(out.importance.value() >= 5);
                prop_assert_eq!(out.has_limit, out.limit.is_some());
            }
        }
    }
}
