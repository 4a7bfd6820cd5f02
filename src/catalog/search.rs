use super::index::FlatSkill;
use super::types::Skill;

/// Trim a raw query, returning `None` when nothing is left.
///
/// Blank queries are never a valid search state; callers fall back to a
/// category view instead of searching.
pub fn normalize_query(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Case-insensitive substring match of `query` against skill names.
///
/// Only the display name is matched. Results keep flat-index order; there is
/// no ranking. A blank query matches nothing.
pub fn search<'a, I>(query: &str, flat: I) -> Vec<&'a Skill>
where
    I: IntoIterator<Item = FlatSkill<'a>>,
{
    let Some(query) = normalize_query(query) else {
        return Vec::new();
    };
    let needle = query.to_lowercase();

    let results: Vec<&Skill> = flat
        .into_iter()
        .filter(|entry| entry.folded_name.contains(&needle))
        .map(|entry| entry.skill)
        .collect();

    tracing::debug!(query = %needle, matches = results.len(), "Skill search");
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogIndex;
    use proptest::prelude::*;

    fn index() -> CatalogIndex {
        CatalogIndex::load(
            br#"{
                "BLM": {"name_tw": "Black Mage", "skills": [
                    {"id": "b1", "name_tw": "Fire", "level": 2},
                    {"id": "b2", "name_tw": "Blizzard", "level": 1},
                    {"id": "b3", "name_tw": "Fire IV", "level": 60}
                ]},
                "RDM": {"name_tw": "Red Mage", "skills": [
                    {"id": "r1", "name_tw": "Verfire", "level": 30},
                    {"id": "r2", "name_tw": "Verthunder", "level": 4}
                ]}
            }"#,
        )
        .unwrap()
    }

    fn ids(skills: &[&Skill]) -> Vec<String> {
        skills.iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn test_search_case_insensitive_in_flat_order() {
        let index = index();
        let results = search("FIRE", index.flat());
        assert_eq!(ids(&results), vec!["b1", "b3", "r1"]);
    }

    #[test]
    fn test_search_trims_query() {
        let index = index();
        let results = search("  blizz  ", index.flat());
        assert_eq!(ids(&results), vec!["b2"]);
    }

    #[test]
    fn test_search_no_results() {
        let index = index();
        assert!(search("zzz", index.flat()).is_empty());
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        let index = index();
        assert!(search("", index.flat()).is_empty());
        assert!(search(" \t\n", index.flat()).is_empty());
    }

    #[test]
    fn test_search_ignores_other_attributes() {
        let index = CatalogIndex::load(
            br#"{"A": {"name_tw": "Fire Job", "skills": [
                {"id": "a1", "name_tw": "Strike", "level": 1, "effect_tw": "Deals fire damage"}
            ]}}"#,
        )
        .unwrap();
        assert!(search("fire", index.flat()).is_empty());
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query(" fire "), Some("fire"));
        assert_eq!(normalize_query("   "), None);
        assert_eq!(normalize_query(""), None);
    }

    proptest! {
        #[test]
        fn prop_results_equal_name_filter(query in "[a-zA-Z ]{1,6}") {
            let index = index();
            let results = search(&query, index.flat());
            let expected: Vec<&Skill> = match normalize_query(&query) {
                Some(q) => {
                    let q = q.to_lowercase();
                    index
                        .flat()
                        .map(|e| e.skill)
                        .filter(|s| s.name.to_lowercase().contains(&q))
                        .collect()
                }
                None => Vec::new(),
            };
            prop_assert_eq!(ids(&results), ids(&expected));
        }
    }
}
