use indexmap::IndexMap;

use super::types::{CatalogError, Category, Skill};

/// One entry of the flattened, searchable skill list.
#[derive(Debug, Clone, Copy)]
pub struct FlatSkill<'a> {
    pub skill: &'a Skill,
    /// Lower-cased skill name, computed once per load.
    pub folded_name: &'a str,
}

#[derive(Debug)]
struct FlatEntry {
    category: usize,
    skill: usize,
    folded_name: String,
}

/// The loaded dataset plus its derived flat skill list.
///
/// Categories keep file order, which drives both the sidebar order and the
/// default category. The flat list follows category order, then skill order,
/// and is rebuilt from scratch on every load.
#[derive(Debug)]
pub struct CatalogIndex {
    categories: IndexMap<String, Category>,
    flat: Vec<FlatEntry>,
}

impl CatalogIndex {
    /// Build an index from raw JSON bytes.
    ///
    /// The input must be an object of category key to category. Any category
    /// missing `name_tw`, or any skill missing `id`, `name_tw` or `level`, fails
    /// the whole load; a partially built index is never returned.
    pub fn load(raw: &[u8]) -> Result<Self, CatalogError> {
        let mut categories: IndexMap<String, Category> = serde_json::from_slice(raw)?;

        let mut flat = Vec::new();
        for (cat_pos, (key, category)) in categories.iter_mut().enumerate() {
            category.id = key.clone();
            for (skill_pos, skill) in category.skills.iter_mut().enumerate() {
                skill.category_name = category.name.clone();
                flat.push(FlatEntry {
                    category: cat_pos,
                    skill: skill_pos,
                    folded_name: skill.name.to_lowercase(),
                });
            }
        }

        tracing::debug!(
            categories = categories.len(),
            skills = flat.len(),
            "Catalog index built"
        );

        Ok(Self { categories, flat })
    }

    /// Categories in load order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.get(id)
    }

    /// Identifier of the first category in load order.
    pub fn default_category_id(&self) -> Result<&str, CatalogError> {
        self.categories
            .keys()
            .next()
            .map(String::as_str)
            .ok_or(CatalogError::EmptyCatalog)
    }

    /// Every skill across all categories, in category then skill order.
    pub fn flat(&self) -> impl Iterator<Item = FlatSkill<'_>> {
        self.flat.iter().filter_map(move |entry| {
            let (_, category) = self.categories.get_index(entry.category)?;
            Some(FlatSkill {
                skill: category.skills.get(entry.skill)?,
                folded_name: &entry.folded_name,
            })
        })
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn skill_count(&self) -> usize {
        self.flat.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TWO_JOBS: &str = r#"{
        "DarkKnight": {
            "name_tw": "Dark Knight", "role_tw": "Tank",
            "description_tw": "A shadow-wielding defender.",
            "skills": [
                {"id": "drk1", "name_tw": "Souleater", "level": 30},
                {"id": "drk2", "name_tw": "The Blackest Night", "level": 70}
            ]
        },
        "Samurai": {
            "name_tw": "Samurai", "role_tw": "Melee DPS",
            "skills": [
                {"id": "sam1", "name_tw": "Hagakure", "level": 52}
            ]
        }
    }"#;

    #[test]
    fn test_load_preserves_category_order() {
        let index = CatalogIndex::load(TWO_JOBS.as_bytes()).unwrap();
        let ids: Vec<&str> = index.categories().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["DarkKnight", "Samurai"]);
        assert_eq!(index.default_category_id().unwrap(), "DarkKnight");
    }

    #[test]
    fn test_flat_order_and_backreference() {
        let index = CatalogIndex::load(TWO_JOBS.as_bytes()).unwrap();
        let flat: Vec<(&str, &str)> = index
            .flat()
            .map(|e| (e.skill.id.as_str(), e.skill.category_name.as_str()))
            .collect();
        assert_eq!(
            flat,
            vec![
                ("drk1", "Dark Knight"),
                ("drk2", "Dark Knight"),
                ("sam1", "Samurai"),
            ]
        );
        assert_eq!(index.skill_count(), 3);
    }

    #[test]
    fn test_folded_names_are_lowercase() {
        let index = CatalogIndex::load(TWO_JOBS.as_bytes()).unwrap();
        let folded: Vec<&str> = index.flat().map(|e| e.folded_name).collect();
        assert_eq!(folded[1], "the blackest night");
    }

    #[test]
    fn test_empty_object_loads_but_has_no_default() {
        let index = CatalogIndex::load(b"{}").unwrap();
        assert!(index.is_empty());
        assert!(matches!(
            index.default_category_id(),
            Err(CatalogError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_category_missing_name_fails_whole_load() {
        let raw = r#"{
            "A": {"name_tw": "Alpha", "skills": []},
            "B": {"skills": []}
        }"#;
        let result = CatalogIndex::load(raw.as_bytes());
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_skill_missing_id_fails_whole_load() {
        let raw = r#"{"A": {"name_tw": "Alpha", "skills": [{"name_tw": "Fire", "level": 1}]}}"#;
        assert!(CatalogIndex::load(raw.as_bytes()).is_err());
    }

    #[test]
    fn test_non_object_root_rejected() {
        assert!(CatalogIndex::load(b"[]").is_err());
        assert!(CatalogIndex::load(b"not json").is_err());
    }

    #[test]
    fn test_category_lookup() {
        let index = CatalogIndex::load(TWO_JOBS.as_bytes()).unwrap();
        assert_eq!(index.category("Samurai").map(|c| c.skills.len()), Some(1));
        assert!(index.category("Bard").is_none());
    }
}
