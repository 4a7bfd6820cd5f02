use serde::Deserialize;
use std::fmt;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors produced while building a [`CatalogIndex`](super::CatalogIndex).
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The dataset did not match the expected shape. The whole load is rejected.
    #[error("Malformed skill data: {0}")]
    Parse(#[from] serde_json::Error),

    /// The dataset parsed but contains no jobs.
    #[error("Skill data contains no jobs")]
    EmptyCatalog,
}

// ============================================================================
// Attribute Values
// ============================================================================

/// A skill attribute that the dataset may carry either as a number or as text
/// (e.g. `"cooldown": 2.5` next to `"range": "25m"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Number(f64),
    Text(String),
}

impl AttrValue {
    /// Whether the value carries something worth displaying.
    ///
    /// Zero and negative numbers count as absent, as do blank strings.
    pub fn is_meaningful(&self) -> bool {
        match self {
            AttrValue::Number(n) => *n > 0.0,
            AttrValue::Text(s) => !s.trim().is_empty(),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Integral values print without a trailing ".0"
            AttrValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            AttrValue::Number(n) => write!(f, "{}", n),
            AttrValue::Text(s) => f.write_str(s),
        }
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// One job in the catalog. The `id` is the dataset key, filled in at load time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    #[serde(skip)]
    pub id: String,
    #[serde(rename = "name_tw")]
    pub name: String,
    #[serde(rename = "role_tw", default)]
    pub role: Option<String>,
    #[serde(rename = "description_tw", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

/// A single skill card's worth of data.
///
/// `id`, `name_tw` and `level` are required; every other attribute is optional.
/// `category_name` is stamped by the index builder and never read from input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Skill {
    pub id: String,
    #[serde(rename = "name_tw")]
    pub name: String,
    pub level: u32,
    #[serde(rename = "type")]
    pub kind: Option<String>,

    pub potency: Option<AttrValue>,
    pub cooldown: Option<AttrValue>,
    pub cast_time: Option<AttrValue>,
    pub range: Option<AttrValue>,
    pub area: Option<AttrValue>,
    pub cost: Option<AttrValue>,
    pub duration: Option<AttrValue>,
    pub charge: Option<AttrValue>,
    pub cast_req: Option<AttrValue>,

    pub combo_req: Option<AttrValue>,
    #[serde(alias = "combopotency")]
    pub combo_potency: Option<AttrValue>,
    pub combo_duration: Option<AttrValue>,
    #[serde(rename = "combo_effect_tw", alias = "comboeffect_tw")]
    pub combo_effect: Option<String>,
    #[serde(rename = "combo_effect2_tw")]
    pub combo_effect2: Option<String>,

    #[serde(flatten)]
    pub additional: AdditionalEffects,

    #[serde(rename = "effect_tw")]
    pub effect: Option<String>,
    pub notice: Option<String>,
    pub icon_url: Option<String>,

    #[serde(skip)]
    pub category_name: String,
}

/// The four independently optional additional-effect slots of a skill.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AdditionalEffects {
    #[serde(rename = "additional_effect_tw")]
    pub effect1: Option<String>,
    #[serde(rename = "add_effect_duration")]
    pub duration1: Option<AttrValue>,
    #[serde(rename = "additional_effect2_tw")]
    pub effect2: Option<String>,
    #[serde(rename = "add_effect2_duration")]
    pub duration2: Option<AttrValue>,
    #[serde(rename = "additional_effect3_tw")]
    pub effect3: Option<String>,
    #[serde(rename = "add_effect3_duration")]
    pub duration3: Option<AttrValue>,
    #[serde(rename = "additional_effect4_tw")]
    pub effect4: Option<String>,
    #[serde(rename = "add_effect4_duration")]
    pub duration4: Option<AttrValue>,
}

impl AdditionalEffects {
    /// Filled slots in slot order. A slot counts as filled when its effect text
    /// is present and non-blank; its duration is carried along when set.
    pub fn slots(&self) -> impl Iterator<Item = (&str, Option<&AttrValue>)> {
        [
            (&self.effect1, &self.duration1),
            (&self.effect2, &self.duration2),
            (&self.effect3, &self.duration3),
            (&self.effect4, &self.duration4),
        ]
        .into_iter()
        .filter_map(|(effect, duration)| {
            let text = effect.as_deref().filter(|t| !t.trim().is_empty())?;
            Some((text, duration.as_ref()))
        })
    }
}

impl Skill {
    /// Whether the skill has anything to show in a combo block.
    pub fn has_combo(&self) -> bool {
        self.combo_req.as_ref().is_some_and(AttrValue::is_meaningful)
            || self
                .combo_potency
                .as_ref()
                .is_some_and(AttrValue::is_meaningful)
    }
}
