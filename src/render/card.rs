use crate::catalog::{AttrValue, Skill};

/// Placeholder for attributes that have no value.
pub const DASH: &str = "—";

/// One labelled line of a card's detail popout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatLine {
    pub label: &'static str,
    pub value: String,
}

/// Combo block of a card, present only for skills with a combo condition or
/// combo potency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboInfo {
    pub condition: String,
    pub potency: String,
    pub duration: Option<String>,
    pub effects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectLine {
    pub text: String,
    pub duration: Option<String>,
}

/// Display-ready data for one skill card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCard {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub kind: Option<String>,
    pub icon: String,
    /// Owning job's name, set only on search result cards.
    pub category: Option<String>,
    pub stats: Vec<StatLine>,
    pub combo: Option<ComboInfo>,
    pub additional_effects: Vec<EffectLine>,
    pub effect: Option<String>,
    pub notice: Option<String>,
}

/// An entry of the card list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardDescriptor {
    Skill(Box<SkillCard>),
    /// Stand-in shown when a search matched nothing.
    NoResults { query: String },
}

impl CardDescriptor {
    pub fn as_skill(&self) -> Option<&SkillCard> {
        match self {
            CardDescriptor::Skill(card) => Some(card.as_ref()),
            CardDescriptor::NoResults { .. } => None,
        }
    }
}

fn shown(value: Option<&AttrValue>) -> Option<String> {
    value.filter(|v| v.is_meaningful()).map(ToString::to_string)
}

fn shown_or(value: Option<&AttrValue>, fallback: &str) -> String {
    shown(value).unwrap_or_else(|| fallback.to_owned())
}

fn non_blank(text: Option<&String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty()).cloned()
}

impl SkillCard {
    pub(super) fn build(skill: &Skill, default_icon: &str, tag_category: bool) -> Self {
        let mut stats = vec![
            StatLine {
                label: "Level",
                value: format!("Lv. {}", skill.level),
            },
            StatLine {
                label: "Type",
                value: skill.kind.clone().unwrap_or_else(|| DASH.to_owned()),
            },
            StatLine {
                label: "Range",
                value: shown_or(skill.range.as_ref(), "0m"),
            },
            StatLine {
                label: "Radius",
                value: shown_or(skill.area.as_ref(), "0m"),
            },
            StatLine {
                label: "Cast",
                value: shown_or(skill.cast_time.as_ref(), "Instant"),
            },
            StatLine {
                label: "Recast",
                value: shown_or(skill.cooldown.as_ref(), DASH),
            },
        ];

        let optional = [
            ("Potency", &skill.potency),
            ("Duration", &skill.duration),
            ("Cost", &skill.cost),
            ("Charges", &skill.charge),
            ("Requires", &skill.cast_req),
        ];
        stats.extend(optional.into_iter().filter_map(|(label, value)| {
            shown(value.as_ref()).map(|value| StatLine { label, value })
        }));

        let combo = skill.has_combo().then(|| ComboInfo {
            condition: shown_or(skill.combo_req.as_ref(), DASH),
            potency: shown_or(skill.combo_potency.as_ref(), DASH),
            duration: shown(skill.combo_duration.as_ref()),
            effects: [&skill.combo_effect, &skill.combo_effect2]
                .into_iter()
                .filter_map(|e| non_blank(e.as_ref()))
                .collect(),
        });

        let additional_effects = skill
            .additional
            .slots()
            .map(|(text, duration)| EffectLine {
                text: text.to_owned(),
                duration: shown(duration),
            })
            .collect();

        let icon = skill
            .icon_url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or(default_icon)
            .to_owned();

        Self {
            id: skill.id.clone(),
            name: skill.name.clone(),
            level: skill.level,
            kind: skill.kind.clone(),
            icon,
            category: tag_category.then(|| skill.category_name.clone()),
            stats,
            combo,
            additional_effects,
            effect: non_blank(skill.effect.as_ref()),
            notice: non_blank(skill.notice.as_ref()),
        }
    }

    pub fn stat(&self, label: &str) -> Option<&str> {
        self.stats
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.value.as_str())
    }
}
