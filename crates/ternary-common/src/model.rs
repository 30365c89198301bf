use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CommonError;

/// Three-component weight record of a vision (its position on the ternary plot).
///
/// Source documents name the components either `a`/`b`/`c` or
/// `nature_for_nature`/`nature_for_society`/`nature_as_culture`. Both are
/// accepted on input; the short name wins when both are present, `null`
/// counts as absent and a missing component is zero. Serialization always
/// uses the canonical short names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawWeights")]
pub struct Weights {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

#[derive(Deserialize)]
struct RawWeights {
    a: Option<f64>,
    b: Option<f64>,
    c: Option<f64>,
    nature_for_nature: Option<f64>,
    nature_for_society: Option<f64>,
    nature_as_culture: Option<f64>,
}

impl From<RawWeights> for Weights {
    fn from(raw: RawWeights) -> Self {
        Self {
            a: raw.a.or(raw.nature_for_nature).unwrap_or(0.0),
            b: raw.b.or(raw.nature_for_society).unwrap_or(0.0),
            c: raw.c.or(raw.nature_as_culture).unwrap_or(0.0),
        }
    }
}

impl Weights {
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Components divided by their sum. A zero sum divides by 1 instead, so
    /// the all-zero record stays all-zero.
    pub fn normalized(&self) -> (f64, f64, f64) {
        let total = self.a + self.b + self.c;
        let sum = if total == 0.0 || total.is_nan() { 1.0 } else { total };
        (self.a / sum, self.b / sum, self.c / sum)
    }

    /// Checks the canonical schema: every component finite and non-negative.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [("a", self.a), ("b", self.b), ("c", self.c)] {
            if !value.is_finite() {
                return Err(format!("weight '{name}' must be finite, got {value}"));
            }
            if value < 0.0 {
                return Err(format!("weight '{name}' must be non-negative, got {value}"));
            }
        }
        Ok(())
    }
}

/// A plotted scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vision {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title_en: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title_kr: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary_en: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary_kr: String,
    pub nff: Weights,
    #[serde(default, deserialize_with = "null_as_default")]
    pub seeds: Vec<String>,
    /// Source citations. Documents carry either a single string or a list.
    #[serde(default, deserialize_with = "one_or_many")]
    pub source: Vec<String>,
}

impl Vision {
    pub fn validate(&self) -> Result<(), CommonError> {
        self.nff.validate().map_err(|message| CommonError::Schema {
            id: self.id.clone(),
            message,
        })
    }

    /// Label used for the plotted point: English title, else id, else "Vision".
    pub fn label(&self) -> &str {
        if !self.title_en.is_empty() {
            &self.title_en
        } else if !self.id.is_empty() {
            &self.id
        } else {
            "Vision"
        }
    }

    pub fn title(&self, lang: Lang) -> &str {
        localized(&self.title_en, &self.title_kr, lang)
    }

    pub fn summary(&self, lang: Lang) -> &str {
        localized(&self.summary_en, &self.summary_kr, lang)
    }
}

/// A seed referenced by visions through `Vision::seeds`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seed {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title_en: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title_kr: String,
    #[serde(default)]
    pub domain: Option<String>,
}

impl Seed {
    pub fn title(&self, lang: Lang) -> &str {
        localized(&self.title_en, &self.title_kr, lang)
    }
}

/// A story grouped under a vision by `vision_id`.
///
/// Documents may name the grouping key `vision` instead; `vision_id` wins
/// when both are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawStory")]
pub struct Story {
    pub vision_id: String,
    pub title_en: String,
    pub title_kr: String,
    pub abstract_en: String,
    pub abstract_kr: String,
}

#[derive(Deserialize)]
struct RawStory {
    vision_id: Option<String>,
    vision: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    title_en: String,
    #[serde(default, deserialize_with = "null_as_default")]
    title_kr: String,
    #[serde(default, deserialize_with = "null_as_default")]
    abstract_en: String,
    #[serde(default, deserialize_with = "null_as_default")]
    abstract_kr: String,
}

impl TryFrom<RawStory> for Story {
    type Error = String;

    fn try_from(raw: RawStory) -> Result<Self, Self::Error> {
        let vision_id = raw
            .vision_id
            .or(raw.vision)
            .ok_or_else(|| "story is missing its vision key ('vision_id' or 'vision')".to_string())?;
        Ok(Self {
            vision_id,
            title_en: raw.title_en,
            title_kr: raw.title_kr,
            abstract_en: raw.abstract_en,
            abstract_kr: raw.abstract_kr,
        })
    }
}

impl Story {
    pub fn title(&self, lang: Lang) -> &str {
        localized(&self.title_en, &self.title_kr, lang)
    }

    pub fn abstract_text(&self, lang: Lang) -> &str {
        localized(&self.abstract_en, &self.abstract_kr, lang)
    }
}

/// Card language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    #[serde(alias = "ko")]
    Kr,
}

impl Lang {
    pub fn other(self) -> Self {
        match self {
            Lang::En => Lang::Kr,
            Lang::Kr => Lang::En,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Kr => "kr",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Lang::En),
            "kr" | "ko" => Ok(Lang::Kr),
            other => Err(format!("unknown language: '{other}' (expected 'en' or 'kr')")),
        }
    }
}

/// Picks the text for `lang`, falling back to the other language. Empty when
/// neither is set.
pub fn localized<'a>(en: &'a str, kr: &'a str, lang: Lang) -> &'a str {
    let (preferred, fallback) = match lang {
        Lang::En => (en, kr),
        Lang::Kr => (kr, en),
    };
    if preferred.is_empty() {
        fallback
    } else {
        preferred
    }
}

/// Explicit `null` reads as the type's default, like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) if s.is_empty() => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_short_names() {
        let w: Weights = serde_json::from_str(r#"{"a": 0.2, "b": 0.3, "c": 0.5}"#).unwrap();
        assert_eq!(w, Weights::new(0.2, 0.3, 0.5));
    }

    #[test]
    fn test_weights_long_names() {
        let w: Weights = serde_json::from_str(
            r#"{"nature_for_nature": 1, "nature_for_society": 2, "nature_as_culture": 3}"#,
        )
        .unwrap();
        assert_eq!(w, Weights::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_weights_short_name_wins() {
        let w: Weights =
            serde_json::from_str(r#"{"a": 0.1, "nature_for_nature": 0.9, "nature_for_society": 0.4}"#)
                .unwrap();
        assert_eq!(w, Weights::new(0.1, 0.4, 0.0));
    }

    #[test]
    fn test_weights_null_falls_through() {
        let w: Weights =
            serde_json::from_str(r#"{"a": null, "nature_for_nature": 0.7, "c": null}"#).unwrap();
        assert_eq!(w, Weights::new(0.7, 0.0, 0.0));
    }

    #[test]
    fn test_weights_serialize_canonical() {
        let w: Weights = serde_json::from_str(r#"{"nature_as_culture": 1}"#).unwrap();
        let json = serde_json::to_value(w).unwrap();
        assert_eq!(json, serde_json::json!({"a": 0.0, "b": 0.0, "c": 1.0}));
    }

    #[test]
    fn test_normalized_zero_sum() {
        assert_eq!(Weights::default().normalized(), (0.0, 0.0, 0.0));
        assert_eq!(Weights::new(2.0, 1.0, 1.0).normalized(), (0.5, 0.25, 0.25));
    }

    #[test]
    fn test_validate_rejects_negative() {
        let v: Vision = serde_json::from_str(r#"{"id": "v1", "nff": {"a": -1, "b": 1}}"#).unwrap();
        let err = v.validate().unwrap_err();
        assert!(err.to_string().contains("v1"));
        assert!(err.to_string().contains("non-negative"));
        assert!(Weights::new(f64::INFINITY, 0.0, 0.0).validate().is_err());
    }

    #[test]
    fn test_vision_defaults_and_single_source() {
        let v: Vision = serde_json::from_str(
            r#"{"id": "v1", "nff": {"a": 1}, "source": "IPBES 2022"}"#,
        )
        .unwrap();
        assert_eq!(v.source, vec!["IPBES 2022"]);
        assert!(v.seeds.is_empty());
        assert_eq!(v.label(), "v1");
        assert_eq!(v.title(Lang::Kr), "");
    }

    #[test]
    fn test_vision_source_list() {
        let v: Vision = serde_json::from_str(
            r#"{"id": "v1", "title_en": "Rewilded", "nff": {}, "source": ["A", "B"], "seeds": ["s1"]}"#,
        )
        .unwrap();
        assert_eq!(v.source, vec!["A", "B"]);
        assert_eq!(v.seeds, vec!["s1"]);
        assert_eq!(v.label(), "Rewilded");
        assert_eq!(v.nff, Weights::default());
    }

    #[test]
    fn test_story_vision_alias() {
        let s: Story = serde_json::from_str(r#"{"vision": "v2", "title_kr": "이야기"}"#).unwrap();
        assert_eq!(s.vision_id, "v2");
        assert_eq!(s.title(Lang::En), "이야기");
    }

    #[test]
    fn test_story_vision_id_wins_over_alias() {
        let s: Story =
            serde_json::from_str(r#"{"vision_id": "v1", "vision": "v2", "title_en": "Both"}"#).unwrap();
        assert_eq!(s.vision_id, "v1");
        assert!(serde_json::from_str::<Story>(r#"{"title_en": "Orphan"}"#).is_err());
    }

    #[test]
    fn test_null_optional_fields_read_as_empty() {
        let v: Vision = serde_json::from_str(
            r#"{"id": "v1", "title_en": null, "title_kr": null, "summary_en": null,
                "summary_kr": null, "seeds": null, "source": null, "nff": {"a": 1}}"#,
        )
        .unwrap();
        assert_eq!(v.title(Lang::Kr), "");
        assert_eq!(v.label(), "v1");
        assert!(v.seeds.is_empty());
        assert!(v.source.is_empty());

        let seed: Seed =
            serde_json::from_str(r#"{"id": "s1", "title_en": "Ponds", "title_kr": null, "domain": null}"#)
                .unwrap();
        assert_eq!(seed.title(Lang::Kr), "Ponds");
        assert_eq!(seed.domain, None);

        let story: Story = serde_json::from_str(
            r#"{"vision_id": "v1", "title_en": null, "abstract_en": "Told.", "abstract_kr": null}"#,
        )
        .unwrap();
        assert_eq!(story.title(Lang::En), "");
        assert_eq!(story.abstract_text(Lang::Kr), "Told.");
    }

    #[test]
    fn test_localized_fallback() {
        assert_eq!(localized("hello", "안녕", Lang::Kr), "안녕");
        assert_eq!(localized("hello", "", Lang::Kr), "hello");
        assert_eq!(localized("", "", Lang::En), "");
    }

    #[test]
    fn test_lang_parse() {
        assert_eq!("EN".parse::<Lang>().unwrap(), Lang::En);
        assert_eq!("ko".parse::<Lang>().unwrap(), Lang::Kr);
        assert!("fr".parse::<Lang>().is_err());
        assert_eq!(Lang::En.other(), Lang::Kr);
    }
}
