use std::time::Duration;

use ternary_common::geometry::{Canvas, DEFAULT_HEIGHT, DEFAULT_PADDING, DEFAULT_WIDTH};
use ternary_common::model::Lang;
use ternary_common::source::DataSource;

use crate::error::AppError;

const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Application configuration loaded from environment variables.
///
/// Every setting has a default matching the layout of a static site: the
/// three documents under `data/`, a 420x380 canvas with 30px padding.
#[derive(Debug, Clone)]
pub struct Config {
    /// Primary document. Failing to load it is fatal.
    pub visions: DataSource,
    /// Optional documents, empty when unavailable.
    pub seeds: DataSource,
    pub stories: DataSource,
    pub lang: Lang,
    pub canvas: Canvas,
    pub fetch_timeout: Duration,
}

impl Config {
    /// Optional:
    /// - `VISIONS_SOURCE` (default: "data/visions.json")
    /// - `SEEDS_SOURCE` (default: "data/seeds.json")
    /// - `STORIES_SOURCE` (default: "data/stories.json")
    /// - `EXPLORER_LANG` (default: "en")
    /// - `PLOT_WIDTH`, `PLOT_HEIGHT`, `PLOT_PADDING` (default: 420, 380, 30)
    /// - `FETCH_TIMEOUT_SECS` (default: 10)
    ///
    /// Path or URL values are accepted for every source.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let source = |key: &str, default: &str| {
            DataSource::parse(&lookup(key).unwrap_or_else(|| default.to_string()))
        };

        let lang = match lookup("EXPLORER_LANG") {
            Some(raw) => raw
                .parse::<Lang>()
                .map_err(|e| AppError::Config(format!("EXPLORER_LANG: {e}")))?,
            None => Lang::default(),
        };

        let canvas = Canvas {
            width: parse_number(&lookup, "PLOT_WIDTH", DEFAULT_WIDTH)?,
            height: parse_number(&lookup, "PLOT_HEIGHT", DEFAULT_HEIGHT)?,
            padding: parse_number(&lookup, "PLOT_PADDING", DEFAULT_PADDING)?,
        };
        let finite = [canvas.width, canvas.height, canvas.padding]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(AppError::Config(format!(
                "canvas {}x{} with padding {} must use finite numbers",
                canvas.width, canvas.height, canvas.padding
            )));
        }
        if canvas.side() <= 0.0 || canvas.padding < 0.0 {
            return Err(AppError::Config(format!(
                "canvas {}x{} with padding {} leaves no room for the plot",
                canvas.width, canvas.height, canvas.padding
            )));
        }

        let fetch_timeout = Duration::from_secs(parse_number(
            &lookup,
            "FETCH_TIMEOUT_SECS",
            DEFAULT_FETCH_TIMEOUT_SECS,
        )?);

        Ok(Self {
            visions: source("VISIONS_SOURCE", "data/visions.json"),
            seeds: source("SEEDS_SOURCE", "data/seeds.json"),
            stories: source("STORIES_SOURCE", "data/stories.json"),
            lang,
            canvas,
            fetch_timeout,
        })
    }
}

fn parse_number<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::Config(format!("{key} must be a number, got '{raw}'"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.visions.to_string(), "data/visions.json");
        assert_eq!(config.seeds.to_string(), "data/seeds.json");
        assert_eq!(config.stories.to_string(), "data/stories.json");
        assert_eq!(config.lang, Lang::En);
        assert_eq!(config.canvas, Canvas::default());
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("VISIONS_SOURCE", "https://example.org/visions.json"),
            ("EXPLORER_LANG", "kr"),
            ("PLOT_WIDTH", "600"),
            ("FETCH_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        assert!(matches!(config.visions, DataSource::Url(_)));
        assert_eq!(config.lang, Lang::Kr);
        assert_eq!(config.canvas.width, 600.0);
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(config_from(&[("EXPLORER_LANG", "de")]).is_err());
        assert!(config_from(&[("PLOT_HEIGHT", "tall")]).is_err());
        assert!(config_from(&[("PLOT_PADDING", "200")]).is_err());
    }

    #[test]
    fn test_rejects_non_finite_canvas() {
        for (key, raw) in [
            ("PLOT_WIDTH", "NaN"),
            ("PLOT_HEIGHT", "inf"),
            ("PLOT_PADDING", "-inf"),
        ] {
            let err = config_from(&[(key, raw)]).unwrap_err();
            assert!(err.to_string().contains("finite"), "{key}={raw}: {err}");
        }
    }
}
