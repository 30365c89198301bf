use std::collections::{HashMap, HashSet};

use tracing::{info, warn};

use ternary_common::error::CommonError;
use ternary_common::model::{Seed, Story, Vision};
use ternary_common::source::JsonFetcher;

use crate::config::Config;
use crate::error::AppError;

/// The three documents of a plot session, validated and indexed.
#[derive(Debug, Clone)]
pub struct Dataset {
    visions: Vec<Vision>,
    seeds: HashMap<String, Seed>,
    stories: Vec<Story>,
}

impl Dataset {
    /// Builds a dataset from already-decoded records.
    ///
    /// Fails on the first vision whose weights break the canonical schema.
    /// Duplicate ids are kept; lookups return the first occurrence.
    pub fn new(visions: Vec<Vision>, seeds: Vec<Seed>, stories: Vec<Story>) -> Result<Self, AppError> {
        let mut seen = HashSet::new();
        for vision in &visions {
            vision.validate()?;
            if !seen.insert(vision.id.as_str()) {
                warn!(id = %vision.id, "duplicate vision id");
            }
        }

        let mut seed_map = HashMap::with_capacity(seeds.len());
        for seed in seeds {
            if seed_map.contains_key(&seed.id) {
                warn!(id = %seed.id, "duplicate seed id, keeping first");
                continue;
            }
            seed_map.insert(seed.id.clone(), seed);
        }

        Ok(Self {
            visions,
            seeds: seed_map,
            stories,
        })
    }

    /// Loads all three documents.
    ///
    /// The visions document is required and must be a non-empty array.
    /// Seeds and stories degrade to empty collections.
    pub async fn load(fetcher: &JsonFetcher, config: &Config) -> Result<Self, AppError> {
        let document: serde_json::Value = fetcher.fetch(&config.visions).await?;
        let records = match document {
            serde_json::Value::Array(records) if !records.is_empty() => records,
            _ => return Err(AppError::NoVisions(config.visions.to_string())),
        };
        let visions: Vec<Vision> = serde_json::from_value(serde_json::Value::Array(records))
            .map_err(|error| CommonError::Json {
                location: config.visions.to_string(),
                error,
            })?;

        let seeds: Vec<Seed> = fetcher.fetch_or_default(&config.seeds).await;
        let stories: Vec<Story> = fetcher.fetch_or_default(&config.stories).await;

        let dataset = Self::new(visions, seeds, stories)?;
        info!(
            visions = dataset.visions.len(),
            seeds = dataset.seeds.len(),
            stories = dataset.stories.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    pub fn visions(&self) -> &[Vision] {
        &self.visions
    }

    pub fn seed(&self, id: &str) -> Option<&Seed> {
        self.seeds.get(id)
    }

    pub fn seed_count(&self) -> usize {
        self.seeds.len()
    }

    pub fn story_count(&self) -> usize {
        self.stories.len()
    }

    /// Stories grouped under `vision_id`, in document order.
    pub fn stories_for<'a>(&'a self, vision_id: &'a str) -> impl Iterator<Item = &'a Story> + 'a {
        self.stories.iter().filter(move |s| s.vision_id == vision_id)
    }

    pub fn vision(&self, id: &str) -> Option<&Vision> {
        self.visions.iter().find(|v| v.id.eq_ignore_ascii_case(id))
    }
}
