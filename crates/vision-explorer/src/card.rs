use ternary_common::mcp_api::{SeedEntry, StoryEntry, VisionCard};
use ternary_common::model::{Lang, Vision};

use crate::dataset::Dataset;

const UNTITLED: &str = "(no title)";

/// Assembles the scenario card of `vision` in `lang`.
pub fn build_card(vision: &Vision, dataset: &Dataset, lang: Lang) -> VisionCard {
    let title = match vision.title(lang) {
        "" => UNTITLED.to_string(),
        t => t.to_string(),
    };
    let subtitle = match lang.other() {
        Lang::En => vision.title_en.clone(),
        Lang::Kr => vision.title_kr.clone(),
    };

    let seeds = vision
        .seeds
        .iter()
        .map(|id| match dataset.seed(id) {
            Some(seed) => SeedEntry {
                id: id.clone(),
                title: match seed.title(lang) {
                    "" => id.clone(),
                    t => t.to_string(),
                },
                domain: seed.domain.clone(),
                resolved: true,
            },
            None => SeedEntry {
                id: id.clone(),
                title: id.clone(),
                domain: None,
                resolved: false,
            },
        })
        .collect();

    let stories = dataset
        .stories_for(&vision.id)
        .map(|story| StoryEntry {
            title: story.title(lang).to_string(),
            abstract_text: story.abstract_text(lang).to_string(),
        })
        .collect();

    VisionCard {
        id: vision.id.clone(),
        lang,
        title,
        subtitle,
        summary: vision.summary(lang).to_string(),
        seeds,
        stories,
        sources: vision.source.clone(),
        source_line: vision.source.join(", "),
    }
}
