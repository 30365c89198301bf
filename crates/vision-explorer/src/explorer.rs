use ternary_common::geometry::{Point, Triangle};
use ternary_common::locate::{self, Nearest};
use ternary_common::mcp_api::{PlottedVision, VisionCard};
use ternary_common::model::{Lang, Vision};

use crate::card::build_card;
use crate::dataset::Dataset;

/// A plot session: the fixed triangle and the visions placed on it.
#[derive(Debug, Clone)]
pub struct Explorer {
    triangle: Triangle,
    dataset: Dataset,
}

/// The vision picked for a cursor position.
#[derive(Debug)]
pub struct Selection<'a> {
    pub cursor: Point,
    pub nearest: Nearest<'a, Vision>,
}

impl Explorer {
    pub fn new(triangle: Triangle, dataset: Dataset) -> Self {
        Self { triangle, dataset }
    }

    pub fn triangle(&self) -> &Triangle {
        &self.triangle
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn plotted(&self) -> Vec<PlottedVision> {
        self.dataset
            .visions()
            .iter()
            .map(|v| PlottedVision {
                id: v.id.clone(),
                label: v.label().to_string(),
                point: self.triangle.project(&v.nff),
            })
            .collect()
    }

    /// Cursor moved to `cursor`: select the nearest vision.
    pub fn select_at(&self, cursor: Point) -> Option<Selection<'_>> {
        let nearest = locate::nearest(&self.triangle, cursor, self.dataset.visions())?;
        Some(Selection { cursor, nearest })
    }

    /// The first vision, with the cursor resting on it.
    pub fn initial_selection(&self) -> Option<Selection<'_>> {
        let first = self.dataset.visions().first()?;
        self.select_at(self.triangle.project(&first.nff))
    }

    pub fn vision(&self, id: &str) -> Option<&Vision> {
        self.dataset.vision(id)
    }

    pub fn card(&self, vision: &Vision, lang: Lang) -> VisionCard {
        build_card(vision, &self.dataset, lang)
    }
}
