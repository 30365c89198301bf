use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geometry::{Canvas, Point};
use crate::model::Lang;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ProjectWeightsParams {
    /// Weight of component A (apex). Missing means 0.
    pub a: Option<f64>,
    /// Weight of component B (bottom-left). Missing means 0.
    pub b: Option<f64>,
    /// Weight of component C (bottom-right). Missing means 0.
    pub c: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SelectPointParams {
    /// Canvas x coordinate of the click.
    pub x: f64,
    /// Canvas y coordinate of the click.
    pub y: f64,
    /// Card language: "en" or "kr" (default: server setting).
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetVisionParams {
    /// Vision identifier, matched case-insensitively.
    pub vision_id: String,
    /// Card language: "en" or "kr" (default: server setting).
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListVisionsParams {
    /// Title language: "en" or "kr" (default: server setting).
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PointResponse {
    pub point: Point,
    /// Whether the point lies inside the plot triangle.
    pub inside: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VertexInfo {
    /// "A", "B" or "C".
    pub label: String,
    pub point: Point,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PlottedVision {
    pub id: String,
    pub label: String,
    pub point: Point,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SeedEntry {
    pub id: String,
    pub title: String,
    pub domain: Option<String>,
    /// False when the vision names a seed id missing from the seeds document.
    pub resolved: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StoryEntry {
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VisionCard {
    pub id: String,
    pub lang: Lang,
    pub title: String,
    /// Title in the other language, empty when absent.
    pub subtitle: String,
    pub summary: String,
    pub seeds: Vec<SeedEntry>,
    pub stories: Vec<StoryEntry>,
    pub sources: Vec<String>,
    /// Sources joined for display.
    pub source_line: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SelectionResponse {
    /// Where the cursor was placed.
    pub cursor: Point,
    pub vision_id: String,
    /// Projected position of the selected vision.
    pub point: Point,
    pub distance_sq: f64,
    pub card: VisionCard,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PlotLayoutResponse {
    pub canvas: Canvas,
    pub vertices: Vec<VertexInfo>,
    pub visions: Vec<PlottedVision>,
    /// Selection shown before the first click (the first vision).
    pub initial: Option<SelectionResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VisionSummary {
    pub id: String,
    pub title: String,
    pub point: Point,
    pub seed_count: usize,
    pub story_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ListVisionsResponse {
    pub visions: Vec<VisionSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReloadDataResponse {
    pub visions: usize,
    pub seeds: usize,
    pub stories: usize,
}
