/// MCP server for the vision ternary plot.
///
/// Exposes six tools:
/// - `plot_layout`: Triangle vertices, plotted visions and the initial selection
/// - `project_weights`: Map a weight triple to canvas coordinates
/// - `select_point`: Select the vision nearest to a clicked point
/// - `get_vision`: Scenario card for a vision by ID
/// - `list_visions`: Every vision with its plotted position
/// - `reload_data`: Re-fetch the data documents
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tokio::sync::RwLock;
use tracing::{info, warn};

use ternary_common::geometry::{Point, Triangle};
use ternary_common::mcp_api::{
    GetVisionParams, ListVisionsParams, ListVisionsResponse, PlotLayoutResponse,
    PointResponse, ProjectWeightsParams, ReloadDataResponse, SelectPointParams,
    SelectionResponse, VertexInfo, VisionCard, VisionSummary,
};
use ternary_common::model::{Lang, Weights};
use ternary_common::source::JsonFetcher;

use crate::config::Config;
use crate::dataset::Dataset;
use crate::explorer::{Explorer, Selection};

#[derive(Clone)]
pub struct VisionExplorerServer {
    explorer: Arc<RwLock<Explorer>>,
    fetcher: JsonFetcher,
    config: Config,
    tool_router: ToolRouter<VisionExplorerServer>,
}

impl VisionExplorerServer {
    pub fn new(dataset: Dataset, fetcher: JsonFetcher, config: Config) -> Self {
        let explorer = Explorer::new(Triangle::new(config.canvas), dataset);
        Self {
            explorer: Arc::new(RwLock::new(explorer)),
            fetcher,
            config,
            tool_router: Self::tool_router(),
        }
    }

    fn lang(&self, requested: Option<&str>) -> Result<Lang, String> {
        match requested {
            Some(raw) => raw.parse(),
            None => Ok(self.config.lang),
        }
    }
}

#[tool_router]
impl VisionExplorerServer {
    #[tool(description = "Get the ternary plot layout: canvas size, the three triangle vertices (A apex, B bottom-left, C bottom-right), every vision's plotted position, and the initial selection.")]
    async fn plot_layout(&self) -> Result<Json<PlotLayoutResponse>, String> {
        let explorer = self.explorer.read().await;
        let triangle = explorer.triangle();

        let vertices = ["A", "B", "C"]
            .into_iter()
            .zip(triangle.vertices())
            .map(|(label, point)| VertexInfo {
                label: label.to_string(),
                point,
            })
            .collect();

        let initial = explorer
            .initial_selection()
            .map(|selection| to_api_selection(&explorer, selection, self.config.lang));

        Ok(Json(PlotLayoutResponse {
            canvas: triangle.canvas(),
            vertices,
            visions: explorer.plotted(),
            initial,
        }))
    }

    #[tool(description = "Project a weight triple (a, b, c) onto the ternary plot. Weights are normalized by their sum; missing weights count as 0 and all-zero weights map to the plot origin.")]
    async fn project_weights(
        &self,
        Parameters(params): Parameters<ProjectWeightsParams>,
    ) -> Result<Json<PointResponse>, String> {
        let weights = Weights::new(
            params.a.unwrap_or(0.0),
            params.b.unwrap_or(0.0),
            params.c.unwrap_or(0.0),
        );
        weights.validate()?;

        let explorer = self.explorer.read().await;
        let point = explorer.triangle().project(&weights);
        Ok(Json(PointResponse {
            point,
            inside: explorer.triangle().contains(&point),
        }))
    }

    #[tool(description = "Select the vision nearest to a clicked canvas point and return its scenario card (seeds, stories, sources) in the requested language.")]
    async fn select_point(
        &self,
        Parameters(params): Parameters<SelectPointParams>,
    ) -> Result<Json<SelectionResponse>, String> {
        let cursor = Point::new(params.x, params.y);
        if !cursor.is_finite() {
            return Err("x and y must be finite numbers".to_string());
        }
        let lang = self.lang(params.lang.as_deref())?;

        let explorer = self.explorer.read().await;
        let selection = explorer
            .select_at(cursor)
            .ok_or_else(|| "no visions loaded".to_string())?;

        Ok(Json(to_api_selection(&explorer, selection, lang)))
    }

    #[tool(description = "Get the scenario card of a vision by ID, with its seeds, stories and sources, in the requested language ('en' or 'kr').")]
    async fn get_vision(
        &self,
        Parameters(params): Parameters<GetVisionParams>,
    ) -> Result<Json<VisionCard>, String> {
        let vision_id = params.vision_id.trim().to_string();
        if vision_id.is_empty() {
            return Err("vision_id must not be empty".to_string());
        }
        let lang = self.lang(params.lang.as_deref())?;

        let explorer = self.explorer.read().await;
        let vision = explorer
            .vision(&vision_id)
            .ok_or_else(|| format!("vision not found: {vision_id}"))?;

        Ok(Json(explorer.card(vision, lang)))
    }

    #[tool(description = "List every vision with its localized title, plotted position, and seed and story counts.")]
    async fn list_visions(
        &self,
        Parameters(params): Parameters<ListVisionsParams>,
    ) -> Result<Json<ListVisionsResponse>, String> {
        let lang = self.lang(params.lang.as_deref())?;

        let explorer = self.explorer.read().await;
        let dataset = explorer.dataset();
        let visions = dataset
            .visions()
            .iter()
            .map(|v| VisionSummary {
                id: v.id.clone(),
                title: v.title(lang).to_string(),
                point: explorer.triangle().project(&v.nff),
                seed_count: v.seeds.len(),
                story_count: dataset.stories_for(&v.id).count(),
            })
            .collect();

        Ok(Json(ListVisionsResponse { visions }))
    }

    #[tool(description = "Re-fetch the visions, seeds and stories documents. The current data stays in place if the visions document fails to load.")]
    async fn reload_data(&self) -> Result<Json<ReloadDataResponse>, String> {
        info!("reload_data tool invoked");

        let dataset = Dataset::load(&self.fetcher, &self.config)
            .await
            .inspect_err(|e| warn!(error = %e, "reload failed, keeping current data"))
            .map_err(|e| format!("reload failed: {e}"))?;

        let response = ReloadDataResponse {
            visions: dataset.visions().len(),
            seeds: dataset.seed_count(),
            stories: dataset.story_count(),
        };

        let mut explorer = self.explorer.write().await;
        let triangle = *explorer.triangle();
        *explorer = Explorer::new(triangle, dataset);
        info!(visions = response.visions, "in-memory dataset replaced");

        Ok(Json(response))
    }
}

fn to_api_selection(explorer: &Explorer, selection: Selection<'_>, lang: Lang) -> SelectionResponse {
    let nearest = selection.nearest;
    SelectionResponse {
        cursor: selection.cursor,
        vision_id: nearest.item.id.clone(),
        point: nearest.point,
        distance_sq: nearest.distance_sq,
        card: explorer.card(nearest.item, lang),
    }
}

#[tool_handler]
impl ServerHandler for VisionExplorerServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: "vision-explorer".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Vision explorer MCP server. Places future visions on a ternary plot \
                 by their three nature weights. Use plot_layout to draw the plot, \
                 select_point with click coordinates to pick the nearest vision, \
                 get_vision for a card by ID, project_weights to place arbitrary \
                 weights, and reload_data to refresh the documents."
                    .to_string(),
            ),
        }
    }
}
