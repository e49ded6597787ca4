#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for garden adapters.
//!
//! Concrete frontends implement [`RenderSink`] and [`MetricsSink`]; the
//! simulation side only ever hands them plain data. Color mapping lives here
//! so every adapter shades soil and plants identically.

use anyhow::Result as AnyResult;
use garden_core::{CellView, GrowthStage, MetricsSnapshot, Occupant, SoilSample};
use glam::Vec2;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Returns the linear blend of this color toward `other`.
    #[must_use]
    pub fn mix(self, other: Color, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: mix_channel(self.red, other.red, amount),
            green: mix_channel(self.green, other.green, amount),
            blue: mix_channel(self.blue, other.blue, amount),
            alpha: mix_channel(self.alpha, other.alpha, amount),
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

fn mix_channel(from: f32, to: f32, amount: f32) -> f32 {
    from + (to - from) * amount
}

const DRY_SOIL: Color = Color::from_rgb_u8(0xc2, 0xa6, 0x78);
const WET_SOIL: Color = Color::from_rgb_u8(0x5a, 0x3e, 0x28);
const RICH_SOIL: Color = Color::from_rgb_u8(0x4a, 0x3a, 0x1e);
const COMPACTED_SOIL: Color = Color::from_rgb_u8(0x8d, 0x8d, 0x86);

const SEEDLING_GREEN: Color = Color::from_rgb_u8(0x7b, 0xc9, 0x6f);
const JUVENILE_GREEN: Color = Color::from_rgb_u8(0x4e, 0xa6, 0x4b);
const MATURE_GREEN: Color = Color::from_rgb_u8(0x2f, 0x7a, 0x2f);
const DORMANT_OLIVE: Color = Color::from_rgb_u8(0x8a, 0x8a, 0x46);
const WITHERED_BROWN: Color = Color::from_rgb_u8(0x6b, 0x5d, 0x4c);

/// Fraction of nutrient richness blended into the soil tint.
const NUTRIENT_TINT_STRENGTH: f32 = 0.35;
/// Fraction of compaction blended toward gray.
const COMPACTION_TINT_STRENGTH: f32 = 0.4;
/// How strongly poor health pales a plant's color.
const SICKLY_PALING: f32 = 0.35;

/// Maps a cell's soil state onto its fill color.
///
/// Moist soil darkens toward loam, nutrient-rich soil picks up a warm tint,
/// compacted soil grays out.
#[must_use]
pub fn soil_color(soil: &SoilSample) -> Color {
    let compaction_span =
        (soil.compaction - garden_core::COMPACTION_BOUNDS.0)
            / (garden_core::COMPACTION_BOUNDS.1 - garden_core::COMPACTION_BOUNDS.0);

    DRY_SOIL
        .mix(WET_SOIL, soil.moisture)
        .mix(RICH_SOIL, soil.nutrients * NUTRIENT_TINT_STRENGTH)
        .mix(COMPACTED_SOIL, compaction_span * COMPACTION_TINT_STRENGTH)
}

/// Maps a lifecycle stage and health onto a plant color. Poor health pales
/// the stage base toward white.
#[must_use]
pub fn plant_color(stage: GrowthStage, health: f32) -> Color {
    let base = match stage {
        GrowthStage::Seedling => SEEDLING_GREEN,
        GrowthStage::Juvenile => JUVENILE_GREEN,
        GrowthStage::Mature => MATURE_GREEN,
        GrowthStage::Dormant => DORMANT_OLIVE,
    };
    let condition = (health - garden_core::HEALTH_BOUNDS.0)
        / (garden_core::HEALTH_BOUNDS.1 - garden_core::HEALTH_BOUNDS.0);
    base.lighten((1.0 - condition) * SICKLY_PALING)
}

/// Visual description of the plant (living or withered) inside a cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlantPresentation {
    /// Fill color for the plant marker.
    pub color: Color,
    /// Marker size as a fraction of the cell edge.
    pub footprint: f32,
}

/// Everything an adapter needs to paint one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellPresentation {
    /// Upper-left corner of the cell in world units.
    pub position: Vec2,
    /// Fill color derived from the soil state.
    pub soil: Color,
    /// Plant marker, when the cell is not bare soil.
    pub plant: Option<PlantPresentation>,
}

/// Complete per-frame scene description handed to render sinks.
#[derive(Clone, Debug, PartialEq)]
pub struct GardenScene {
    columns: u32,
    rows: u32,
    cell_edge: f32,
    cells: Vec<CellPresentation>,
    metrics: MetricsSnapshot,
}

impl GardenScene {
    /// Composes a scene from the world's cell view and published metrics.
    #[must_use]
    pub fn compose(view: &CellView, metrics: MetricsSnapshot, cell_edge: f32) -> Self {
        let (columns, rows) = view.dimensions();
        let cells = view
            .iter()
            .map(|snapshot| CellPresentation {
                position: Vec2::new(
                    snapshot.cell.column() as f32 * cell_edge,
                    snapshot.cell.row() as f32 * cell_edge,
                ),
                soil: soil_color(&snapshot.soil),
                plant: present_occupant(&snapshot.occupant),
            })
            .collect();

        Self {
            columns,
            rows,
            cell_edge,
            cells,
            metrics,
        }
    }

    /// Cells composing the scene, in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[CellPresentation] {
        &self.cells
    }

    /// Metrics snapshot captured alongside the frame.
    #[must_use]
    pub const fn metrics(&self) -> MetricsSnapshot {
        self.metrics
    }

    /// Side length of a single square cell expressed in world units.
    #[must_use]
    pub const fn cell_edge(&self) -> f32 {
        self.cell_edge
    }

    /// Provides the dimensions of the composed grid as `(columns, rows)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Total width of the scene measured in world units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_edge
    }

    /// Total height of the scene measured in world units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_edge
    }
}

fn present_occupant(occupant: &Occupant) -> Option<PlantPresentation> {
    match occupant {
        Occupant::Empty => None,
        Occupant::Alive(plant) => Some(PlantPresentation {
            color: plant_color(plant.stage, plant.health),
            footprint: (0.35 + plant.growth * 0.6).min(0.95),
        }),
        Occupant::Dead { .. } => Some(PlantPresentation {
            color: WITHERED_BROWN,
            footprint: 0.4,
        }),
    }
}

/// Sink that paints composed scenes for a concrete frontend.
pub trait RenderSink {
    /// Presents one frame. Adapters may buffer internally; the scene is
    /// complete and self-contained.
    fn present(&mut self, scene: &GardenScene) -> AnyResult<()>;
}

/// Sink that consumes the aggregate metrics snapshot once per step.
pub trait MetricsSink {
    /// Publishes the freshly recomputed metrics.
    fn publish(&mut self, metrics: &MetricsSnapshot) -> AnyResult<()>;
}
