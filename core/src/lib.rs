#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Emergent Garden workspace.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! changed. Read-only views ([`CellView`], [`MetricsSnapshot`]) are the only
//! way state leaves the world; the simulation core never reaches outward to a
//! presentation layer.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed interval every unit-scaled soil field is clamped to.
pub const UNIT_BOUNDS: (f32, f32) = (0.0, 1.0);

/// Closed interval soil compaction is clamped to. Soil never fully loosens
/// and never becomes completely impenetrable.
pub const COMPACTION_BOUNDS: (f32, f32) = (0.05, 0.9);

/// Closed interval plant health is clamped to.
pub const HEALTH_BOUNDS: (f32, f32) = (-1.0, 1.0);

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row)
    }

    /// Computes the Chebyshev distance between two cell coordinates.
    ///
    /// A distance of one identifies the eight-cell neighborhood used by the
    /// diffusion and reproduction passes.
    #[must_use]
    pub fn chebyshev_distance(self, other: CellCoord) -> u32 {
        self.column
            .abs_diff(other.column)
            .max(self.row.abs_diff(other.row))
    }
}

/// Continuous soil state carried by every grid cell.
///
/// All fields are hard-clamped to their declared bounds after every mutation;
/// an escaped bound is a programming defect, not a runtime error.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoilSample {
    /// Water content in `UNIT_BOUNDS`.
    pub moisture: f32,
    /// Available nutrient density in `UNIT_BOUNDS`.
    pub nutrients: f32,
    /// Incident light in `UNIT_BOUNDS`.
    pub sunlight: f32,
    /// Structural density in `COMPACTION_BOUNDS`.
    pub compaction: f32,
    /// Normalized soil temperature in `UNIT_BOUNDS`.
    pub temperature: f32,
}

impl SoilSample {
    /// Clamps every field back into its declared closed interval.
    pub fn clamp_to_bounds(&mut self) {
        self.moisture = self.moisture.clamp(UNIT_BOUNDS.0, UNIT_BOUNDS.1);
        self.nutrients = self.nutrients.clamp(UNIT_BOUNDS.0, UNIT_BOUNDS.1);
        self.sunlight = self.sunlight.clamp(UNIT_BOUNDS.0, UNIT_BOUNDS.1);
        self.compaction = self
            .compaction
            .clamp(COMPACTION_BOUNDS.0, COMPACTION_BOUNDS.1);
        self.temperature = self.temperature.clamp(UNIT_BOUNDS.0, UNIT_BOUNDS.1);
    }

    /// Returns a copy with every field clamped into bounds.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.clamp_to_bounds();
        self
    }
}

/// Lifecycle stage of a living plant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrowthStage {
    /// Freshly sprouted plant establishing its roots.
    Seedling,
    /// Established plant that has survived its first stretch of steps.
    Juvenile,
    /// Fully grown plant eligible to spread into neighboring cells.
    Mature,
    /// Mature plant that suspended activity under poor conditions.
    Dormant,
}

impl GrowthStage {
    /// Fraction of full nutrient draw a plant in this stage exerts on its
    /// cell. Dormant plants nearly stop feeding.
    #[must_use]
    pub const fn nutrient_draw(self) -> f32 {
        match self {
            Self::Seedling => 0.5,
            Self::Juvenile => 0.8,
            Self::Mature => 1.0,
            Self::Dormant => 0.2,
        }
    }
}

/// Vital state of a living plant occupying a cell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    /// Current lifecycle stage.
    pub stage: GrowthStage,
    /// Accumulated condition in `HEALTH_BOUNDS`; negative values trend
    /// toward death.
    pub health: f32,
    /// Accumulated biomass in `UNIT_BOUNDS`.
    pub growth: f32,
    /// Discrete steps spent in the current stage.
    pub steps_in_stage: u32,
}

impl Plant {
    /// Creates the canonical freshly-sprouted seedling.
    #[must_use]
    pub const fn seedling() -> Self {
        Self {
            stage: GrowthStage::Seedling,
            health: 0.2,
            growth: 0.05,
            steps_in_stage: 0,
        }
    }

    /// Clamps health and growth back into their declared intervals.
    pub fn clamp_vitals(&mut self) {
        self.health = self.health.clamp(HEALTH_BOUNDS.0, HEALTH_BOUNDS.1);
        self.growth = self.growth.clamp(UNIT_BOUNDS.0, UNIT_BOUNDS.1);
    }

    /// Blended measure of condition and biomass in `UNIT_BOUNDS`, used to
    /// scale reproduction chances.
    #[must_use]
    pub fn vigor(&self) -> f32 {
        (self.health.max(0.0) + self.growth) / 2.0
    }
}

/// Occupancy state of a single grid cell.
///
/// The tagged representation is deliberately the only source of truth; there
/// is no separate state flag that could fall out of sync with plant data.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Occupant {
    /// Bare soil.
    Empty,
    /// A living plant and its vitals.
    Alive(Plant),
    /// A dead plant decaying back into the soil.
    Dead {
        /// Steps remaining until the husk decomposes into bare soil.
        remaining_steps: u32,
    },
}

impl Occupant {
    /// Reports whether the cell holds bare soil.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Reports whether the cell holds a living plant.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        matches!(self, Self::Alive(_))
    }

    /// Returns the living plant occupying the cell, if any.
    #[must_use]
    pub const fn as_plant(&self) -> Option<Plant> {
        match self {
            Self::Alive(plant) => Some(*plant),
            _ => None,
        }
    }
}

/// Immutable representation of a single cell's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    /// Grid position of the cell.
    pub cell: CellCoord,
    /// Soil state at the time of capture.
    pub soil: SoilSample,
    /// Occupancy state at the time of capture.
    pub occupant: Occupant,
}

/// Read-only snapshot describing every cell in the garden.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellView {
    snapshots: Vec<CellSnapshot>,
    columns: u32,
    rows: u32,
}

impl CellView {
    /// Creates a new cell view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<CellSnapshot>, columns: u32, rows: u32) -> Self {
        snapshots.sort_by_key(|snapshot| (snapshot.cell.row(), snapshot.cell.column()));
        Self {
            snapshots,
            columns,
            rows,
        }
    }

    /// Iterator over the captured cell snapshots in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &CellSnapshot> {
        self.snapshots.iter()
    }

    /// Returns the snapshot for the provided coordinate, if it lies inside
    /// the grid.
    #[must_use]
    pub fn get(&self, cell: CellCoord) -> Option<&CellSnapshot> {
        if cell.column() >= self.columns || cell.row() >= self.rows {
            return None;
        }
        let index = cell.row() as usize * self.columns as usize + cell.column() as usize;
        self.snapshots.get(index)
    }

    /// Provides the dimensions of the captured grid.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<CellSnapshot> {
        self.snapshots
    }
}

/// Aggregate metrics published by the world after every completed step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Mean moisture across every cell.
    pub average_moisture: f32,
    /// Mean nutrient density across every cell.
    pub average_nutrients: f32,
    /// Fraction of cells occupied by a living plant, always in `[0, 1]`.
    pub coverage: f32,
    /// Exponential moving average of sprouts per step.
    pub reproduction_rate: f32,
}

/// Closed interval an environmental value is comfortable inside.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComfortRange {
    lower: f32,
    upper: f32,
}

impl ComfortRange {
    /// Creates a new comfort range from its bounds.
    #[must_use]
    pub const fn new(lower: f32, upper: f32) -> Self {
        Self { lower, upper }
    }

    /// Lower bound of the comfortable interval.
    #[must_use]
    pub const fn lower(&self) -> f32 {
        self.lower
    }

    /// Upper bound of the comfortable interval.
    #[must_use]
    pub const fn upper(&self) -> f32 {
        self.upper
    }

    /// Reports whether the provided value lies inside the range.
    #[must_use]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Comfort-curve parameters describing how a species responds to its
/// environment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComfortTuning {
    /// Moisture interval the species thrives inside.
    pub moisture: ComfortRange,
    /// Nutrient interval the species thrives inside.
    pub nutrients: ComfortRange,
    /// Temperature the species considers ideal.
    pub temperature_ideal: f32,
    /// Deviation from the ideal temperature tolerated before growth suffers.
    pub temperature_slack: f32,
    /// Compaction level above which growth is penalized.
    pub compaction_tolerance: f32,
    /// Weight of compaction inside the structural-fitness term.
    pub structure_weight: f32,
}

impl Default for ComfortTuning {
    fn default() -> Self {
        Self {
            moisture: ComfortRange::new(0.25, 0.70),
            nutrients: ComfortRange::new(0.20, 0.65),
            temperature_ideal: 0.5,
            temperature_slack: 0.10,
            compaction_tolerance: 0.55,
            structure_weight: 0.9,
        }
    }
}

/// Growth-response parameters applied every step to living plants.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrowthTuning {
    /// Biomass gained per step before bonuses and penalties.
    pub base_rate: f32,
    /// Bonus growth per unit of moisture comfort.
    pub moisture_bonus: f32,
    /// Bonus growth per unit of nutrient comfort.
    pub nutrient_bonus: f32,
    /// Growth lost per unit of compaction beyond the species tolerance.
    pub compaction_penalty: f32,
    /// Growth lost per unit of temperature deviation beyond the slack.
    pub temperature_penalty: f32,
    /// Live-neighbor count above which crowding sets in.
    pub crowding_threshold: u8,
    /// Growth lost per neighbor beyond the crowding threshold.
    pub crowding_penalty: f32,
    /// Health gained (or lost) per unit of quality above (or below) the
    /// pivot.
    pub health_response: f32,
    /// Environmental quality at which health neither improves nor declines.
    pub quality_pivot: f32,
}

impl Default for GrowthTuning {
    fn default() -> Self {
        Self {
            base_rate: 0.02,
            moisture_bonus: 0.03,
            nutrient_bonus: 0.025,
            compaction_penalty: 0.08,
            temperature_penalty: 0.05,
            crowding_threshold: 5,
            crowding_penalty: 0.02,
            health_response: 0.25,
            quality_pivot: 0.55,
        }
    }
}

/// Stage-transition thresholds and decomposition parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LifecycleTuning {
    /// Minimum steps a seedling spends before it may become a juvenile.
    pub seedling_steps: u32,
    /// Minimum steps a juvenile spends before it may mature.
    pub juvenile_steps: u32,
    /// Environmental quality required for a juvenile to mature.
    pub promotion_quality: f32,
    /// Quality below which a mature plant goes dormant.
    pub dormancy_quality: f32,
    /// Quality at which a dormant plant resumes mature activity.
    pub awakening_quality: f32,
    /// Health below which any living plant dies.
    pub death_health: f32,
    /// Moisture below which any living plant dies outright.
    pub critical_moisture: f32,
    /// Steps a dead plant takes to decompose into bare soil.
    pub decay_steps: u32,
    /// Nutrients returned to the cell when decomposition completes.
    pub decomposition_nutrients: f32,
    /// Compaction relieved when decomposition completes.
    pub decomposition_relief: f32,
}

impl Default for LifecycleTuning {
    fn default() -> Self {
        Self {
            seedling_steps: 6,
            juvenile_steps: 14,
            promotion_quality: 0.55,
            dormancy_quality: 0.30,
            awakening_quality: 0.45,
            death_health: -0.5,
            critical_moisture: 0.08,
            decay_steps: 10,
            decomposition_nutrients: 0.15,
            decomposition_relief: 0.02,
        }
    }
}

/// Reproduction thresholds, probabilities, and soil costs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpreadTuning {
    /// Growth at which a non-mature plant may still become a candidate.
    pub minimum_growth: f32,
    /// Health required to attempt spreading at all.
    pub minimum_health: f32,
    /// Moisture the parent cell must hold to support spreading.
    pub moisture_floor: f32,
    /// Nutrients the parent cell must hold to support spreading.
    pub nutrient_floor: f32,
    /// Chance of sprouting into any one empty neighbor before the vigor
    /// bonus.
    pub base_chance: f32,
    /// Additional chance per unit of parent vigor.
    pub vigor_bonus: f32,
    /// Moisture drawn from the target cell by a new sprout.
    pub moisture_cost: f32,
    /// Nutrients drawn from the target cell by a new sprout.
    pub nutrient_cost: f32,
}

impl Default for SpreadTuning {
    fn default() -> Self {
        Self {
            minimum_growth: 0.85,
            minimum_health: 0.3,
            moisture_floor: 0.25,
            nutrient_floor: 0.20,
            base_chance: 0.04,
            vigor_bonus: 0.10,
            moisture_cost: 0.05,
            nutrient_cost: 0.05,
        }
    }
}

/// Aggregated tuning knobs describing one plant species.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeciesProfile {
    /// Comfort-curve response to the environment.
    pub comfort: ComfortTuning,
    /// Per-step growth and health response.
    pub growth: GrowthTuning,
    /// Stage transitions and decomposition.
    pub lifecycle: LifecycleTuning,
    /// Reproduction behavior.
    pub spread: SpreadTuning,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    ///
    /// The world accumulates deltas and runs at most one discrete step per
    /// tick once the fixed interval has been crossed.
    Tick {
        /// Duration of wall-clock time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Toggles the reduced-activity mode that stretches the effective step
    /// cadence without altering the physics.
    SetReducedMotion {
        /// Whether the reduced cadence should be active.
        enabled: bool,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of wall-clock time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a discrete step ran to completion.
    StepCompleted {
        /// Index of the completed step, starting at one.
        step: u64,
        /// Metrics recomputed over the freshly-stepped grid.
        metrics: MetricsSnapshot,
    },
    /// Confirms that a plant spread into an empty neighboring cell.
    SeedlingSprouted {
        /// Cell holding the parent plant.
        parent: CellCoord,
        /// Cell the new seedling occupies.
        cell: CellCoord,
    },
    /// Reports that a living plant died.
    PlantDied {
        /// Cell holding the plant that died.
        cell: CellCoord,
        /// Stage the plant held when it died.
        stage: GrowthStage,
    },
    /// Reports that a dead plant finished decomposing into bare soil.
    PlantDecomposed {
        /// Cell that returned to bare soil.
        cell: CellCoord,
    },
}

/// Construction parameters for a garden world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Number of grid columns; must be positive.
    pub columns: u32,
    /// Number of grid rows; must be positive.
    pub rows: u32,
    /// Simulated time each discrete step represents; must be non-zero.
    pub step_interval: Duration,
    /// Seed for the world's random source; identical seeds replay
    /// identically.
    pub rng_seed: u64,
    /// Whether the reduced step cadence starts active.
    pub reduced_motion: bool,
    /// Species inhabiting the garden.
    pub species: SpeciesProfile,
}

impl Config {
    /// Default seed used when callers do not supply one.
    pub const DEFAULT_RNG_SEED: u64 = 0x6a09_e667_f3bc_c908;
}

impl Default for Config {
    fn default() -> Self {
        Self {
            columns: 42,
            rows: 42,
            step_interval: Duration::from_millis(300),
            rng_seed: Self::DEFAULT_RNG_SEED,
            reduced_motion: false,
            species: SpeciesProfile::default(),
        }
    }
}

/// Reasons world construction may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ConfigError {
    /// One or both grid dimensions were zero.
    #[error("grid dimensions must be positive, got {columns}x{rows}")]
    ZeroDimension {
        /// Requested column count.
        columns: u32,
        /// Requested row count.
        rows: u32,
    },
    /// The fixed step interval was zero.
    #[error("step interval must be non-zero")]
    ZeroStepInterval,
}
