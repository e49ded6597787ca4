#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative garden state management.
//!
//! The world owns every cell, the fixed-step accumulator, the random source,
//! and the published metrics. Mutation happens exclusively inside [`apply`],
//! and a discrete step is a classic synchronous automaton update: the current
//! cell array is the read-only snapshot, a staging buffer receives every
//! write, and the two are swapped atomically so external readers only ever
//! observe fully-stepped grids.

use std::{mem, time::Duration};

use garden_core::{
    CellCoord, Command, Config, ConfigError, Event, MetricsSnapshot, Occupant, Plant,
    SoilSample, SpeciesProfile,
};

mod environment;
mod lifecycle;
mod metrics;
mod reproduction;
mod rng;

use rng::GardenRng;

/// Probability that any one cell adjacent to the center joins the initial
/// cluster of seedlings.
const SEED_CLUSTER_CHANCE: f32 = 0.5;

/// One grid location's soil and occupancy state.
#[derive(Clone, Debug)]
pub(crate) struct Cell {
    pub(crate) coord: CellCoord,
    pub(crate) soil: SoilSample,
    pub(crate) occupant: Occupant,
}

/// Represents the authoritative garden world state.
#[derive(Debug)]
pub struct World {
    columns: u32,
    rows: u32,
    cells: Vec<Cell>,
    staging: Vec<Cell>,
    species: SpeciesProfile,
    step_interval: Duration,
    reduced_motion: bool,
    accumulator: Duration,
    tick_index: u64,
    step_index: u64,
    metrics: MetricsSnapshot,
    rng: GardenRng,
}

impl World {
    /// Creates a new garden world seeded with a small cluster of seedlings
    /// near the grid center.
    ///
    /// Fails fast when the configuration violates the caller contract: both
    /// grid dimensions must be positive and the step interval non-zero.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        if config.columns == 0 || config.rows == 0 {
            return Err(ConfigError::ZeroDimension {
                columns: config.columns,
                rows: config.rows,
            });
        }
        if config.step_interval.is_zero() {
            return Err(ConfigError::ZeroStepInterval);
        }

        let mut rng = GardenRng::from_seed(config.rng_seed);
        let mut cells = generate_soil(config.columns, config.rows, &mut rng);
        seed_cluster(&mut cells, config.columns, config.rows, &mut rng);

        let metrics = metrics::recompute(&cells, 0, 0.0);
        let staging = cells.clone();

        Ok(Self {
            columns: config.columns,
            rows: config.rows,
            cells,
            staging,
            species: config.species,
            step_interval: config.step_interval,
            reduced_motion: config.reduced_motion,
            accumulator: Duration::ZERO,
            tick_index: 0,
            step_index: 0,
            metrics,
            rng,
        })
    }

    fn effective_step_interval(&self) -> Duration {
        if self.reduced_motion {
            self.step_interval.saturating_mul(2)
        } else {
            self.step_interval
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });

            world.accumulator = world.accumulator.saturating_add(dt);
            let interval = world.effective_step_interval();
            if world.accumulator >= interval {
                // At most one step per tick; a stall backlog beyond a single
                // pending interval is dropped rather than drained.
                world.accumulator = world.accumulator.saturating_sub(interval).min(interval);
                step(world, out_events);
            }
        }
        Command::SetReducedMotion { enabled } => {
            world.reduced_motion = enabled;
        }
    }
}

/// Runs one discrete synchronous update of the entire grid.
fn step(world: &mut World, out_events: &mut Vec<Event>) {
    world.step_index = world.step_index.saturating_add(1);
    world.staging.clone_from(&world.cells);

    for index in 0..world.cells.len() {
        environment::advance(
            &world.cells,
            index,
            world.columns,
            world.rows,
            &mut world.staging[index],
            &mut world.rng,
        );
        lifecycle::advance(
            &world.cells,
            index,
            world.columns,
            world.rows,
            &world.species,
            &mut world.staging[index],
            out_events,
        );
    }

    let sprouts = reproduction::resolve(
        &world.cells,
        &mut world.staging,
        world.columns,
        world.rows,
        &world.species,
        &mut world.rng,
        out_events,
    );

    mem::swap(&mut world.cells, &mut world.staging);
    world.metrics = metrics::recompute(&world.cells, sprouts, world.metrics.reproduction_rate);
    out_events.push(Event::StepCompleted {
        step: world.step_index,
        metrics: world.metrics,
    });
}

fn generate_soil(columns: u32, rows: u32, rng: &mut GardenRng) -> Vec<Cell> {
    let capacity = columns as usize * rows as usize;
    let mut cells = Vec::with_capacity(capacity);
    for row in 0..rows {
        let sunlight_base = environment::row_sunlight_base(row, rows);
        for column in 0..columns {
            let soil = SoilSample {
                moisture: rng.jitter(0.45, 0.10),
                nutrients: rng.jitter(0.50, 0.10),
                sunlight: rng.jitter(sunlight_base, 0.05),
                compaction: rng.jitter(0.30, 0.05),
                temperature: rng.jitter(0.50, 0.05),
            }
            .clamped();
            cells.push(Cell {
                coord: CellCoord::new(column, row),
                soil,
                occupant: Occupant::Empty,
            });
        }
    }
    cells
}

fn seed_cluster(cells: &mut [Cell], columns: u32, rows: u32, rng: &mut GardenRng) {
    let center = CellCoord::new(columns / 2, rows / 2);
    if let Some(index) = cell_index(center, columns, rows) {
        cells[index].occupant = Occupant::Alive(Plant::seedling());
    }
    for neighbor in neighbor_cells(center, columns, rows) {
        if rng.chance(SEED_CLUSTER_CHANCE) {
            if let Some(index) = cell_index(neighbor, columns, rows) {
                cells[index].occupant = Occupant::Alive(Plant::seedling());
            }
        }
    }
}

pub(crate) fn cell_index(cell: CellCoord, columns: u32, rows: u32) -> Option<usize> {
    if cell.column() < columns && cell.row() < rows {
        Some(cell.row() as usize * columns as usize + cell.column() as usize)
    } else {
        None
    }
}

/// Enumerates the up-to-eight cells surrounding the provided coordinate, in
/// row-major order.
pub(crate) fn neighbor_cells(
    cell: CellCoord,
    columns: u32,
    rows: u32,
) -> impl Iterator<Item = CellCoord> {
    let mut candidates = [None; 8];
    let mut count = 0;

    for row_offset in -1i64..=1 {
        for column_offset in -1i64..=1 {
            if row_offset == 0 && column_offset == 0 {
                continue;
            }
            let column = i64::from(cell.column()) + column_offset;
            let row = i64::from(cell.row()) + row_offset;
            if column >= 0 && row >= 0 && column < i64::from(columns) && row < i64::from(rows) {
                candidates[count] = Some(CellCoord::new(column as u32, row as u32));
                count += 1;
            }
        }
    }

    candidates.into_iter().take(count).flatten()
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use garden_core::{CellCoord, CellSnapshot, CellView, MetricsSnapshot, Occupant, SoilSample};

    use super::{cell_index, World};

    /// Retrieves the metrics snapshot published by the most recent step.
    #[must_use]
    pub fn metrics(world: &World) -> MetricsSnapshot {
        world.metrics
    }

    /// Captures a read-only view of every cell in row-major order.
    #[must_use]
    pub fn cell_view(world: &World) -> CellView {
        let snapshots: Vec<CellSnapshot> = world
            .cells
            .iter()
            .map(|cell| CellSnapshot {
                cell: cell.coord,
                soil: cell.soil,
                occupant: cell.occupant,
            })
            .collect();
        CellView::from_snapshots(snapshots, world.columns, world.rows)
    }

    /// Provides the dimensions of the grid as `(columns, rows)`.
    #[must_use]
    pub fn dimensions(world: &World) -> (u32, u32) {
        (world.columns, world.rows)
    }

    /// Returns the occupancy state of the provided cell, if it lies inside
    /// the grid.
    #[must_use]
    pub fn occupant_at(world: &World, cell: CellCoord) -> Option<Occupant> {
        cell_index(cell, world.columns, world.rows).map(|index| world.cells[index].occupant)
    }

    /// Returns the soil state of the provided cell, if it lies inside the
    /// grid.
    #[must_use]
    pub fn soil_at(world: &World, cell: CellCoord) -> Option<SoilSample> {
        cell_index(cell, world.columns, world.rows).map(|index| world.cells[index].soil)
    }

    /// Configured duration of one discrete step.
    #[must_use]
    pub fn step_interval(world: &World) -> Duration {
        world.step_interval
    }

    /// Step duration currently in effect, accounting for reduced motion.
    #[must_use]
    pub fn effective_step_interval(world: &World) -> Duration {
        world.effective_step_interval()
    }

    /// Reports whether the reduced step cadence is active.
    #[must_use]
    pub fn reduced_motion(world: &World) -> bool {
        world.reduced_motion
    }

    /// Number of ticks processed since construction.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Number of discrete steps completed since construction.
    #[must_use]
    pub fn step_index(world: &World) -> u64 {
        world.step_index
    }
}

/// Test-only helpers for arranging specific garden states.
///
/// Scenario tests need precise soil values and hand-placed plants; these
/// helpers bypass the seeded construction path without opening up any
/// mutable access in release builds.
#[cfg(any(test, feature = "scenario_scaffolding"))]
pub mod scaffold {
    use garden_core::{CellCoord, Occupant, Plant, SoilSample};

    use super::{cell_index, metrics, World};

    /// Removes every occupant from the grid.
    pub fn clear_occupants(world: &mut World) {
        for cell in &mut world.cells {
            cell.occupant = Occupant::Empty;
        }
        refresh_metrics(world);
    }

    /// Overwrites the soil of every cell with the provided sample.
    pub fn flatten_soil(world: &mut World, soil: SoilSample) {
        let soil = soil.clamped();
        for cell in &mut world.cells {
            cell.soil = soil;
        }
        refresh_metrics(world);
    }

    /// Overwrites the soil of a single cell. Returns false when the
    /// coordinate lies outside the grid.
    pub fn set_soil(world: &mut World, cell: CellCoord, soil: SoilSample) -> bool {
        match cell_index(cell, world.columns, world.rows) {
            Some(index) => {
                world.cells[index].soil = soil.clamped();
                refresh_metrics(world);
                true
            }
            None => false,
        }
    }

    /// Places a living plant into a single cell. Returns false when the
    /// coordinate lies outside the grid.
    pub fn place_plant(world: &mut World, cell: CellCoord, plant: Plant) -> bool {
        match cell_index(cell, world.columns, world.rows) {
            Some(index) => {
                world.cells[index].occupant = Occupant::Alive(plant);
                refresh_metrics(world);
                true
            }
            None => false,
        }
    }

    fn refresh_metrics(world: &mut World) {
        world.metrics = metrics::recompute(&world.cells, 0, world.metrics.reproduction_rate);
    }
}
