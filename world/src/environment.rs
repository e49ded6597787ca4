//! Per-cell environmental field evolution.
//!
//! Every soil field advances once per step, before plant effects, reading
//! neighbor values exclusively from the pre-step snapshot. Each cell consumes
//! exactly three random draws per step (rainfall, temperature noise, sunlight
//! noise) so the stream stays aligned across runs.

use garden_core::{Occupant, SoilSample};

use crate::{cell_index, neighbor_cells, rng::GardenRng, Cell};

/// Moisture lost per step, scaled by sunlight.
const EVAPORATION_RATE: f32 = 0.012;
/// Probability of a rainfall event on any one cell per step.
const RAINFALL_CHANCE: f32 = 0.035;
/// Moisture added by a rainfall event.
const RAINFALL_AMOUNT: f32 = 0.10;
/// Blend rate toward the neighbor moisture mean.
const MOISTURE_BLEND: f32 = 0.06;
/// Nutrients regenerated per step in unoccupied cells.
const NUTRIENT_REGEN: f32 = 0.004;
/// Nutrient draw rate exerted by a living plant.
const NUTRIENT_DRAW_RATE: f32 = 0.006;
/// Blend rate toward the neighbor nutrient mean.
const NUTRIENT_BLEND: f32 = 0.03;
/// Compaction level soil drifts toward when left alone.
const COMPACTION_BASELINE: f32 = 0.35;
/// Fraction of the distance to the baseline covered per step.
const COMPACTION_DRIFT: f32 = 0.01;
/// Moisture below which soil counts as dry and starts hardening.
const DRYNESS_FLOOR: f32 = 0.15;
/// Compaction gained per step while dry.
const DRYNESS_HARDENING: f32 = 0.006;
/// Compaction lost per step while not dry.
const WET_LOOSENING: f32 = 0.004;
/// Temperature the random walk reverts toward.
const TEMPERATURE_SETPOINT: f32 = 0.5;
/// Fraction of the temperature deviation removed per step.
const TEMPERATURE_REVERSION: f32 = 0.05;
/// Half-width of the per-step temperature noise.
const TEMPERATURE_NOISE: f32 = 0.02;
/// Fraction of the sunlight deviation from the row base removed per step.
const SUNLIGHT_REVERSION: f32 = 0.10;
/// Half-width of the per-step sunlight noise.
const SUNLIGHT_NOISE: f32 = 0.03;
/// Base sunlight at the northern edge of the grid.
const NORTH_SUNLIGHT_BASE: f32 = 0.85;
/// Sunlight lost from the northern to the southern edge.
const SUNLIGHT_SPAN: f32 = 0.25;

/// Base sunlight for a row; northern rows receive more light, falling off
/// linearly toward the southern edge.
pub(crate) fn row_sunlight_base(row: u32, rows: u32) -> f32 {
    if rows <= 1 {
        return NORTH_SUNLIGHT_BASE;
    }
    let fraction = row as f32 / (rows - 1) as f32;
    NORTH_SUNLIGHT_BASE - SUNLIGHT_SPAN * fraction
}

/// Advances every soil field of one cell, writing the result into the
/// staging buffer and clamping each field back into its declared bounds.
pub(crate) fn advance(
    snapshot: &[Cell],
    index: usize,
    columns: u32,
    rows: u32,
    next: &mut Cell,
    rng: &mut GardenRng,
) {
    let previous = &snapshot[index];
    let (moisture_mean, nutrient_mean) = neighbor_means(snapshot, index, columns, rows);

    let mut moisture = previous.soil.moisture;
    moisture -= EVAPORATION_RATE * (0.5 + previous.soil.sunlight);
    if rng.chance(RAINFALL_CHANCE) {
        moisture += RAINFALL_AMOUNT;
    }
    moisture += (moisture_mean - previous.soil.moisture) * MOISTURE_BLEND;

    let mut nutrients = previous.soil.nutrients;
    match previous.occupant {
        Occupant::Empty => nutrients += NUTRIENT_REGEN,
        Occupant::Alive(plant) => {
            nutrients -= NUTRIENT_DRAW_RATE * (0.5 + plant.growth) * plant.stage.nutrient_draw();
        }
        Occupant::Dead { .. } => {}
    }
    nutrients += (nutrient_mean - previous.soil.nutrients) * NUTRIENT_BLEND;

    let mut compaction = previous.soil.compaction;
    compaction += (COMPACTION_BASELINE - compaction) * COMPACTION_DRIFT;
    if previous.soil.moisture < DRYNESS_FLOOR {
        compaction += DRYNESS_HARDENING;
    } else {
        compaction -= WET_LOOSENING;
    }

    let mut temperature = previous.soil.temperature;
    temperature += (TEMPERATURE_SETPOINT - temperature) * TEMPERATURE_REVERSION;
    temperature += rng.amplitude(TEMPERATURE_NOISE);

    let sunlight_base = row_sunlight_base(previous.coord.row(), rows);
    let mut sunlight = previous.soil.sunlight;
    sunlight += (sunlight_base - sunlight) * SUNLIGHT_REVERSION;
    sunlight += rng.amplitude(SUNLIGHT_NOISE);

    next.soil = SoilSample {
        moisture,
        nutrients,
        sunlight,
        compaction,
        temperature,
    }
    .clamped();
}

fn neighbor_means(snapshot: &[Cell], index: usize, columns: u32, rows: u32) -> (f32, f32) {
    let coord = snapshot[index].coord;
    let mut moisture_sum = 0.0;
    let mut nutrient_sum = 0.0;
    let mut count = 0u32;

    for neighbor in neighbor_cells(coord, columns, rows) {
        if let Some(neighbor_index) = cell_index(neighbor, columns, rows) {
            moisture_sum += snapshot[neighbor_index].soil.moisture;
            nutrient_sum += snapshot[neighbor_index].soil.nutrients;
            count += 1;
        }
    }

    if count == 0 {
        // Degenerate single-cell grid; diffusion becomes a no-op.
        return (snapshot[index].soil.moisture, snapshot[index].soil.nutrients);
    }
    (moisture_sum / count as f32, nutrient_sum / count as f32)
}

#[cfg(test)]
mod tests {
    use garden_core::{
        CellCoord, GrowthStage, Occupant, Plant, SoilSample, COMPACTION_BOUNDS, UNIT_BOUNDS,
    };

    use super::{advance, row_sunlight_base, NORTH_SUNLIGHT_BASE};
    use crate::{cell_index, rng::GardenRng, Cell};

    fn uniform_garden(columns: u32, rows: u32, soil: SoilSample) -> Vec<Cell> {
        let mut cells = Vec::new();
        for row in 0..rows {
            for column in 0..columns {
                cells.push(Cell {
                    coord: CellCoord::new(column, row),
                    soil,
                    occupant: Occupant::Empty,
                });
            }
        }
        cells
    }

    fn neutral_soil() -> SoilSample {
        SoilSample {
            moisture: 0.5,
            nutrients: 0.5,
            sunlight: 0.5,
            compaction: 0.3,
            temperature: 0.5,
        }
    }

    fn advance_center(snapshot: &[Cell], rng: &mut GardenRng) -> Cell {
        let index = cell_index(CellCoord::new(1, 1), 3, 3).expect("center exists");
        let mut next = snapshot[index].clone();
        advance(snapshot, index, 3, 3, &mut next, rng);
        next
    }

    #[test]
    fn diffusion_pulls_dry_cells_toward_wet_neighbors() {
        let mut cells = uniform_garden(3, 3, neutral_soil());
        for cell in &mut cells {
            cell.soil.moisture = 0.8;
        }
        let center = cell_index(CellCoord::new(1, 1), 3, 3).expect("center exists");
        cells[center].soil.moisture = 0.0;

        let mut rng = GardenRng::from_seed(5);
        let next = advance_center(&cells, &mut rng);
        assert!(next.soil.moisture > 0.0);
    }

    #[test]
    fn empty_cells_regenerate_nutrients() {
        let cells = uniform_garden(3, 3, neutral_soil());
        let mut rng = GardenRng::from_seed(5);
        let next = advance_center(&cells, &mut rng);
        assert!(next.soil.nutrients > 0.5);
    }

    #[test]
    fn living_plants_draw_nutrients_down() {
        let mut cells = uniform_garden(3, 3, neutral_soil());
        let center = cell_index(CellCoord::new(1, 1), 3, 3).expect("center exists");
        cells[center].occupant = Occupant::Alive(Plant {
            stage: GrowthStage::Mature,
            health: 0.8,
            growth: 0.9,
            steps_in_stage: 4,
        });

        let mut rng = GardenRng::from_seed(5);
        let next = advance_center(&cells, &mut rng);
        assert!(next.soil.nutrients < 0.5);
    }

    #[test]
    fn dry_soil_hardens_while_moist_soil_loosens() {
        let mut dry = neutral_soil();
        dry.moisture = 0.05;
        let dry_cells = uniform_garden(3, 3, dry);
        let mut rng = GardenRng::from_seed(5);
        let hardened = advance_center(&dry_cells, &mut rng);
        assert!(hardened.soil.compaction > dry.compaction);

        let mut moist = neutral_soil();
        moist.compaction = 0.5;
        let moist_cells = uniform_garden(3, 3, moist);
        let mut rng = GardenRng::from_seed(5);
        let loosened = advance_center(&moist_cells, &mut rng);
        assert!(loosened.soil.compaction < moist.compaction);
    }

    #[test]
    fn temperature_reverts_toward_the_setpoint() {
        let mut hot = neutral_soil();
        hot.temperature = 1.0;
        let cells = uniform_garden(3, 3, hot);
        let mut rng = GardenRng::from_seed(5);
        let next = advance_center(&cells, &mut rng);
        assert!(next.soil.temperature < 1.0);
    }

    #[test]
    fn northern_rows_receive_more_light() {
        assert!(row_sunlight_base(0, 10) > row_sunlight_base(9, 10));
        assert_eq!(row_sunlight_base(0, 1), NORTH_SUNLIGHT_BASE);
    }

    #[test]
    fn extreme_inputs_stay_clamped() {
        let extreme = SoilSample {
            moisture: 1.0,
            nutrients: 1.0,
            sunlight: 1.0,
            compaction: 0.9,
            temperature: 0.0,
        };
        let cells = uniform_garden(3, 3, extreme);
        let mut rng = GardenRng::from_seed(5);
        let next = advance_center(&cells, &mut rng);

        assert!(next.soil.moisture >= UNIT_BOUNDS.0 && next.soil.moisture <= UNIT_BOUNDS.1);
        assert!(next.soil.nutrients >= UNIT_BOUNDS.0 && next.soil.nutrients <= UNIT_BOUNDS.1);
        assert!(next.soil.sunlight >= UNIT_BOUNDS.0 && next.soil.sunlight <= UNIT_BOUNDS.1);
        assert!(
            next.soil.compaction >= COMPACTION_BOUNDS.0
                && next.soil.compaction <= COMPACTION_BOUNDS.1
        );
        assert!(next.soil.temperature >= UNIT_BOUNDS.0 && next.soil.temperature <= UNIT_BOUNDS.1);
    }
}
