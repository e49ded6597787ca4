//! Applies the growth and lifecycle rule to occupied cells during a step.
//!
//! The rule itself lives in `garden-system-botany`; this module feeds it
//! snapshot values, applies the resulting deltas and decisions to the staging
//! buffer, and emits the matching events. Soil inputs are deliberately the
//! pre-step values so the critical-moisture death rule can never be rescued
//! by same-step rainfall.

use garden_core::{Event, Occupant, SpeciesProfile};
use garden_system_botany::{assess, decide_stage, environmental_quality, LifeDecision};

use crate::{cell_index, neighbor_cells, Cell};

/// Advances the occupant of one cell, writing the outcome into the staging
/// buffer.
pub(crate) fn advance(
    snapshot: &[Cell],
    index: usize,
    columns: u32,
    rows: u32,
    species: &SpeciesProfile,
    next: &mut Cell,
    out_events: &mut Vec<Event>,
) {
    match snapshot[index].occupant {
        Occupant::Empty => {}
        Occupant::Dead { remaining_steps } => {
            if remaining_steps <= 1 {
                next.occupant = Occupant::Empty;
                next.soil.nutrients += species.lifecycle.decomposition_nutrients;
                next.soil.compaction -= species.lifecycle.decomposition_relief;
                next.soil.clamp_to_bounds();
                out_events.push(Event::PlantDecomposed { cell: next.coord });
            } else {
                next.occupant = Occupant::Dead {
                    remaining_steps: remaining_steps - 1,
                };
            }
        }
        Occupant::Alive(plant) => {
            let soil = &snapshot[index].soil;
            let live_neighbors = count_live_neighbors(snapshot, index, columns, rows);

            let delta = assess(species, soil, live_neighbors, &plant);
            let mut updated = plant;
            updated.growth += delta.growth;
            updated.health += delta.health;
            updated.clamp_vitals();
            updated.steps_in_stage = updated.steps_in_stage.saturating_add(1);

            let quality = environmental_quality(species, soil);
            match decide_stage(species, &updated, quality, soil.moisture) {
                LifeDecision::Die => {
                    next.occupant = Occupant::Dead {
                        remaining_steps: species.lifecycle.decay_steps,
                    };
                    out_events.push(Event::PlantDied {
                        cell: next.coord,
                        stage: plant.stage,
                    });
                }
                LifeDecision::Become(stage) => {
                    updated.stage = stage;
                    updated.steps_in_stage = 0;
                    next.occupant = Occupant::Alive(updated);
                }
                LifeDecision::Stay => {
                    next.occupant = Occupant::Alive(updated);
                }
            }
        }
    }
}

fn count_live_neighbors(snapshot: &[Cell], index: usize, columns: u32, rows: u32) -> u8 {
    let coord = snapshot[index].coord;
    let mut count = 0u8;
    for neighbor in neighbor_cells(coord, columns, rows) {
        if let Some(neighbor_index) = cell_index(neighbor, columns, rows) {
            if snapshot[neighbor_index].occupant.is_alive() {
                count = count.saturating_add(1);
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use garden_core::{
        CellCoord, Event, GrowthStage, Occupant, Plant, SoilSample, SpeciesProfile,
    };

    use super::advance;
    use crate::{cell_index, Cell};

    fn fertile_soil() -> SoilSample {
        SoilSample {
            moisture: 0.5,
            nutrients: 0.5,
            sunlight: 0.7,
            compaction: 0.2,
            temperature: 0.5,
        }
    }

    fn garden(soil: SoilSample) -> Vec<Cell> {
        let mut cells = Vec::new();
        for row in 0..3 {
            for column in 0..3 {
                cells.push(Cell {
                    coord: CellCoord::new(column, row),
                    soil,
                    occupant: Occupant::Empty,
                });
            }
        }
        cells
    }

    fn advance_center(snapshot: &[Cell]) -> (Cell, Vec<Event>) {
        let species = SpeciesProfile::default();
        let index = cell_index(CellCoord::new(1, 1), 3, 3).expect("center exists");
        let mut next = snapshot[index].clone();
        let mut events = Vec::new();
        advance(snapshot, index, 3, 3, &species, &mut next, &mut events);
        (next, events)
    }

    #[test]
    fn empty_cells_are_left_untouched() {
        let cells = garden(fertile_soil());
        let (next, events) = advance_center(&cells);
        assert!(next.occupant.is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn thriving_plants_gain_health_and_growth() {
        let mut cells = garden(fertile_soil());
        let center = cell_index(CellCoord::new(1, 1), 3, 3).expect("center exists");
        let plant = Plant {
            stage: GrowthStage::Juvenile,
            health: 0.2,
            growth: 0.3,
            steps_in_stage: 2,
        };
        cells[center].occupant = Occupant::Alive(plant);

        let (next, events) = advance_center(&cells);
        let updated = next.occupant.as_plant().expect("plant survives");
        assert!(updated.health > plant.health);
        assert!(updated.growth > plant.growth);
        assert_eq!(updated.steps_in_stage, plant.steps_in_stage + 1);
        assert!(events.is_empty());
    }

    #[test]
    fn seedlings_promote_once_their_time_is_served() {
        let species = SpeciesProfile::default();
        let mut cells = garden(fertile_soil());
        let center = cell_index(CellCoord::new(1, 1), 3, 3).expect("center exists");
        let mut plant = Plant::seedling();
        plant.steps_in_stage = species.lifecycle.seedling_steps - 1;
        cells[center].occupant = Occupant::Alive(plant);

        let (next, _) = advance_center(&cells);
        let updated = next.occupant.as_plant().expect("plant survives");
        assert_eq!(updated.stage, GrowthStage::Juvenile);
        assert_eq!(updated.steps_in_stage, 0);
    }

    #[test]
    fn starving_plants_die_and_leave_a_husk() {
        let species = SpeciesProfile::default();
        let mut soil = fertile_soil();
        soil.moisture = 0.05;
        let mut cells = garden(soil);
        let center = cell_index(CellCoord::new(1, 1), 3, 3).expect("center exists");
        cells[center].occupant = Occupant::Alive(Plant {
            stage: GrowthStage::Mature,
            health: 1.0,
            growth: 1.0,
            steps_in_stage: 0,
        });

        let (next, events) = advance_center(&cells);
        assert_eq!(
            next.occupant,
            Occupant::Dead {
                remaining_steps: species.lifecycle.decay_steps
            }
        );
        assert!(events.iter().any(|event| matches!(
            event,
            Event::PlantDied {
                stage: GrowthStage::Mature,
                ..
            }
        )));
    }

    #[test]
    fn husks_count_down_before_decomposing() {
        let mut cells = garden(fertile_soil());
        let center = cell_index(CellCoord::new(1, 1), 3, 3).expect("center exists");
        cells[center].occupant = Occupant::Dead { remaining_steps: 5 };

        let (next, events) = advance_center(&cells);
        assert_eq!(next.occupant, Occupant::Dead { remaining_steps: 4 });
        assert!(events.is_empty());
    }

    #[test]
    fn decomposition_returns_nutrients_to_the_soil() {
        let mut cells = garden(fertile_soil());
        let center = cell_index(CellCoord::new(1, 1), 3, 3).expect("center exists");
        cells[center].occupant = Occupant::Dead { remaining_steps: 1 };
        let before = cells[center].soil;

        let (next, events) = advance_center(&cells);
        assert!(next.occupant.is_empty());
        assert!(next.soil.nutrients >= before.nutrients);
        assert!(next.soil.compaction < before.compaction);
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::PlantDecomposed { .. })));
    }

    #[test]
    fn decomposition_never_decreases_nutrients_even_near_saturation() {
        let mut soil = fertile_soil();
        soil.nutrients = 0.97;
        let mut cells = garden(soil);
        let center = cell_index(CellCoord::new(1, 1), 3, 3).expect("center exists");
        cells[center].occupant = Occupant::Dead { remaining_steps: 1 };

        let (next, _) = advance_center(&cells);
        assert!(next.soil.nutrients >= 0.97);
    }
}
