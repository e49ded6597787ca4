//! Second-pass reproduction resolution.
//!
//! Candidates and their vigor are read from the pre-step snapshot, never the
//! staging buffer, so the pass is independent of scan order: a plant that
//! only matured this step waits until the next one, and a seedling sprouted
//! this step cannot itself spread. Sprouts land only in cells that are empty
//! in both the snapshot and the staging buffer.

use garden_core::{Event, Occupant, Plant, SpeciesProfile};
use garden_system_botany::{is_spread_candidate, spread_chance};

use crate::{cell_index, neighbor_cells, rng::GardenRng, Cell};

/// Resolves every reproduction candidate against the staging buffer and
/// returns the number of seedlings sprouted this step.
pub(crate) fn resolve(
    snapshot: &[Cell],
    staging: &mut [Cell],
    columns: u32,
    rows: u32,
    species: &SpeciesProfile,
    rng: &mut GardenRng,
    out_events: &mut Vec<Event>,
) -> u32 {
    let mut sprouts = 0u32;

    for index in 0..snapshot.len() {
        let Occupant::Alive(plant) = snapshot[index].occupant else {
            continue;
        };
        if !is_spread_candidate(species, &plant, &snapshot[index].soil) {
            continue;
        }

        let chance = spread_chance(species, &plant);
        let parent = snapshot[index].coord;

        for neighbor in neighbor_cells(parent, columns, rows) {
            let Some(target) = cell_index(neighbor, columns, rows) else {
                continue;
            };
            if !snapshot[target].occupant.is_empty() || !staging[target].occupant.is_empty() {
                continue;
            }
            if !rng.chance(chance) {
                continue;
            }

            staging[target].occupant = Occupant::Alive(Plant::seedling());
            staging[target].soil.moisture -= species.spread.moisture_cost;
            staging[target].soil.nutrients -= species.spread.nutrient_cost;
            staging[target].soil.clamp_to_bounds();
            sprouts += 1;
            out_events.push(Event::SeedlingSprouted {
                parent,
                cell: neighbor,
            });
        }
    }

    sprouts
}
