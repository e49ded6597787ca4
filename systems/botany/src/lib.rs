#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure growth and lifecycle rule for the garden simulation.
//!
//! Every function in this crate is a deterministic mapping from a cell's
//! local environment and a plant's vitals to deltas and decisions. The world
//! owns all state and all randomness; this crate owns none of either, which
//! is what keeps the rule independently testable.

use garden_core::{ComfortRange, GrowthStage, Plant, SoilSample, SpeciesProfile};

/// Rate at which comfort decays per unit of distance outside the ideal
/// range. A value of 4.0 means comfort reaches zero a quarter-unit beyond
/// either bound.
const COMFORT_FALLOFF: f32 = 4.0;

/// Weight of moisture comfort inside the environmental quality score.
const QUALITY_WEIGHT_MOISTURE: f32 = 0.35;
/// Weight of nutrient comfort inside the environmental quality score.
const QUALITY_WEIGHT_NUTRIENTS: f32 = 0.25;
/// Weight of raw sunlight inside the environmental quality score.
const QUALITY_WEIGHT_SUNLIGHT: f32 = 0.20;
/// Weight of structural fitness inside the environmental quality score.
const QUALITY_WEIGHT_STRUCTURE: f32 = 0.20;

/// Species response to a single environmental value.
///
/// Returns the baseline comfort of `1.0` inside the range and decays
/// linearly toward zero outside it.
#[must_use]
pub fn comfort(value: f32, range: ComfortRange) -> f32 {
    let distance = if value < range.lower() {
        range.lower() - value
    } else if value > range.upper() {
        value - range.upper()
    } else {
        return 1.0;
    };
    (1.0 - distance * COMFORT_FALLOFF).max(0.0)
}

/// Weighted environmental quality score for a cell, in `[0, 1]`.
///
/// Combines moisture fit, nutrient fit, sunlight, and structural fitness
/// (the inverse of weighted compaction).
#[must_use]
pub fn environmental_quality(profile: &SpeciesProfile, soil: &SoilSample) -> f32 {
    let moisture_fit = comfort(soil.moisture, profile.comfort.moisture);
    let nutrient_fit = comfort(soil.nutrients, profile.comfort.nutrients);
    let structure_fit = (1.0 - soil.compaction * profile.comfort.structure_weight).clamp(0.0, 1.0);

    let score = QUALITY_WEIGHT_MOISTURE * moisture_fit
        + QUALITY_WEIGHT_NUTRIENTS * nutrient_fit
        + QUALITY_WEIGHT_SUNLIGHT * soil.sunlight
        + QUALITY_WEIGHT_STRUCTURE * structure_fit;
    score.clamp(0.0, 1.0)
}

/// Per-step changes to a plant's vitals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VitalsDelta {
    /// Change applied to the plant's growth accumulator.
    pub growth: f32,
    /// Change applied to the plant's health accumulator.
    pub health: f32,
}

/// Computes the growth and health deltas for one living plant this step.
///
/// Growth combines the base rate with comfort bonuses, then subtracts the
/// compaction, temperature-deviation, and crowding penalties. Health tracks
/// how far the environmental quality sits from the species pivot. Dormant
/// plants suspend growth entirely but their health keeps responding, which
/// is what lets them either recover or finally die.
#[must_use]
pub fn assess(
    profile: &SpeciesProfile,
    soil: &SoilSample,
    live_neighbors: u8,
    plant: &Plant,
) -> VitalsDelta {
    let tuning = &profile.growth;
    let moisture_fit = comfort(soil.moisture, profile.comfort.moisture);
    let nutrient_fit = comfort(soil.nutrients, profile.comfort.nutrients);

    let compaction_excess = (soil.compaction - profile.comfort.compaction_tolerance).max(0.0);
    let temperature_deviation = ((soil.temperature - profile.comfort.temperature_ideal).abs()
        - profile.comfort.temperature_slack)
        .max(0.0);
    let crowding = f32::from(live_neighbors.saturating_sub(tuning.crowding_threshold));

    let growth = if plant.stage == GrowthStage::Dormant {
        0.0
    } else {
        tuning.base_rate + tuning.moisture_bonus * moisture_fit
            + tuning.nutrient_bonus * nutrient_fit
            - tuning.compaction_penalty * compaction_excess
            - tuning.temperature_penalty * temperature_deviation
            - tuning.crowding_penalty * crowding
    };

    let quality = environmental_quality(profile, soil);
    let health = tuning.health_response * (quality - tuning.quality_pivot);

    VitalsDelta { growth, health }
}

/// Outcome of the per-step stage transition rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifeDecision {
    /// The plant keeps its current stage.
    Stay,
    /// The plant transitions to the provided stage.
    Become(GrowthStage),
    /// The plant dies this step.
    Die,
}

/// Decides the stage transition for one living plant this step.
///
/// Death checks run first so no amount of elapsed time promotes a plant the
/// environment has already killed. `moisture` is the pre-step value of the
/// plant's cell; evaluating it before any same-step rainfall keeps the
/// critical-floor rule absolute.
#[must_use]
pub fn decide_stage(
    profile: &SpeciesProfile,
    plant: &Plant,
    quality: f32,
    moisture: f32,
) -> LifeDecision {
    let tuning = &profile.lifecycle;

    if plant.health < tuning.death_health || moisture < tuning.critical_moisture {
        return LifeDecision::Die;
    }

    match plant.stage {
        GrowthStage::Seedling => {
            if plant.steps_in_stage >= tuning.seedling_steps && plant.health > 0.0 {
                LifeDecision::Become(GrowthStage::Juvenile)
            } else {
                LifeDecision::Stay
            }
        }
        GrowthStage::Juvenile => {
            if plant.steps_in_stage >= tuning.juvenile_steps && quality >= tuning.promotion_quality
            {
                LifeDecision::Become(GrowthStage::Mature)
            } else {
                LifeDecision::Stay
            }
        }
        GrowthStage::Mature => {
            if quality < tuning.dormancy_quality {
                LifeDecision::Become(GrowthStage::Dormant)
            } else {
                LifeDecision::Stay
            }
        }
        GrowthStage::Dormant => {
            if quality >= tuning.awakening_quality {
                LifeDecision::Become(GrowthStage::Mature)
            } else {
                LifeDecision::Stay
            }
        }
    }
}

/// Reports whether a plant is eligible to spread into empty neighbors this
/// step.
///
/// Maturity (or near-full growth), sufficient health, and a parent cell
/// holding enough moisture and nutrients are all required.
#[must_use]
pub fn is_spread_candidate(profile: &SpeciesProfile, plant: &Plant, soil: &SoilSample) -> bool {
    let tuning = &profile.spread;
    let grown_enough =
        plant.stage == GrowthStage::Mature || plant.growth >= tuning.minimum_growth;

    grown_enough
        && plant.health >= tuning.minimum_health
        && soil.moisture >= tuning.moisture_floor
        && soil.nutrients >= tuning.nutrient_floor
}

/// Probability of sprouting into any one empty neighbor, in `[0, 1]`.
#[must_use]
pub fn spread_chance(profile: &SpeciesProfile, plant: &Plant) -> f32 {
    let tuning = &profile.spread;
    (tuning.base_chance + tuning.vigor_bonus * plant.vigor()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::{
        assess, comfort, decide_stage, environmental_quality, is_spread_candidate, spread_chance,
        LifeDecision,
    };
    use garden_core::{ComfortRange, GrowthStage, Plant, SoilSample, SpeciesProfile};

    fn fertile_soil() -> SoilSample {
        SoilSample {
            moisture: 0.5,
            nutrients: 0.5,
            sunlight: 0.7,
            compaction: 0.2,
            temperature: 0.5,
        }
    }

    fn mature_plant() -> Plant {
        Plant {
            stage: GrowthStage::Mature,
            health: 0.9,
            growth: 0.9,
            steps_in_stage: 0,
        }
    }

    #[test]
    fn comfort_is_flat_inside_the_range() {
        let range = ComfortRange::new(0.3, 0.6);
        assert_eq!(comfort(0.3, range), 1.0);
        assert_eq!(comfort(0.45, range), 1.0);
        assert_eq!(comfort(0.6, range), 1.0);
    }

    #[test]
    fn comfort_decays_linearly_outside_the_range() {
        let range = ComfortRange::new(0.3, 0.6);
        let below = comfort(0.2, range);
        let further_below = comfort(0.1, range);
        assert!(below < 1.0);
        assert!(further_below < below);
        assert_eq!(comfort(0.0, range), 0.0);
    }

    #[test]
    fn quality_stays_in_unit_interval() {
        let profile = SpeciesProfile::default();
        let harsh = SoilSample {
            moisture: 0.0,
            nutrients: 0.0,
            sunlight: 0.0,
            compaction: 0.9,
            temperature: 1.0,
        };
        let lush = SoilSample {
            moisture: 0.5,
            nutrients: 0.5,
            sunlight: 1.0,
            compaction: 0.05,
            temperature: 0.5,
        };
        assert!(environmental_quality(&profile, &harsh) >= 0.0);
        assert!(environmental_quality(&profile, &lush) <= 1.0);
        assert!(
            environmental_quality(&profile, &lush) > environmental_quality(&profile, &harsh)
        );
    }

    #[test]
    fn crowding_reduces_growth() {
        let profile = SpeciesProfile::default();
        let soil = fertile_soil();
        let plant = mature_plant();

        let roomy = assess(&profile, &soil, 2, &plant);
        let crowded = assess(&profile, &soil, 8, &plant);
        assert!(crowded.growth < roomy.growth);
    }

    #[test]
    fn dormant_plants_do_not_grow() {
        let profile = SpeciesProfile::default();
        let mut plant = mature_plant();
        plant.stage = GrowthStage::Dormant;

        let delta = assess(&profile, &soil_with_moisture(0.5), 0, &plant);
        assert_eq!(delta.growth, 0.0);
    }

    fn soil_with_moisture(moisture: f32) -> SoilSample {
        SoilSample {
            moisture,
            ..fertile_soil()
        }
    }

    #[test]
    fn critical_moisture_kills_regardless_of_other_fields() {
        let profile = SpeciesProfile::default();
        let plant = mature_plant();
        assert_eq!(
            decide_stage(&profile, &plant, 1.0, 0.05),
            LifeDecision::Die
        );
    }

    #[test]
    fn collapsed_health_kills() {
        let profile = SpeciesProfile::default();
        let mut plant = mature_plant();
        plant.health = -0.6;
        assert_eq!(
            decide_stage(&profile, &plant, 0.9, 0.5),
            LifeDecision::Die
        );
    }

    #[test]
    fn seedlings_promote_only_after_minimum_steps() {
        let profile = SpeciesProfile::default();
        let mut plant = Plant::seedling();

        plant.steps_in_stage = profile.lifecycle.seedling_steps - 1;
        assert_eq!(decide_stage(&profile, &plant, 0.8, 0.5), LifeDecision::Stay);

        plant.steps_in_stage = profile.lifecycle.seedling_steps;
        assert_eq!(
            decide_stage(&profile, &plant, 0.8, 0.5),
            LifeDecision::Become(GrowthStage::Juvenile)
        );
    }

    #[test]
    fn juveniles_need_quality_to_mature() {
        let profile = SpeciesProfile::default();
        let plant = Plant {
            stage: GrowthStage::Juvenile,
            health: 0.5,
            growth: 0.5,
            steps_in_stage: profile.lifecycle.juvenile_steps,
        };

        assert_eq!(decide_stage(&profile, &plant, 0.4, 0.5), LifeDecision::Stay);
        assert_eq!(
            decide_stage(&profile, &plant, 0.6, 0.5),
            LifeDecision::Become(GrowthStage::Mature)
        );
    }

    #[test]
    fn mature_plants_cycle_through_dormancy() {
        let profile = SpeciesProfile::default();
        let mature = mature_plant();
        assert_eq!(
            decide_stage(&profile, &mature, 0.2, 0.5),
            LifeDecision::Become(GrowthStage::Dormant)
        );

        let mut dormant = mature_plant();
        dormant.stage = GrowthStage::Dormant;
        assert_eq!(
            decide_stage(&profile, &dormant, 0.35, 0.5),
            LifeDecision::Stay
        );
        assert_eq!(
            decide_stage(&profile, &dormant, 0.5, 0.5),
            LifeDecision::Become(GrowthStage::Mature)
        );
    }

    #[test]
    fn healthy_mature_plant_over_moist_soil_is_a_candidate() {
        let profile = SpeciesProfile::default();
        let soil = SoilSample {
            moisture: 0.6,
            nutrients: 0.6,
            sunlight: 0.7,
            compaction: 0.2,
            temperature: 0.5,
        };
        assert!(is_spread_candidate(&profile, &mature_plant(), &soil));
        assert!(spread_chance(&profile, &mature_plant()) > 0.0);
    }

    #[test]
    fn depleted_soil_blocks_spreading() {
        let profile = SpeciesProfile::default();
        let soil = SoilSample {
            moisture: 0.1,
            nutrients: 0.6,
            sunlight: 0.7,
            compaction: 0.2,
            temperature: 0.5,
        };
        assert!(!is_spread_candidate(&profile, &mature_plant(), &soil));
    }

    #[test]
    fn spread_chance_scales_with_vigor_and_stays_bounded() {
        let profile = SpeciesProfile::default();
        let vigorous = mature_plant();
        let mut weary = mature_plant();
        weary.health = 0.3;
        weary.growth = 0.4;

        assert!(spread_chance(&profile, &vigorous) > spread_chance(&profile, &weary));
        assert!(spread_chance(&profile, &vigorous) <= 1.0);
    }
}
