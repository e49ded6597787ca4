//! Aggregate metrics recomputed wholesale after every step.

use garden_core::MetricsSnapshot;

use crate::Cell;

/// Smoothing factor for the reproduction-rate moving average. Each step
/// keeps 80% of the running value and blends in 20% of the fresh sprout
/// count.
const REPRODUCTION_EMA_ALPHA: f32 = 0.2;

/// Recomputes the published metrics over the freshly-stepped grid.
pub(crate) fn recompute(cells: &[Cell], sprouts: u32, previous_rate: f32) -> MetricsSnapshot {
    let total = cells.len().max(1) as f32;
    let mut moisture_sum = 0.0f32;
    let mut nutrient_sum = 0.0f32;
    let mut occupied = 0u32;

    for cell in cells {
        moisture_sum += cell.soil.moisture;
        nutrient_sum += cell.soil.nutrients;
        if cell.occupant.is_alive() {
            occupied += 1;
        }
    }

    MetricsSnapshot {
        average_moisture: moisture_sum / total,
        average_nutrients: nutrient_sum / total,
        coverage: occupied as f32 / total,
        reproduction_rate: previous_rate * (1.0 - REPRODUCTION_EMA_ALPHA)
            + sprouts as f32 * REPRODUCTION_EMA_ALPHA,
    }
}
