//! Terminal sinks presenting frames and metrics as plain text.

use std::io::Write;

use anyhow::Result;
use garden_core::MetricsSnapshot;
use garden_rendering::{GardenScene, MetricsSink, RenderSink};

/// Renders scenes as ASCII frames, one glyph per cell.
#[derive(Debug)]
pub(crate) struct TerminalFrame<W: Write> {
    out: W,
}

impl<W: Write> TerminalFrame<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> RenderSink for TerminalFrame<W> {
    fn present(&mut self, scene: &GardenScene) -> Result<()> {
        let (columns, _) = scene.dimensions();
        for (index, cell) in scene.cells().iter().enumerate() {
            let glyph = match cell.plant {
                None => '.',
                Some(plant) if plant.footprint < 0.45 => '*',
                Some(plant) if plant.footprint < 0.7 => 'o',
                Some(_) => '@',
            };
            write!(self.out, "{glyph}")?;
            if (index + 1) % columns as usize == 0 {
                writeln!(self.out)?;
            }
        }
        writeln!(self.out)?;
        Ok(())
    }
}

/// Publishes metrics snapshots as single summary lines.
#[derive(Debug)]
pub(crate) struct MetricsLine<W: Write> {
    out: W,
}

impl<W: Write> MetricsLine<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> MetricsSink for MetricsLine<W> {
    fn publish(&mut self, metrics: &MetricsSnapshot) -> Result<()> {
        writeln!(
            self.out,
            "moisture {:.3} | nutrients {:.3} | coverage {:5.1}% | sprouts/step {:.2}",
            metrics.average_moisture,
            metrics.average_nutrients,
            metrics.coverage * 100.0,
            metrics.reproduction_rate,
        )?;
        Ok(())
    }
}
