use crate::error::ClientError;
use crate::plan::ScanBounds;
use crate::source::{fetch_measurement, MeasurementSource};
use sweep_data::{to_display_angles, MeasurementOutcome, SphericalPoint};

/// Observer for sweep progress. Receives the running point count and the
/// temperature of the last successful reading.
pub trait ProgressSink {
    fn update(&mut self, completed: usize, total: usize, last_temperature: Option<f64>);
}

/// Sink that ignores progress updates.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn update(&mut self, _completed: usize, _total: usize, _last_temperature: Option<f64>) {}
}

/// Result of one full sweep. `strengths` stays index-aligned with `points`;
/// both carry NaN where a point came back `Unavailable`.
#[derive(Clone, Debug, PartialEq)]
pub struct Sweep {
    pub points: Vec<SphericalPoint>,
    pub strengths: Vec<f64>,
}

/// Walks the boustrophedon targets in order, fetching one measurement per
/// orientation. One point is emitted per target, in target order, missing
/// measurements included.
pub fn run_sweep(
    source: &mut dyn MeasurementSource,
    bounds: &ScanBounds,
    max_attempts: u32,
    progress: &mut dyn ProgressSink,
) -> Result<Sweep, ClientError> {
    let targets = bounds.generate();
    let total = targets.len();
    let mut points = Vec::with_capacity(total);
    let mut strengths = Vec::with_capacity(total);

    for (index, target) in targets.into_iter().enumerate() {
        let outcome = fetch_measurement(source, target, max_attempts)?;
        let (radius, strength, temperature) = match outcome {
            MeasurementOutcome::Measured(m) => (m.distance, m.strength, Some(m.temperature)),
            _ => (f64::NAN, f64::NAN, None),
        };

        let (theta, phi) = to_display_angles(target.theta, target.phi);
        points.push(SphericalPoint { theta, phi, radius });
        strengths.push(strength);
        progress.update(index + 1, total, temperature);
    }

    Ok(Sweep { points, strengths })
}
