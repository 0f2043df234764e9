use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::sweep::Sweep;

pub(crate) const RECORD_HEADER: &str = "theta,phi,radius,strength";

/// Writes the sweep as CSV, one record per point. Angles are stored in
/// radians; missing points keep their row with NaN radius and strength.
pub fn write_records(path: &Path, sweep: &Sweep) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_to(&mut writer, sweep)
}

fn write_to(writer: &mut impl Write, sweep: &Sweep) -> io::Result<()> {
    writeln!(writer, "{}", RECORD_HEADER)?;
    for (point, strength) in sweep.points.iter().zip(sweep.strengths.iter()) {
        writeln!(
            writer,
            "{},{},{},{}",
            point.theta, point.phi, point.radius, strength
        )?;
    }
    writer.flush()
}
