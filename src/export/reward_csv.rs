//! CSV export for averaged reward curves

use std::path::Path;

use crate::{Error, Result, analysis::CurvePoint};

/// Write `step,mean_reward` rows with a header line.
pub fn write_curve_csv<P: AsRef<Path>>(path: P, points: &[CurvePoint]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;
    for point in points {
        writer.serialize(point)?;
    }
    writer.flush().map_err(|source| Error::Io {
        operation: format!("flush {}", path.display()),
        source,
    })?;
    Ok(())
}

/// Read a curve written by [`write_curve_csv`].
pub fn read_curve_csv<P: AsRef<Path>>(path: P) -> Result<Vec<CurvePoint>> {
    let mut reader = csv::Reader::from_path(path)?;
    let points = reader
        .deserialize()
        .collect::<std::result::Result<Vec<CurvePoint>, csv::Error>>()?;
    Ok(points)
}
