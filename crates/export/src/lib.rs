//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod orbit_csv {
    use std::io::{self, Write};

    use neo_core::vector::Vector3;
    use neo_orbits::OrbitSamples;

    const HEADER: &str =
        "orbit,t_jd,helio_x_au,helio_y_au,helio_z_au,geo_x_au,geo_y_au,geo_z_au";

    /// Write the orbit-sample CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// One sampled epoch. A frame that was not sampled is written as empty cells.
    #[derive(Debug, Clone, Copy)]
    pub struct Record<'a> {
        pub orbit: &'a str,
        pub t_jd: f64,
        pub helio_au: Option<Vector3>,
        pub geo_au: Option<Vector3>,
    }

    impl<'a> Record<'a> {
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            write!(writer, "{},{:.6}", self.orbit, self.t_jd)?;
            for position in [self.helio_au, self.geo_au] {
                match position {
                    Some([x, y, z]) => write!(writer, ",{x:.9},{y:.9},{z:.9}")?,
                    None => write!(writer, ",,,")?,
                }
            }
            writeln!(writer)
        }
    }

    /// Write every epoch of `samples` under the label `orbit`.
    pub fn write_samples(
        writer: &mut dyn Write,
        orbit: &str,
        samples: &OrbitSamples,
    ) -> io::Result<()> {
        for (idx, &t_jd) in samples.t_jd.iter().enumerate() {
            Record {
                orbit,
                t_jd,
                helio_au: samples.helio_au.as_ref().and_then(|v| v.get(idx).copied()),
                geo_au: samples.geo_au.as_ref().and_then(|v| v.get(idx).copied()),
            }
            .write_to(writer)?;
        }
        Ok(())
    }
}

pub mod report {
    use std::io::{self, Write};
    use std::path::Path;

    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use super::writer_for_path;

    #[derive(Serialize)]
    struct Envelope<'a, T: Serialize> {
        kind: &'a str,
        engine_version: &'a str,
        report: &'a T,
    }

    /// Write `report` as pretty JSON, wrapped with its kind and the engine version.
    pub fn write_json<T: Serialize>(
        writer: &mut dyn Write,
        kind: &str,
        engine_version: &str,
        report: &T,
    ) -> io::Result<()> {
        let envelope = Envelope {
            kind,
            engine_version,
            report,
        };
        to_writer_pretty(&mut *writer, &envelope)?;
        writeln!(writer)?;
        writer.flush()
    }

    /// [`write_json`] to a file path, or stdout for `-`.
    pub fn write_json_to_path<T: Serialize>(
        path: &Path,
        kind: &str,
        engine_version: &str,
        report: &T,
    ) -> io::Result<()> {
        let mut writer = writer_for_path(path)?;
        write_json(writer.as_mut(), kind, engine_version, report)
    }
}
