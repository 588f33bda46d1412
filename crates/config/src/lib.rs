//! Catalog records and engine settings for the NEO impact engine.

pub mod catalog;
pub mod settings;

pub use catalog::{ApproachRecord, Catalog, ElementRecord, ObjectRecord, PhysicalRecord};
pub use settings::EngineSettings;

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading catalogs and settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("missing orbital element '{0}'")]
    MissingElement(&'static str),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("object '{0}' not found in catalog")]
    NotFound(String),
}

/// Load an object catalog from a YAML list, a single TOML file, or a directory of TOML files.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, ConfigError> {
    let objects: Vec<ObjectRecord> = load_records(path)?;
    Catalog::new(objects)
}

/// Load engine settings from a TOML file. `None` yields the built-in defaults.
pub fn load_settings(path: Option<&Path>) -> Result<EngineSettings, ConfigError> {
    let Some(path) = path else {
        return Ok(EngineSettings::default());
    };
    let contents = std::fs::read_to_string(path)?;
    let settings: EngineSettings = toml::from_str(&contents)?;
    settings.validate()?;
    Ok(settings)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const EROS_TOML: &str = r#"
name = "433 Eros"
designation = "433"
orbit_class = "AMO"

[elements]
a = 1.458
e = 0.2227
i = 10.83
om = 304.3
w = 178.9
ma = 310.5
epoch_jd = 2460000.5
per = 643.1

[physical]
diameter_km = 16.84
"#;

    #[test]
    fn loads_a_directory_of_toml_records_in_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b_eros.toml"), EROS_TOML).unwrap();
        std::fs::write(
            dir.path().join("a_small.toml"),
            "name = \"2024 AB\"\n[elements]\na = 1.1\ne = 0.3\ni = 2.0\nom = 10.0\nw = 20.0\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let catalog = load_catalog(dir.path()).unwrap();
        let names: Vec<_> = catalog.objects().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["2024 AB", "433 Eros"]);
    }

    #[test]
    fn loads_a_yaml_list() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "- name: Apophis\n  designation: \"99942\"\n  orbit_class: ATE\n  elements: {{a: 0.9224, e: 0.1914, i: 3.34, om: 204.0, w: 126.7}}\n"
        )
        .unwrap();
        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.find("99942").unwrap().name, "Apophis");
    }

    #[test]
    fn settings_default_when_absent_and_accept_partial_files() {
        assert_eq!(load_settings(None).unwrap(), EngineSettings::default());

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "default_velocity_km_s = 17.0\n[damage]\nsevere_km = 3.0").unwrap();
        let settings = load_settings(Some(file.path())).unwrap();
        assert_eq!(settings.default_velocity_km_s, 17.0);
        assert_eq!(
            settings.damage,
            neo_physics::DamageConstants {
                severe_km: 3.0,
                ..Default::default()
            }
        );
        assert_eq!(settings.albedo, neo_physics::DEFAULT_ALBEDO);
        assert_eq!(settings.sample_count, 240);
    }

    #[test]
    fn malformed_settings_report_toml_errors() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "albedo = \"bright\"").unwrap();
        assert!(matches!(
            load_settings(Some(file.path())),
            Err(ConfigError::Toml(_))
        ));
    }
}
