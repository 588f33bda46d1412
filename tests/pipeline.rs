use std::io::Write;
use std::path::PathBuf;

use approx::assert_relative_eq;
use neo_impact::assess::config::{EngineSettings, load_catalog, load_settings};
use neo_impact::assess::{
    DashboardRequest, DeflectionMode, DeflectionSpec, PresetDirection, ReportFrame,
    build_impact_profile, deflection_dashboard, state_query,
};
use neo_impact::epoch::{approach_jd, parse_epoch};
use neo_impact::export::{orbit_csv, report, writer_for_path};
use neo_impact::physics::DiameterProvenance;

fn configs() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("configs")
}

#[test]
fn bundled_catalog_and_settings_load() {
    let catalog = load_catalog(configs().join("objects")).unwrap();
    let settings = load_settings(Some(&configs().join("settings.toml"))).unwrap();
    assert_eq!(settings, EngineSettings::default());
    assert_eq!(catalog.objects().len(), 4);

    let bennu = catalog.find("101955").unwrap();
    let profile = build_impact_profile(bennu, None, &settings).unwrap();
    assert_eq!(profile.diameter_source, DiameterProvenance::Catalog);
    assert_eq!(profile.physical.density_kg_m3, 1190.0);
    assert_eq!(profile.physical.velocity_km_s, 20.0);
}

#[test]
fn geocentric_state_at_close_approach() {
    let catalog = load_catalog(configs().join("objects")).unwrap();
    let apophis = catalog.find("99942 apophis").unwrap();
    let jd = approach_jd(apophis).unwrap();
    assert_eq!(jd, parse_epoch("2029-04-13T21:46").unwrap());

    let geo = state_query(apophis, jd, ReportFrame::Geo).unwrap();
    let helio = state_query(apophis, jd, ReportFrame::Helio).unwrap();
    let earth = geo.earth_position_au.unwrap();
    for k in 0..3 {
        assert_relative_eq!(
            geo.position_au[k] + earth[k],
            helio.position_au[k],
            epsilon = 1e-12
        );
    }
}

#[test]
fn dashboard_exports_to_csv_and_json() {
    let catalog = load_catalog(configs().join("objects")).unwrap();
    let eros = catalog.find("433").unwrap();
    let request = DashboardRequest {
        deflection: DeflectionSpec {
            mode: DeflectionMode::Preset {
                direction: PresetDirection::Prograde,
                delta_v_m_s: 2.0,
                impactor_mass_kg: Some(560.0),
            },
            ..Default::default()
        },
        samples: Some(12),
        window_days: Some(120.0),
    };
    let dashboard =
        deflection_dashboard(eros, 2_460_200.5, &request, &EngineSettings::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("nested/dashboard.csv");
    {
        let mut writer = writer_for_path(&csv_path).unwrap();
        orbit_csv::write_header(writer.as_mut()).unwrap();
        orbit_csv::write_samples(writer.as_mut(), "pre", &dashboard.pre_orbit.positions).unwrap();
        orbit_csv::write_samples(writer.as_mut(), "post", &dashboard.post_orbit.positions)
            .unwrap();
        writer.flush().unwrap();
    }
    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.len(), 8);
    assert_eq!(&headers[0], "orbit");
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 24);
    assert_eq!(&rows[0][0], "pre");
    assert_eq!(&rows[12][0], "post");
    let first_x: f64 = rows[0][2].parse().unwrap();
    let expected = dashboard.pre_orbit.positions.helio_au.as_ref().unwrap()[0][0];
    assert_relative_eq!(first_x, expected, epsilon = 1e-9);

    let json_path = dir.path().join("dashboard.json");
    report::write_json_to_path(&json_path, "dashboard", neo_impact::version(), &dashboard)
        .unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(value["kind"], "dashboard");
    assert_eq!(value["report"]["samples"], 12);
    assert_eq!(value["report"]["deflection"]["preset"]["direction"], "prograde");
    assert!(
        value["report"]["post_orbit"]["elements"]["a_au"].as_f64().unwrap()
            > value["report"]["pre_orbit"]["elements"]["a_au"].as_f64().unwrap()
    );
}
