//! Plain-text reports for the `neo` binary.

use neo_impact::assess::config::ObjectRecord;
use neo_impact::assess::{
    DamageReport, DashboardReport, DeflectionReport, DensitySource, ImpactPointReport,
    ImpactProfile, OrbitBundle, StateReport,
};
use neo_impact::frames::GroundImpact;
use neo_impact::physics::DiameterProvenance;

pub fn catalog_line(object: &ObjectRecord) {
    println!(
        "{:<24} {:<12} {}",
        object.name,
        object.designation.as_deref().unwrap_or("-"),
        object.orbit_class.as_deref().unwrap_or("-")
    );
}

pub fn impact(profile: &ImpactProfile) {
    let p = &profile.physical;
    println!("=== Impact Profile: {} ===", profile.object);
    let diameter_from = match profile.diameter_source {
        DiameterProvenance::Catalog => "catalog".to_string(),
        DiameterProvenance::MeanEstimate => "mean NEO estimate".to_string(),
        DiameterProvenance::AbsoluteMagnitude { h, albedo } => {
            format!("H = {h:.2}, albedo {albedo:.2}")
        }
    };
    let density_from = match &profile.density_source {
        DensitySource::Catalog => "catalog".to_string(),
        DensitySource::OrbitClassDefault { orbit_class } => format!(
            "default for class {}",
            orbit_class.as_deref().unwrap_or("unknown")
        ),
    };
    println!("Diameter  : {:.4} km ({})", p.diameter_km, diameter_from);
    println!("Density   : {:.0} kg/m³ ({})", p.density_kg_m3, density_from);
    println!("Mass      : {:.4e} kg", p.mass_kg);
    println!(
        "Velocity  : {:.3} km/s ({:?})",
        p.velocity_km_s, profile.velocity_source
    );
    println!(
        "Energy    : {:.4e} J = {:.4e} Mt TNT",
        p.energy_j, p.energy_mt_tnt
    );
    println!("Crater    : {:.3} km", p.crater_diameter_km);
    println!("Seismic   : Mw {:.2}", p.seismic_mw);
    if let Some(approach) = &profile.approach {
        println!(
            "Approach  : {} at {} lunar distances ({})",
            approach.date.as_deref().unwrap_or("?"),
            approach
                .miss_distance_lunar
                .map(|ld| format!("{ld:.2}"))
                .unwrap_or_else(|| "?".to_string()),
            approach.orbiting_body.as_deref().unwrap_or("Earth")
        );
    }
}

pub fn state(state: &StateReport) {
    println!("=== State: {} @ JD {:.6} ===", state.object, state.jd);
    println!("Frame     : {}", state.frame.as_str());
    println!(
        "Position  : [{:.9}, {:.9}, {:.9}] AU ({:.9} AU)",
        state.position_au[0], state.position_au[1], state.position_au[2], state.distance_au
    );
    println!(
        "Velocity  : [{:.6}, {:.6}, {:.6}] km/s",
        state.velocity_km_s[0], state.velocity_km_s[1], state.velocity_km_s[2]
    );
    if let Some(earth) = state.earth_position_au {
        println!(
            "Earth     : [{:.9}, {:.9}, {:.9}] AU (heliocentric)",
            earth[0], earth[1], earth[2]
        );
    }
}

pub fn damage(report: &DamageReport) {
    let r = &report.results;
    println!("=== Damage: {} ===", report.object);
    println!("Mass      : {:.4e} kg ({:?})", report.mass_kg, report.mass_source);
    println!(
        "Velocity  : {:.3} km/s ({:?})",
        report.velocity_km_s, report.velocity_source
    );
    println!("Yield     : {:.4e} Mt TNT", r.yield_megatons);
    println!(
        "Radii     : light = {:.2} km, moderate = {:.2} km, severe = {:.2} km",
        r.radii_km.light_km, r.radii_km.moderate_km, r.radii_km.severe_km
    );
    println!("Crater    : {:.3} km", r.crater_diameter_km);
}

pub fn deflection(report: &DeflectionReport) {
    let result = &report.result;
    let effect = &result.orbit_effect;
    println!(
        "=== Deflection: {} @ JD {:.6} ({}) ===",
        report.object, report.jd, report.mode
    );
    println!("Frame     : {}", report.frame.as_str());
    println!(
        "Δv        : [{:.6e}, {:.6e}, {:.6e}] km/s, |Δv| = {:.6} m/s",
        result.delta_v_km_s[0], result.delta_v_km_s[1], result.delta_v_km_s[2], result.delta_v_mag_m_s
    );
    if let Some(preset) = &result.preset {
        match preset.implied_closing_speed_km_s {
            Some(speed) => println!(
                "Preset    : {} at {:.4} m/s, implied closing speed {:.3} km/s",
                preset.direction, preset.delta_v_m_s, speed
            ),
            None => println!("Preset    : {} at {:.4} m/s", preset.direction, preset.delta_v_m_s),
        }
    }
    println!(
        "Speed     : {:.6} -> {:.6} km/s",
        report.pre_speed_km_s, report.post_speed_km_s
    );
    println!(
        "Orbit     : a {:.9} -> {:.9} AU (Δa/a = {:.3e}), P {:.4} -> {:.4} days (ΔP/P = {:.3e})",
        effect.a_old_au,
        effect.a_new_au,
        effect.delta_a_frac,
        effect.period_old_days,
        effect.period_new_days,
        effect.delta_p_frac
    );
    if !effect.within_linear_regime {
        println!("Warning   : |Δv| is not small against the circular speed; estimates are rough");
    }
    println!(
        "Energy    : {:.4e} -> {:.4e} Mt TNT",
        report.energy_before_mt_tnt, report.energy_after_mt_tnt
    );
}

fn orbit_line(label: &str, orbit: &OrbitBundle) {
    let el = &orbit.elements;
    println!(
        "{label:<10}: a = {:.6} AU, e = {:.6}, i = {:.4}°, Ω = {:.4}°, ω = {:.4}°, M = {:.4}°, P = {:.3} d",
        el.a_au,
        el.e,
        el.i_deg,
        el.raan_deg,
        el.arg_periapsis_deg,
        el.mean_anomaly_deg,
        orbit.period_days
    );
}

pub fn dashboard(report: &DashboardReport) {
    println!(
        "=== Dashboard: {} @ JD {:.6} ({}) ===",
        report.object, report.epoch_jd, report.mode
    );
    println!(
        "Window    : {:.2} days, {} samples per orbit",
        report.window_days, report.samples
    );
    println!("|Δv|      : {:.6} m/s", report.deflection.delta_v_mag_m_s);
    orbit_line("Pre", &report.pre_orbit);
    orbit_line("Post", &report.post_orbit);
    let energy = &report.energy_context;
    println!(
        "Energy    : {:.4e} -> {:.4e} Mt TNT (mass {:.4e} kg)",
        energy.energy_old_mt_tnt, energy.energy_new_mt_tnt, energy.mass_kg
    );
}

pub fn impact_point(report: &ImpactPointReport) {
    println!(
        "=== Impact Point: {} from JD {:.6} ({}) ===",
        report.object, report.jd_start, report.mode
    );
    println!(
        "Sphere    : R = {:.1} km + {:.1} km, speed {:.3} km/s",
        report.earth_radius_km, report.entry_alt_km, report.speed_km_s_used
    );
    match &report.result {
        GroundImpact::Hit(hit) => {
            println!(
                "Impact    : after {:.1} s at JD {:.6}",
                hit.time_to_impact_s, hit.jd_impact
            );
            println!(
                "Location  : lat {:.4}°, lon {:.4}°, alt {:.2} km",
                hit.point.lat_deg, hit.point.lon_deg, hit.point.alt_km
            );
        }
        GroundImpact::Miss(miss) => {
            println!("Miss      : {}", miss.reason.describe());
            println!(
                "Closest   : {:.1} km at JD {:.6} (t* = {:.1} s)",
                miss.range_min_km, miss.jd_star, miss.t_star_s
            );
        }
    }
}
