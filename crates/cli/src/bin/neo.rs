use anyhow::{Context, anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use neo_impact::assess::config::{ObjectRecord, load_catalog, load_settings};
use neo_impact::assess::{
    AimMode, DamageOverrides, DamageRequest, DashboardRequest, DeflectionMode, DeflectionSpec,
    ImpactPointRequest, PresetDirection, ReportFrame, analyze_deflection, assess_damage,
    build_impact_profile, deflection_dashboard, impact_point, state_query,
};
use neo_impact::epoch;
use neo_impact::export::{orbit_csv, report, writer_for_path};
use std::io::Write;
use std::path::{Path, PathBuf};

#[path = "neo/render.rs"]
mod render;

const LOG_VAR: &str = "NEO_LOG";

/// Impact energetics, deflection, and ground-impact estimates for catalogued near-Earth objects.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Near-Earth object impact and deflection assessments"
)]
struct Cli {
    /// Object catalog: a YAML file, a TOML file, or a directory of TOML files
    #[arg(long, global = true, default_value = "configs/objects")]
    catalog: PathBuf,

    /// Engine settings (TOML); built-in defaults when omitted
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalogued objects
    List,
    /// Size, mass, energy, crater, and seismic magnitude for an impact
    Impact {
        #[command(flatten)]
        target: Target,
        /// Impact speed in km/s (defaults to the close-approach speed, then the settings)
        #[arg(long)]
        velocity: Option<f64>,
        #[command(flatten)]
        output: Output,
    },
    /// Position and velocity at an epoch
    State {
        #[command(flatten)]
        target: Target,
        #[command(flatten)]
        epoch: Epoch,
        #[arg(long, value_enum, default_value_t = FrameArg::Geo)]
        frame: FrameArg,
        #[command(flatten)]
        output: Output,
    },
    /// Blast-damage radii and crater size
    Damage {
        #[command(flatten)]
        target: Target,
        /// Asteroid mass in kg (replaces the profile mass when positive)
        #[arg(long)]
        mass: Option<f64>,
        /// Impact speed in km/s
        #[arg(long)]
        velocity: Option<f64>,
        /// Light-damage radius constant (km per Mt^(1/3))
        #[arg(long)]
        light_km: Option<f64>,
        /// Moderate-damage radius constant (km per Mt^(1/3))
        #[arg(long)]
        moderate_km: Option<f64>,
        /// Severe-damage radius constant (km per Mt^(1/3))
        #[arg(long)]
        severe_km: Option<f64>,
        /// Crater diameter coefficient (km per Mt^(1/3))
        #[arg(long)]
        crater_coeff_km: Option<f64>,
        #[command(flatten)]
        output: Output,
    },
    /// Kinetic-impactor deflection and its first-order orbital effect
    Deflect {
        #[command(flatten)]
        target: Target,
        #[command(flatten)]
        epoch: Epoch,
        #[command(flatten)]
        deflection: Deflection,
        #[command(flatten)]
        output: Output,
    },
    /// Pre/post-deflection orbits sampled over a window
    Dashboard {
        #[command(flatten)]
        target: Target,
        #[command(flatten)]
        epoch: Epoch,
        #[command(flatten)]
        deflection: Deflection,
        /// Number of epochs per orbit (clamped to [2, 1000])
        #[arg(long)]
        samples: Option<usize>,
        /// Sampling window in days (defaults to the pre-deflection period)
        #[arg(long)]
        window_days: Option<f64>,
        /// Write sampled positions as CSV (use '-' for stdout)
        #[arg(long)]
        csv: Option<PathBuf>,
        #[command(flatten)]
        output: Output,
    },
    /// Where a straight-line path from the epoch would meet the ground
    ImpactPoint {
        #[command(flatten)]
        target: Target,
        #[command(flatten)]
        epoch: Epoch,
        #[arg(long, value_enum, default_value_t = AimArg::Real)]
        mode: AimArg,
        /// Speed in km/s for aim-earth (defaults to the current geocentric speed)
        #[arg(long)]
        speed: Option<f64>,
        /// Altitude of the hit sphere above the surface (km)
        #[arg(long)]
        entry_alt_km: Option<f64>,
        #[arg(long)]
        earth_radius_km: Option<f64>,
        #[command(flatten)]
        output: Output,
    },
}

#[derive(Args, Debug)]
struct Target {
    /// Object name or designation (case-insensitive)
    object: String,
}

#[derive(Args, Debug)]
struct Epoch {
    /// Julian date, UTC timestamp (YYYY-MM-DD[THH:MM[:SS]]), or 'approach' for the catalogued
    /// close approach; defaults to now
    #[arg(long)]
    epoch: Option<String>,
}

#[derive(Args, Debug)]
struct Output {
    /// Write the report as JSON (use '-' for stdout)
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct Deflection {
    /// Impactor velocity x (km/s) in the --frame frame; vector mode needs all three components
    #[arg(long, allow_negative_numbers = true)]
    vix: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    viy: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    viz: Option<f64>,
    /// Preset direction (prograde, retrograde, radial_out, radial_in, normal_plus, normal_minus)
    #[arg(long, value_parser = parse_preset)]
    preset: Option<PresetDirection>,
    /// Preset Δv magnitude in m/s
    #[arg(long)]
    delta_v_m_s: Option<f64>,
    /// Impactor mass in kg (required for vector mode)
    #[arg(long)]
    impactor_mass: Option<f64>,
    /// Momentum-enhancement factor
    #[arg(long, default_value_t = 1.0)]
    beta: f64,
    /// Asteroid mass in kg (defaults to the profile mass)
    #[arg(long)]
    asteroid_mass: Option<f64>,
    /// Speed in km/s for the "before" impact energy
    #[arg(long)]
    velocity: Option<f64>,
    #[arg(long, value_enum, default_value_t = FrameArg::Geo)]
    frame: FrameArg,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FrameArg {
    Helio,
    Geo,
}

impl From<FrameArg> for ReportFrame {
    fn from(value: FrameArg) -> Self {
        match value {
            FrameArg::Helio => ReportFrame::Helio,
            FrameArg::Geo => ReportFrame::Geo,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum AimArg {
    Real,
    AimEarth,
}

fn parse_preset(value: &str) -> Result<PresetDirection, String> {
    value.parse().map_err(|err| format!("{err}"))
}

impl Deflection {
    fn to_spec(&self) -> anyhow::Result<DeflectionSpec> {
        let mode = match (self.vix, self.viy, self.viz, self.preset) {
            (Some(x), Some(y), Some(z), None) => DeflectionMode::Vector {
                impactor_velocity_km_s: [x, y, z],
                impactor_mass_kg: self
                    .impactor_mass
                    .ok_or_else(|| anyhow!("vector mode needs --impactor-mass"))?,
            },
            (None, None, None, Some(direction)) => DeflectionMode::Preset {
                direction,
                delta_v_m_s: self
                    .delta_v_m_s
                    .ok_or_else(|| anyhow!("--preset needs --delta-v-m-s"))?,
                impactor_mass_kg: self.impactor_mass,
            },
            (None, None, None, None) => DeflectionMode::None,
            _ => bail!("give either all of --vix/--viy/--viz or --preset, not a mix"),
        };
        Ok(DeflectionSpec {
            mode,
            beta: self.beta,
            asteroid_mass_kg: self.asteroid_mass,
            baseline_velocity_km_s: self.velocity,
            frame: self.frame.into(),
        })
    }
}

impl Epoch {
    fn resolve(&self, record: &ObjectRecord) -> anyhow::Result<f64> {
        let jd = match self.epoch.as_deref() {
            None => epoch::now_jd(),
            Some(text) if text.trim().eq_ignore_ascii_case("approach") => {
                epoch::approach_jd(record)?
            }
            Some(text) => epoch::parse_epoch(text)?,
        };
        info!("{} at JD {jd:.6}", record.name);
        Ok(jd)
    }
}

impl Output {
    /// Write the JSON report if requested; `true` when it went to stdout.
    fn emit<T: serde::Serialize>(&self, kind: &str, value: &T) -> anyhow::Result<bool> {
        match &self.json {
            Some(path) => {
                report::write_json_to_path(path, kind, neo_impact::version(), value)
                    .with_context(|| format!("writing {} report to {}", kind, path.display()))?;
                Ok(path == Path::new("-"))
            }
            None => Ok(false),
        }
    }
}

fn main() -> anyhow::Result<()> {
    if pretty_env_logger::try_init_custom_env(LOG_VAR).is_err() {
        eprintln!("could not init logger");
    }
    let cli = Cli::parse();
    let catalog = load_catalog(&cli.catalog)
        .with_context(|| format!("loading catalog {}", cli.catalog.display()))?;
    let settings = load_settings(cli.settings.as_deref())?;

    match cli.command {
        Command::List => {
            for object in catalog.objects() {
                render::catalog_line(object);
            }
        }
        Command::Impact {
            target,
            velocity,
            output,
        } => {
            let record = catalog.find(&target.object)?;
            let profile = build_impact_profile(record, velocity, &settings)?;
            if !output.emit("impact", &profile)? {
                render::impact(&profile);
            }
        }
        Command::State {
            target,
            epoch,
            frame,
            output,
        } => {
            let record = catalog.find(&target.object)?;
            let jd = epoch.resolve(record)?;
            let state = state_query(record, jd, frame.into())?;
            if !output.emit("state", &state)? {
                render::state(&state);
            }
        }
        Command::Damage {
            target,
            mass,
            velocity,
            light_km,
            moderate_km,
            severe_km,
            crater_coeff_km,
            output,
        } => {
            let record = catalog.find(&target.object)?;
            let request = DamageRequest {
                mass_override_kg: mass,
                velocity_override_km_s: velocity,
                constants: DamageOverrides {
                    light_km,
                    moderate_km,
                    severe_km,
                    crater_coeff_km,
                },
            };
            let damage = assess_damage(record, &request, &settings)?;
            if !output.emit("damage", &damage)? {
                render::damage(&damage);
            }
        }
        Command::Deflect {
            target,
            epoch,
            deflection,
            output,
        } => {
            let record = catalog.find(&target.object)?;
            let jd = epoch.resolve(record)?;
            let analysis = analyze_deflection(record, jd, &deflection.to_spec()?, &settings)?;
            if !output.emit("deflection", &analysis)? {
                render::deflection(&analysis);
            }
        }
        Command::Dashboard {
            target,
            epoch,
            deflection,
            samples,
            window_days,
            csv,
            output,
        } => {
            let csv_on_stdout = csv.as_deref() == Some(Path::new("-"));
            if csv_on_stdout && output.json.as_deref() == Some(Path::new("-")) {
                bail!("--csv - and --json - would both write to stdout; send one of them to a file");
            }
            let record = catalog.find(&target.object)?;
            let jd = epoch.resolve(record)?;
            let request = DashboardRequest {
                deflection: deflection.to_spec()?,
                samples,
                window_days,
            };
            let dashboard = deflection_dashboard(record, jd, &request, &settings)?;
            if let Some(path) = &csv {
                write_dashboard_csv(path, &dashboard)?;
            }
            if !output.emit("dashboard", &dashboard)? && !csv_on_stdout {
                render::dashboard(&dashboard);
            }
        }
        Command::ImpactPoint {
            target,
            epoch,
            mode,
            speed,
            entry_alt_km,
            earth_radius_km,
            output,
        } => {
            let record = catalog.find(&target.object)?;
            let jd = epoch.resolve(record)?;
            let request = ImpactPointRequest {
                mode: match mode {
                    AimArg::Real => AimMode::Real,
                    AimArg::AimEarth => AimMode::AimEarth {
                        speed_override_km_s: speed,
                    },
                },
                entry_alt_km,
                earth_radius_km,
            };
            let result = impact_point(record, jd, &request, &settings)?;
            if !output.emit("impact_point", &result)? {
                render::impact_point(&result);
            }
        }
    }
    Ok(())
}

fn write_dashboard_csv(
    path: &Path,
    dashboard: &neo_impact::assess::DashboardReport,
) -> anyhow::Result<()> {
    let mut writer = writer_for_path(path)
        .with_context(|| format!("creating dashboard CSV {}", path.display()))?;
    orbit_csv::write_header(writer.as_mut())?;
    orbit_csv::write_samples(writer.as_mut(), "pre", &dashboard.pre_orbit.positions)?;
    orbit_csv::write_samples(writer.as_mut(), "post", &dashboard.post_orbit.positions)?;
    writer.flush()?;
    Ok(())
}

