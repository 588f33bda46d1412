//! Re-exported APIs for consumers of the assessment crate.

pub use crate::assessment::damage::{DamageOverrides, DamageReport, DamageRequest, MassSource, assess_damage};
pub use crate::assessment::dashboard::{
    DashboardReport, DashboardRequest, EnergyContext, OrbitBundle, deflection_dashboard,
};
pub use crate::assessment::deflect::{DeflectionReport, DeflectionSpec, analyze_deflection};
pub use crate::assessment::impact_point::{AimMode, ImpactPointReport, ImpactPointRequest, impact_point};
pub use crate::assessment::profile::{
    DensitySource, ImpactProfile, VelocitySource, build_impact_profile, resolve_density,
    resolve_velocity,
};
pub use crate::assessment::state::{ReportFrame, StateReport, state_query};
pub use crate::assessment::AssessError;
pub use neo_deflection::{DeflectionMode, PresetDirection};
pub use neo_physics::DamageConstants;
