use crate::components::{CrashReason, RigidBodyState};
use crate::utils::rad_to_deg;

/// Sink rate at first contact above which the gear fails [m/s]
pub const MAX_TOUCHDOWN_SINK: f64 = 6.0;
/// Bank angle on the ground that puts a wingtip or engine pod on the runway [deg]
pub const MAX_GROUND_BANK_DEG: f64 = 35.0;
/// CG height below which the fuselage is on the ground [m]
pub const MIN_CG_HEIGHT: f64 = 0.5;

/// Post-step crash checks. `was_on_ground` is the contact state before the
/// sub-step, so a hard landing is only judged at first contact.
pub fn check_crash(
    state: &RigidBodyState,
    on_ground: bool,
    was_on_ground: bool,
    height_agl: f64,
) -> Option<CrashReason> {
    if !state.is_finite() {
        return Some(CrashReason::NumericalFault);
    }

    if on_ground {
        let sink_rate = -state.vertical_speed();
        if !was_on_ground && sink_rate > MAX_TOUCHDOWN_SINK {
            return Some(CrashReason::HardLanding { sink_rate });
        }

        let roll_deg = rad_to_deg(state.euler_angles().0);
        if roll_deg.abs() > MAX_GROUND_BANK_DEG {
            return Some(CrashReason::WingStrike { roll_deg });
        }
    }

    if height_agl < MIN_CG_HEIGHT {
        return Some(CrashReason::FuselageStrike { height_agl });
    }

    None
}
