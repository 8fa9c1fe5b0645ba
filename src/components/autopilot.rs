use serde::{Deserialize, Serialize};

use crate::utils::deg_to_rad;

/// PID controller with a clamped integrator (anti-windup) and clamped output.
/// The derivative acts on the error and is zero on the first step after a reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pid {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    pub integral_limits: (f64, f64),
    pub output_limits: (f64, f64),
    pub integral: f64,
    pub prev_error: Option<f64>,
}

impl Pid {
    pub fn new(
        kp: f64,
        ki: f64,
        kd: f64,
        integral_limits: (f64, f64),
        output_limits: (f64, f64),
    ) -> Self {
        Self {
            kp,
            ki,
            kd,
            integral_limits,
            output_limits,
            integral: 0.0,
            prev_error: None,
        }
    }

    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_error = None;
    }

    pub fn step(&mut self, error: f64, dt: f64) -> f64 {
        if !error.is_finite() || dt <= 0.0 {
            return 0.0_f64.clamp(self.output_limits.0, self.output_limits.1);
        }
        self.integral =
            (self.integral + error * dt).clamp(self.integral_limits.0, self.integral_limits.1);
        let derivative = match self.prev_error {
            Some(prev) => (error - prev) / dt,
            None => 0.0,
        };
        self.prev_error = Some(error);

        (self.kp * error + self.ki * self.integral + self.kd * derivative)
            .clamp(self.output_limits.0, self.output_limits.1)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutopilotMode {
    /// Fly the selected heading, hold altitude (or vertical speed).
    Heading,
    /// Wings level, fly the selected vertical speed up to the altitude target.
    #[default]
    VerticalSpeed,
    /// Track the localizer, hold altitude (or vertical speed).
    Ils,
    /// Fly the course supplied by the navigation service, hold altitude.
    Lnav,
    /// Track localizer and glide slope.
    Approach,
}

/// Externally settable autopilot targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotTargets {
    /// Indicated airspeed [m/s]
    pub speed_mps: f64,
    /// Altitude to capture and hold [m]
    pub altitude_m: Option<f64>,
    /// Commanded climb rate, positive up [m/s]
    pub vertical_speed_mps: f64,
    /// Selected heading [deg]
    pub heading_deg: f64,
    /// Navigation course [deg]
    pub course_deg: f64,
}

impl Default for AutopilotTargets {
    fn default() -> Self {
        Self {
            speed_mps: 120.0,
            altitude_m: None,
            vertical_speed_mps: 0.0,
            heading_deg: 0.0,
            course_deg: 0.0,
        }
    }
}

/// Autopilot configuration plus the memory of its four loops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutopilotState {
    pub engaged: bool,
    pub mode: AutopilotMode,
    pub targets: AutopilotTargets,
    /// Speed error -> absolute throttle.
    pub speed_pid: Pid,
    /// Vertical speed error -> pitch target (rad).
    pub vertical_speed_pid: Pid,
    /// Pitch error -> elevator. Gains are negative: nose-up needs negative elevator.
    pub pitch_pid: Pid,
    /// Bank error -> aileron.
    pub roll_pid: Pid,
}

impl Default for AutopilotState {
    fn default() -> Self {
        Self {
            engaged: false,
            mode: AutopilotMode::default(),
            targets: AutopilotTargets::default(),
            speed_pid: Pid::new(0.1, 0.01, 0.1, (0.0, 100.0), (0.0, 1.0)),
            vertical_speed_pid: Pid::new(
                0.004,
                0.0006,
                0.0,
                (-400.0, 400.0),
                (deg_to_rad(-10.0), deg_to_rad(15.0)),
            ),
            pitch_pid: Pid::new(-2.0, -0.3, -1.0, (-1.0, 1.0), (-1.0, 1.0)),
            roll_pid: Pid::new(2.0, 0.1, 0.6, (-1.0, 1.0), (-1.0, 1.0)),
        }
    }
}

impl AutopilotState {
    pub fn reset_integrators(&mut self) {
        self.speed_pid.reset();
        self.vertical_speed_pid.reset();
        self.pitch_pid.reset();
        self.roll_pid.reset();
    }
}
