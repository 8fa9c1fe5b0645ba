use std::f64::consts::PI;

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Exponential first-order lag: `s(t+dt) = target + (s(t) - target) * exp(-dt/T)`.
///
/// A non-positive time constant snaps straight to the target.
#[inline]
pub fn first_order_lag(current: f64, target: f64, dt: f64, time_constant: f64) -> f64 {
    if time_constant <= 1e-9 {
        return target;
    }
    target + (current - target) * (-dt / time_constant).exp()
}

/// Move `current` toward `target` by at most `rate * dt`.
#[inline]
pub fn slew_toward(current: f64, target: f64, rate: f64, dt: f64) -> f64 {
    let max_step = rate * dt;
    current + (target - current).clamp(-max_step, max_step)
}

/// Wrap an angle into (-PI, PI].
#[inline]
pub fn wrap_pi(angle: f64) -> f64 {
    angle.sin().atan2(angle.cos())
}

/// Piecewise-linear lookup of a `(position, a, b)` table sorted by position.
/// Positions outside the table are clamped to its ends.
pub fn interpolate_table(table: &[(f64, f64, f64)], x: f64) -> (f64, f64) {
    let (first, last) = match (table.first(), table.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return (0.0, 0.0),
    };
    let x = x.clamp(first.0, last.0);

    for pair in table.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if x <= hi.0 {
            let span = hi.0 - lo.0;
            let t = if span.abs() < 1e-12 { 0.0 } else { (x - lo.0) / span };
            return (lo.1 + t * (hi.1 - lo.1), lo.2 + t * (hi.2 - lo.2));
        }
    }
    (last.1, last.2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_order_lag_converges() {
        let mut value = 0.0;
        for _ in 0..100 {
            value = first_order_lag(value, 1.0, 0.1, 0.5);
        }
        assert_relative_eq!(value, 1.0, epsilon = 1e-6);

        // one time constant covers ~63% of the gap
        let one_tau = first_order_lag(0.0, 1.0, 0.5, 0.5);
        assert_relative_eq!(one_tau, 1.0 - (-1.0f64).exp(), epsilon = 1e-12);

        assert_eq!(first_order_lag(0.3, 0.7, 0.1, 0.0), 0.7);
    }

    #[test]
    fn test_slew_toward_limits_step() {
        assert_relative_eq!(slew_toward(0.0, 1.0, 0.1, 0.5), 0.05);
        assert_relative_eq!(slew_toward(1.0, 0.0, 0.2, 0.5), 0.9);
        assert_relative_eq!(slew_toward(0.49, 0.5, 0.1, 1.0), 0.5);
    }

    #[test]
    fn test_interpolate_table() {
        let table = [(0.0, 0.0, 0.0), (0.5, 0.5, 0.025), (1.0, 1.1, 0.08)];
        let (a, b) = interpolate_table(&table, 0.25);
        assert_relative_eq!(a, 0.25);
        assert_relative_eq!(b, 0.0125);

        assert_eq!(interpolate_table(&table, 2.0), (1.1, 0.08));
        assert_eq!(interpolate_table(&table, -1.0), (0.0, 0.0));
        assert_eq!(interpolate_table(&[], 0.3), (0.0, 0.0));
    }

    #[test]
    fn test_wrap_pi() {
        assert_relative_eq!(wrap_pi(3.0 * PI / 2.0), -PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(wrap_pi(-3.0 * PI / 2.0), PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(wrap_pi(0.3), 0.3, epsilon = 1e-12);
    }
}
