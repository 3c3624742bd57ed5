//! Resistance ratio to concentration conversion.
//!
//! Datasheet sensitivity curves are straight lines on log-log axes. A curve
//! is stored as one point on the line plus its slope, and solved for the
//! concentration at a measured `Rs/Ro` ratio.

use libm::{log10f, powf};

/// Ratios below this are treated as no gas signal.
pub const MIN_RATIO: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
    /// log10 of the concentration at the reference point.
    pub x1: f32,
    /// log10 of the `Rs/Ro` ratio at the reference point.
    pub y1: f32,
    pub slope: f32,
}

impl Curve {
    pub const fn new(x1: f32, y1: f32, slope: f32) -> Self {
        Self { x1, y1, slope }
    }

    /// Methane/LPG curve of the MQ-2.
    pub const CH4: Curve = Curve::new(2.3, 0.484, -0.3762);

    /// Carbon monoxide curve of the MQ-7.
    pub const CO: Curve = Curve::new(2.0, 0.0, -0.6926);

    pub fn ppm(&self, ratio: f32) -> f32 {
        percentage(ratio, self)
    }
}

/// Concentration in PPM for `ratio` = `Rs/Ro` on `curve`.
pub fn percentage(ratio: f32, curve: &Curve) -> f32 {
    if ratio.is_nan() || ratio < MIN_RATIO {
        return 0.0;
    }

    let exponent = ((log10f(ratio) - curve.y1) / curve.slope) + curve.x1;
    powf(10.0, exponent)
}

#[cfg(test)]
mod tests {
    use super::{Curve, percentage};
    use libm::powf;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() <= expected.abs() * 1e-3,
            "{actual} != {expected}"
        );
    }

    #[test]
    fn test_tiny_ratio() {
        for ratio in [0.0, 0.0099, -1.0, f32::NEG_INFINITY, f32::NAN] {
            assert_eq!(percentage(ratio, &Curve::CH4), 0.0);
            assert_eq!(percentage(ratio, &Curve::CO), 0.0);
        }
    }

    #[test]
    fn test_reference_point() {
        // Ratio at the reference point gives the reference concentration
        assert_close(percentage(powf(10.0, 0.484), &Curve::CH4), 199.526);
        assert_close(Curve::CO.ppm(1.0), 100.0);
    }

    #[test]
    fn test_one_decade_along_slope() {
        // One decade of ratio moves the concentration by 1/slope decades
        let ppm = Curve::CO.ppm(10.0);
        assert_close(ppm, powf(10.0, 2.0 - 1.0 / 0.6926));
    }

    #[test]
    fn test_falling_ratio_raises_ppm() {
        let clean = Curve::CH4.ppm(9.83);
        let dirty = Curve::CH4.ppm(2.0);

        assert!(dirty > clean);
        assert!(clean > 0.0);
    }

    #[test]
    fn test_infinite_ratio() {
        assert_eq!(Curve::CO.ppm(f32::INFINITY), 0.0);
    }
}
