//! Polar projection for the temperature spiral
//!
//! Angles start at north and run clockwise. Month `m` sits at
//! `(m - 1) * 30°`, the same angle as its tick label. Radii between
//! `r_min` and `r_max` are mapped onto the unit disk so the renderer can draw
//! in an ordinary Cartesian chart.

use std::f64::consts::PI;

/// Degrees between consecutive months
pub const DEGREES_PER_MONTH: f64 = 30.0;

/// Month tick labels, January at north
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Angle of a calendar month in radians
pub fn month_angle(month: u32) -> f64 {
    (month.saturating_sub(1) as f64 * DEGREES_PER_MONTH).to_radians()
}

/// Maps (angle, radius) pairs onto the unit disk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarProjection {
    r_min: f64,
    r_max: f64,
}

impl PolarProjection {
    pub fn new(r_min: f64, r_max: f64) -> Self {
        Self { r_min, r_max }
    }

    pub fn r_min(&self) -> f64 {
        self.r_min
    }

    pub fn r_max(&self) -> f64 {
        self.r_max
    }

    /// Fraction of the disk radius for a data radius (0 at center, 1 at edge)
    pub fn rho(&self, r: f64) -> f64 {
        let span = self.r_max - self.r_min;
        if span <= 0.0 {
            return 0.0;
        }
        (r - self.r_min) / span
    }

    /// Cartesian point for an angle (radians, clockwise from north) and radius
    pub fn to_cartesian(&self, theta: f64, r: f64) -> (f64, f64) {
        let rho = self.rho(r);
        (rho * theta.sin(), rho * theta.cos())
    }

    /// Cartesian point for a month and radius
    pub fn project_month(&self, month: u32, r: f64) -> (f64, f64) {
        self.to_cartesian(month_angle(month), r)
    }

    /// Closed polyline approximating a circle at data radius `r`
    pub fn ring(&self, r: f64, segments: usize) -> Vec<(f64, f64)> {
        let segments = segments.max(3);
        (0..=segments)
            .map(|i| self.to_cartesian(2.0 * PI * i as f64 / segments as f64, r))
            .collect()
    }

    /// Evenly spaced grid radii strictly inside (r_min, r_max]
    pub fn grid_radii(&self, count: usize) -> Vec<f64> {
        let span = self.r_max - self.r_min;
        (1..=count)
            .map(|i| self.r_min + span * i as f64 / count as f64)
            .collect()
    }
}
