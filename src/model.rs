use std::iter::Sum;
use std::ops::{Add, AddAssign};

use approx::abs_diff_eq;
use ordered_float::OrderedFloat;

/// Cost of traversing one or more edges of the graph.
/// Costs are totally ordered so they can key a priority queue, and are expected to be
/// non-negative: least-cost search gives no optimality guarantee for negative edge costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Cost(OrderedFloat<f64>);

impl Cost {
    pub const ZERO: Self = Self(OrderedFloat(0.0));
    pub const INFINITY: Self = Self(OrderedFloat(f64::INFINITY));

    pub const fn from_value(value: f64) -> Self {
        Self(OrderedFloat(value))
    }

    pub const fn value(&self) -> f64 {
        self.0.0
    }
}

impl Add for Cost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(OrderedFloat(self.0.0 + rhs.0.0))
    }
}

impl AddAssign for Cost {
    fn add_assign(&mut self, rhs: Self) {
        self.0.0 += rhs.0.0;
    }
}

impl Sum for Cost {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, cost| acc + cost)
    }
}

/// Coordinate pair of WGS84 latitude (lat) and longitude (lon) values, in degrees.
#[derive(Debug, Clone, Copy, Default)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        const EPSILON: f64 = 1e-9;
        abs_diff_eq!(self.lat, other.lat, epsilon = EPSILON)
            && abs_diff_eq!(self.lon, other.lon, epsilon = EPSILON)
    }
}

impl Coordinate {
    /// Straight-line distance in degrees, treating latitude and longitude as planar axes.
    pub fn planar_distance(&self, other: &Self) -> f64 {
        (self.lat - other.lat).hypot(self.lon - other.lon)
    }
}
