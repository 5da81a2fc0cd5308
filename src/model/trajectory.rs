// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Trajectory model.
//!
//! A [`Trajectory`] is an append-ordered sequence of [`TrajectoryPoint`]s.
//! Points are never reordered or deduplicated: the extraction passes append
//! them in record order.

use serde::Serialize;

/// One timestamped pose, velocity and acceleration sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryPoint {
    /// Time in seconds
    pub t: f64,
    /// Position `[x, y, z]`
    pub position: [f64; 3],
    /// Orientation as a unit quaternion `[x, y, z, w]`
    pub orientation: [f64; 4],
    pub linear_velocity: [f64; 3],
    pub angular_velocity: [f64; 3],
    /// Zero when the source record carries no acceleration
    pub linear_acceleration: [f64; 3],
    /// Zero when the source record carries no acceleration
    pub angular_acceleration: [f64; 3],
}

impl Default for TrajectoryPoint {
    fn default() -> Self {
        Self {
            t: 0.0,
            position: [0.0; 3],
            orientation: [0.0, 0.0, 0.0, 1.0],
            linear_velocity: [0.0; 3],
            angular_velocity: [0.0; 3],
            linear_acceleration: [0.0; 3],
            angular_acceleration: [0.0; 3],
        }
    }
}

impl TrajectoryPoint {
    /// Create a point at rest with identity orientation.
    pub fn new(t: f64, position: [f64; 3]) -> Self {
        Self {
            t,
            position,
            ..Self::default()
        }
    }

    /// Set the orientation quaternion `[x, y, z, w]`.
    pub fn with_orientation(mut self, orientation: [f64; 4]) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set linear and angular velocity.
    pub fn with_velocity(mut self, linear: [f64; 3], angular: [f64; 3]) -> Self {
        self.linear_velocity = linear;
        self.angular_velocity = angular;
        self
    }

    /// Set linear and angular acceleration.
    pub fn with_acceleration(mut self, linear: [f64; 3], angular: [f64; 3]) -> Self {
        self.linear_acceleration = linear;
        self.angular_acceleration = angular;
        self
    }

    /// Roll, pitch and yaw (static x-y-z axes) of the orientation.
    pub fn euler(&self) -> [f64; 3] {
        let [x, y, z, w] = self.orientation;
        let roll = (2.0 * (w * x + y * z)).atan2(1.0 - 2.0 * (x * x + y * y));
        let pitch = (2.0 * (w * y - z * x)).clamp(-1.0, 1.0).asin();
        let yaw = (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z));
        [roll, pitch, yaw]
    }
}

/// Coordinate projections of a trajectory's positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Coords {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

/// Ordered sequence of trajectory points.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trajectory {
    points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    /// Create an empty trajectory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point. No reordering takes place.
    pub fn push(&mut self, point: TrajectoryPoint) {
        self.points.push(point);
    }

    /// All points in append order.
    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }

    /// Time stamps of all points.
    pub fn times(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.t).collect()
    }

    /// Positions of all points.
    pub fn positions(&self) -> Vec<[f64; 3]> {
        self.points.iter().map(|p| p.position).collect()
    }

    /// Position coordinates split per axis.
    pub fn coords(&self) -> Coords {
        let mut coords = Coords::default();
        for p in &self.points {
            coords.x.push(p.position[0]);
            coords.y.push(p.position[1]);
            coords.z.push(p.position[2]);
        }
        coords
    }

    pub fn first(&self) -> Option<&TrajectoryPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&TrajectoryPoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sample the trajectory at time `t`.
    ///
    /// Vector fields are interpolated linearly and the orientation by
    /// normalized linear interpolation along the shorter arc. Times outside
    /// the trajectory clamp to the first or last point. Returns `None` for an
    /// empty trajectory.
    pub fn interpolate(&self, t: f64) -> Option<TrajectoryPoint> {
        let first = self.points.first()?;
        let last = self.points.last()?;

        if t <= first.t {
            return Some(TrajectoryPoint { t, ..*first });
        }
        if t >= last.t {
            return Some(TrajectoryPoint { t, ..*last });
        }

        // First point strictly after t; t > first.t guarantees idx >= 1
        let idx = self.points.partition_point(|p| p.t <= t);
        let a = &self.points[idx - 1];
        let b = &self.points[idx];
        let span = b.t - a.t;
        if span <= 0.0 {
            return Some(TrajectoryPoint { t, ..*a });
        }
        let alpha = (t - a.t) / span;

        Some(TrajectoryPoint {
            t,
            position: lerp(&a.position, &b.position, alpha),
            orientation: nlerp(&a.orientation, &b.orientation, alpha),
            linear_velocity: lerp(&a.linear_velocity, &b.linear_velocity, alpha),
            angular_velocity: lerp(&a.angular_velocity, &b.angular_velocity, alpha),
            linear_acceleration: lerp(&a.linear_acceleration, &b.linear_acceleration, alpha),
            angular_acceleration: lerp(&a.angular_acceleration, &b.angular_acceleration, alpha),
        })
    }
}

fn lerp(a: &[f64; 3], b: &[f64; 3], alpha: f64) -> [f64; 3] {
    [
        a[0] + alpha * (b[0] - a[0]),
        a[1] + alpha * (b[1] - a[1]),
        a[2] + alpha * (b[2] - a[2]),
    ]
}

fn nlerp(a: &[f64; 4], b: &[f64; 4], alpha: f64) -> [f64; 4] {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let sign = if dot < 0.0 { -1.0 } else { 1.0 };

    let mut q = [0.0; 4];
    for i in 0..4 {
        q[i] = (1.0 - alpha) * a[i] + alpha * sign * b[i];
    }
    let norm = q.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm < f64::EPSILON {
        return *a;
    }
    q.map(|v| v / norm)
}
