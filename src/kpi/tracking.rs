// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Tracking error metrics.

use crate::core::{EvalError, Result};
use crate::recording::Recording;
use crate::tracking::{ErrorSet, ErrorTag, ErrorValue};

use super::{Kpi, KpiKind};

/// Error component and time window shared by the error metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ErrorWindow {
    tag: ErrorTag,
    time_offset: f64,
}

impl ErrorWindow {
    fn values(&self, recording: &Recording) -> Result<Vec<ErrorValue>> {
        let values = ErrorSet::from_recording(recording)?.values(self.tag, self.time_offset)?;
        if values.is_empty() {
            return Err(EvalError::insufficient_data(format!(
                "no {} error samples after t = {}",
                self.tag, self.time_offset
            )));
        }
        Ok(values)
    }

    fn magnitudes(&self, recording: &Recording) -> Result<Vec<f64>> {
        Ok(self
            .values(recording)?
            .iter()
            .map(ErrorValue::magnitude)
            .collect())
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

macro_rules! error_kpi {
    ($(#[$doc:meta])* $name:ident, $kind:expr, $label:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name {
            window: ErrorWindow,
        }

        impl $name {
            pub fn new(tag: ErrorTag) -> Self {
                Self {
                    window: ErrorWindow {
                        tag,
                        time_offset: 0.0,
                    },
                }
            }

            /// Ignore error samples stamped before `time_offset` seconds.
            pub fn with_time_offset(mut self, time_offset: f64) -> Self {
                self.window.time_offset = time_offset;
                self
            }

            pub fn error_tag(&self) -> ErrorTag {
                self.window.tag
            }

            pub fn time_offset(&self) -> f64 {
                self.window.time_offset
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new(ErrorTag::Position)
            }
        }

        impl Kpi for $name {
            fn kind(&self) -> KpiKind {
                $kind
            }

            fn full_tag(&self) -> String {
                format!("{}_{}", self.tag(), self.window.tag)
            }

            fn label(&self) -> String {
                format!("{} ({})", $label, self.window.tag)
            }

            fn evaluate(&self, recording: &Recording) -> Result<f64> {
                self.compute(recording)
            }
        }
    };
}

error_kpi!(
    /// Root mean square of the error magnitudes.
    RmsError,
    KpiKind::Rmse,
    "RMS error"
);

error_kpi!(
    /// Largest error magnitude.
    MaxError,
    KpiKind::MaxError,
    "Max. error"
);

error_kpi!(
    /// Mean of the error magnitudes.
    MeanAbsoluteError,
    KpiKind::Mae,
    "Mean abs. error"
);

error_kpi!(
    /// Norm of the mean error. For scalar components this is the absolute
    /// value of the mean, so opposite signs cancel.
    EuclideanError,
    KpiKind::EuclideanError,
    "Euclidean error"
);

impl RmsError {
    fn compute(&self, recording: &Recording) -> Result<f64> {
        let squares: Vec<f64> = self
            .window
            .magnitudes(recording)?
            .into_iter()
            .map(|m| m * m)
            .collect();
        Ok(mean(&squares).sqrt())
    }
}

impl MaxError {
    fn compute(&self, recording: &Recording) -> Result<f64> {
        Ok(self
            .window
            .magnitudes(recording)?
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max))
    }
}

impl MeanAbsoluteError {
    fn compute(&self, recording: &Recording) -> Result<f64> {
        Ok(mean(&self.window.magnitudes(recording)?))
    }
}

impl EuclideanError {
    fn compute(&self, recording: &Recording) -> Result<f64> {
        let values = self.window.values(recording)?;
        let mut sum = [0.0; 3];
        for value in &values {
            match value {
                ErrorValue::Scalar(v) => sum[0] += v,
                ErrorValue::Vector(v) => {
                    sum[0] += v[0];
                    sum[1] += v[1];
                    sum[2] += v[2];
                }
            }
        }
        let n = values.len() as f64;
        Ok(ErrorValue::Vector([sum[0] / n, sum[1] / n, sum[2] / n]).magnitude())
    }
}
