//! Near-field and ground pressure signatures at a user-selected azimuth.
//!
//! The azimuth comes from the control surface, which clamps it to
//! [`AZIMUTH_MIN`]..=[`AZIMUTH_MAX`]; this module assumes it is in range.
//! Recomputing is a pure function of the angle and the baseline data, so
//! setting the same angle twice produces identical curves.

use serde::{Deserialize, Serialize};

pub const AZIMUTH_MIN: i32 = -90;
pub const AZIMUTH_MAX: i32 = 90;

/// A `(position, pressure)` signature.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    pub position: Vec<f64>,
    pub pressure: Vec<f64>,
}

impl Signature {
    pub fn len(&self) -> usize {
        self.position.len().min(self.pressure.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Same positions with every pressure multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Signature {
        Signature {
            position: self.position.clone(),
            pressure: self.pressure.iter().map(|p| p * factor).collect(),
        }
    }

    /// The signature as seen at `angle_deg`.
    pub fn at_angle(&self, angle_deg: f64) -> Signature {
        Signature {
            position: self.position.clone(),
            pressure: pressure_at_angle(&self.pressure, angle_deg),
        }
    }

    pub fn points(&self) -> Vec<[f64; 2]> {
        self.position
            .iter()
            .zip(self.pressure.iter())
            .map(|(x, p)| [*x, *p])
            .collect()
    }
}

/// `p * cos(a) + p^2 * |sin(a)|` for every baseline pressure `p`.
pub fn pressure_at_angle(baseline: &[f64], angle_deg: f64) -> Vec<f64> {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let sin = sin.abs();
    baseline.iter().map(|p| p * cos + p * p * sin).collect()
}

/// Clamp a raw control value into the supported azimuth range.
pub fn clamp_azimuth(angle_deg: i32) -> i32 {
    angle_deg.clamp(AZIMUTH_MIN, AZIMUTH_MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NearFieldConfig {
    /// Scale of the optimum signature relative to the baseline.
    pub optimum_scale: f64,
    /// Azimuth shown at startup, in degrees.
    pub initial_azimuth: i32,
}

impl Default for NearFieldConfig {
    fn default() -> Self {
        Self {
            optimum_scale: 0.8,
            initial_azimuth: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleState {
    Idle,
    AngleChanged,
}

/// The curves displayed for the current azimuth.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignatureCurves {
    pub azimuth: i32,
    pub baseline: Signature,
    pub optimum: Signature,
    pub ground: Option<Signature>,
}

/// Baseline data plus the curves derived from it for the current azimuth.
#[derive(Debug, Clone)]
pub struct NearFieldView {
    baseline: Signature,
    ground: Option<Signature>,
    optimum_scale: f64,
    state: AngleState,
    curves: SignatureCurves,
}

impl NearFieldView {
    pub fn new(baseline: Signature, ground: Option<Signature>, cfg: &NearFieldConfig) -> Self {
        let mut view = Self {
            baseline,
            ground,
            optimum_scale: cfg.optimum_scale,
            state: AngleState::Idle,
            curves: SignatureCurves::default(),
        };
        view.set_angle(cfg.initial_azimuth);
        view
    }

    pub fn state(&self) -> AngleState {
        self.state
    }

    pub fn azimuth(&self) -> i32 {
        self.curves.azimuth
    }

    pub fn baseline(&self) -> &Signature {
        &self.baseline
    }

    pub fn curves(&self) -> &SignatureCurves {
        &self.curves
    }

    /// Handle one control input: recompute the dependent curves immediately.
    ///
    /// Runs on every input event, independent of the render tick.
    pub fn set_angle(&mut self, azimuth: i32) -> &SignatureCurves {
        debug_assert!((AZIMUTH_MIN..=AZIMUTH_MAX).contains(&azimuth));
        self.state = AngleState::AngleChanged;
        let angle = f64::from(azimuth);
        self.curves = SignatureCurves {
            azimuth,
            baseline: self.baseline.at_angle(angle),
            optimum: self.baseline.scaled(self.optimum_scale).at_angle(angle),
            ground: self.ground.as_ref().map(|g| g.at_angle(angle)),
        };
        log::debug!("near-field azimuth set to {} deg", azimuth);
        self.state = AngleState::Idle;
        &self.curves
    }
}
