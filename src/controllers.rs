//! Controllers for interacting with the panel from external code.
//!
//! The controllers expose lightweight state and a subscription mechanism so
//! non-UI code can observe the flight-view geometry and drive the azimuth
//! control. Requests are picked up by the UI on its next frame.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::data::axis_link::ViewRect;
use crate::data::near_field::{clamp_azimuth, SignatureCurves};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Controller to observe the reference geometry of the linked flight views.
#[derive(Clone)]
pub struct GeometryController {
    pub(crate) inner: Arc<Mutex<GeometryCtrlInner>>, // crate-visible for UI
}

pub(crate) struct GeometryCtrlInner {
    pub(crate) current: Option<ViewRect>,
    pub(crate) listeners: Vec<Sender<ViewRect>>,
}

impl Default for GeometryController {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometryController {
    /// Create a fresh controller.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(GeometryCtrlInner {
                current: None,
                listeners: Vec::new(),
            })),
        }
    }

    /// Last published reference rectangle (if any frame was laid out yet).
    pub fn current_rect(&self) -> Option<ViewRect> {
        lock(&self.inner).current
    }

    /// Subscribe to every reference geometry change.
    pub fn subscribe(&self) -> Receiver<ViewRect> {
        let (tx, rx) = std::sync::mpsc::channel();
        lock(&self.inner).listeners.push(tx);
        rx
    }

    /// Record and broadcast a new rectangle. Dropped subscribers are pruned.
    pub(crate) fn publish(&self, rect: ViewRect) {
        let mut inner = lock(&self.inner);
        inner.current = Some(rect);
        inner.listeners.retain(|s| s.send(rect).is_ok());
    }
}

/// Controller for the near-field azimuth control surface.
///
/// Requests are clamped to the supported range here, so the engine never
/// sees an out-of-range angle.
#[derive(Clone)]
pub struct AngleController {
    pub(crate) inner: Arc<Mutex<AngleCtrlInner>>, // crate-visible for UI
}

pub(crate) struct AngleCtrlInner {
    pub(crate) current: i32,
    pub(crate) request: Option<i32>,
    pub(crate) listeners: Vec<Sender<SignatureCurves>>,
}

impl Default for AngleController {
    fn default() -> Self {
        Self::new()
    }
}

impl AngleController {
    /// Create a fresh controller.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(AngleCtrlInner {
                current: 0,
                request: None,
                listeners: Vec::new(),
            })),
        }
    }

    /// Request a new azimuth in degrees; clamped to [-90, 90].
    pub fn request_azimuth(&self, degrees: i32) {
        lock(&self.inner).request = Some(clamp_azimuth(degrees));
    }

    /// The azimuth most recently applied by the UI.
    pub fn current_azimuth(&self) -> i32 {
        lock(&self.inner).current
    }

    /// Subscribe to the curves recomputed after every azimuth change.
    pub fn subscribe(&self) -> Receiver<SignatureCurves> {
        let (tx, rx) = std::sync::mpsc::channel();
        lock(&self.inner).listeners.push(tx);
        rx
    }

    pub(crate) fn take_request(&self) -> Option<i32> {
        lock(&self.inner).request.take()
    }

    pub(crate) fn publish(&self, curves: &SignatureCurves) {
        let mut inner = lock(&self.inner);
        inner.current = curves.azimuth;
        inner.listeners.retain(|s| s.send(curves.clone()).is_ok());
    }
}
