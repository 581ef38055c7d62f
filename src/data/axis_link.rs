//! Views that share one reference horizontal axis and geometry while each
//! auto-scales its own vertical range.
//!
//! The reference view owns an observer list. Linking a member registers a
//! listener that copies the reference geometry and horizontal range into the
//! member; listeners run synchronously inside [`LinkedAxisGroup::on_reference_resized`]
//! and [`LinkedAxisGroup::set_x_range`], so no caller can observe a frame in
//! which a linked member disagrees with the reference.
//!
//! Members are shared with their listener through `Rc<RefCell<_>>`. The group
//! owns the reference and therefore always outlives its members' listeners.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::error::LinkError;

/// Screen-space rectangle of a drawable view, in logical points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl From<egui::Rect> for ViewRect {
    fn from(r: egui::Rect) -> Self {
        Self::new(r.min.x, r.min.y, r.width(), r.height())
    }
}

impl From<ViewRect> for egui::Rect {
    fn from(r: ViewRect) -> Self {
        egui::Rect::from_min_size(egui::pos2(r.x, r.y), egui::vec2(r.width, r.height))
    }
}

/// Closed numeric interval of an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl Default for AxisRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl AxisRange {
    /// Range used when there is no data to fit.
    pub const DEFAULT: AxisRange = AxisRange { min: 0.0, max: 1.0 };

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// `[0, headroom * max(values)]`, or [`AxisRange::DEFAULT`] when `values`
    /// is empty or the fitted upper bound is not positive.
    pub fn fit_from_zero(values: &[f64], headroom: f64) -> Self {
        let max = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(f64::NEG_INFINITY, f64::max);
        let upper = headroom * max;
        if upper.is_finite() && upper > 0.0 {
            Self::new(0.0, upper)
        } else {
            Self::DEFAULT
        }
    }

    /// Map `v` into `[0, 1]` relative to this range.
    pub fn normalize(&self, v: f64) -> f64 {
        let span = self.span();
        if span == 0.0 {
            0.0
        } else {
            (v - self.min) / span
        }
    }

    /// Inverse of [`normalize`](Self::normalize).
    pub fn denormalize(&self, f: f64) -> f64 {
        self.min + f * self.span()
    }
}

/// Index of a view inside a [`LinkedAxisGroup`]. The reference is always `ViewId::REFERENCE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(usize);

impl ViewId {
    pub const REFERENCE: ViewId = ViewId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// How a view obtains its vertical range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum YScale {
    /// Fit `[0, headroom * max]` to the view's own data.
    Auto { headroom: f64 },
    /// Copy the vertical range of another view (explicit opt-in).
    SharedWith(ViewId),
}

/// One drawable surface with its own vertical axis.
#[derive(Debug, Clone)]
pub struct PlotView {
    pub label: String,
    pub unit: Option<String>,
    pub geometry: ViewRect,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
    y_scale: YScale,
}

impl PlotView {
    pub fn new(label: impl Into<String>, unit: Option<&str>, headroom: f64) -> Self {
        Self {
            label: label.into(),
            unit: unit.map(str::to_string),
            geometry: ViewRect::default(),
            x_range: AxisRange::DEFAULT,
            y_range: AxisRange::DEFAULT,
            y_scale: YScale::Auto { headroom },
        }
    }

    pub fn y_scale(&self) -> YScale {
        self.y_scale
    }

    /// Axis caption, e.g. `Altitude [m]`.
    pub fn axis_label(&self) -> String {
        match &self.unit {
            Some(u) => format!("{} [{}]", self.label, u),
            None => self.label.clone(),
        }
    }
}

/// Observer invoked with the reference geometry and horizontal range.
pub type GeometryListener = Box<dyn FnMut(&ViewRect, &AxisRange)>;

/// Immutable copy of one view, as handed to the painter.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewFrame {
    pub id: ViewId,
    pub geometry: ViewRect,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
}

/// Everything a painter needs for one frame of the group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupFrame {
    pub reference: ViewFrame,
    pub members: Vec<ViewFrame>,
}

impl GroupFrame {
    /// True when every member is registered with the reference.
    pub fn is_registered(&self) -> bool {
        self.members.iter().all(|m| {
            m.geometry == self.reference.geometry && m.x_range == self.reference.x_range
        })
    }
}

pub struct LinkedAxisGroup {
    views: Vec<Rc<RefCell<PlotView>>>,
    linked: Vec<bool>,
    listeners: Vec<GeometryListener>,
}

impl LinkedAxisGroup {
    pub fn new(reference: PlotView) -> Self {
        Self {
            views: vec![Rc::new(RefCell::new(reference))],
            linked: vec![true],
            listeners: Vec::new(),
        }
    }

    /// Add a member view. It is not linked until [`link`](Self::link) is called.
    pub fn add_member(&mut self, view: PlotView) -> ViewId {
        self.views.push(Rc::new(RefCell::new(view)));
        self.linked.push(false);
        ViewId(self.views.len() - 1)
    }

    /// Tie `member`'s geometry and horizontal range to the reference.
    ///
    /// The member is synchronised immediately and on every later change.
    /// Linking an already-linked member is a no-op.
    pub fn link(&mut self, member: ViewId) -> Result<(), LinkError> {
        if member == ViewId::REFERENCE {
            return Err(LinkError::SelfLink(member));
        }
        let view = self
            .views
            .get(member.0)
            .cloned()
            .ok_or(LinkError::UnknownView(member))?;
        if self.linked[member.0] {
            return Ok(());
        }
        self.linked[member.0] = true;
        self.subscribe(Box::new(move |rect, x_range| {
            let mut v = view.borrow_mut();
            v.geometry = *rect;
            v.x_range = *x_range;
        }));
        Ok(())
    }

    pub fn is_linked(&self, id: ViewId) -> bool {
        self.linked.get(id.0).copied().unwrap_or(false)
    }

    /// Register an observer of the reference geometry. It is invoked once
    /// right away with the current state.
    pub fn subscribe(&mut self, mut listener: GeometryListener) {
        let (rect, x_range) = self.reference_state();
        listener(&rect, &x_range);
        self.listeners.push(listener);
    }

    /// Make `follower` use `leader`'s vertical range instead of its own.
    ///
    /// Scales are shared one level deep: a leader may not follow another view
    /// and a view that already leads may not become a follower.
    pub fn share_y_scale(&mut self, follower: ViewId, leader: ViewId) -> Result<(), LinkError> {
        if follower == leader {
            return Err(LinkError::SelfLink(follower));
        }
        let leader_view = self.views.get(leader.0).ok_or(LinkError::UnknownView(leader))?;
        if matches!(leader_view.borrow().y_scale, YScale::SharedWith(_)) {
            return Err(LinkError::ChainedScale(leader));
        }
        let follower_view = self
            .views
            .get(follower.0)
            .ok_or(LinkError::UnknownView(follower))?;
        let is_leader = self
            .views
            .iter()
            .any(|v| v.borrow().y_scale == YScale::SharedWith(follower));
        if is_leader {
            return Err(LinkError::ChainedScale(follower));
        }
        follower_view.borrow_mut().y_scale = YScale::SharedWith(leader);
        Ok(())
    }

    /// Callback for a change of the reference view's bounding geometry.
    ///
    /// Updates every linked member before returning. Returns `false` when the
    /// geometry did not change.
    pub fn on_reference_resized(&mut self, rect: ViewRect) -> bool {
        {
            let mut reference = self.views[0].borrow_mut();
            if reference.geometry == rect {
                return false;
            }
            reference.geometry = rect;
        }
        log::debug!("reference view resized to {:?}", rect);
        self.notify();
        true
    }

    /// Re-range the shared horizontal axis and propagate it to all members.
    pub fn set_x_range(&mut self, range: AxisRange) -> bool {
        {
            let mut reference = self.views[0].borrow_mut();
            if reference.x_range == range {
                return false;
            }
            reference.x_range = range;
        }
        self.notify();
        true
    }

    /// Fit `id`'s vertical range to `values`. Views that share another
    /// view's scale are left untouched until [`resolve_shared_scales`](Self::resolve_shared_scales).
    pub fn autorange(&mut self, id: ViewId, values: &[f64]) {
        if let Some(view) = self.views.get(id.0) {
            let mut v = view.borrow_mut();
            if let YScale::Auto { headroom } = v.y_scale {
                v.y_range = AxisRange::fit_from_zero(values, headroom);
            }
        }
    }

    /// Copy leader ranges into every view that opted into a shared scale.
    pub fn resolve_shared_scales(&mut self) {
        for view in &self.views {
            let leader = match view.borrow().y_scale {
                YScale::SharedWith(leader) => leader,
                YScale::Auto { .. } => continue,
            };
            if let Some(leader_view) = self.views.get(leader.0) {
                let range = leader_view.borrow().y_range;
                view.borrow_mut().y_range = range;
            }
        }
    }

    pub fn view(&self, id: ViewId) -> Option<Ref<'_, PlotView>> {
        self.views.get(id.0).map(|v| v.borrow())
    }

    pub fn ids(&self) -> impl Iterator<Item = ViewId> {
        (0..self.views.len()).map(ViewId)
    }

    pub fn member_ids(&self) -> impl Iterator<Item = ViewId> {
        (1..self.views.len()).map(ViewId)
    }

    pub fn reference_geometry(&self) -> ViewRect {
        self.views[0].borrow().geometry
    }

    pub fn x_range(&self) -> AxisRange {
        self.views[0].borrow().x_range
    }

    /// Snapshot of the linked views for painting.
    pub fn frame(&self) -> GroupFrame {
        let snap = |id: ViewId| {
            let v = self.views[id.0].borrow();
            ViewFrame {
                id,
                geometry: v.geometry,
                x_range: v.x_range,
                y_range: v.y_range,
            }
        };
        GroupFrame {
            reference: snap(ViewId::REFERENCE),
            members: self
                .member_ids()
                .filter(|id| self.is_linked(*id))
                .map(snap)
                .collect(),
        }
    }

    /// True when all linked members match the reference geometry and range.
    pub fn is_consistent(&self) -> bool {
        self.frame().is_registered()
    }

    fn reference_state(&self) -> (ViewRect, AxisRange) {
        let reference = self.views[0].borrow();
        (reference.geometry, reference.x_range)
    }

    fn notify(&mut self) {
        let (rect, x_range) = self.reference_state();
        for listener in self.listeners.iter_mut() {
            listener(&rect, &x_range);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_views_are_rejected() {
        let mut group = LinkedAxisGroup::new(PlotView::new("ref", None, 1.0));
        let stray = ViewId(7);
        assert_eq!(group.link(stray), Err(LinkError::UnknownView(stray)));
        assert_eq!(
            group.share_y_scale(stray, ViewId::REFERENCE),
            Err(LinkError::UnknownView(stray))
        );
    }
}
