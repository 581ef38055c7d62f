//! The flight data engine: owns every buffer and view and advances them one
//! render tick at a time.
//!
//! Each [`FlightEngine::tick`] runs, in this order:
//!
//! 1. the ambient random walk of the atmospheric sounding,
//! 2. generation of the profile channels followed by the derived loudness
//!    channels (or draining of the external feed),
//! 3. pushing the new values into the per-channel [`SampleBuffer`]s,
//! 4. recomputing the replay window when replaying,
//! 5. handing each curve's points to the [`RenderHost`],
//! 6. auto-ranging every view and publishing the linked geometry.
//!
//! All mutation happens inside the tick or an input handler on the UI thread,
//! so nothing here is shared or locked.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crate::config::{AxisHeadroom, BoomPlotConfig, FeedMode, FlightProfiles};
use crate::controllers::{AngleController, GeometryController};
use crate::data::atmosphere::{AtmosphereProfile, AtmosphereSigma};
use crate::data::axis_link::{AxisRange, LinkedAxisGroup, PlotView, ViewId, ViewRect};
use crate::data::buffer::SampleBuffer;
use crate::data::channel::{Channel, FlightChannel};
use crate::data::dataset::{FlightDataset, FlightRecord, SeedData};
use crate::data::feed::{FeedPolicy, LoudnessConfig, StochasticFeed};
use crate::data::near_field::{NearFieldView, SignatureCurves};
use crate::data::window::TimeWindowSelector;
use crate::error::ConfigError;
use crate::sink::SampleCommand;

/// Receives curve data and view geometry from the engine.
pub trait RenderHost {
    fn set_series(&mut self, view: ViewId, points: Vec<[f64; 2]>);
    fn set_view_rect(&mut self, view: ViewId, rect: ViewRect);
}

/// [`RenderHost`] that keeps the latest series and rectangle per view for
/// the painter to read.
#[derive(Debug, Default, Clone)]
pub struct CurveCache {
    series: HashMap<ViewId, Vec<[f64; 2]>>,
    rects: HashMap<ViewId, ViewRect>,
}

impl CurveCache {
    pub fn series(&self, view: ViewId) -> &[[f64; 2]] {
        self.series.get(&view).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rect(&self, view: ViewId) -> Option<ViewRect> {
        self.rects.get(&view).copied()
    }
}

impl RenderHost for CurveCache {
    fn set_series(&mut self, view: ViewId, points: Vec<[f64; 2]>) {
        self.series.insert(view, points);
    }

    fn set_view_rect(&mut self, view: ViewId, rect: ViewRect) {
        self.rects.insert(view, rect);
    }
}

/// Per-channel state: presentation, rolling buffer and the view it draws into.
#[derive(Debug, Clone)]
pub struct ChannelState {
    pub channel: Channel,
    pub buffer: SampleBuffer,
    pub view: ViewId,
}

/// Outcome of one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSummary {
    /// Index of the tick that just ran (0-based).
    pub tick: u64,
    /// Values pushed into flight buffers during the tick.
    pub new_samples: usize,
    /// Visible dataset rows, when replaying.
    pub window: Option<Range<usize>>,
}

enum FeedSource {
    Synthetic,
    Replay {
        dataset: FlightDataset,
        selector: TimeWindowSelector,
        loudness_baseline: Vec<f64>,
        loudness_optimum: Vec<f64>,
    },
    External {
        rx: Receiver<SampleCommand>,
    },
}

/// One buffer mutation produced in step 2 and applied in step 3.
enum Update {
    Sample(FlightChannel, f64),
    Clear(FlightChannel),
}

pub struct FlightEngine {
    feed: StochasticFeed,
    source: FeedSource,
    tick: u64,
    tick_period: Duration,
    profiles: FlightProfiles,
    loudness: LoudnessConfig,
    atmosphere_sigma: AtmosphereSigma,
    channels: Vec<ChannelState>,
    axes: LinkedAxisGroup,
    atmosphere: AtmosphereProfile,
    near_field: NearFieldView,
    window: Option<Range<usize>>,
}

impl FlightEngine {
    /// Build the engine from a validated config and the loaded seed data.
    ///
    /// `external` is the receiving end of [`channel_samples`](crate::sink::channel_samples)
    /// and is required in [`FeedMode::External`].
    pub fn new(
        cfg: &BoomPlotConfig,
        seed: SeedData,
        external: Option<Receiver<SampleCommand>>,
    ) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let mut feed = StochasticFeed::new(cfg.seed);

        let source = match cfg.mode {
            FeedMode::Synthetic => FeedSource::Synthetic,
            FeedMode::Replay => {
                let dataset = seed.replay.ok_or(ConfigError::MissingReplayData)?;
                let lc = cfg.loudness;
                let loudness_baseline = dataset
                    .rows()
                    .iter()
                    .map(|r| feed.derive_loudness(&lc, &lc.baseline, r.mach))
                    .collect();
                let loudness_optimum = dataset
                    .rows()
                    .iter()
                    .map(|r| feed.derive_loudness(&lc, &lc.optimum, r.mach))
                    .collect();
                FeedSource::Replay {
                    dataset,
                    selector: TimeWindowSelector::new(cfg.max_points),
                    loudness_baseline,
                    loudness_optimum,
                }
            }
            FeedMode::External => FeedSource::External {
                rx: external.ok_or(ConfigError::MissingSampleReceiver)?,
            },
        };
        log::info!("flight feed mode: {:?}", cfg.mode);

        let (axes, channels) = build_views(cfg.buffer_capacity, &cfg.headroom)?;

        Ok(Self {
            feed,
            source,
            tick: 0,
            tick_period: cfg.tick_period(),
            profiles: cfg.profiles,
            loudness: cfg.loudness,
            atmosphere_sigma: cfg.atmosphere.sigma,
            channels,
            axes,
            atmosphere: seed.atmosphere,
            near_field: NearFieldView::new(seed.near_field, seed.ground, &cfg.near_field),
            window: None,
        })
    }

    pub fn mode(&self) -> FeedMode {
        match self.source {
            FeedSource::Synthetic => FeedMode::Synthetic,
            FeedSource::Replay { .. } => FeedMode::Replay,
            FeedSource::External { .. } => FeedMode::External,
        }
    }

    /// Number of ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    pub fn channels(&self) -> &[ChannelState] {
        &self.channels
    }

    pub fn channel(&self, id: FlightChannel) -> &ChannelState {
        &self.channels[channel_index(id)]
    }

    pub fn channel_mut(&mut self, id: FlightChannel) -> &mut ChannelState {
        &mut self.channels[channel_index(id)]
    }

    pub fn axes(&self) -> &LinkedAxisGroup {
        &self.axes
    }

    pub fn atmosphere(&self) -> &AtmosphereProfile {
        &self.atmosphere
    }

    pub fn near_field(&self) -> &NearFieldView {
        &self.near_field
    }

    /// Rows visible after the last tick, in replay mode.
    pub fn window(&self) -> Option<Range<usize>> {
        self.window.clone()
    }

    pub fn dataset(&self) -> Option<&FlightDataset> {
        match &self.source {
            FeedSource::Replay { dataset, .. } => Some(dataset),
            _ => None,
        }
    }

    /// Run one render tick. `elapsed` is the replay clock (wall-clock time
    /// since playback started); it is ignored outside replay mode.
    pub fn tick(&mut self, elapsed: Duration, host: &mut dyn RenderHost) -> TickSummary {
        // 1. ambient
        self.atmosphere.walk(&mut self.feed, &self.atmosphere_sigma);

        // 2. profile channels, then derived channels
        let updates = match self.mode() {
            FeedMode::Synthetic => self.generate_synthetic(),
            FeedMode::External => self.drain_external(),
            FeedMode::Replay => Vec::new(),
        };

        // 3. buffers
        let mut new_samples = 0;
        for update in updates {
            match update {
                Update::Sample(ch, v) => {
                    let tick = self.tick;
                    self.channel_mut(ch).buffer.push_at(tick, v);
                    new_samples += 1;
                }
                Update::Clear(ch) => self.channel_mut(ch).buffer.clear(),
            }
        }

        // 4. replay window
        let window = self.select_window(elapsed);
        if window != self.window {
            log::debug!("replay window now {:?}", window);
        }
        self.window = window.clone();

        // 5. curves
        let series: Vec<(ViewId, Vec<[f64; 2]>)> = self
            .channels
            .iter()
            .map(|state| (state.view, self.series_for(state, window.as_ref())))
            .collect();

        // 6. ranges and geometry
        let x_range = self.shared_x_range(window.as_ref());
        self.axes.set_x_range(x_range);
        for (view, points) in &series {
            let ys: Vec<f64> = points.iter().map(|p| p[1]).collect();
            self.axes.autorange(*view, &ys);
        }
        self.axes.resolve_shared_scales();
        for (view, points) in series {
            host.set_series(view, points);
        }
        self.publish_geometry(host);

        let summary = TickSummary {
            tick: self.tick,
            new_samples,
            window,
        };
        self.tick += 1;
        summary
    }

    /// The reference view changed size: propagate to every member and the host.
    pub fn resize_reference(&mut self, rect: ViewRect, host: &mut dyn RenderHost) -> bool {
        if !self.axes.on_reference_resized(rect) {
            return false;
        }
        self.publish_geometry(host);
        true
    }

    /// Handle an azimuth input event. Runs immediately, between ticks.
    pub fn set_azimuth(&mut self, degrees: i32) -> &SignatureCurves {
        self.near_field.set_angle(degrees)
    }

    /// Apply a pending controller request, if any, and notify its subscribers.
    pub fn poll_angle_controller(&mut self, ctrl: &AngleController) -> bool {
        match ctrl.take_request() {
            Some(degrees) => {
                let curves = self.near_field.set_angle(degrees);
                ctrl.publish(curves);
                true
            }
            None => false,
        }
    }

    /// Forward every reference geometry change to `ctrl`.
    pub fn attach_geometry_controller(&mut self, ctrl: GeometryController) {
        self.axes.subscribe(Box::new(move |rect, _| {
            if rect.width > 0.0 && rect.height > 0.0 {
                ctrl.publish(*rect);
            }
        }));
    }

    fn generate_synthetic(&mut self) -> Vec<Update> {
        let t = self.tick;
        let mut updates = Vec::with_capacity(FlightChannel::ALL.len());
        let mut mach = 0.0;
        for ch in [
            FlightChannel::AngleOfAttack,
            FlightChannel::Mach,
            FlightChannel::Altitude,
        ] {
            let Some(profile) = self.profiles.for_channel(ch).copied() else {
                continue;
            };
            let current = self.channel(ch).buffer.latest().unwrap_or(profile.start);
            let v = self.feed.next_value(&FeedPolicy::Phase(profile), current, t);
            if ch == FlightChannel::Mach {
                mach = v;
            }
            updates.push(Update::Sample(ch, v));
        }
        self.derive_from_mach(mach, &mut updates);
        updates
    }

    fn drain_external(&mut self) -> Vec<Update> {
        let commands: Vec<SampleCommand> = match &self.source {
            FeedSource::External { rx } => rx.try_iter().collect(),
            _ => return Vec::new(),
        };
        let mut updates = Vec::new();
        for cmd in commands {
            match cmd {
                SampleCommand::Push { channel, value } => {
                    self.accept_external(channel, value, &mut updates)
                }
                SampleCommand::PushMany { channel, values } => {
                    for v in values {
                        self.accept_external(channel, v, &mut updates);
                    }
                }
                SampleCommand::Clear { channel } => {
                    updates.push(Update::Clear(channel));
                    // loudness derived from the removed Mach values goes with them
                    if channel == FlightChannel::Mach {
                        updates.push(Update::Clear(FlightChannel::LoudnessBaseline));
                        updates.push(Update::Clear(FlightChannel::LoudnessOptimum));
                    }
                }
            }
        }
        updates
    }

    fn accept_external(&mut self, channel: FlightChannel, value: f64, updates: &mut Vec<Update>) {
        if channel.is_derived() {
            log::warn!("ignoring external sample for derived channel {:?}", channel);
            return;
        }
        updates.push(Update::Sample(channel, value));
        if channel == FlightChannel::Mach {
            self.derive_from_mach(value, updates);
        }
    }

    fn derive_from_mach(&mut self, mach: f64, updates: &mut Vec<Update>) {
        let lc = self.loudness;
        let base = self.feed.derive_loudness(&lc, &lc.baseline, mach);
        let opt = self.feed.derive_loudness(&lc, &lc.optimum, mach);
        updates.push(Update::Sample(FlightChannel::LoudnessBaseline, base));
        updates.push(Update::Sample(FlightChannel::LoudnessOptimum, opt));
    }

    fn select_window(&self, elapsed: Duration) -> Option<Range<usize>> {
        match &self.source {
            FeedSource::Replay {
                dataset, selector, ..
            } => Some(selector.select(dataset.times(), elapsed.as_secs_f64())),
            _ => None,
        }
    }

    fn series_for(&self, state: &ChannelState, window: Option<&Range<usize>>) -> Vec<[f64; 2]> {
        match (&self.source, window) {
            (
                FeedSource::Replay {
                    dataset,
                    loudness_baseline,
                    loudness_optimum,
                    ..
                },
                Some(range),
            ) => dataset.rows()[range.clone()]
                .iter()
                .zip(range.clone())
                .map(|(row, i)| {
                    let y = match state.channel.id {
                        FlightChannel::LoudnessBaseline => loudness_baseline[i],
                        FlightChannel::LoudnessOptimum => loudness_optimum[i],
                        other => replay_value(row, other),
                    };
                    [row.time, y]
                })
                .collect(),
            _ => {
                let dt = self.tick_period.as_secs_f64();
                state
                    .buffer
                    .iter_stamped()
                    .map(|(tick, v)| [tick as f64 * dt, v])
                    .collect()
            }
        }
    }

    fn shared_x_range(&self, window: Option<&Range<usize>>) -> AxisRange {
        if let (Some(ds), Some(range)) = (self.dataset(), window) {
            let times = ds.times();
            if let (Some(lo), Some(hi)) = (times.get(range.start), times.get(range.end.saturating_sub(1))) {
                return AxisRange::new(*lo, *hi);
            }
        }
        // the tick being run is the newest stamp any buffer can hold
        let dt = self.tick_period.as_secs_f64();
        let capacity = self
            .channels
            .first()
            .map(|c| c.buffer.capacity())
            .unwrap_or(1);
        let hi = self.tick as f64 * dt;
        AxisRange::new(hi - (capacity - 1) as f64 * dt, hi)
    }

    fn publish_geometry(&self, host: &mut dyn RenderHost) {
        for id in self.axes.ids() {
            if let Some(view) = self.axes.view(id) {
                host.set_view_rect(id, view.geometry);
            }
        }
    }
}

fn channel_index(id: FlightChannel) -> usize {
    FlightChannel::ALL
        .iter()
        .position(|c| *c == id)
        .unwrap_or_default()
}

fn replay_value(row: &FlightRecord, channel: FlightChannel) -> f64 {
    match channel {
        FlightChannel::Altitude => row.altitude,
        FlightChannel::Mach => row.mach,
        FlightChannel::AngleOfAttack => row.angle_of_attack,
        FlightChannel::LoudnessBaseline | FlightChannel::LoudnessOptimum => 0.0,
    }
}

/// Altitude owns the reference axis; every other channel is a linked member.
/// The optimum loudness curve shares the baseline loudness scale.
fn build_views(
    capacity: usize,
    headroom: &AxisHeadroom,
) -> Result<(LinkedAxisGroup, Vec<ChannelState>), ConfigError> {
    let view_for = |ch: FlightChannel| PlotView::new(ch.name(), ch.unit(), headroom.for_channel(ch));
    let mut axes = LinkedAxisGroup::new(view_for(FlightChannel::Altitude));
    let mut channels = Vec::with_capacity(FlightChannel::ALL.len());
    for ch in FlightChannel::ALL {
        let view = if ch == FlightChannel::Altitude {
            ViewId::REFERENCE
        } else {
            let id = axes.add_member(view_for(ch));
            link_member(&mut axes, id);
            id
        };
        channels.push(ChannelState {
            channel: Channel::new(ch),
            buffer: SampleBuffer::new(capacity)?,
            view,
        });
    }
    let base = channels[channel_index(FlightChannel::LoudnessBaseline)].view;
    let opt = channels[channel_index(FlightChannel::LoudnessOptimum)].view;
    if let Err(e) = axes.share_y_scale(opt, base) {
        log::warn!("could not share loudness scale: {}", e);
    }
    Ok((axes, channels))
}

fn link_member(axes: &mut LinkedAxisGroup, id: ViewId) {
    if let Err(e) = axes.link(id) {
        // ids come straight from add_member, so this only fires on a logic error
        log::error!("failed to link view {:?}: {}", id, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_cache_keeps_latest_per_view() {
        let mut cache = CurveCache::default();
        cache.set_series(ViewId::REFERENCE, vec![[0.0, 1.0]]);
        cache.set_series(ViewId::REFERENCE, vec![[1.0, 2.0], [2.0, 3.0]]);
        assert_eq!(cache.series(ViewId::REFERENCE), &[[1.0, 2.0], [2.0, 3.0]]);
        assert!(cache.rect(ViewId::REFERENCE).is_none());
    }

    #[test]
    fn channel_order_matches_axis_order() {
        for (i, ch) in FlightChannel::ALL.iter().enumerate() {
            assert_eq!(channel_index(*ch), i);
        }
    }
}
