//! Example: Flight samples from an external producer
//!
//! What it demonstrates
//! - Switching the panel to `FeedMode::External` and feeding it through a `SampleSink`.
//! - Loudness curves being derived from the pushed Mach values.
//!
//! How to run
//! ```bash
//! cargo run --example external_feed
//! ```
//! You should see altitude climb, Mach accelerate through 1.0 and the
//! loudness curves leave the floor once the flight goes supersonic.

use std::time::Duration;

use boomplot::{channel_samples, run_boomplot_with_feed, BoomPlotConfig, FeedMode, FlightChannel, RunError};

fn main() -> Result<(), RunError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (sink, rx) = channel_samples();

    // Producer: one sample per channel every 50 ms
    std::thread::spawn(move || {
        let dt = Duration::from_millis(50);
        let mut n: u64 = 0;
        loop {
            let t = n as f64 * dt.as_secs_f64();
            let mach = (0.02 * t).min(1.6);
            let altitude = (150.0 * t).min(10_000.0);
            let aoa = 6.0 - (0.1 * t).min(3.7);
            // Ignore errors if the UI closed (receiver dropped)
            let _ = sink.push(FlightChannel::Altitude, altitude);
            let _ = sink.push(FlightChannel::AngleOfAttack, aoa);
            let _ = sink.push(FlightChannel::Mach, mach);
            n = n.wrapping_add(1);
            std::thread::sleep(dt);
        }
    });

    let cfg = BoomPlotConfig {
        mode: FeedMode::External,
        ..Default::default()
    };
    run_boomplot_with_feed(cfg, rx)
}
