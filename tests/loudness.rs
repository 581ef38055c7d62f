use boomplot::data::feed::{FeedPolicy, LoudnessConfig, PhaseProfile, StochasticFeed};

#[test]
fn supersonic_loudness_follows_power_law() {
    let cfg = LoudnessConfig::default();
    let mut feed = StochasticFeed::new(Some(42));
    let expected = 83.0 * 1.6f64.sqrt();
    for _ in 0..100 {
        let pl = feed.derive_loudness(&cfg, &cfg.baseline, 1.6);
        // five standard deviations
        assert!((pl - expected).abs() < 2.5, "{pl} vs {expected}");
    }
}

#[test]
fn noiseless_model_is_exact() {
    let mut cfg = LoudnessConfig::default();
    cfg.optimum.sigma = 0.0;
    let mut feed = StochasticFeed::new(Some(1));
    let pl = feed.derive_loudness(&cfg, &cfg.optimum, 1.6);
    assert_eq!(pl, 80.0 * 1.6f64.powf(0.4));
}

#[test]
fn subsonic_and_threshold_report_exact_floor() {
    let cfg = LoudnessConfig::default();
    let mut feed = StochasticFeed::new(Some(3));
    assert_eq!(feed.derive_loudness(&cfg, &cfg.baseline, 0.9), 0.1);
    assert_eq!(feed.derive_loudness(&cfg, &cfg.baseline, 1.0), 0.1);
    assert_eq!(feed.derive_loudness(&cfg, &cfg.optimum, 0.0), 0.1);
}

#[test]
fn phase_profile_ramps_then_holds() {
    let p = PhaseProfile {
        start: 0.0,
        ramp_end: 10.0,
        target: 12.0,
        peak_tick: 10,
        sigma_before: 0.0,
        sigma_after: 0.0,
    };
    let mut feed = StochasticFeed::new(Some(9));
    assert_eq!(feed.next_value(&FeedPolicy::Phase(p), 99.0, 0), 0.0);
    assert_eq!(feed.next_value(&FeedPolicy::Phase(p), 0.0, 5), 5.0);
    assert_eq!(feed.next_value(&FeedPolicy::Phase(p), 0.0, 10), 12.0);
    assert_eq!(feed.next_value(&FeedPolicy::Phase(p), 0.0, 5000), 12.0);
}

#[test]
fn same_seed_same_stream() {
    let mut a = StochasticFeed::new(Some(11));
    let mut b = StochasticFeed::new(Some(11));
    let walk = FeedPolicy::RandomWalk { sigma: 1.0 };
    let (mut va, mut vb) = (0.0, 0.0);
    for t in 0..50 {
        va = a.next_value(&walk, va, t);
        vb = b.next_value(&walk, vb, t);
    }
    assert_eq!(va, vb);
}
