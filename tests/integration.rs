// Integration tests (native) for the `typewriter-toy` crate.
// A recording host stands in for the page so the whole session, effects and
// animation driver run under `cargo test` on the host.

mod support;

use support::RecordingHost;
use typewriter_toy::effects::EffectTimer;
use typewriter_toy::words::Dictionary;
use typewriter_toy::{
    Animation, AnimationDriver, Key, KeyOutcome, Session, SoundCue, Trigger, TypewriterConfig,
};

const FRAME_MS: f64 = 16.0;

fn session() -> Session<u32> {
    Session::with_seed(TypewriterConfig::default(), 7)
}

fn session_with_max(max_chars: usize) -> Session<u32> {
    Session::with_seed(
        TypewriterConfig {
            max_chars,
            ..TypewriterConfig::default()
        },
        7,
    )
}

fn type_str(s: &mut Session<u32>, host: &mut RecordingHost, text: &str) {
    for c in text.chars() {
        s.handle_key(Key::Char(c), 0.0, host);
    }
}

/// Tick from `from` to `to` inclusive, returning every timer that fired.
fn run_frames(
    driver: &mut AnimationDriver,
    s: &mut Session<u32>,
    host: &mut RecordingHost,
    from: f64,
    to: f64,
) -> Vec<EffectTimer> {
    let mut fired = Vec::new();
    let mut now = from;
    while now <= to {
        fired.extend(driver.tick(s, now, host).fired);
        now += FRAME_MS;
    }
    fired
}

#[test]
fn typing_shrinks_font_monotonically() {
    let mut s = session();
    let mut host = RecordingHost::new();
    for c in "cat".chars() {
        assert_eq!(s.handle_key(Key::Char(c), 0.0, &mut host), KeyOutcome::Appended);
    }
    let sizes: Vec<f64> = host.presented.iter().map(|(_, size)| *size).collect();
    assert_eq!(sizes.len(), 3);
    assert_eq!(&sizes[..2], &[90.0, 90.0]);
    assert!((62.0..=62.5).contains(&sizes[2]), "cat fitted at {}", sizes[2]);
    assert_eq!(s.text(), "cat");
    assert_eq!(s.font_size(), sizes[2]);
    assert_eq!(host.count(SoundCue::Keystroke), 3);
}

#[test]
fn full_line_rings_bell_then_rejects_silently() {
    let mut s = session_with_max(3);
    let mut host = RecordingHost::new();
    type_str(&mut s, &mut host, "ab");
    assert_eq!(s.handle_key(Key::Char('c'), 0.0, &mut host), KeyOutcome::Filled);
    assert_eq!(host.count(SoundCue::Bell), 1);

    let sounds = host.sounds.len();
    let presented = host.presented.len();
    assert_eq!(s.handle_key(Key::Char('d'), 0.0, &mut host), KeyOutcome::Rejected);
    assert_eq!(s.text(), "abc");
    assert_eq!(host.sounds.len(), sounds);
    assert_eq!(host.presented.len(), presented);
}

#[test]
fn emptying_a_full_line_plays_reset_once() {
    let mut s = session_with_max(3);
    let mut host = RecordingHost::new();
    type_str(&mut s, &mut host, "abc");
    for _ in 0..3 {
        assert_eq!(s.handle_key(Key::Backspace, 0.0, &mut host), KeyOutcome::Deleted);
    }
    assert_eq!(host.count(SoundCue::Reset), 1);
    assert_eq!(s.font_size(), 90.0);
    assert_eq!(host.last_text(), Some(""));

    // Filling and emptying again is a fresh cycle.
    type_str(&mut s, &mut host, "a");
    s.handle_key(Key::Backspace, 0.0, &mut host);
    assert_eq!(host.count(SoundCue::Reset), 1);
}

#[test]
fn deleting_spawns_burst_at_the_removed_glyph() {
    let mut s = session();
    let mut host = RecordingHost::new();
    type_str(&mut s, &mut host, "a");
    assert_eq!(s.handle_key(Key::Backspace, 0.0, &mut host), KeyOutcome::Deleted);
    assert_eq!(s.text(), "");

    let n = s.particles().len();
    assert!((8..14).contains(&n), "burst size {n}");
    for p in s.particles().particles() {
        assert_eq!(p.glyph, 'a');
        assert!(host.display.contains(p.x, p.y), "({}, {}) outside display", p.x, p.y);
        assert_eq!(p.life, 1.0);
    }
    assert_eq!(s.handle_key(Key::Backspace, 0.0, &mut host), KeyOutcome::Ignored);
}

#[test]
fn driver_spawns_updates_and_releases_visuals() {
    let mut s = session();
    let mut host = RecordingHost::new();
    let mut driver = AnimationDriver::new();
    type_str(&mut s, &mut host, "x");
    s.handle_key(Key::Backspace, 0.0, &mut host);
    let n = s.particles().len();

    let first = driver.tick(&mut s, FRAME_MS, &mut host);
    assert_eq!(first.spawned, n);
    assert_eq!(first.updated, 0);
    assert_eq!(host.live_visuals.len(), n);

    let second = driver.tick(&mut s, 2.0 * FRAME_MS, &mut host);
    assert_eq!(second.spawned, 0);
    assert_eq!(second.updated, n);

    run_frames(&mut driver, &mut s, &mut host, 3.0 * FRAME_MS, 100.0 * FRAME_MS);
    assert!(s.particles().is_empty());
    assert!(host.live_visuals.is_empty());
    assert_eq!(host.released, host.spawned);
    assert_eq!(driver.last_timestamp(), Some(100.0 * FRAME_MS));
}

#[test]
fn jump_is_gated_until_it_ends() {
    let mut s = session();
    let mut host = RecordingHost::new();
    let mut driver = AnimationDriver::new();
    let f3 = Key::Trigger(Trigger::Jump);

    assert_eq!(s.handle_key(f3, 0.0, &mut host), KeyOutcome::Triggered(Trigger::Jump));
    assert!(host.is_active(Animation::Jump));
    assert_eq!(s.handle_key(f3, 100.0, &mut host), KeyOutcome::Busy(Trigger::Jump));

    let fired = run_frames(&mut driver, &mut s, &mut host, 0.0, 608.0);
    assert_eq!(fired, vec![EffectTimer::JumpEnd]);
    assert!(!s.is_jumping());
    assert!(!host.is_active(Animation::Jump));

    assert_eq!(s.handle_key(f3, 700.0, &mut host), KeyOutcome::Triggered(Trigger::Jump));
    assert_eq!(host.count(SoundCue::Bounce), 2);
}

#[test]
fn pop_bursts_every_glyph() {
    let mut s = session();
    let mut host = RecordingHost::new();
    let mut driver = AnimationDriver::new();
    let f4 = Key::Trigger(Trigger::Pop);

    assert_eq!(s.handle_key(f4, 0.0, &mut host), KeyOutcome::Ignored);

    type_str(&mut s, &mut host, "ab");
    assert_eq!(s.handle_key(f4, 0.0, &mut host), KeyOutcome::Triggered(Trigger::Pop));
    let n = s.particles().len();
    assert!((6..=10).contains(&n), "pop spawned {n}");
    let glyphs: Vec<char> = s.particles().particles().iter().map(|p| p.glyph).collect();
    assert!(glyphs.contains(&'a') && glyphs.contains(&'b'));
    assert_eq!(s.handle_key(f4, 10.0, &mut host), KeyOutcome::Busy(Trigger::Pop));
    assert_eq!(s.text(), "ab");

    let fired = run_frames(&mut driver, &mut s, &mut host, 0.0, 464.0);
    assert!(fired.contains(&EffectTimer::PopEnd));
    assert!(!s.is_popping());
    assert!(!host.is_active(Animation::Pop));
}

#[test]
fn launch_runs_once_and_clears_the_line() {
    let mut s = session();
    let mut host = RecordingHost::new();
    let mut driver = AnimationDriver::new();
    let f5 = Key::Trigger(Trigger::Launch);

    type_str(&mut s, &mut host, "hi");
    assert_eq!(s.handle_key(f5, 0.0, &mut host), KeyOutcome::Triggered(Trigger::Launch));
    assert!(host.is_active(Animation::LaunchRumble));
    assert_eq!(host.count(SoundCue::Launch { fade_ms: 3200.0 }), 1);

    assert_eq!(s.handle_key(f5, 100.0, &mut host), KeyOutcome::Busy(Trigger::Launch));
    assert_eq!(s.handle_key(Key::Char('x'), 100.0, &mut host), KeyOutcome::Ignored);
    assert_eq!(s.handle_key(Key::Backspace, 100.0, &mut host), KeyOutcome::Ignored);
    assert_eq!(
        s.handle_key(Key::Trigger(Trigger::Jump), 100.0, &mut host),
        KeyOutcome::Ignored
    );
    assert_eq!(
        s.handle_key(Key::Trigger(Trigger::ColorShift), 100.0, &mut host),
        KeyOutcome::Triggered(Trigger::ColorShift)
    );
    assert_eq!(s.text(), "hi");

    let fired = run_frames(&mut driver, &mut s, &mut host, 0.0, 1000.0);
    assert_eq!(fired.iter().filter(|t| **t == EffectTimer::Liftoff).count(), 1);
    assert!(fired.contains(&EffectTimer::IgnitionSpark));
    assert!(!host.is_active(Animation::LaunchRumble));
    assert!(host.is_active(Animation::LaunchLiftoff));
    assert!(
        s.particles()
            .particles()
            .iter()
            .any(|p| p.kind == typewriter_toy::particles::ParticleKind::Ignition)
    );

    let fired = run_frames(&mut driver, &mut s, &mut host, 1016.0, 5000.0);
    assert_eq!(fired.iter().filter(|t| **t == EffectTimer::LaunchClear).count(), 1);
    assert!(!s.is_launching());
    assert_eq!(s.text(), "");
    assert_eq!(s.pending_timers(), 0);
    assert!(!host.is_active(Animation::LaunchLiftoff));

    // Typing works again afterwards.
    assert_eq!(s.handle_key(Key::Char('o'), 5000.0, &mut host), KeyOutcome::Appended);
}

#[test]
fn escape_aborts_launch() {
    let mut s = session();
    let mut host = RecordingHost::new();
    let mut driver = AnimationDriver::new();

    type_str(&mut s, &mut host, "go");
    s.handle_key(Key::Trigger(Trigger::Launch), 0.0, &mut host);
    run_frames(&mut driver, &mut s, &mut host, 0.0, 496.0);

    assert_eq!(s.handle_key(Key::Escape, 500.0, &mut host), KeyOutcome::Cleared);
    assert!(!s.is_launching());
    assert_eq!(s.text(), "");
    assert_eq!(s.pending_timers(), 0);
    assert!(!host.is_active(Animation::LaunchRumble));

    let fired = run_frames(&mut driver, &mut s, &mut host, 512.0, 4000.0);
    assert!(fired.is_empty(), "stale stages fired: {fired:?}");
    assert_eq!(s.handle_key(Key::Escape, 4000.0, &mut host), KeyOutcome::Ignored);
}

#[test]
fn random_word_replaces_and_truncates() {
    static LONG: &[&str] = &["typewriter"];
    let mut s = session_with_max(4).with_dictionary(Dictionary::new(LONG));
    let mut host = RecordingHost::new();
    type_str(&mut s, &mut host, "zz");

    assert_eq!(
        s.handle_key(Key::Trigger(Trigger::RandomWord), 0.0, &mut host),
        KeyOutcome::Triggered(Trigger::RandomWord)
    );
    assert_eq!(s.text(), "type");
    assert_eq!(host.last_text(), Some("type"));
    assert_eq!(host.count(SoundCue::Bell), 1);
}

#[test]
fn random_word_comes_from_builtin_list() {
    let mut s = session();
    let mut host = RecordingHost::new();
    s.handle_key(Key::Trigger(Trigger::RandomWord), 0.0, &mut host);
    assert!(typewriter_toy::WORDS.iter().any(|w| *w == s.text()));
    assert_eq!(host.count(SoundCue::Bell), 0);
}

#[test]
fn color_shift_rotates_hue() {
    let mut s = session();
    let mut host = RecordingHost::new();
    let before = s.color();
    s.handle_key(Key::Trigger(Trigger::ColorShift), 0.0, &mut host);
    let after = s.color();
    let expected = (before.hue + 45.0).rem_euclid(360.0);
    assert!((after.hue - expected).abs() < 1e-9);
    assert_eq!(after.lightness, before.lightness);
    assert_eq!(host.colors.last(), Some(&after));
}

#[test]
fn reset_releases_everything() {
    let mut s = session();
    let mut host = RecordingHost::new();
    let mut driver = AnimationDriver::new();

    type_str(&mut s, &mut host, "boom");
    s.handle_key(Key::Trigger(Trigger::Pop), 0.0, &mut host);
    s.handle_key(Key::Trigger(Trigger::Launch), 0.0, &mut host);
    run_frames(&mut driver, &mut s, &mut host, 0.0, 160.0);
    assert!(!host.live_visuals.is_empty());

    s.reset(&mut host);
    assert_eq!(s.text(), "");
    assert!(s.particles().is_empty());
    assert!(host.live_visuals.is_empty());
    assert_eq!(s.pending_timers(), 0);
    assert!(!s.is_launching() && !s.is_popping() && !s.is_jumping());
    assert!(host.active.is_empty());
}

#[test]
fn unknown_keys_are_ignored() {
    let mut s = session();
    let mut host = RecordingHost::new();
    assert_eq!(
        s.handle_key(Key::from_key_name("Shift"), 0.0, &mut host),
        KeyOutcome::Ignored
    );
    assert!(host.sounds.is_empty());
    assert!(host.presented.is_empty());
}
