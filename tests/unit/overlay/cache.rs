use super::*;

use crate::overlay::buffer::CHANNELS;

fn base_image(width: u32, height: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((width * height) as usize * CHANNELS);
    for i in 0..(width * height) {
        data.extend_from_slice(&[100, 110, 120, 200 - (i % 3) as u8]);
    }
    PixelBuffer::from_rgba8(width, height, data).unwrap()
}

fn expected_variation(base: &PixelBuffer, opacity: f32, invert: bool) -> Vec<u8> {
    let mut dup = base.try_duplicate().unwrap();
    apply_effects(&mut dup, opacity, invert);
    dup.as_bytes().to_vec()
}

#[test]
fn populate_generates_the_full_enumeration() {
    let base = base_image(4, 3);
    let cache = VariationCache::new();
    cache.populate(&base);

    assert!(cache.is_ready());
    assert_eq!(cache.len(), OPACITY_LEVELS.len() * 2);
    assert_eq!(cache.base_dimensions(), Some((4, 3)));

    for &opacity in &OPACITY_LEVELS {
        for invert in [false, true] {
            let pixels = cache.variation(opacity, invert).unwrap();
            assert_eq!(pixels.dimensions(), base.dimensions());
            assert_eq!(pixels.as_bytes(), &expected_variation(&base, opacity, invert)[..]);
        }
    }
}

#[test]
fn exact_match_wins_over_nearest() {
    let base = base_image(2, 2);
    let cache = VariationCache::new();
    cache.populate(&base);

    let pixels = cache.variation(1.0, false).unwrap();
    // opacity 1.0 without inversion is the identity transform
    assert_eq!(pixels.as_bytes(), base.as_bytes());
}

#[test]
fn nearest_match_selects_closest_opacity_with_same_invert() {
    let base = base_image(2, 2);
    let cache = VariationCache::new();
    cache.populate(&base);

    // 0.6 is 0.1 from the 0.5 level and 0.15 from 0.75
    let pixels = cache.variation(0.6, false).unwrap();
    assert_eq!(pixels.as_bytes(), &expected_variation(&base, 0.5, false)[..]);

    let inverted = cache.variation(0.9, true).unwrap();
    assert_eq!(inverted.as_bytes(), &expected_variation(&base, 1.0, true)[..]);
}

#[test]
fn empty_cache_returns_none_without_blocking() {
    let cache = VariationCache::new();
    assert!(cache.variation(0.5, false).is_none());
    assert!(cache.variation(1.0, true).is_none());
    assert!(!cache.is_ready());
    assert!(cache.is_empty());
    assert_eq!(cache.base_dimensions(), None);
}

#[test]
fn clear_is_idempotent() {
    let base = base_image(2, 2);
    let cache = VariationCache::new();
    cache.populate(&base);
    assert_eq!(cache.len(), 8);

    cache.clear();
    assert!(cache.is_empty());
    assert!(!cache.is_ready());
    assert!(cache.variation(0.5, false).is_none());

    // second teardown is a safe no-op
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn served_frames_survive_a_clear() {
    let base = base_image(2, 2);
    let cache = VariationCache::new();
    cache.populate(&base);

    let held = cache.variation(0.25, true).unwrap();
    cache.clear();
    assert_eq!(held.as_bytes(), &expected_variation(&base, 0.25, true)[..]);
}

#[test]
fn async_population_publishes_a_complete_set() {
    let base = base_image(3, 3);
    let cache = std::sync::Arc::new(VariationCache::new());
    std::sync::Arc::clone(&cache).populate_async(&base);

    // fire-and-forget worker; poll until it publishes
    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
    while !cache.is_ready() {
        assert!(
            std::time::Instant::now() < deadline,
            "population worker never published"
        );
        std::thread::sleep(std::time::Duration::from_millis(1));
    }

    assert_eq!(cache.len(), 8);
    let pixels = cache.variation(0.75, true).unwrap();
    assert_eq!(pixels.as_bytes(), &expected_variation(&base, 0.75, true)[..]);
}

#[test]
fn in_flight_async_population_cannot_overwrite_a_newer_populate() {
    let stale = base_image(9, 9);
    let fresh = base_image(2, 2);
    let cache = std::sync::Arc::new(VariationCache::new());

    // Race an async population against an immediate synchronous one. The
    // worker either publishes first and is overwritten, or finishes late and
    // is discarded by the epoch check; the synchronous set must win either
    // way.
    std::sync::Arc::clone(&cache).populate_async(&stale);
    cache.populate(&fresh);

    std::thread::sleep(std::time::Duration::from_millis(50));
    assert_eq!(cache.base_dimensions(), Some((2, 2)));
    let pixels = cache.variation(0.5, false).unwrap();
    assert_eq!(pixels.dimensions(), (2, 2));
}

#[test]
fn repopulation_replaces_the_entry_set() {
    let first = base_image(2, 2);
    let second = base_image(5, 4);
    let cache = VariationCache::new();

    cache.populate(&first);
    assert_eq!(cache.base_dimensions(), Some((2, 2)));

    cache.populate(&second);
    assert_eq!(cache.base_dimensions(), Some((5, 4)));
    assert_eq!(cache.len(), 8);
    let pixels = cache.variation(0.5, false).unwrap();
    assert_eq!(pixels.dimensions(), (5, 4));
}
