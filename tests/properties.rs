//! Property tests for the geometry helpers and the level generator.

use proptest::prelude::*;

use ronin_rush::consts::{BOSS_LEVEL_INTERVAL, GAME_HEIGHT};
use ronin_rush::sim::{self, LevelObjectKind, Rect};

fn arb_rect() -> impl Strategy<Value = Rect> {
    (
        -500.0f32..1500.0,
        -500.0f32..1500.0,
        1.0f32..300.0,
        1.0f32..300.0,
    )
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn overlap_is_symmetric(a in arb_rect(), b in arb_rect()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn every_rect_overlaps_itself(a in arb_rect()) {
        prop_assert!(a.overlaps(&a));
    }

    #[test]
    fn disjoint_on_one_axis_means_no_overlap(a in arb_rect(), dx in 0.0f32..500.0) {
        let b = Rect::new(a.right() + dx, a.y, a.w, a.h);
        prop_assert!(!a.overlaps(&b));
    }

    #[test]
    fn generation_is_deterministic(level in 1u32..500) {
        prop_assert_eq!(sim::generate(level), sim::generate(level));
    }

    #[test]
    fn generated_platforms_stay_in_the_world(level in 1u32..500) {
        let lvl = sim::generate(level);
        for obj in &lvl.objects {
            if obj.kind == LevelObjectKind::Platform {
                prop_assert!(obj.rect.y >= 0.0);
                prop_assert!(obj.rect.bottom() <= GAME_HEIGHT);
                prop_assert!(obj.rect.w > 0.0);
            }
        }
    }

    #[test]
    fn regular_levels_have_exactly_one_goal(level in 1u32..500) {
        prop_assume!(level % BOSS_LEVEL_INTERVAL != 0);
        let lvl = sim::generate(level);
        let goals = lvl
            .objects
            .iter()
            .filter(|o| o.kind == LevelObjectKind::Goal)
            .count();
        prop_assert_eq!(goals, 1);
    }

    #[test]
    fn boss_levels_hold_back_the_goal(tier in 1u32..20) {
        let lvl = sim::generate(tier * BOSS_LEVEL_INTERVAL);
        prop_assert!(lvl.objects.iter().all(|o| o.kind != LevelObjectKind::Goal));
        prop_assert_eq!(lvl.enemies.len(), 1);
    }

    #[test]
    fn ground_spikes_rest_on_a_platform(level in 1u32..200) {
        let lvl = sim::generate(level);
        for spike in lvl.objects.iter().filter(|o| {
            matches!(o.kind, LevelObjectKind::Spike { orientation: sim::SpikeOrientation::Up })
        }) {
            let supported = lvl.objects.iter().any(|p| {
                p.kind == LevelObjectKind::Platform
                    && (spike.rect.bottom() - p.rect.y).abs() < 1.0
                    && spike.rect.x >= p.rect.x - 1.0
                    && spike.rect.right() <= p.rect.right() + 1.0
            });
            prop_assert!(supported, "spike at {:?} floats", spike.rect);
        }
    }
}
