//! Axis-separated movement resolution against platforms.
//!
//! The vertical pass runs first so landing snaps take effect before walls
//! are considered; probes are inset on the cross axis so a body sliding
//! along a surface does not snag the corner of the next tile.

use super::rect::Rect;
use super::state::{GameState, LevelObjectKind};
use crate::consts::*;

/// Cross-axis probe inset (px)
const PROBE_INSET: f32 = 2.0;

/// Move the player by its velocity, resolving collisions one axis at a
/// time. Returns true if the player fell out of the world.
pub fn resolve_player(state: &mut GameState) -> bool {
    let p = &mut state.player;

    // Vertical pass
    let mut next_y = p.rect.y + p.vel.y;
    p.on_ground = false;
    let probe = Rect::new(p.rect.x, next_y, p.rect.w, p.rect.h).inset_x(PROBE_INSET);
    for obj in &state.objects {
        if obj.kind != LevelObjectKind::Platform || !probe.overlaps(&obj.rect) {
            continue;
        }
        if p.vel.y >= 0.0 {
            next_y = obj.rect.y - p.rect.h;
            p.on_ground = true;
            p.double_jump_used = false;
        } else {
            next_y = obj.rect.bottom();
        }
        p.vel.y = 0.0;
        break;
    }
    p.rect.y = next_y;

    // Horizontal pass
    let mut next_x = p.rect.x + p.vel.x;
    let probe = Rect::new(next_x, p.rect.y, p.rect.w, p.rect.h).inset_y(PROBE_INSET);
    for obj in &state.objects {
        if obj.kind != LevelObjectKind::Platform || !probe.overlaps(&obj.rect) {
            continue;
        }
        if p.vel.x > 0.0 {
            next_x = obj.rect.x - p.rect.w;
        } else if p.vel.x < 0.0 {
            next_x = obj.rect.right();
        }
        p.vel.x = 0.0;
        break;
    }
    // The world scrolls right; only the left edge is solid
    p.rect.x = next_x.max(0.0);

    p.rect.y > GAME_HEIGHT
}
