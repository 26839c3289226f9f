//! Player controller: ability timers, input edges and horizontal/vertical
//! intent. Position resolution against the level lives in [`super::physics`].

use glam::Vec2;

use super::state::{Direction, GameState, Projectile, ProjectileKind};
use super::tick::TickInput;
use crate::consts::*;

/// Apply one tick of input to the player. Press-triggered abilities fire on
/// the rising edge against the previous tick's input.
pub fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let prev = state.prev_input.clone();
    let p = &mut state.player;

    // Countdown timers; expiry clears the matching flag
    if p.attack_timer > 0.0 {
        p.attack_timer -= dt;
        if p.attack_timer <= 0.0 {
            p.attacking = false;
        }
    }
    p.attack_cooldown = (p.attack_cooldown - dt).max(0.0);
    p.invincibility_timer = (p.invincibility_timer - dt).max(0.0);
    if p.dash_timer > 0.0 {
        p.dash_timer -= dt;
        if p.dash_timer <= 0.0 {
            p.dashing = false;
        }
    }
    p.dash_cooldown = (p.dash_cooldown - dt).max(0.0);
    if p.shield_timer > 0.0 {
        p.shield_timer -= dt;
        if p.shield_timer <= 0.0 {
            p.shielding = false;
        }
    }
    p.shield_cooldown = (p.shield_cooldown - dt).max(0.0);
    p.teleport_cooldown = (p.teleport_cooldown - dt).max(0.0);
    p.teleport_effect_timer = (p.teleport_effect_timer - dt).max(0.0);

    // Dash: burst of speed with i-frames for its duration
    if input.dash && !prev.dash && !p.dashing && p.dash_cooldown <= 0.0 {
        p.dashing = true;
        p.dash_timer = DASH_DURATION_MS;
        p.dash_cooldown = DASH_COOLDOWN_MS;
        p.invincibility_timer = p.invincibility_timer.max(DASH_DURATION_MS);
        p.vel.y = 0.0;
        state.bump_shake(SHAKE_DASH);
    }

    // Sword swing
    let p = &mut state.player;
    if input.attack && !prev.attack && !p.attacking && p.attack_cooldown <= 0.0 {
        start_attack(p);
    }

    // Shuriken / teleport utility shares one cooldown
    if input.utility && !prev.utility && state.player.teleport_cooldown <= 0.0 {
        if state.player.shuriken_in_flight {
            teleport_to_shuriken(state);
        } else {
            throw_shuriken(state);
        }
    }

    let p = &mut state.player;
    if input.shield && !prev.shield && !p.shielding && p.shield_cooldown <= 0.0 {
        p.shielding = true;
        p.shield_timer = SHIELD_DURATION_MS;
        p.shield_cooldown = SHIELD_COOLDOWN_MS;
    }

    // Horizontal intent; dashing overrides held direction
    if p.dashing {
        p.vel.x = p.direction.sign() * DASH_SPEED;
    } else {
        p.vel.x = 0.0;
        if input.left {
            p.vel.x = -PLAYER_SPEED;
            p.direction = Direction::Left;
        }
        if input.right {
            p.vel.x = PLAYER_SPEED;
            p.direction = Direction::Right;
        }
    }

    // Jump and double jump on the press edge
    if input.jump && !prev.jump {
        if p.on_ground {
            p.vel.y = -JUMP_FORCE;
            p.on_ground = false;
            p.double_jump_used = false;
        } else if !p.double_jump_used {
            p.vel.y = -JUMP_FORCE * DOUBLE_JUMP_FACTOR;
            p.double_jump_used = true;
        }
    }

    // Gravity is suspended while dashing
    if !p.dashing {
        p.vel.y = (p.vel.y + GRAVITY).min(MAX_FALL_SPEED);
    }
}

fn start_attack(p: &mut super::state::Player) {
    p.attacking = true;
    p.attack_timer = ATTACK_DURATION_MS;
    p.attack_cooldown = ATTACK_COOLDOWN_MS;
    p.swing_hits.clear();
}

fn throw_shuriken(state: &mut GameState) {
    let id = state.next_entity_id();
    let p = &mut state.player;
    let x = match p.direction {
        Direction::Right => p.rect.right(),
        Direction::Left => p.rect.x - SHURIKEN_SIZE,
    };
    state.projectiles.push(Projectile {
        id,
        kind: ProjectileKind::Shuriken,
        rect: super::rect::Rect::new(
            x,
            p.rect.y + p.rect.h / 3.0,
            SHURIKEN_SIZE,
            SHURIKEN_SIZE,
        ),
        vel: Vec2::new(p.direction.sign() * SHURIKEN_SPEED, 0.0),
        lifespan_ms: Some(SHURIKEN_LIFESPAN_MS),
    });
    p.shuriken_in_flight = true;
}

/// Swap the player to the in-flight shuriken's position and consume it
fn teleport_to_shuriken(state: &mut GameState) {
    let Some(idx) = state
        .projectiles
        .iter()
        .position(|pr| pr.kind == ProjectileKind::Shuriken)
    else {
        return;
    };
    let target = state.projectiles.remove(idx);
    let p = &mut state.player;
    let center = target.rect.center();
    // Levels extend past the screen; only the left world edge is solid
    p.rect.x = (center.x - p.rect.w / 2.0).max(0.0);
    p.rect.y = center.y - p.rect.h / 2.0;
    p.vel.y = 0.0;
    p.shuriken_in_flight = false;
    p.teleport_cooldown = TELEPORT_COOLDOWN_MS;
    p.teleport_effect_timer = TELEPORT_EFFECT_MS;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TICK_MS;

    fn state() -> GameState {
        GameState::new(1)
    }

    fn input() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut s = state();
        s.player.on_ground = false;
        s.player.double_jump_used = true;
        let mut inp = input();
        inp.jump = true;
        update_player(&mut s, &inp, TICK_MS);
        assert!(s.player.vel.y > 0.0, "airborne with spent double jump only falls");

        let mut s = state();
        s.player.on_ground = true;
        update_player(&mut s, &inp, TICK_MS);
        assert!(s.player.vel.y < 0.0);
        assert!(!s.player.on_ground);
    }

    #[test]
    fn test_double_jump_is_weaker_and_single_use() {
        let mut s = state();
        s.player.on_ground = false;
        let mut inp = input();
        inp.jump = true;
        update_player(&mut s, &inp, TICK_MS);
        let expected = -JUMP_FORCE * DOUBLE_JUMP_FACTOR + GRAVITY;
        assert!((s.player.vel.y - expected).abs() < 1e-4);
        assert!(s.player.double_jump_used);
    }

    #[test]
    fn test_jump_requires_press_edge() {
        let mut s = state();
        s.player.on_ground = true;
        let mut inp = input();
        inp.jump = true;
        s.prev_input = inp.clone();
        update_player(&mut s, &inp, TICK_MS);
        assert!(s.player.vel.y >= 0.0, "held jump does not re-trigger");
    }

    #[test]
    fn test_dash_overrides_velocity_and_grants_iframes() {
        let mut s = state();
        s.player.direction = Direction::Left;
        s.player.vel.y = 9.0;
        let mut inp = input();
        inp.dash = true;
        update_player(&mut s, &inp, TICK_MS);
        assert!(s.player.dashing);
        assert_eq!(s.player.vel.x, -DASH_SPEED);
        assert_eq!(s.player.vel.y, 0.0, "dash cancels vertical motion");
        assert!(s.player.invincibility_timer > 0.0);
        assert_eq!(s.player.dash_cooldown, DASH_COOLDOWN_MS);
        assert!(s.screen_shake > 0.0);
    }

    #[test]
    fn test_dash_respects_cooldown() {
        let mut s = state();
        s.player.dash_cooldown = 500.0;
        let mut inp = input();
        inp.dash = true;
        update_player(&mut s, &inp, TICK_MS);
        assert!(!s.player.dashing);
    }

    #[test]
    fn test_attack_starts_swing_and_clears_hit_list() {
        let mut s = state();
        s.player.swing_hits.push(7);
        let mut inp = input();
        inp.attack = true;
        update_player(&mut s, &inp, TICK_MS);
        assert!(s.player.attacking);
        assert!(s.player.swing_hits.is_empty());
        assert_eq!(s.player.attack_cooldown, ATTACK_COOLDOWN_MS);
    }

    #[test]
    fn test_attack_timer_expiry_clears_flag() {
        let mut s = state();
        s.player.attacking = true;
        s.player.attack_timer = 10.0;
        update_player(&mut s, &input(), TICK_MS);
        assert!(!s.player.attacking);
    }

    #[test]
    fn test_utility_throws_then_teleports() {
        let mut s = state();
        s.player.direction = Direction::Right;
        let mut inp = input();
        inp.utility = true;

        update_player(&mut s, &inp, TICK_MS);
        assert!(s.player.shuriken_in_flight);
        assert_eq!(s.projectiles.len(), 1);
        assert_eq!(s.projectiles[0].kind, ProjectileKind::Shuriken);
        assert!(s.projectiles[0].vel.x > 0.0);

        // Second press (new edge) teleports to the shuriken
        s.prev_input = TickInput::default();
        let shuriken_center = s.projectiles[0].rect.center();
        update_player(&mut s, &inp, TICK_MS);
        assert!(s.projectiles.is_empty());
        assert!(!s.player.shuriken_in_flight);
        assert!((s.player.rect.center().x - shuriken_center.x).abs() < 1.0);
        assert_eq!(s.player.teleport_cooldown, TELEPORT_COOLDOWN_MS);
    }

    #[test]
    fn test_teleport_reaches_shuriken_beyond_first_screen() {
        let mut s = state();
        s.player.shuriken_in_flight = true;
        let id = s.next_entity_id();
        s.projectiles.push(Projectile {
            id,
            kind: ProjectileKind::Shuriken,
            rect: super::super::rect::Rect::new(2094.0, 300.0, SHURIKEN_SIZE, SHURIKEN_SIZE),
            vel: Vec2::new(SHURIKEN_SPEED, 0.0),
            lifespan_ms: Some(SHURIKEN_LIFESPAN_MS),
        });
        let mut inp = input();
        inp.utility = true;
        update_player(&mut s, &inp, TICK_MS);
        let expected = 2094.0 + SHURIKEN_SIZE / 2.0 - s.player.rect.w / 2.0;
        assert!((s.player.rect.x - expected).abs() < 1e-3);
    }

    #[test]
    fn test_utility_respects_cooldown() {
        let mut s = state();
        s.player.teleport_cooldown = 1000.0;
        let mut inp = input();
        inp.utility = true;
        update_player(&mut s, &inp, TICK_MS);
        assert!(s.projectiles.is_empty());
        assert!(!s.player.shuriken_in_flight);
    }

    #[test]
    fn test_shield_cooldown_starts_on_activation() {
        let mut s = state();
        let mut inp = input();
        inp.shield = true;
        update_player(&mut s, &inp, TICK_MS);
        assert!(s.player.shielding);
        assert_eq!(s.player.shield_timer, SHIELD_DURATION_MS);
        // Cooldown runs from the press, not from expiry
        assert_eq!(s.player.shield_cooldown, SHIELD_COOLDOWN_MS);

        s.prev_input = inp.clone();
        s.player.shield_timer = 1.0;
        let cooldown_before = s.player.shield_cooldown;
        update_player(&mut s, &inp, TICK_MS);
        assert!(!s.player.shielding);
        assert_eq!(s.player.shield_cooldown, cooldown_before - TICK_MS);
    }

    #[test]
    fn test_gravity_clamps_at_terminal_velocity() {
        let mut s = state();
        s.player.vel.y = MAX_FALL_SPEED;
        update_player(&mut s, &input(), TICK_MS);
        assert_eq!(s.player.vel.y, MAX_FALL_SPEED);
    }

    #[test]
    fn test_opposite_keys_right_wins() {
        let mut s = state();
        let mut inp = input();
        inp.left = true;
        inp.right = true;
        update_player(&mut s, &inp, TICK_MS);
        assert_eq!(s.player.vel.x, PLAYER_SPEED);
        assert_eq!(s.player.direction, Direction::Right);
    }
}
