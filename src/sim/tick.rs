//! Per-frame simulation tick
//!
//! One call advances a running session by exactly one frame. Movement is
//! per-tick (no delta time); spawn and fire gates use wall-clock ms.

use super::input::TickInput;
use super::state::{Field, GameEvent, GamePhase, GameState};
use crate::consts::PLAYER_DEADZONE;

/// Advance the session by one frame
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;
    state.mode = input.mode;
    let field = input.field;

    if let Some(enemy) = state.spawner.tick(now_ms, field, &state.tuning, &mut state.rng) {
        let kind = enemy.kind;
        let id = state.push_enemy(enemy);
        log::debug!("Spawned {:?} enemy #{} ({} alive)", kind, id, state.enemies.len());
        state.events.push(GameEvent::EnemySpawned { id, kind });
    }

    state.player.move_toward(input.pointer, PLAYER_DEADZONE);

    if input.fire_held {
        let volley = state.weapon.try_fire(
            now_ms,
            state.player.pos,
            input.pointer,
            input.mode,
            &state.tuning,
        );
        state.bullets.extend(volley);
    }

    resolve_bullets(state, field);
    resolve_enemies(state);

    // Frozen once the last heart is gone
    if state.phase != GamePhase::Running {
        return;
    }

    state.stars.update(field);
}

/// Move bullets and apply hits.
///
/// Each bullet damages at most the first live enemy (in collection order)
/// it overlaps. Consumed and off-field bullets are dropped from the rebuilt
/// list, so nothing is visited twice.
fn resolve_bullets(state: &mut GameState, field: Field) {
    let bullets = std::mem::take(&mut state.bullets);
    let mut survivors = Vec::with_capacity(bullets.len());

    for mut bullet in bullets {
        bullet.advance();

        let target = state
            .enemies
            .iter_mut()
            .find(|e| e.hp > 0 && e.is_hit_by(bullet.pos));

        if let Some(enemy) = target {
            enemy.hp -= 1;
            state.events.push(GameEvent::EnemyHit {
                id: enemy.id,
                hp_left: enemy.hp,
            });
            if enemy.hp == 0 {
                state.score += u64::from(enemy.score);
                state.kills += 1;
                state.events.push(GameEvent::EnemyDestroyed {
                    id: enemy.id,
                    kind: enemy.kind,
                    score: enemy.score,
                });
            }
            continue;
        }

        if field.contains(bullet.pos) {
            survivors.push(bullet);
        }
    }

    state.bullets = survivors;
    state.enemies.retain(|e| e.hp > 0);
}

/// Chase the player and apply ramming damage
fn resolve_enemies(state: &mut GameState) {
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;

    let enemies = std::mem::take(&mut state.enemies);
    let mut survivors = Vec::with_capacity(enemies.len());
    let mut remaining = enemies.into_iter();

    while let Some(mut enemy) = remaining.next() {
        // Contact uses the distance measured before this tick's step
        let to_player = player_pos - enemy.pos;
        let dist = to_player.length();
        enemy.pos += to_player.normalize_or_zero() * enemy.speed;

        if dist >= enemy.radius + player_radius {
            survivors.push(enemy);
            continue;
        }

        state.health = state.health.saturating_sub(1);
        log::debug!("Player rammed by enemy #{}, health {}", enemy.id, state.health);
        state.events.push(GameEvent::PlayerHit {
            health: state.health,
        });

        if state.health == 0 {
            state.phase = GamePhase::GameOver;
            log::info!(
                "Game over: score {}, kills {}, {} ticks",
                state.score,
                state.kills,
                state.time_ticks
            );
            state.events.push(GameEvent::GameOver {
                final_score: state.score,
            });
            survivors.extend(remaining);
            break;
        }
    }

    state.enemies = survivors;
}
