//! Discrete simulation tick
//!
//! Advances the game exactly one grid step. The caller samples `now` once
//! and every expiry in the tick is judged against it.

use rand::Rng;

use super::board::Cell;
use super::collision::{Collision, check_collision};
use super::effects::ItemKind;
use super::progression;
use super::state::{GameEvent, GamePhase, GameState, Item, PendingObstacle};
use crate::consts::*;

/// Result of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// Not playing, nothing happened
    Skipped,
    /// Step completed
    Continue { ate_food: bool },
    /// Step hit something; the game is over
    GameOver(Collision),
}

/// Advance the game state by one step
pub fn tick(state: &mut GameState, now: f64) -> TickStatus {
    if state.phase != GamePhase::Playing {
        return TickStatus::Skipped;
    }

    state.time_ticks += 1;

    // 1. Turn
    if let Some(dir) = state.direction_queue.pop_front() {
        state.direction = dir;
    }

    // 2. Next head (pre-wrapped in wrap mode)
    let next = state.board.step(state.head(), state.direction);

    // 3. Collision ends the game with no further mutation
    let ghost = state.effects.is_active(ItemKind::Ghost, now);
    if let Some(collision) = check_collision(
        next,
        &state.board,
        &state.snake,
        &state.obstacles,
        ghost,
    ) {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            collision,
            score: state.score,
        });
        log::info!(
            "Game over ({}) with score {} at level {}",
            collision.as_str(),
            state.score,
            state.level
        );
        return TickStatus::GameOver(collision);
    }

    // 4. Food
    let ate_food = state.food == Some(next);
    if ate_food {
        eat_food(state, next, now);
    }

    // 5. Items
    collect_and_expire_items(state, next, now);

    // 6. Move
    state.snake.push_front(next);
    if !ate_food {
        state.snake.pop_back();
    }

    // 7. Combo lapses lazily
    let streak = state.combo.streak;
    if state.combo.expire_if_stale(now) {
        state.events.push(GameEvent::ComboLost { streak });
    }

    // 8. Obstacles leave their warning period
    promote_obstacles(state, now);

    TickStatus::Continue { ate_food }
}

/// Score, respawn and progression for a food pickup at `next`
fn eat_food(state: &mut GameState, next: Cell, now: f64) {
    state.foods_eaten += 1;

    let mut points = FOOD_BASE_POINTS + state.level as u64 + state.combo.bonus();
    if state.effects.is_active(ItemKind::Multiplier, now) {
        points *= MULTIPLIER_FACTOR;
    }
    state.score += points;
    state.best_score = state.best_score.max(state.score);

    state.combo.register_food(now);
    state.events.push(GameEvent::FoodEaten {
        points,
        streak: state.combo.streak,
    });
    log::debug!(
        "Food eaten at ({}, {}): +{} (streak {})",
        next.x,
        next.y,
        points,
        state.combo.streak
    );

    // Old food cell is the new head; keep it out of the search
    state.food = None;
    state.food = state.find_free_cell(&[next]);
    if state.food.is_none() {
        log::warn!("Board full ({} cells), no room for food", state.board.area());
    }

    if state.rng.random_bool(ITEM_SPAWN_CHANCE) {
        spawn_item(state, next, now);
    }

    let level = progression::level_for(state.foods_eaten);
    if level > state.level {
        state.level = level;
        state.tick_interval = progression::tick_interval(level, state.settings.difficulty_curve);
        state.events.push(GameEvent::LevelUp { level });
        log::info!(
            "Level {} reached, tick interval {}ms",
            level,
            state.tick_interval
        );

        if level >= OBSTACLE_LEVEL_THRESHOLD {
            spawn_obstacle(state, next, now);
        }
    }
}

fn spawn_item(state: &mut GameState, next: Cell, now: f64) {
    let kind = ItemKind::ALL[state.rng.random_range(0..ItemKind::ALL.len())];
    if let Some(pos) = state.find_free_cell(&[next]) {
        state.items.push(Item {
            kind,
            pos,
            spawned_at: now,
        });
        state.events.push(GameEvent::ItemSpawned { kind, pos });
        log::debug!("Spawned {} item at ({}, {})", kind.as_str(), pos.x, pos.y);
    }
}

fn spawn_obstacle(state: &mut GameState, next: Cell, now: f64) {
    if let Some(pos) = state.find_free_cell(&[next]) {
        state.pending_obstacles.push(PendingObstacle {
            pos,
            activate_at: now + OBSTACLE_WARNING,
        });
        state.events.push(GameEvent::ObstacleSpawned { pos });
        log::debug!("Obstacle warning at ({}, {})", pos.x, pos.y);
    }
}

/// Pick up the item under the head; drop items that outlived their lifetime
fn collect_and_expire_items(state: &mut GameState, next: Cell, now: f64) {
    let mut collected = Vec::new();
    let mut expired = Vec::new();

    state.items.retain(|item| {
        if item.pos == next {
            collected.push(item.kind);
            false
        } else if item.is_expired(now) {
            expired.push(item.kind);
            false
        } else {
            true
        }
    });

    for kind in collected {
        state.effects.activate(kind, now);
        state.score += ITEM_PICKUP_BONUS;
        state.best_score = state.best_score.max(state.score);
        state.events.push(GameEvent::ItemCollected { kind });
        log::debug!("Collected {} item", kind.as_str());
    }
    for kind in expired {
        state.events.push(GameEvent::ItemExpired { kind });
    }
}

fn promote_obstacles(state: &mut GameState, now: f64) {
    let (due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut state.pending_obstacles)
        .into_iter()
        .partition(|obstacle| obstacle.is_due(now));
    state.pending_obstacles = waiting;

    for obstacle in due {
        state.obstacles.insert(obstacle.pos);
        state.events.push(GameEvent::ObstacleActivated { pos: obstacle.pos });
    }
}
