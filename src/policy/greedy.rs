use super::Policy;
use crate::game::{Action, GameState};

/// Food-seeking heuristic: among the actions that do not die on the next
/// cell, pick the one that ends closest to the food.
#[derive(Debug, Default)]
pub struct GreedyPolicy;

impl GreedyPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for GreedyPolicy {
    fn choose(&mut self, state: &GameState) -> Action {
        let head = state.snake.head();
        let mut best: Option<(Action, f32)> = None;

        for action in Action::ALL {
            let next = head.stepped(state.snake.heading.turned(action), state.block);
            if state.is_collision(next) {
                continue;
            }
            let distance = next.distance(state.food);
            match best {
                None => best = Some((action, distance)),
                Some((_, closest)) if distance < closest => best = Some((action, distance)),
                _ => {}
            }
        }

        // every option is fatal, the straight one is as good as any
        best.map(|(action, _)| action).unwrap_or(Action::Straight)
    }
}
