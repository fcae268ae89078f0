pub mod player;
pub mod powerup;
pub mod time;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::player::{PlayerId, Position, PowerupCollector};

    /// Player stand-in that records every effect applied to it, in order.
    #[derive(Debug, Clone)]
    pub struct TestPlayer<E> {
        pub id: PlayerId,
        pub position: Position,
        pub received: Vec<E>,
    }

    impl<E> TestPlayer<E> {
        pub fn new(id: PlayerId, x: f32, y: f32) -> Self {
            Self {
                id,
                position: Position::new(x, y),
                received: Vec::new(),
            }
        }

        /// Number of times `apply_effect` has been called on this player.
        pub fn apply_count(&self) -> usize {
            self.received.len()
        }
    }

    impl<E> PowerupCollector<E> for TestPlayer<E> {
        fn position(&self) -> Position {
            self.position
        }

        fn apply_effect(&mut self, effect: E) {
            self.received.push(effect);
        }
    }

    /// Create one test player per position, with sequential IDs starting at 1.
    pub fn make_players<E>(positions: &[(f32, f32)]) -> Vec<TestPlayer<E>> {
        positions
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| TestPlayer::new(i as PlayerId + 1, x, y))
            .collect()
    }

    /// Total `apply_effect` calls across a roster.
    pub fn total_applies<E>(players: &[TestPlayer<E>]) -> usize {
        players.iter().map(TestPlayer::apply_count).sum()
    }
}
