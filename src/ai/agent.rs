use crate::game::GameState;

/// Move-selection interface shared by every front end. Front ends hold a
/// `Box<dyn Agent>` and never reach into the engine directly.
pub trait Agent {
    /// Select a column for the player to move in `state`, or `None` when the
    /// game is already over.
    fn select_action(&mut self, state: &GameState) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
