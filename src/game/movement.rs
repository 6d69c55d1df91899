use super::Game;
use crate::error::GameError;

impl Game {
    /// Moves a player, along with the suspect token they portray, to the named location.
    /// An empty or unknown location name is ignored.
    pub fn move_player(&mut self, player: usize, location: &str) -> Result<(), GameError> {
        self.check_player_index(player)?;
        self.require_in_progress()?;
        if location.is_empty() {
            return Ok(());
        }
        let Some(location) = self.board.find(location) else {
            return Ok(());
        };

        let player = &mut self.players[player];
        player.location = Some(location);
        player.moved = true;

        let suspect = &player.suspect;
        if let Some(token) = self.suspects.iter_mut().find(|t| &t.name == suspect) {
            token.location = Some(location);
        }
        Ok(())
    }

    /// The names of the locations a player could move to from where they stand.
    pub fn reachable_locations(&self, player: usize) -> Result<Vec<&str>, GameError> {
        self.check_player_index(player)?;
        let Some(location) = self.players[player].location else {
            return Ok(vec![]);
        };
        Ok(self
            .board
            .neighbours(location)
            .iter()
            .map(|id| self.board.name(*id))
            .collect())
    }
}
