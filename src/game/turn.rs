use super::player::PlayerStatus;
use super::Game;
use crate::error::GameError;

impl Game {
    /// Ends the current turn and hands it to the next active player in turn order.
    ///
    /// All per-turn state is cleared first. Eliminated players are skipped; if nobody
    /// is left to take a turn, or only one player survives the eliminations, the game
    /// is completed instead.
    pub fn advance_turn(&mut self) -> Result<(), GameError> {
        self.require_in_progress()?;

        let current = self.current_player();
        for player in self.players.iter_mut() {
            player.moved = false;
            player.suggested = false;
        }
        if let Some(current) = current {
            self.players[current].moved_by_suggest = false;
        }
        self.clear_suggestion();

        let active = self.num_players_active();
        if active == 0 {
            self.complete();
            return Ok(());
        }
        let eliminations = self.players.iter().any(|p| p.status == PlayerStatus::Lost);
        if active == 1 && eliminations {
            // Last player standing wins by default.
            if let Some(survivor) = self.players.iter_mut().find(|p| p.is_active()) {
                survivor.status = PlayerStatus::Won;
            }
            self.complete();
            return Ok(());
        }

        let len = self.turn_order.len();
        let mut pos = current
            .and_then(|c| self.turn_position(c))
            .unwrap_or(len - 1);
        let mut visited = 0;
        loop {
            if visited == len {
                self.complete();
                return Ok(());
            }
            let from = self.turn_order[pos];
            pos = (pos + 1) % len;
            let next = self.turn_order[pos];
            self.players[from].their_turn = false;
            self.players[next].their_turn = true;
            visited += 1;
            if self.players[next].is_active() {
                break;
            }
        }

        self.designate_refuter();
        Ok(())
    }

    /// Called when the designated refuter cannot disprove the suggestion.
    /// The designation moves to the next active player; once it would return to the
    /// suggesting player the suggestion stands unrefuted.
    pub fn pass_refutation(&mut self) -> Result<(), GameError> {
        self.require_in_progress()?;
        let Some(refuter) = self.current_refuter() else {
            return Err(GameError::InvalidAction);
        };
        let suggested = self
            .current_player()
            .map(|p| self.players[p].suggested)
            .unwrap_or(false);
        if !suggested {
            return Err(GameError::InvalidAction);
        }
        if !self.hand_refutation_on(refuter) {
            self.unrefuted = true;
        }
        Ok(())
    }

    /// Makes the first active player after the turn holder the refuter.
    pub(super) fn designate_refuter(&mut self) {
        self.unrefuted = false;
        match self.current_player() {
            Some(current) => {
                self.hand_refutation_on(current);
            }
            None => self.clear_refuter(),
        }
    }

    /// Moves the refuter designation to the first active player after `from`,
    /// unless that would be the turn holder. Returns whether anyone was designated.
    pub(super) fn hand_refutation_on(&mut self, from: usize) -> bool {
        self.clear_refuter();
        let turn = self.current_player();
        match self.next_active_after(from) {
            Some(next) if Some(next) != turn => {
                self.players[next].is_curr_refuter = true;
                true
            }
            _ => false,
        }
    }

    fn clear_refuter(&mut self) {
        for player in self.players.iter_mut() {
            player.is_curr_refuter = false;
        }
    }

    /// Finds the next active player after `player` in turn order, wrapping around.
    fn next_active_after(&self, player: usize) -> Option<usize> {
        let pos = self.turn_position(player)?;
        let len = self.turn_order.len();
        (pos + 1..len)
            .chain(0..pos)
            .map(|idx| self.turn_order[idx])
            .find(|idx| self.players[*idx].is_active())
    }

    fn turn_position(&self, player: usize) -> Option<usize> {
        self.turn_order.iter().position(|p| *p == player)
    }
}
