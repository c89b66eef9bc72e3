//! A single grid square: its owner and the soldiers stationed on it.

use serde::Serialize;

use crate::error::CellError;
use crate::game::{NEUTRAL, PlayerId};

/// Ownership and garrison of one board cell.
///
/// Fields are private so every construction and mutation goes through the
/// invariant check: a neutral cell holds no soldiers and a controlled cell
/// holds at least one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    controlling_player_id: PlayerId,
    num_soldiers: u32,
}

impl Cell {
    /// Create a neutral, empty cell.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            controlling_player_id: NEUTRAL,
            num_soldiers: 0,
        }
    }

    /// Create a cell with the given owner and soldier count.
    ///
    /// # Errors
    ///
    /// Returns [`CellError`] if the pair breaks a cell invariant.
    pub fn new(controlling_player_id: PlayerId, num_soldiers: u32) -> Result<Self, CellError> {
        validate(controlling_player_id, num_soldiers)?;
        Ok(Self {
            controlling_player_id,
            num_soldiers,
        })
    }

    /// Replace owner and soldier count at once.
    ///
    /// The cell is left untouched when the new values are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`CellError`] if the pair breaks a cell invariant.
    pub fn set_values(
        &mut self,
        controlling_player_id: PlayerId,
        num_soldiers: u32,
    ) -> Result<(), CellError> {
        *self = Self::new(controlling_player_id, num_soldiers)?;
        Ok(())
    }

    /// Change the soldier count while keeping the owner.
    ///
    /// Dropping a controlled cell to zero soldiers makes it neutral.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::NeutralWithSoldiers`] when soldiers are placed on
    /// a neutral cell.
    pub fn update_num_soldiers(&mut self, num_soldiers: u32) -> Result<(), CellError> {
        if num_soldiers == 0 {
            self.make_neutral();
            return Ok(());
        }
        self.set_values(self.controlling_player_id, num_soldiers)
    }

    /// Clear owner and soldiers.
    pub fn make_neutral(&mut self) {
        *self = Self::neutral();
    }

    /// Whether no player controls this cell.
    #[must_use]
    pub const fn is_neutral(&self) -> bool {
        self.controlling_player_id == NEUTRAL
    }

    /// Whether `player_id` controls this cell. Never true for [`NEUTRAL`].
    #[must_use]
    pub const fn is_controlled_by(&self, player_id: PlayerId) -> bool {
        player_id != NEUTRAL && self.controlling_player_id == player_id
    }

    /// Id of the controlling player, [`NEUTRAL`] if none.
    #[must_use]
    pub const fn controlling_player_id(&self) -> PlayerId {
        self.controlling_player_id
    }

    /// Soldiers stationed on the cell.
    #[must_use]
    pub const fn num_soldiers(&self) -> u32 {
        self.num_soldiers
    }
}

fn validate(controlling_player_id: PlayerId, num_soldiers: u32) -> Result<(), CellError> {
    match (controlling_player_id == NEUTRAL, num_soldiers == 0) {
        (true, false) => Err(CellError::NeutralWithSoldiers),
        (false, true) => Err(CellError::ControlledWithoutSoldiers),
        _ => Ok(()),
    }
}
