//! Player identities and the two seats at the table.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Unique identifier for a player. [`NEUTRAL`] marks "no player".
pub type PlayerId = u32;

/// Owner id of a neutral cell.
pub const NEUTRAL: PlayerId = 0;

/// One of the two seats. Seat A always acts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    /// First player; home cell in the top-left corner.
    A,
    /// Second player; home cell in the bottom-right corner.
    B,
}

impl Seat {
    /// Both seats in acting order.
    pub const ALL: [Seat; 2] = [Seat::A, Seat::B];

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Seat::A => Seat::B,
            Seat::B => Seat::A,
        }
    }
}

/// The ids assigned to seat A and seat B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerIds {
    a: PlayerId,
    b: PlayerId,
}

impl PlayerIds {
    /// Pair two ids.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidPlayerIds`] if either id is [`NEUTRAL`] or
    /// both ids are equal.
    pub fn new(a: PlayerId, b: PlayerId) -> Result<Self, GameError> {
        if a == NEUTRAL || b == NEUTRAL || a == b {
            return Err(GameError::InvalidPlayerIds { a, b });
        }
        Ok(Self { a, b })
    }

    /// Id sitting in `seat`.
    #[must_use]
    pub const fn id(&self, seat: Seat) -> PlayerId {
        match seat {
            Seat::A => self.a,
            Seat::B => self.b,
        }
    }

    /// Seat held by `player_id`, if it plays in this game.
    #[must_use]
    pub fn seat_of(&self, player_id: PlayerId) -> Option<Seat> {
        Seat::ALL.into_iter().find(|&seat| self.id(seat) == player_id)
    }
}

impl Default for PlayerIds {
    fn default() -> Self {
        Self { a: 1, b: 2 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ids() {
        let ids = PlayerIds::default();
        assert_eq!(ids.id(Seat::A), 1);
        assert_eq!(ids.id(Seat::B), 2);
    }

    #[test]
    fn test_rejects_neutral_and_duplicate_ids() {
        assert!(PlayerIds::new(0, 2).is_err());
        assert!(PlayerIds::new(1, 0).is_err());
        assert_eq!(
            PlayerIds::new(7, 7),
            Err(GameError::InvalidPlayerIds { a: 7, b: 7 })
        );
    }

    #[test]
    fn test_seat_of() {
        let ids = PlayerIds::new(321, 456).unwrap();
        assert_eq!(ids.seat_of(321), Some(Seat::A));
        assert_eq!(ids.seat_of(456), Some(Seat::B));
        assert_eq!(ids.seat_of(1), None);
        assert_eq!(Seat::A.opponent(), Seat::B);
    }
}
