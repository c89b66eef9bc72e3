//! Attack phase: per-move validation and combat resolution.
//!
//! Moves from both players are resolved one at a time in a fixed order
//! (all of seat A's moves, then all of seat B's, each in list order), and
//! every resolved move mutates the board immediately. A later move therefore
//! sees the result of earlier ones.
//!
//! How committed attackers and defenders trade casualties is a
//! [`CombatPolicy`]. The default, [`DefenderAdvantage`], gives defenders a
//! 25% bonus so that holding ground is meaningful.

use std::sync::Arc;

use crate::error::AttackError;
use crate::events::GameLogger;
use crate::game::{AttackMove, Board, Cell, PlayerId, PlayerIds, Seat};

/// Default defender bonus, in percent of the defending soldiers.
pub const DEFAULT_DEFENDER_BONUS_PERCENT: u32 = 25;

/// Soldiers left on each side after a fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombatResult {
    /// Surviving attackers.
    pub attackers: u32,
    /// Surviving defenders.
    pub defenders: u32,
}

/// Rule turning committed attackers and defenders into survivors.
///
/// Implementations must be deterministic. Whatever they return, the attacker
/// only takes the cell when no defender survives and at least one attacker
/// does.
pub trait CombatPolicy: Send + Sync {
    /// Fight `attackers` against `defenders` (defenders may be zero).
    fn resolve(&self, attackers: u32, defenders: u32) -> CombatResult;
}

/// Defenders fight at `100 + bonus_percent`% strength.
///
/// An attack strictly stronger than the effective defence captures the cell
/// with `attackers - effective` survivors. Otherwise the defenders lose as
/// many soldiers as were committed against them (down to zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefenderAdvantage {
    /// Extra defensive strength in percent.
    pub bonus_percent: u32,
}

impl Default for DefenderAdvantage {
    fn default() -> Self {
        Self {
            bonus_percent: DEFAULT_DEFENDER_BONUS_PERCENT,
        }
    }
}

impl CombatPolicy for DefenderAdvantage {
    fn resolve(&self, attackers: u32, defenders: u32) -> CombatResult {
        let bonus = u64::from(defenders) * u64::from(self.bonus_percent) / 100;
        let effective = u64::from(defenders) + bonus;

        if u64::from(attackers) > effective {
            // attackers > effective, so the difference fits in u32
            let remaining = u32::try_from(u64::from(attackers) - effective).unwrap_or(0);
            CombatResult {
                attackers: remaining,
                defenders: 0,
            }
        } else {
            CombatResult {
                attackers: 0,
                defenders: defenders.saturating_sub(attackers),
            }
        }
    }
}

/// Plain subtraction: the larger side survives with the difference, equal
/// sides wipe each other out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Attrition;

impl CombatPolicy for Attrition {
    fn resolve(&self, attackers: u32, defenders: u32) -> CombatResult {
        CombatResult {
            attackers: attackers.saturating_sub(defenders),
            defenders: defenders.saturating_sub(attackers),
        }
    }
}

/// What happened to the target of a resolved attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// The target was friendly and received the soldiers.
    Reinforced {
        /// Soldiers on the target afterwards.
        soldiers: u32,
    },
    /// The attacker took the cell.
    Captured {
        /// Attackers now holding the cell.
        soldiers: u32,
    },
    /// The defender held the cell.
    Repelled {
        /// Defenders left on the cell.
        soldiers: u32,
    },
    /// Neither side survived; the cell is neutral.
    Neutralized,
}

/// One attack move with the seat that issued it and its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackReport {
    /// Issuing player.
    pub player: PlayerId,
    /// The move as submitted.
    pub mv: AttackMove,
    /// Outcome, or why the move was rejected.
    pub result: Result<AttackOutcome, AttackError>,
}

/// Validates and resolves attack moves from both players.
#[derive(Clone)]
pub struct Attacker {
    ids: PlayerIds,
    policy: Arc<dyn CombatPolicy>,
    logger: Arc<dyn GameLogger>,
}

impl std::fmt::Debug for Attacker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attacker")
            .field("ids", &self.ids)
            .finish_non_exhaustive()
    }
}

impl Attacker {
    /// Create an attacker using [`DefenderAdvantage`] combat.
    #[must_use]
    pub fn new(ids: PlayerIds, logger: Arc<dyn GameLogger>) -> Self {
        Self {
            ids,
            policy: Arc::new(DefenderAdvantage::default()),
            logger,
        }
    }

    /// Replace the combat policy.
    #[must_use]
    pub fn with_policy(mut self, policy: Arc<dyn CombatPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Resolve seat A's moves, then seat B's, against `board`.
    ///
    /// Invalid moves are rejected individually and leave the board as it
    /// was; the remaining moves are still processed. Returns one report per
    /// submitted move in resolution order.
    pub fn apply(
        &self,
        board: &mut Board,
        moves_a: &[AttackMove],
        moves_b: &[AttackMove],
    ) -> Vec<AttackReport> {
        let queue = [(Seat::A, moves_a), (Seat::B, moves_b)];
        let mut reports = Vec::with_capacity(moves_a.len() + moves_b.len());

        for (seat, moves) in queue {
            let player = self.ids.id(seat);
            for mv in moves {
                let result = self.resolve(player, mv, board);
                match &result {
                    Ok(outcome) => self.logger.attack_applied(player, mv, *outcome),
                    Err(err) => self.logger.attack_rejected(player, mv, err),
                }
                reports.push(AttackReport {
                    player,
                    mv: *mv,
                    result,
                });
            }
        }

        reports
    }

    /// Validate one move against the current board, then resolve it.
    fn resolve(
        &self,
        player: PlayerId,
        mv: &AttackMove,
        board: &mut Board,
    ) -> Result<AttackOutcome, AttackError> {
        let (source, target) = validate(player, mv, board)?;

        let remaining_source = source.num_soldiers() - mv.amount;
        let target_after = if target.is_controlled_by(player) {
            let soldiers = target
                .num_soldiers()
                .checked_add(mv.amount)
                .ok_or(AttackError::SoldierOverflow)?;
            Cell::new(player, soldiers)?
        } else {
            let fight = self.policy.resolve(mv.amount, target.num_soldiers());
            if fight.defenders > 0 {
                Cell::new(target.controlling_player_id(), fight.defenders)?
            } else if fight.attackers > 0 {
                Cell::new(player, fight.attackers)?
            } else {
                Cell::neutral()
            }
        };

        let mut source_after = source;
        source_after.update_num_soldiers(remaining_source)?;
        board.set_cell(mv.from, source_after)?;
        board.set_cell(mv.to, target_after)?;

        Ok(outcome(player, &target, &target_after))
    }
}

/// Check the move against the board as it is now; returns the source and
/// target cells.
fn validate(player: PlayerId, mv: &AttackMove, board: &Board) -> Result<(Cell, Cell), AttackError> {
    if mv.amount == 0 {
        return Err(AttackError::EmptyAttack);
    }
    let from = board.check_bounds(mv.from)?;
    let to = board.check_bounds(mv.to)?;
    if !from.is_adjacent_to(to) {
        return Err(AttackError::NotAdjacent);
    }

    let (Some(source), Some(target)) = (board.cell(from), board.cell(to)) else {
        return Err(AttackError::NotAdjacent);
    };
    if !source.is_controlled_by(player) {
        return Err(AttackError::NotControlled);
    }
    if source.num_soldiers() <= mv.amount {
        return Err(AttackError::InsufficientSoldiers {
            available: source.num_soldiers(),
            committed: mv.amount,
        });
    }

    Ok((*source, *target))
}

fn outcome(player: PlayerId, before: &Cell, after: &Cell) -> AttackOutcome {
    if before.is_controlled_by(player) {
        AttackOutcome::Reinforced {
            soldiers: after.num_soldiers(),
        }
    } else if after.is_controlled_by(player) {
        AttackOutcome::Captured {
            soldiers: after.num_soldiers(),
        }
    } else if after.is_neutral() {
        AttackOutcome::Neutralized
    } else {
        AttackOutcome::Repelled {
            soldiers: after.num_soldiers(),
        }
    }
}

/// Kani formal verification proofs.
///
/// Run with: `cargo kani`
#[cfg(kani)]
mod kani_proofs {
    use super::{CombatPolicy, DefenderAdvantage};

    /// Prove that defender-advantage combat never creates soldiers and never
    /// leaves both sides standing.
    #[kani::proof]
    fn prove_defender_advantage_bounded() {
        let attackers: u32 = kani::any();
        let defenders: u32 = kani::any();
        let bonus_percent: u32 = kani::any();
        kani::assume(bonus_percent <= 100);

        let result = DefenderAdvantage { bonus_percent }.resolve(attackers, defenders);

        assert!(result.attackers <= attackers);
        assert!(result.defenders <= defenders);
        assert!(result.attackers == 0 || result.defenders == 0);
    }
}
