//! Commonly used types for ease of import.

pub use crate::{
    choose_move, update_memory_after_result, AiPlayer, AttackOutcome, Board, BoardError, BoardView,
    Difficulty, Match, MatchConfig, MatchError, Orientation, Phase, Player, Ship, Side,
    SpecialAttack, TargetingMemory, Team,
};
