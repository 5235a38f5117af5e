//! Turn and phase state machine.
//!
//! ```text
//! Start --BeginDraft--> Draft --DraftPicked--> Draft
//!                       Draft --BeginGame--> Game
//!                       Game --MoveResolved--> TurnEnd
//!                       TurnEnd --TurnResolved(Continue)--> Game
//!                       TurnEnd --TurnResolved(GameOver)--> GameEnd
//! ```
//!
//! `transition` is a pure function of the current phase and an event. The
//! game owns the state and carries out the returned `PhaseEffect`s.

mod machine;

pub use machine::{transition, Phase, PhaseEffect, PhaseEvent, TurnOutcome};
