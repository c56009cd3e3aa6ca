//! Hero choreography: a brick wall flies in, the title rises, then the
//! tagline types itself and cycles. All of it is plain state driven by timer
//! and visibility actions; the component only schedules and renders.

pub mod sequence;
pub mod timing;
pub mod visibility;
pub mod wall;

pub use sequence::{letters, SequenceAction, SequenceState, Stage};
pub use timing::RunStep;
pub use visibility::{classify_visibility, Side, Visibility};
pub use wall::{brick_flights, WallLayout};
