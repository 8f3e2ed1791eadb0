//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, on a simulated clock
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod events;
pub mod kinematics;
pub mod obstacles;
pub mod overlay;
pub mod state;
pub mod tick;

pub use collision::Outcome;
pub use events::{
    EventKind, EventProgress, EventScheduler, end_event, set_events_enabled, trigger_event,
    update_events,
};
pub use kinematics::Regime;
pub use obstacles::ObstacleStream;
pub use overlay::{Cloud, CloudLayer, SkyOverlay};
pub use state::{
    Avatar, Backdrop, GameEvent, GameMode, GamePhase, GameState, Obstacle, ObstacleKind,
    PhysicsParams, Skin,
};
pub use tick::{TickInput, tick};
