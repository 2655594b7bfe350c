#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Roast telemetry engine (backend-agnostic).
//!
//! Records manual bean-temperature readings and milestone events against an
//! elapsed-time clock, derives rate-of-rise and development-time-ratio
//! metrics, and synthesizes interpolated display points between sparse
//! readings. Persistence and inventory go through the `roast_traits`
//! collaborator contracts.
//!
//! ## Architecture
//!
//! - **Clock**: pause/resume elapsed-seconds timer (`timer` module)
//! - **Math**: pure RoR/DTR/estimation functions (`math` module)
//! - **Log**: append-only readings/events with bounded undo (`log` module)
//! - **Phase**: stateless phase & ratio derivation (`phase` module)
//! - **Interpolation**: display-only synthetic point stream (`interpolate`)
//! - **Session**: the aggregate tying the above together (`session`)
//! - **Ticker**: cancellable 1 Hz tick source for live runs (`ticker`)

pub mod error;
pub mod interpolate;
pub mod log;
pub mod math;
pub mod phase;
pub mod session;
pub mod ticker;
pub mod timer;

pub use error::{BuildError, Result, RoastError};
pub use interpolate::Interpolator;
pub use log::{ReadingLog, UndoEntry};
pub use phase::{PhaseRatios, RoastPhase};
pub use session::{Metrics, RoastSession, RoastSessionBuilder, SessionCfg};
pub use ticker::Ticker;
pub use timer::{RoastTimer, format_time};
