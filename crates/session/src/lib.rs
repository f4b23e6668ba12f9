//! Chargeview Session
//!
//! Session controller for the billing demo: identity handshake, view-state
//! machine, charge list loading, post-redirect charge confirmation and the
//! charge status watch.

pub mod controller;
pub mod identity;
pub mod launch;
pub mod poller;
pub mod state;

pub use controller::{Navigator, SessionController};
pub use identity::{IdentityError, IdentityGrant, IdentityProvider};
pub use launch::charge_id_from_url;
pub use poller::PollerHandle;
pub use state::{Session, SessionEvent};
