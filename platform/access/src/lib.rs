//! Haven access control engine.
//!
//! Computes, for an (actor, space, channel) triple, the exact effective
//! permission set — role combination, channel override precedence,
//! owner/administrator bypass, admin-channel gating and the portal/guest
//! access paths — against stores the host application implements. Every
//! resolution is a pure read of current data; identical inputs give
//! identical answers regardless of call order.

pub mod access;
pub mod database;
pub mod error;
pub mod global;
pub mod portals;

#[cfg(test)]
mod tests;

pub use access::{
	compute_channel_permissions, compute_permissions, resolve_channel_access, ChannelAccess, Participation,
};
pub use error::AccessError;
