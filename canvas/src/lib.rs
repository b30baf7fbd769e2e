//! Canvas interaction core for the collaborative spatial board.
//!
//! This crate owns the client-side canvas model: translating pointer and
//! wheel events into pan/zoom/drag gestures, maintaining the viewport
//! transform between world and screen space, and reconciling optimistic
//! item state against an asynchronous persistence collaborator. It is
//! deliberately framework-agnostic: a host UI layer feeds it input events
//! and renders from the screen-space geometry it computes.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`item`] | Board and item models, sparse updates, in-memory item store |
//! | [`camera`] | Pan/zoom viewport transform and coordinate conversions |
//! | [`input`] | Pointer gesture state machine (canvas pans and item drags) |
//! | [`hit`] | Screen-space hit-testing against item cards |
//! | [`scene`] | Scene composition: camera + gestures + grid geometry |
//! | [`session`] | Board session state and the persistence contract |
//! | [`consts`] | Shared numeric constants (zoom limits, drag threshold, etc.) |

pub mod camera;
pub mod consts;
pub mod hit;
pub mod input;
pub mod item;
pub mod scene;
pub mod session;
