//! Request handlers
//!
//! One module per collection plus the login flow. Authorization never lives
//! here: the gate layer has already run by the time a handler body executes.

pub mod account;
pub mod login;
pub mod post;
