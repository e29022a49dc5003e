//! Network layer for talking to the booking API.

pub mod api;
