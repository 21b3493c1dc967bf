//! Types shared between the Nexora site server and the Bevy client.

pub mod catalog;
pub mod config;
pub mod contact;
pub mod protocol;
pub mod visibility;
