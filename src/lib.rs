//! Soft-AP configuration firmware.
//!
//! The device brings up a Wi-Fi access point and serves a page at
//! `http://192.168.4.1/` whose form posts the access point's own settings
//! back to `/setinfo`.

pub mod body;
pub mod page;
pub mod settings;
pub mod station;

#[cfg(target_os = "espidf")]
pub mod portal;
