//! BuyEuropean desktop client
//!
//! Sends a product photo to the BuyEuropean analysis service, renders the
//! classification and European alternatives, and relays user feedback.

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod frontend;
pub mod imaging;
pub mod platform;
pub mod types;
pub mod utils;
