//! # Transport
//!
//! The codec is transport-agnostic; this module provides the mock
//! acoustic-modem transport used for integration testing and local
//! development: an in-memory stand-in for a physical link, driven by
//! `tokio`, modeling a half-duplex acoustic link with configurable delay,
//! loss, and bit errors.

pub mod mock_modem;

pub use mock_modem::{ModemConfig, ModemReceiver, ModemState, MockModem};
