//! # Mock Acoustic-Modem Transport
//!
//! A connection-oriented, half-duplex stand-in for a physical acoustic
//! modem. Frames handed to `send_frame` are scheduled for delivery after a
//! simulated `transmission_delay`, may be dropped per `packet_loss_probability`,
//! and may suffer independent bit flips per `bit_error_rate` before being
//! fanned out to every registered receiver — modeling a noisy,
//! low-bandwidth acoustic link as an in-memory `tokio` task rather than
//! real hardware.

use std::sync::Arc;

use async_trait::async_trait;
use rand::Rng;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Duration;

use crate::error::CodecError;

/// Connection state of a `MockModem`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModemState {
    Disconnected,
    Connected,
}

/// Link-quality parameters for a `MockModem`.
#[derive(Debug, Clone, Copy)]
pub struct ModemConfig {
    /// Simulated one-way propagation + transmission delay.
    pub transmission_delay: Duration,
    /// Probability, in `[0.0, 1.0]`, that a sent frame is dropped entirely.
    pub packet_loss_probability: f64,
    /// Probability, in `[0.0, 1.0]`, that any individual bit is flipped
    /// in transit, applied independently per bit.
    pub bit_error_rate: f64,
    /// Frames larger than this are rejected by `send_frame` before any
    /// delay or loss simulation runs.
    pub max_frame_size: usize,
}

impl Default for ModemConfig {
    fn default() -> Self {
        Self {
            transmission_delay: Duration::from_millis(500),
            packet_loss_probability: 0.0,
            bit_error_rate: 0.0,
            max_frame_size: 256,
        }
    }
}

/// Receives frames delivered by a `MockModem`, tagged with the originating
/// `source_id` passed to `send_frame`.
#[async_trait]
pub trait ModemReceiver: Send + Sync {
    async fn on_frame(&self, frame: Vec<u8>, source_id: u8);
}

/// A mock acoustic-modem endpoint.
///
/// Cloning a `MockModem` shares the same underlying connection state and
/// receiver list; clone it to hand a transmit/receive handle to multiple
/// tasks without additional synchronization.
#[derive(Clone)]
pub struct MockModem {
    config: ModemConfig,
    state: Arc<Mutex<ModemState>>,
    receivers: Arc<Mutex<Vec<Arc<dyn ModemReceiver>>>>,
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl MockModem {
    pub fn new(config: ModemConfig) -> Self {
        Self {
            config,
            state: Arc::new(Mutex::new(ModemState::Disconnected)),
            receivers: Arc::new(Mutex::new(Vec::new())),
            pending: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Transition to `Connected`. Idempotent.
    pub async fn connect(&self) -> Result<(), CodecError> {
        *self.state.lock().await = ModemState::Connected;
        Ok(())
    }

    /// Transition to `Disconnected`, aborting any deliveries still in
    /// flight. Idempotent.
    pub async fn disconnect(&self) -> Result<(), CodecError> {
        *self.state.lock().await = ModemState::Disconnected;
        for handle in self.pending.lock().await.drain(..) {
            handle.abort();
        }
        Ok(())
    }

    pub async fn state(&self) -> ModemState {
        *self.state.lock().await
    }

    /// Register a receiver to be notified of frames that survive delay,
    /// loss, and corruption simulation.
    pub async fn register_receiver(&self, receiver: Arc<dyn ModemReceiver>) {
        self.receivers.lock().await.push(receiver);
    }

    /// Send `frame` on behalf of `source_id`. Fails `OversizeMessage`
    /// immediately if the frame exceeds `max_frame_size`, or if the modem
    /// is not connected. Otherwise schedules delivery on a background task
    /// and returns immediately — the acoustic link's latency should not
    /// block the caller.
    pub async fn send_frame(&self, frame: &[u8], source_id: u8) -> Result<(), CodecError> {
        if frame.len() > self.config.max_frame_size {
            return Err(CodecError::OversizeMessage(format!(
                "frame of {} bytes exceeds max_frame_size of {}",
                frame.len(),
                self.config.max_frame_size
            )));
        }
        if *self.state.lock().await != ModemState::Connected {
            return Err(CodecError::Other("modem is not connected".into()));
        }

        let config = self.config;
        let receivers = self.receivers.clone();
        let frame = frame.to_vec();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(config.transmission_delay).await;

            let mut rng = rand::thread_rng();
            if rng.gen_bool(config.packet_loss_probability.clamp(0.0, 1.0)) {
                log::debug!("simulated packet loss: dropped {} byte frame", frame.len());
                return;
            }

            let delivered = apply_bit_errors(&frame, config.bit_error_rate, &mut rng);

            let targets = receivers.lock().await.clone();
            for receiver in targets {
                receiver.on_frame(delivered.clone(), source_id).await;
            }
        });
        self.pending.lock().await.push(handle);

        Ok(())
    }
}

fn apply_bit_errors(frame: &[u8], bit_error_rate: f64, rng: &mut impl Rng) -> Vec<u8> {
    let rate = bit_error_rate.clamp(0.0, 1.0);
    if rate == 0.0 {
        return frame.to_vec();
    }
    frame
        .iter()
        .map(|&byte| {
            let mut b = byte;
            for bit in 0..8 {
                if rng.gen_bool(rate) {
                    b ^= 1 << bit;
                }
            }
            b
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingReceiver {
        count: Arc<AtomicUsize>,
        last_source: Arc<Mutex<u8>>,
    }

    #[async_trait]
    impl ModemReceiver for CountingReceiver {
        async fn on_frame(&self, _frame: Vec<u8>, source_id: u8) {
            self.count.fetch_add(1, Ordering::SeqCst);
            *self.last_source.lock().await = source_id;
        }
    }

    #[tokio::test]
    async fn send_requires_connection() {
        let modem = MockModem::new(ModemConfig::default());
        let err = modem.send_frame(&[1, 2, 3], 1).await.unwrap_err();
        assert!(matches!(err, CodecError::Other(_)));
    }

    #[tokio::test]
    async fn oversize_frame_rejected_before_connection_check() {
        let modem = MockModem::new(ModemConfig {
            max_frame_size: 2,
            ..ModemConfig::default()
        });
        let err = modem.send_frame(&[1, 2, 3], 1).await.unwrap_err();
        assert!(matches!(err, CodecError::OversizeMessage(_)));
    }

    #[tokio::test]
    async fn connected_frame_is_delivered_after_delay_with_source_id() {
        let modem = MockModem::new(ModemConfig {
            transmission_delay: Duration::from_millis(5),
            ..ModemConfig::default()
        });
        modem.connect().await.unwrap();

        let count = Arc::new(AtomicUsize::new(0));
        let last_source = Arc::new(Mutex::new(0u8));
        modem
            .register_receiver(Arc::new(CountingReceiver {
                count: count.clone(),
                last_source: last_source.clone(),
            }))
            .await;

        modem.send_frame(&[0xAA, 0xBB], 7).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(*last_source.lock().await, 7);
    }

    #[tokio::test]
    async fn disconnect_then_send_fails() {
        let modem = MockModem::new(ModemConfig::default());
        modem.connect().await.unwrap();
        modem.disconnect().await.unwrap();
        assert!(modem.send_frame(&[1], 0).await.is_err());
    }

    #[tokio::test]
    async fn disconnect_cancels_in_flight_delivery() {
        let modem = MockModem::new(ModemConfig {
            transmission_delay: Duration::from_millis(50),
            ..ModemConfig::default()
        });
        modem.connect().await.unwrap();

        let count = Arc::new(AtomicUsize::new(0));
        let last_source = Arc::new(Mutex::new(0u8));
        modem
            .register_receiver(Arc::new(CountingReceiver {
                count: count.clone(),
                last_source,
            }))
            .await;

        modem.send_frame(&[0x01], 1).await.unwrap();
        modem.disconnect().await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn full_bit_error_rate_flips_every_bit() {
        let mut rng = rand::thread_rng();
        let original = vec![0x00u8, 0xFF];
        let corrupted = apply_bit_errors(&original, 1.0, &mut rng);
        assert_eq!(corrupted, vec![0xFF, 0x00]);
    }

    #[test]
    fn zero_bit_error_rate_is_identity() {
        let mut rng = rand::thread_rng();
        let original = vec![0x12u8, 0x34, 0x56];
        assert_eq!(apply_bit_errors(&original, 0.0, &mut rng), original);
    }
}
