//! # Message Registry
//!
//! A process-wide mapping from numeric message id to `MessageDescriptor`,
//! used by mode 2/3 decoding to recover a schema from a decoded varid.
//! Registration is idempotent: re-registering an identical descriptor under
//! an id already present is a no-op, rather than a reject-on-exists error.

use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;

use crate::error::CodecError;
use crate::message::{decode_body, MessageDescriptor, MessageValue};
use crate::mode;

static REGISTRY: Lazy<Mutex<HashMap<u16, MessageDescriptor>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Register `descriptor` under `id`.
///
/// Re-registering an identical descriptor under an id already present is a
/// no-op. Registering a *different* descriptor under an id already present
/// fails `InvalidSchema`.
pub fn register(id: u16, descriptor: MessageDescriptor) -> Result<(), CodecError> {
    let mut map = REGISTRY.lock().unwrap();
    match map.get(&id) {
        Some(existing) if existing == &descriptor => Ok(()),
        Some(_) => Err(CodecError::invalid_schema(format!(
            "id {id} is already registered with a different descriptor"
        ))),
        None => {
            map.insert(id, descriptor);
            Ok(())
        }
    }
}

/// Look up the descriptor registered under `id`, if any.
pub fn lookup(id: u16) -> Option<MessageDescriptor> {
    REGISTRY.lock().unwrap().get(&id).cloned()
}

/// Remove all registered descriptors. Test-only: production code has no
/// legitimate reason to clear the process-wide registry.
#[cfg(test)]
pub fn clear() {
    REGISTRY.lock().unwrap().clear();
}

/// Decode a mode-2 wire message by reading its leading varid and looking up
/// the schema in the registry. Fails `UnknownMessageId` if the id is not
/// registered.
pub fn decode_by_id(wire: &[u8]) -> Result<(u16, MessageValue), CodecError> {
    let (id, body) = mode::decode_mode2(wire)?;
    let descriptor = lookup(id).ok_or(CodecError::UnknownMessageId(id))?;
    let values = decode_body(&descriptor, body)?;
    Ok((id, values))
}
