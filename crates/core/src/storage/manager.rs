use serde::{Deserialize, Serialize};

use crate::errors::TrackerError;
use crate::models::ledger::Ledger;

/// Current on-disk format version. Bumped when the envelope layout changes
/// incompatibly; older readers reject newer files instead of misreading.
pub const CURRENT_VERSION: u16 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u16,
    ledger: &'a Ledger,
}

#[derive(Deserialize)]
struct Envelope {
    version: u16,
    ledger: Ledger,
}

/// High-level storage operations: save/load the ledger as a versioned
/// JSON envelope, to raw bytes or a file on disk.
pub struct StorageManager;

impl StorageManager {
    /// Serialize a ledger to raw bytes (portable, platform-independent).
    pub fn save_to_bytes(ledger: &Ledger) -> Result<Vec<u8>, TrackerError> {
        let envelope = EnvelopeRef {
            version: CURRENT_VERSION,
            ledger,
        };
        serde_json::to_vec_pretty(&envelope)
            .map_err(|e| TrackerError::Serialization(format!("Failed to serialize ledger: {e}")))
    }

    /// Deserialize a ledger from raw bytes, rejecting unknown versions.
    pub fn load_from_bytes(data: &[u8]) -> Result<Ledger, TrackerError> {
        let envelope: Envelope = serde_json::from_slice(data)
            .map_err(|e| TrackerError::Deserialization(format!("Failed to deserialize ledger: {e}")))?;
        if envelope.version > CURRENT_VERSION {
            return Err(TrackerError::UnsupportedVersion(envelope.version));
        }
        Ok(envelope.ledger)
    }

    /// Save the ledger to a file on disk.
    pub fn save_to_file(ledger: &Ledger, path: &str) -> Result<(), TrackerError> {
        let bytes = Self::save_to_bytes(ledger)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load the ledger from a file on disk.
    pub fn load_from_file(path: &str) -> Result<Ledger, TrackerError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes)
    }
}
