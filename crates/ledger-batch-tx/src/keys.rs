//! Signing keypair loading.
//!
//! Keypairs come either from a Solana CLI keypair file (a JSON array of the
//! 64 secret bytes) or from an inline secret, given as base58 or as the same
//! JSON array.

use crate::KeyError;
use solana_sdk::signature::{read_keypair_file, Keypair};
use std::path::Path;

const KEYPAIR_LENGTH: usize = 64;

/// Load a keypair from a Solana CLI keypair file
pub fn load_from_file(path: impl AsRef<Path>) -> Result<Keypair, KeyError> {
    let path = path.as_ref();
    read_keypair_file(path).map_err(|e| KeyError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Load a keypair from an inline base58 or JSON-array secret
pub fn load_from_encoded(secret: &str) -> Result<Keypair, KeyError> {
    let secret = secret.trim();
    let bytes = if secret.starts_with('[') {
        serde_json::from_str::<Vec<u8>>(secret)
            .map_err(|e| KeyError::Decode(format!("invalid JSON byte array: {}", e)))?
    } else {
        bs58::decode(secret)
            .into_vec()
            .map_err(|e| KeyError::Decode(format!("invalid base58: {}", e)))?
    };

    if bytes.len() != KEYPAIR_LENGTH {
        return Err(KeyError::Decode(format!(
            "expected {} secret bytes, got {}",
            KEYPAIR_LENGTH,
            bytes.len()
        )));
    }

    #[allow(deprecated)]
    let keypair = Keypair::from_bytes(&bytes).map_err(|e| KeyError::Decode(e.to_string()))?;
    Ok(keypair)
}
