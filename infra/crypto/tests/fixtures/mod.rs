#![allow(dead_code)]

use csign_crypto::prelude::*;
use p256::SecretKey;

pub struct KeyPairs {
    pub server: SecretKey,
    pub device: SecretKey,
}

impl KeyPairs {
    pub fn new(server: u8, device: u8) -> Self {
        Self {
            server: SecretKey::from_slice(&[server; 32]).unwrap(),
            device: SecretKey::from_slice(&[device; 32]).unwrap(),
        }
    }

    /// Master secret as the server computes it from stored key material.
    pub fn server_master(&self) -> MasterSecret {
        derive_master_secret(
            &encode_private_key(&self.server),
            &encode_public_key(&self.device.public_key()),
        )
        .unwrap()
    }

    /// Master secret as the device computes it.
    pub fn device_master(&self) -> MasterSecret {
        agree(&self.device, &self.server.public_key())
    }
}
