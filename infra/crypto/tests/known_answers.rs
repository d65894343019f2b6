//! Fixed vectors for the key agreement, key derivation, signature and vault formats.
//! Any change to byte order, block layout, HMAC chaining or truncation breaks these.

mod fixtures;

use csign_crypto::prelude::*;
use csign_domain::SignatureType;
use fixtures::KeyPairs;
use hex_literal::hex;

const MASTER: MasterSecret = DerivedKey::from_bytes([0x42; 16]);
const PAYLOAD: &[u8] = b"POST&/x&secret";

#[test]
fn derive_key_vectors() {
    let cases = [
        (index::POSSESSION, hex!("b79a4ed1b63f3449a97dba67284adb90")),
        (index::KNOWLEDGE, hex!("fc17c9a2f9f5ae955e8ddf61fa852d3c")),
        (index::BIOMETRY, hex!("71fc3ead5171abcca1a5d10ccbcd29b2")),
        (index::TRANSPORT, hex!("135dc54d5b3d66080c0d670e2ee2cf10")),
        (index::VAULT_ENCRYPTION, hex!("54637641ae8c87ce185a5adc40b89588")),
    ];

    for (index, expected) in cases {
        assert_eq!(derive_key(&MASTER, index).as_bytes(), &expected, "index {index}");
    }
}

#[test]
fn signature_vectors() {
    let keys = derive_signature_keys(SignatureType::PossessionKnowledgeBiometry, &MASTER);
    assert_eq!(compute_signature(PAYLOAD, &keys, 77).unwrap(), "93940552-31802727-14385697");
    assert!(verify(PAYLOAD, "93940552-31802727-14385697", &keys, 77).unwrap());

    let keys = derive_signature_keys(SignatureType::Possession, &MASTER);
    assert_eq!(compute_signature(PAYLOAD, &keys, 0).unwrap(), "49004727");
}

#[test]
fn master_secret_vector() {
    let pairs = KeyPairs::new(7, 9);

    let expected = hex!("55daff0a1c3db26365138ced9f00d0e2");
    assert_eq!(pairs.server_master().as_bytes(), &expected);
    assert_eq!(pairs.device_master().as_bytes(), &expected);
}

#[test]
fn sealed_vault_key_vector() {
    let sealed = "AQABAgMEBQYHCAkKC1o6f09EFUWUxf8k7BPxTsK9W8MvnUACOE+1wvMh+Nd2";

    let opened = open_vault_key(&MASTER, sealed).unwrap();
    assert_eq!(opened.as_bytes(), &hex!("54637641ae8c87ce185a5adc40b89588"));
}
