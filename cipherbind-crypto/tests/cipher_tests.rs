use cipherbind_crypto::{
    CryptoError, EncryptedData, KEY_SIZE, NONCE_SIZE, TAG_SIZE, decrypt, encrypt,
    generate_random_key,
};

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = generate_random_key();
    let plaintext = b"Hello, World!";
    let encrypted = encrypt(key.as_bytes(), plaintext).unwrap();
    let decrypted = decrypt(key.as_bytes(), &encrypted).unwrap();
    assert_eq!(decrypted, plaintext);
}

#[test]
fn encrypt_decrypt_empty() {
    let key = generate_random_key();
    let encrypted = encrypt(key.as_bytes(), b"").unwrap();
    let decrypted = decrypt(key.as_bytes(), &encrypted).unwrap();
    assert_eq!(decrypted, b"");
}

#[test]
fn wrong_key_fails_decryption() {
    let key1 = generate_random_key();
    let key2 = generate_random_key();
    let encrypted = encrypt(key1.as_bytes(), b"Secret").unwrap();
    assert!(decrypt(key2.as_bytes(), &encrypted).is_err());
}

#[test]
fn tampered_data_fails_decryption() {
    let key = generate_random_key();
    let mut encrypted = encrypt(key.as_bytes(), b"Secret").unwrap();
    encrypted.ciphertext[0] ^= 0xFF;
    assert!(decrypt(key.as_bytes(), &encrypted).is_err());
}

#[test]
fn same_plaintext_produces_different_ciphertext() {
    let key = generate_random_key();
    let e1 = encrypt(key.as_bytes(), b"Same").unwrap();
    let e2 = encrypt(key.as_bytes(), b"Same").unwrap();
    assert_ne!(e1.nonce, e2.nonce);
    assert_ne!(e1.ciphertext, e2.ciphertext);
}

// ── Key length ───────────────────────────────────────────────────

#[test]
fn short_key_is_rejected_on_encrypt() {
    let err = encrypt(&[7u8; 16], b"data").unwrap_err();
    match err {
        CryptoError::InvalidKeyLength { expected, actual } => {
            assert_eq!(expected, KEY_SIZE);
            assert_eq!(actual, 16);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn long_key_is_rejected_on_decrypt() {
    let key = generate_random_key();
    let encrypted = encrypt(key.as_bytes(), b"data").unwrap();
    let err = decrypt(&[1u8; 64], &encrypted).unwrap_err();
    assert!(matches!(
        err,
        CryptoError::InvalidKeyLength { expected: 32, actual: 64 }
    ));
}

// ── EncryptedData ────────────────────────────────────────────────

#[test]
fn encrypted_data_len() {
    let key = generate_random_key();
    let encrypted = encrypt(key.as_bytes(), b"test").unwrap();
    assert_eq!(encrypted.len(), NONCE_SIZE + encrypted.ciphertext.len());
}

#[test]
fn encrypted_data_is_empty() {
    let ed = EncryptedData {
        nonce: [0u8; NONCE_SIZE],
        ciphertext: vec![],
    };
    assert!(ed.is_empty());

    let key = generate_random_key();
    let encrypted = encrypt(key.as_bytes(), b"data").unwrap();
    assert!(!encrypted.is_empty());
}

#[test]
fn bytes_layout_is_nonce_then_ciphertext() {
    let key = generate_random_key();
    let encrypted = encrypt(key.as_bytes(), b"layout").unwrap();
    let bytes = encrypted.to_bytes();
    assert_eq!(&bytes[..NONCE_SIZE], &encrypted.nonce);
    assert_eq!(&bytes[NONCE_SIZE..], encrypted.ciphertext.as_slice());

    let parsed = EncryptedData::from_bytes(&bytes).unwrap();
    assert_eq!(decrypt(key.as_bytes(), &parsed).unwrap(), b"layout");
}

#[test]
fn bytes_shorter_than_nonce_and_tag_fail() {
    let err = EncryptedData::from_bytes(&[0u8; NONCE_SIZE + TAG_SIZE - 1]).unwrap_err();
    assert!(matches!(err, CryptoError::Decryption(_)));
}

#[test]
fn bytes_of_exactly_nonce_and_tag_parse() {
    let parsed = EncryptedData::from_bytes(&[0u8; NONCE_SIZE + TAG_SIZE]).unwrap();
    assert_eq!(parsed.ciphertext.len(), TAG_SIZE);
}
