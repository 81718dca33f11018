//! Symmetric text encryption with self-describing binary frames.
//!
//! # Frame formats
//!
//! ```text
//! AES-128-CBC / AES-256-CBC   iv(16)    ‖ pkcs7-padded ciphertext
//! AES-256-GCM                 nonce(12) ‖ tag(16) ‖ ciphertext
//! 3DES-CBC                    iv(8)     ‖ pkcs7-padded ciphertext
//! RC4                         ciphertext
//! ```
//!
//! Frames are carried as standard base64 (default) or lowercase hex.
//!
//! Key material is a passphrase reduced with SHA-256 and truncated to the
//! algorithm's key length. RC4 has no IV, so the same text and passphrase
//! always produce the same frame.

pub mod cipher;
pub mod encoding;
pub mod key;
pub mod rc4;
pub mod text;

pub use cipher::{open, seal, CipherError};
pub use text::{decrypt_text, encrypt_text, Decryptor, Encryptor};
