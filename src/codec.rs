//! Binary-to-text encodings for keys and signatures.

use crate::error::{Error, Result};

/// The supported encodings for keys, signatures, and shared secrets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// Bytes passed through unchanged.
    Raw,
    /// Uppercase hexadecimal.
    Base16,
    /// Lowercase hexadecimal.
    Hex,
    /// Standard base64 with padding.
    Base64,
}

/// Encodes `bytes` under the given encoding. The textual encodings produce
/// ASCII output.
pub fn encode(bytes: &[u8], encoding: Encoding) -> Vec<u8> {
    match encoding {
        Encoding::Raw => bytes.to_vec(),
        Encoding::Base16 => hex::encode_upper(bytes).into_bytes(),
        Encoding::Hex => hex::encode(bytes).into_bytes(),
        Encoding::Base64 => base64::encode(bytes).into_bytes(),
    }
}

/// Decodes `data` under the given encoding. Base16 accepts only uppercase
/// digits and hex only lowercase ones.
pub fn decode(data: &[u8], encoding: Encoding) -> Result<Vec<u8>> {
    match encoding {
        Encoding::Raw => Ok(data.to_vec()),
        Encoding::Base16 => {
            if data.iter().any(|b| b.is_ascii_lowercase()) {
                return Err(Error::Decode("lowercase digit in base16 input".into()));
            }
            hex::decode(data).map_err(|e| Error::Decode(e.to_string()))
        }
        Encoding::Hex => {
            if data.iter().any(|b| b.is_ascii_uppercase()) {
                return Err(Error::Decode("uppercase digit in hex input".into()));
            }
            hex::decode(data).map_err(|e| Error::Decode(e.to_string()))
        }
        Encoding::Base64 => base64::decode(data).map_err(|e| Error::Decode(e.to_string())),
    }
}

/// Decodes `data` and checks that the result is exactly `N` bytes long.
pub fn decode_fixed<const N: usize>(data: &[u8], encoding: Encoding) -> Result<[u8; N]> {
    let bytes = decode(data, encoding)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| Error::Decode(format!("expected {} bytes, got {}", N, bytes.len())))
}
