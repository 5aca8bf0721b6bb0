//! Frames a payload with its type and length, hashes the framed bytes, and
//! zlib-compresses the result for storage. Reverses the process on read.

use crate::error::{DzhigitError, Result};
use crate::hash::{Hash, ObjectType};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};
use std::str::FromStr;

/// Frame/hash/compress and their inverse. Stateless by design (Design Note
/// "Interface abstraction") so a caller can swap in an in-memory double for
/// tests without touching [`crate::store::ObjectStore`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectCodec;

impl ObjectCodec {
    pub fn new() -> Self {
        Self
    }

    /// `framed = "<type> <len>\0<payload>"`, `hash = sha1(framed)`,
    /// `compressed = zlib(framed)`.
    pub fn serialize(&self, payload: &[u8], object_type: ObjectType) -> Result<(Hash, Vec<u8>)> {
        let framed = frame(payload, object_type);

        let mut hasher = Sha1::new();
        hasher.update(&framed);
        let hash = Hash::from_bytes(hasher.finalize().into());

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&framed)?;
        let compressed = encoder.finish()?;

        Ok((hash, compressed))
    }

    /// Inflate, split on the first space and the first NUL, validate the
    /// decoded length against the declared length.
    pub fn deserialize(&self, compressed: &[u8]) -> Result<(ObjectType, Vec<u8>)> {
        let mut decoder = ZlibDecoder::new(compressed);
        let mut framed = Vec::new();
        decoder.read_to_end(&mut framed)?;

        let space = framed
            .iter()
            .position(|&b| b == b' ')
            .ok_or_else(|| DzhigitError::BadFormat("missing header space".into()))?;
        let nul = framed
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| DzhigitError::BadFormat("missing header NUL".into()))?;
        if nul < space {
            return Err(DzhigitError::BadFormat("NUL precedes header space".into()));
        }

        let type_name = std::str::from_utf8(&framed[..space])
            .map_err(|e| DzhigitError::BadFormat(e.to_string()))?;
        let object_type = ObjectType::from_str(type_name)?;

        let len_str = std::str::from_utf8(&framed[space + 1..nul])
            .map_err(|e| DzhigitError::BadFormat(e.to_string()))?;
        let declared_len: usize = len_str
            .parse()
            .map_err(|_| DzhigitError::BadFormat(format!("invalid length '{len_str}'")))?;

        let payload = framed[nul + 1..].to_vec();
        if payload.len() != declared_len {
            return Err(DzhigitError::BadFormat(format!(
                "declared length {declared_len} does not match payload length {}",
                payload.len()
            )));
        }

        Ok((object_type, payload))
    }
}

fn frame(payload: &[u8], object_type: ObjectType) -> Vec<u8> {
    let mut framed = Vec::with_capacity(payload.len() + 16);
    framed.extend_from_slice(object_type.as_str().as_bytes());
    framed.push(b' ');
    framed.extend_from_slice(payload.len().to_string().as_bytes());
    framed.push(0);
    framed.extend_from_slice(payload);
    framed
}
