//! Textual genome codes.
//!
//! A genome is encoded as 8 little-endian IEEE-754 bytes per value, then as
//! lowercase hexadecimal with two characters per byte. The encoding does not
//! depend on the host's byte order, so codes move freely between machines.

use crate::error::{EvoError, Result};

/// Bytes used per gene.
pub const BYTES_PER_GENE: usize = std::mem::size_of::<f64>();

/// Encodes a genome into raw bytes.
pub fn to_bytes(genome: &[f64]) -> Vec<u8> {
    genome.iter().flat_map(|gene| gene.to_le_bytes()).collect()
}

/// Decodes raw bytes into a genome.
///
/// # Errors
///
/// Returns [`EvoError::Format`] if the byte count is not a multiple of 8.
pub fn from_bytes(bytes: &[u8]) -> Result<Vec<f64>> {
    if bytes.len() % BYTES_PER_GENE != 0 {
        return Err(EvoError::format(format!(
            "byte count {} is not a multiple of {}",
            bytes.len(),
            BYTES_PER_GENE
        )));
    }

    Ok(bytes
        .chunks_exact(BYTES_PER_GENE)
        .map(|chunk| {
            let mut raw = [0u8; BYTES_PER_GENE];
            raw.copy_from_slice(chunk);
            f64::from_le_bytes(raw)
        })
        .collect())
}

/// Encodes a genome as a lowercase hex code.
pub fn to_code(genome: &[f64]) -> String {
    hex::encode(to_bytes(genome))
}

/// Decodes a hex code produced by [`to_code`].
///
/// Upper case digits are accepted as well.
///
/// # Errors
///
/// Returns [`EvoError::Format`] if the code has an odd length, contains a
/// character that is not a hex digit, or does not describe whole genes.
pub fn from_code(code: &str) -> Result<Vec<f64>> {
    let bytes = hex::decode(code)?;
    from_bytes(&bytes)
}
