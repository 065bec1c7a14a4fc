//! Packet codec
//!
//! Encoding and decoding of the single wire unit: a start marker plus a
//! variable-length chunk, in XDR encoding (4-byte big-endian boolean,
//! 4-byte big-endian length, data padded to a 4-byte boundary).

use std::io::{ErrorKind, Read, Write};

use crate::error::{Result, SieveError};

use super::MAX_PACKET_DATA;

/// Encode one packet to the underlying stream
pub(super) fn encode_packet<W: Write>(dst: &mut W, start: bool, data: &[u8]) -> std::io::Result<()> {
    dst.write_all(&(start as u32).to_be_bytes())?;
    dst.write_all(&(data.len() as u32).to_be_bytes())?;
    dst.write_all(data)?;

    let pad = data.len().wrapping_neg() % 4;
    dst.write_all(&[0u8; 3][..pad])?;

    Ok(())
}

/// Decode one packet from the underlying stream into `buf`
///
/// Returns:
/// - `Ok(Some(start))` — packet decoded, payload replaced the contents of `buf`
/// - `Ok(None)` — clean end of stream (no bytes remained)
/// - `Err(Decode)` — truncated packet, invalid boolean, or oversized length
///
/// `buf` is a reuse buffer: its capacity persists across calls so that many
/// small packets do not reallocate.
pub(super) fn decode_packet<R: Read>(src: &mut R, buf: &mut Vec<u8>) -> Result<Option<bool>> {
    // The start word doubles as the end-of-stream probe: end-of-data before
    // its first byte is a clean EOF, after it a truncation.
    let mut word = [0u8; 4];
    if !read_word_or_eof(src, &mut word)? {
        return Ok(None);
    }

    let start = match u32::from_be_bytes(word) {
        0 => false,
        1 => true,
        other => {
            return Err(SieveError::Decode(format!(
                "invalid packet boolean: {}",
                other
            )))
        }
    };

    read_exact_packet(src, &mut word)?;
    let len = u32::from_be_bytes(word) as usize;
    if len > MAX_PACKET_DATA {
        return Err(SieveError::Decode(format!(
            "packet length {} exceeds cap {}",
            len, MAX_PACKET_DATA
        )));
    }

    buf.clear();
    buf.resize(len, 0);
    read_exact_packet(src, buf)?;

    // Discard XDR padding
    let pad = len.wrapping_neg() % 4;
    let mut padding = [0u8; 3];
    read_exact_packet(src, &mut padding[..pad])?;

    Ok(Some(start))
}

/// Read exactly 4 bytes, distinguishing "no bytes at all" (Ok(false)) from a
/// mid-word truncation (Err)
fn read_word_or_eof<R: Read>(src: &mut R, word: &mut [u8; 4]) -> Result<bool> {
    let mut filled = 0;
    while filled < word.len() {
        match src.read(&mut word[filled..]) {
            Ok(0) if filled == 0 => return Ok(false),
            Ok(0) => return Err(SieveError::Decode("truncated packet header".into())),
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(SieveError::Decode(format!("read failed: {}", e))),
        }
    }
    Ok(true)
}

/// `read_exact` with errors mapped to Decode (mid-packet EOF is a truncation)
fn read_exact_packet<R: Read>(src: &mut R, out: &mut [u8]) -> Result<()> {
    src.read_exact(out).map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            SieveError::Decode("truncated packet".into())
        } else {
            SieveError::Decode(format!("read failed: {}", e))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(start: bool, data: &[u8]) -> (bool, Vec<u8>) {
        let mut wire = Vec::new();
        encode_packet(&mut wire, start, data).unwrap();
        // Encoded size is always header + data padded to 4
        assert_eq!(wire.len(), 8 + (data.len() + 3) / 4 * 4);

        let mut buf = Vec::new();
        let got = decode_packet(&mut wire.as_slice(), &mut buf).unwrap();
        (got.unwrap(), buf)
    }

    #[test]
    fn packet_round_trip() {
        for data in [&b""[..], b"x", b"ab", b"abc", b"abcd", b"abcde"] {
            let (start, payload) = round_trip(true, data);
            assert!(start);
            assert_eq!(payload, data);

            let (start, payload) = round_trip(false, data);
            assert!(!start);
            assert_eq!(payload, data);
        }
    }

    #[test]
    fn clean_eof_is_none() {
        let mut buf = Vec::new();
        assert!(decode_packet(&mut [].as_slice(), &mut buf).unwrap().is_none());
    }

    #[test]
    fn truncated_packet_is_decode_error() {
        let mut wire = Vec::new();
        encode_packet(&mut wire, true, b"hello").unwrap();

        for cut in 1..wire.len() {
            let mut buf = Vec::new();
            let result = decode_packet(&mut &wire[..cut], &mut buf);
            assert!(
                matches!(result, Err(crate::SieveError::Decode(_))),
                "cut at {} should be a decode error",
                cut
            );
        }
    }

    #[test]
    fn invalid_boolean_rejected() {
        let mut wire = 2u32.to_be_bytes().to_vec();
        wire.extend_from_slice(&0u32.to_be_bytes());

        let mut buf = Vec::new();
        let result = decode_packet(&mut wire.as_slice(), &mut buf);
        assert!(matches!(result, Err(crate::SieveError::Decode(_))));
    }

    #[test]
    fn oversized_length_rejected() {
        let mut wire = 1u32.to_be_bytes().to_vec();
        wire.extend_from_slice(&u32::MAX.to_be_bytes());

        let mut buf = Vec::new();
        let result = decode_packet(&mut wire.as_slice(), &mut buf);
        assert!(matches!(result, Err(crate::SieveError::Decode(_))));
    }
}
