use std::io::{self, Write};

use flate2::{write::ZlibEncoder, Compression, Decompress, FlushDecompress, Status};

use crate::err::CorruptObjectError;

pub fn compress(contents: &[u8]) -> std::io::Result<Vec<u8>> {
    compress_with(contents, Compression::default())
}

pub fn compress_with(contents: &[u8], level: Compression) -> std::io::Result<Vec<u8>> {
    let mut e = ZlibEncoder::new(Vec::with_capacity(contents.len() / 2 + 16), level);
    e.write_all(contents)?;
    // `finish` writes the trailing block and checksum
    e.finish()
}

/// Inflates a whole zlib stream. Truncated or malformed input is an error,
/// never a short read.
pub fn decompress(contents: &[u8]) -> Result<Vec<u8>, CorruptObjectError> {
    let mut d = Decompress::new(true);
    let mut buf = Vec::with_capacity(contents.len() * 2 + 64);

    loop {
        if buf.len() == buf.capacity() {
            buf.reserve(buf.capacity());
        }

        let before = (d.total_in(), d.total_out());
        let input = &contents[d.total_in() as usize..];
        let status = d
            .decompress_vec(input, &mut buf, FlushDecompress::None)
            .map_err(|e| CorruptObjectError::Decompress(io::Error::new(io::ErrorKind::InvalidData, e)))?;

        match status {
            Status::StreamEnd => return Ok(buf),
            // output always has room here, so no progress means the input ran out
            _ if (d.total_in(), d.total_out()) == before => {
                return Err(CorruptObjectError::Decompress(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "truncated zlib stream",
                )))
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_then_decompress() {
        let inputs: [&[u8]; 4] = [b"", b"hello\n", &[0u8; 4096], b"blob 6\0hello\n"];
        for input in inputs {
            let compressed = compress(input).unwrap();
            assert_eq!(decompress(&compressed).unwrap(), input);
        }
    }

    #[test]
    fn test_levels_are_interchangeable() {
        let input = b"tree 0\0".repeat(100);
        let fast = compress_with(&input, Compression::fast()).unwrap();
        let best = compress_with(&input, Compression::best()).unwrap();
        assert_eq!(decompress(&fast).unwrap(), input);
        assert_eq!(decompress(&best).unwrap(), input);
    }

    #[test]
    fn test_output_larger_than_initial_buffer() {
        // highly compressible, so the inflated size is many times the input
        let input = vec![b'a'; 64 * 1024];
        let compressed = compress(&input).unwrap();
        assert!(compressed.len() * 2 + 64 < input.len());
        assert_eq!(decompress(&compressed).unwrap(), input);

        for len in [100, 200, 1000, 4096] {
            let input = vec![b'a'; len];
            assert_eq!(decompress(&compress(&input).unwrap()).unwrap(), input);
        }
    }

    #[test]
    fn test_truncated_stream_fails() {
        let compressed = compress(&b"some object contents".repeat(20)).unwrap();
        let truncated = &compressed[..compressed.len() - 6];
        assert!(matches!(
            decompress(truncated),
            Err(CorruptObjectError::Decompress(_))
        ));
    }

    #[test]
    fn test_garbage_fails() {
        assert!(matches!(
            decompress(b"definitely not zlib"),
            Err(CorruptObjectError::Decompress(_))
        ));
    }
}
