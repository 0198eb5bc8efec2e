//! Incremental frame decoder for the analysis event stream.
//!
//! The decoder is chunking-invariant: feeding the same bytes produces the
//! same payload sequence no matter how the bytes are split into chunks.
//! Multi-byte UTF-8 sequences and frame delimiters may both straddle chunk
//! boundaries.

use crate::protocol::{AnalysisPayload, FRAME_DELIMITER};
use crate::{Error, Result};

/// Stateful decoder from raw bytes to [`AnalysisPayload`]s.
///
/// Feed chunks as they arrive with [`feed`](Self::feed); call
/// [`finish`](Self::finish) at end of stream. A trailing partial frame
/// (text not yet terminated by the delimiter) is never parsed as a frame.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// Decoded text not yet split into complete frames.
    text: String,
    /// Trailing bytes of an incomplete UTF-8 sequence from the last chunk.
    carry: Vec<u8>,
}

impl FrameDecoder {
    /// Create a new decoder with empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk of bytes, returning the payloads of every frame the
    /// chunk completed.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidUtf8`] if the stream contains bytes that are not
    ///   part of any UTF-8 sequence.
    /// - [`Error::JsonParse`] if a complete frame carries malformed JSON.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<AnalysisPayload>> {
        self.decode_chunk(chunk)?;

        let mut payloads = Vec::new();
        while let Some(pos) = self.text.find(FRAME_DELIMITER) {
            let frame: String = self.text.drain(..pos + FRAME_DELIMITER.len()).collect();
            let frame = frame.trim_end_matches(['\n', '\r']);
            if let Some(payload) = AnalysisPayload::parse_frame(frame)? {
                payloads.push(payload);
            }
        }
        Ok(payloads)
    }

    /// Signal end of stream, returning any unconsumed partial frame.
    ///
    /// The partial frame is discarded, not parsed; it is returned so the
    /// caller can log it. Returns `None` when the stream ended cleanly on
    /// a frame boundary.
    pub fn finish(self) -> Option<String> {
        if self.text.is_empty() && self.carry.is_empty() {
            return None;
        }
        let mut partial = self.text;
        if !self.carry.is_empty() {
            partial.push_str(&String::from_utf8_lossy(&self.carry));
        }
        Some(partial)
    }

    /// Decode a chunk into `self.text`, carrying incomplete UTF-8
    /// sequences over to the next chunk.
    fn decode_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        // Fast path: no carry and the whole chunk is valid UTF-8.
        if self.carry.is_empty() {
            match std::str::from_utf8(chunk) {
                Ok(s) => {
                    self.text.push_str(s);
                    return Ok(());
                }
                Err(_) => self.carry.extend_from_slice(chunk),
            }
        } else {
            self.carry.extend_from_slice(chunk);
        }

        match std::str::from_utf8(&self.carry) {
            Ok(s) => {
                self.text.push_str(s);
                self.carry.clear();
                Ok(())
            }
            Err(e) => {
                let valid_up_to = e.valid_up_to();
                match e.error_len() {
                    // A sequence truncated at the end of the buffer:
                    // keep the tail for the next chunk.
                    None => {
                        let valid = std::str::from_utf8(&self.carry[..valid_up_to])
                            .map_err(|_| Error::InvalidUtf8 { valid_up_to })?;
                        self.text.push_str(valid);
                        self.carry.drain(..valid_up_to);
                        Ok(())
                    }
                    // Bytes that can never begin or continue a valid
                    // sequence: the stream is corrupt.
                    Some(_) => Err(Error::InvalidUtf8 { valid_up_to }),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed a byte slice in one piece and collect all payloads.
    fn feed_all(decoder: &mut FrameDecoder, bytes: &[u8]) -> Vec<AnalysisPayload> {
        decoder.feed(bytes).expect("feed should succeed")
    }

    fn three_frame_stream() -> Vec<u8> {
        b"data: {\"content\":\"A\"}\n\ndata: {\"content\":\"B\"}\n\ndata: {\"done\":true}\n\n".to_vec()
    }

    #[test]
    fn whole_stream_in_one_chunk() {
        let mut decoder = FrameDecoder::new();
        let payloads = feed_all(&mut decoder, &three_frame_stream());
        assert_eq!(
            payloads,
            vec![
                AnalysisPayload::Content("A".into()),
                AnalysisPayload::Content("B".into()),
                AnalysisPayload::Done,
            ]
        );
        assert!(decoder.finish().is_none());
    }

    #[test]
    fn chunking_invariance_over_all_split_points() {
        let bytes = three_frame_stream();
        let expected = {
            let mut decoder = FrameDecoder::new();
            feed_all(&mut decoder, &bytes)
        };

        for split in 0..=bytes.len() {
            let mut decoder = FrameDecoder::new();
            let mut payloads = decoder.feed(&bytes[..split]).unwrap();
            payloads.extend(decoder.feed(&bytes[split..]).unwrap());
            assert_eq!(payloads, expected, "split at byte {split}");
            assert!(decoder.finish().is_none(), "split at byte {split}");
        }
    }

    #[test]
    fn byte_at_a_time_feeding() {
        let bytes = three_frame_stream();
        let mut decoder = FrameDecoder::new();
        let mut payloads = Vec::new();
        for b in &bytes {
            payloads.extend(decoder.feed(std::slice::from_ref(b)).unwrap());
        }
        assert_eq!(payloads.len(), 3);
        assert_eq!(payloads[2], AnalysisPayload::Done);
    }

    #[test]
    fn multibyte_char_split_across_chunks() {
        // "é" is 0xC3 0xA9; split the frame between the two bytes.
        let bytes = "data: {\"content\":\"caf\u{e9}\"}\n\n".as_bytes();
        let split = bytes.iter().position(|&b| b == 0xC3).unwrap() + 1;

        let mut decoder = FrameDecoder::new();
        let mut payloads = decoder.feed(&bytes[..split]).unwrap();
        payloads.extend(decoder.feed(&bytes[split..]).unwrap());

        assert_eq!(payloads, vec![AnalysisPayload::Content("caf\u{e9}".into())]);
    }

    #[test]
    fn four_byte_char_split_three_ways() {
        // U+1F600 is four bytes; feed one byte per chunk.
        let bytes = "data: {\"content\":\"\u{1F600}\"}\n\n".as_bytes();
        let mut decoder = FrameDecoder::new();
        let mut payloads = Vec::new();
        for b in bytes {
            payloads.extend(decoder.feed(std::slice::from_ref(b)).unwrap());
        }
        assert_eq!(
            payloads,
            vec![AnalysisPayload::Content("\u{1F600}".into())]
        );
    }

    #[test]
    fn delimiter_split_across_chunks() {
        let mut decoder = FrameDecoder::new();
        let first = decoder.feed(b"data: {\"content\":\"A\"}\n").unwrap();
        assert!(first.is_empty());
        let second = decoder.feed(b"\ndata: {\"done\":true}\n\n").unwrap();
        assert_eq!(
            second,
            vec![AnalysisPayload::Content("A".into()), AnalysisPayload::Done]
        );
    }

    #[test]
    fn trailing_partial_frame_is_not_parsed() {
        let mut decoder = FrameDecoder::new();
        let payloads = decoder
            .feed(b"data: {\"content\":\"A\"}\n\ndata: {\"content\":\"B\"")
            .unwrap();
        assert_eq!(payloads, vec![AnalysisPayload::Content("A".into())]);

        let partial = decoder.finish().expect("partial frame should remain");
        assert_eq!(partial, "data: {\"content\":\"B\"");
    }

    #[test]
    fn empty_stream_finishes_clean() {
        let decoder = FrameDecoder::new();
        assert!(decoder.finish().is_none());
    }

    #[test]
    fn truncated_multibyte_at_eof_surfaces_in_partial() {
        let mut decoder = FrameDecoder::new();
        decoder.feed(b"data: x\xC3").unwrap();
        let partial = decoder.finish().expect("partial should remain");
        assert!(partial.starts_with("data: x"));
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let mut decoder = FrameDecoder::new();
        // 0xFF can never appear in UTF-8.
        let result = decoder.feed(b"data: \xFF");
        assert!(matches!(result, Err(Error::InvalidUtf8 { .. })));
    }

    #[test]
    fn malformed_frame_json_is_an_error() {
        let mut decoder = FrameDecoder::new();
        let result = decoder.feed(b"data: {broken\n\n");
        assert!(matches!(result, Err(Error::JsonParse { .. })));
    }

    #[test]
    fn non_data_frames_are_skipped() {
        let mut decoder = FrameDecoder::new();
        let payloads = decoder
            .feed(b": comment\n\ndata: {\"content\":\"A\"}\n\n")
            .unwrap();
        assert_eq!(payloads, vec![AnalysisPayload::Content("A".into())]);
    }

    #[test]
    fn crlf_framed_payload_parses() {
        let mut decoder = FrameDecoder::new();
        let payloads = decoder.feed(b"data: {\"content\":\"A\"}\r\n\ndata: {\"done\":true}\r\n\n").unwrap();
        assert_eq!(
            payloads,
            vec![AnalysisPayload::Content("A".into()), AnalysisPayload::Done]
        );
    }
}
