//! Byte-level line segmentation.
//!
//! Splits a raw buffer into byte-lines at LF or CR+LF boundaries.
//! Segmentation is lossless for line content: a lone CR is ordinary
//! data, and only terminator bytes are dropped.

/// Splits a byte buffer into byte-lines.
///
/// A boundary is a lone `0x0A` (LF) or a `0x0D 0x0A` pair (CR+LF). A CR
/// not followed by LF stays inside the line. The final line is emitted
/// even without a trailing terminator; a trailing terminator does not
/// produce an empty final line.
///
/// The returned slices borrow from `bytes` and appear in buffer order.
#[must_use]
pub fn split_lines(bytes: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&bytes[start..i]);
                i += 1;
                start = i;
            }
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                lines.push(&bytes[start..i]);
                i += 2;
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        lines.push(&bytes[start..]);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lf_terminated() {
        assert_eq!(split_lines(b"a\nbb\nccc\n"), vec![&b"a"[..], b"bb", b"ccc"]);
    }

    #[test]
    fn test_crlf_terminated() {
        assert_eq!(split_lines(b"a\r\nbb\r\n"), vec![&b"a"[..], b"bb"]);
    }

    #[test]
    fn test_mixed_terminators() {
        assert_eq!(split_lines(b"a\r\nb\nc"), vec![&b"a"[..], b"b", b"c"]);
    }

    #[test]
    fn test_lone_cr_is_data() {
        assert_eq!(split_lines(b"a\rb\n"), vec![&b"a\rb"[..]]);
        assert_eq!(split_lines(b"a\r"), vec![&b"a\r"[..]]);
    }

    #[test]
    fn test_unterminated_tail_emitted() {
        assert_eq!(split_lines(b"a\nb"), vec![&b"a"[..], b"b"]);
    }

    #[test]
    fn test_trailing_terminator_emits_no_tail_line() {
        assert_eq!(split_lines(b"a\n"), vec![&b"a"[..]]);
        assert_eq!(split_lines(b"a\r\n"), vec![&b"a"[..]]);
    }

    #[test]
    fn test_leading_terminator_emits_empty_line() {
        // A terminator at the head still closes a (zero-length) line;
        // only the segment after the final terminator is suppressed.
        assert_eq!(split_lines(b"\n"), vec![&b""[..]]);
        assert_eq!(split_lines(b"\nx"), vec![&b""[..], b"x"]);
    }

    #[test]
    fn test_empty_buffer() {
        assert!(split_lines(b"").is_empty());
    }

    #[test]
    fn test_interior_empty_lines_kept() {
        assert_eq!(split_lines(b"a\n\nb\n"), vec![&b"a"[..], b"", b"b"]);
    }

    #[test]
    fn test_lossless_for_lf_only_buffers() {
        let buf = b"alpha\nbeta\n\ngamma";
        let rejoined = split_lines(buf).join(&b'\n');
        assert_eq!(rejoined.as_slice(), b"alpha\nbeta\n\ngamma");
    }
}
