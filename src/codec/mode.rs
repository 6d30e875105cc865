//! File mode strings.
//!
//! Mode bits are rendered as `0` followed by their octal digits, so a mode
//! stored as `0o644` (420) reads back as `"0644"`.

use crate::attr::AttrPath;
use crate::error::{DecodeError, Result};

/// Renders file mode bits as octal text with a leading zero.
pub fn encode_mode(mode: i32) -> String {
    format!("0{:o}", mode)
}

/// Parses octal text into file mode bits.
pub fn decode_mode(s: &str, path: &AttrPath) -> Result<i32> {
    if s.is_empty() || !s.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
        return Err(DecodeError::invalid_mode(path.clone(), s));
    }
    i32::from_str_radix(s, 8).map_err(|_| DecodeError::invalid_mode(path.clone(), s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_mode() {
        assert_eq!(encode_mode(0o644), "0644");
        assert_eq!(encode_mode(0o600), "0600");
        assert_eq!(encode_mode(0o755), "0755");
        assert_eq!(encode_mode(0), "00");
    }

    #[test]
    fn test_decode_mode() {
        let path = AttrPath::root("default_mode");
        assert_eq!(decode_mode("0644", &path), Ok(0o644));
        assert_eq!(decode_mode("644", &path), Ok(0o644));
        assert_eq!(decode_mode("0400", &path), Ok(256));
        assert_eq!(decode_mode("00", &path), Ok(0));
    }

    #[test]
    fn test_decode_mode_rejects_non_octal() {
        let path = AttrPath::root("default_mode");
        for input in ["0999", "", "0o644", "-0644", "+644", "rw-r--r--", "77777777777777"] {
            assert_eq!(
                decode_mode(input, &path),
                Err(DecodeError::invalid_mode(path.clone(), input)),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_mode_roundtrip_is_stable() {
        let path = AttrPath::root("mode");
        for mode in [0o400, 0o444, 0o600, 0o644, 0o755, 0o777] {
            assert_eq!(decode_mode(&encode_mode(mode), &path), Ok(mode));
        }
    }
}
