//! Capability code serialization.

/// Emitted in place of an absent or empty code.
pub const SENTINEL: &str = "0xff";

/// Render a capability cell as a C hex byte literal.
///
/// A single hex digit is zero-padded (`3` → `0x03`), longer codes are used
/// verbatim (`1A` → `0x1A`), and a missing or empty cell becomes [`SENTINEL`].
pub fn byte_code(cell: Option<&str>) -> String {
    match cell {
        None | Some("") => SENTINEL.to_string(),
        Some(code) if code.chars().count() == 1 => format!("0x0{code}"),
        Some(code) => format!("0x{code}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_single_digit() {
        assert_eq!(byte_code(Some("3")), "0x03");
        assert_eq!(byte_code(Some("a")), "0x0a");
    }

    #[test]
    fn two_digits_verbatim() {
        assert_eq!(byte_code(Some("1A")), "0x1A");
        assert_eq!(byte_code(Some("ff")), "0xff");
    }

    #[test]
    fn missing_is_sentinel() {
        assert_eq!(byte_code(None), SENTINEL);
        assert_eq!(byte_code(Some("")), SENTINEL);
    }
}
