use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::ValidationError;

pub const MIN_PORT: u16 = 1;
pub const MAX_PORT: u16 = u16::MAX;

/// An inclusive, non-empty range of TCP ports within `1..=65535`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl PortRange {
    pub fn new(start: u16, end: u16) -> Result<Self, ValidationError> {
        if start < MIN_PORT || end < MIN_PORT {
            return Err(ValidationError::PortOutOfRange {
                start: start.into(),
                end: end.into(),
            });
        }
        if start > end {
            return Err(ValidationError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single(port: u16) -> Result<Self, ValidationError> {
        Self::new(port, port)
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    /// Number of ports covered, at most 65535.
    pub fn len(&self) -> u32 {
        u32::from(self.end) - u32::from(self.start) + 1
    }

    /// Always false, a range holds at least one port.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, port: u16) -> bool {
        self.start <= port && port <= self.end
    }

    pub fn iter(&self) -> RangeInclusive<u16> {
        self.start..=self.end
    }
}

impl IntoIterator for PortRange {
    type Item = u16;
    type IntoIter = RangeInclusive<u16>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for PortRange {
    type Err = ValidationError;

    /// Parses the `start-end` form, e.g. `"1-1000"` or `"22-22"`.
    ///
    /// Whitespace around either bound is ignored. Bounds are read as wide
    /// integers first so that `0-70000` is reported as out of range rather
    /// than as a syntax error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::MissingPortRange);
        }

        let Some((start_str, end_str)) = s.split_once('-') else {
            return Err(ValidationError::MalformedPortRange(s.to_string()));
        };

        let start = parse_bound(start_str, s)?;
        let end = parse_bound(end_str, s)?;

        let in_bounds = |port: i64| (i64::from(MIN_PORT)..=i64::from(MAX_PORT)).contains(&port);
        if !in_bounds(start) || !in_bounds(end) {
            return Err(ValidationError::PortOutOfRange { start, end });
        }

        // Both bounds fit in u16 after the check above.
        Self::new(start as u16, end as u16)
    }
}

fn parse_bound(bound: &str, original_s: &str) -> Result<i64, ValidationError> {
    let bound = bound.trim();
    if bound.is_empty() || !bound.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::MalformedPortRange(original_s.to_string()));
    }
    bound
        .parse::<i64>()
        .map_err(|_| ValidationError::MalformedPortRange(original_s.to_string()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_valid_ranges() {
        assert_eq!(PortRange::from_str("1-1000"), PortRange::new(1, 1000));
        assert_eq!(PortRange::from_str("22-22"), PortRange::new(22, 22));
        assert_eq!(PortRange::from_str(" 80 - 443 "), PortRange::new(80, 443));
        assert_eq!(PortRange::from_str("1-65535"), PortRange::new(1, 65535));
    }

    #[test]
    fn test_from_str_rejects_inverted_range() {
        assert_eq!(
            PortRange::from_str("5-1"),
            Err(ValidationError::InvertedRange { start: 5, end: 1 })
        );
    }

    #[test]
    fn test_from_str_rejects_out_of_bounds() {
        assert_eq!(
            PortRange::from_str("0-10"),
            Err(ValidationError::PortOutOfRange { start: 0, end: 10 })
        );
        assert_eq!(
            PortRange::from_str("1-65536"),
            Err(ValidationError::PortOutOfRange { start: 1, end: 65536 })
        );
        assert_eq!(
            PortRange::from_str("70000-80000"),
            Err(ValidationError::PortOutOfRange { start: 70000, end: 80000 })
        );
    }

    #[test]
    fn test_from_str_rejects_malformed_input() {
        assert_eq!(PortRange::from_str(""), Err(ValidationError::MissingPortRange));
        assert_eq!(PortRange::from_str("   "), Err(ValidationError::MissingPortRange));

        for bad in ["80", "a-b", "1-", "-10", "1-2-3", "+1-5", "1.5-10"] {
            assert!(
                matches!(PortRange::from_str(bad), Err(ValidationError::MalformedPortRange(_))),
                "expected `{bad}` to be malformed"
            );
        }
    }

    #[test]
    fn test_new_rejects_port_zero() {
        assert!(PortRange::new(0, 5).is_err());
        assert!(PortRange::single(0).is_err());
    }

    #[test]
    fn test_len_and_iteration() {
        let range = PortRange::new(10, 14).unwrap();
        assert_eq!(range.len(), 5);
        assert_eq!(range.iter().collect::<Vec<u16>>(), vec![10, 11, 12, 13, 14]);
        assert!(range.contains(12));
        assert!(!range.contains(15));

        let full = PortRange::new(1, 65535).unwrap();
        assert_eq!(full.len(), 65535);
        assert_eq!(full.into_iter().last(), Some(65535));
    }

    #[test]
    fn test_display_uses_dash_form() {
        let range = PortRange::new(8000, 8080).unwrap();
        assert_eq!(range.to_string(), "8000-8080");
    }
}
