//! Lenient field parsing for imported datasets, where cells may be
//! empty, malformed, or inconsistent.

use std::str::FromStr;

/// Parse a numeric cell, returning `None` on absence or failure instead
/// of erroring. Import columns that tolerate gaps go through this.
pub fn number_or_none<T: FromStr>(value: Option<&str>) -> Option<T> {
    value.and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ints_and_floats() {
        assert_eq!(number_or_none::<i32>(Some("2015")), Some(2015));
        assert_eq!(number_or_none::<i64>(Some(" 150 ")), Some(150));
        assert_eq!(number_or_none::<f64>(Some("0.35")), Some(0.35));
    }

    #[test]
    fn empty_and_malformed_cells_are_none() {
        assert_eq!(number_or_none::<f64>(None), None);
        assert_eq!(number_or_none::<f64>(Some("")), None);
        assert_eq!(number_or_none::<f64>(Some("n/a")), None);
        assert_eq!(number_or_none::<i32>(Some("12.5")), None);
    }
}
