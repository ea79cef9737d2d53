//! Pagination types for list endpoints.

use super::number::coerce_str;
use crate::config::{PARAM_FROM, PARAM_TO};

/// Largest offset or limit handed to the database; Postgres binds both as
/// `BIGINT`.
pub const MAX_WINDOW: u64 = i64::MAX as u64;

/// Coerce every query value to a number, keeping the order they were sent in.
///
/// Values that are not numbers become `0`.
pub fn normalize_params(query: &[(String, String)]) -> Vec<f64> {
    query
        .iter()
        .map(|(_, value)| coerce_str(value).unwrap_or(0.0))
        .collect()
}

/// `from`/`to` window read from the query string by name.
///
/// `from` is a zero-based offset and `to` an exclusive end index. Missing or
/// non-numeric values are `0`; a `to` that does not exceed `from` leaves the
/// window open-ended.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaginationParams {
    pub from: f64,
    pub to: f64,
}

impl PaginationParams {
    pub fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    /// Build from raw query pairs. The first occurrence of each name wins and
    /// unrelated parameters are ignored.
    pub fn from_query(query: &[(String, String)]) -> Self {
        let lookup = |name: &str| {
            query
                .iter()
                .find(|(key, _)| key == name)
                .and_then(|(_, value)| coerce_str(value))
                .filter(|n| !n.is_nan())
                .unwrap_or(0.0)
        };

        Self {
            from: lookup(PARAM_FROM),
            to: lookup(PARAM_TO),
        }
    }

    /// Rows to skip, at most [`MAX_WINDOW`]
    pub fn offset(&self) -> u64 {
        if self.from.is_finite() && self.from > 0.0 {
            (self.from.floor() as u64).min(MAX_WINDOW)
        } else {
            0
        }
    }

    /// Maximum rows to return, `None` when unbounded
    pub fn limit(&self) -> Option<u64> {
        if self.to.is_nan() || self.to <= 0.0 || self.to == f64::INFINITY {
            return None;
        }

        let end = (self.to.floor() as u64).min(MAX_WINDOW);
        let offset = self.offset();
        (end > offset).then(|| end - offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn normalize_keeps_insertion_order() {
        assert_eq!(normalize_params(&query(&[("from", "10"), ("to", "20")])), vec![10.0, 20.0]);
        assert_eq!(normalize_params(&query(&[("to", "20"), ("from", "10")])), vec![20.0, 10.0]);
    }

    #[test]
    fn normalize_maps_non_numbers_to_zero() {
        assert_eq!(normalize_params(&query(&[("from", "abc"), ("to", "5")])), vec![0.0, 5.0]);
    }

    #[test]
    fn normalize_yields_one_value_per_parameter() {
        let normalized = normalize_params(&query(&[("from", "1"), ("to", "2"), ("extra", "x")]));
        assert_eq!(normalized, vec![1.0, 2.0, 0.0]);
        assert!(normalize_params(&[]).is_empty());
    }

    #[test]
    fn named_params_ignore_order_and_extras() {
        let params = PaginationParams::from_query(&query(&[
            ("sort", "name"),
            ("to", "20"),
            ("from", "10"),
        ]));
        assert_eq!(params, PaginationParams::new(10.0, 20.0));
    }

    #[test]
    fn named_params_default_to_zero() {
        assert_eq!(PaginationParams::from_query(&[]), PaginationParams::default());
        assert_eq!(
            PaginationParams::from_query(&query(&[("from", "abc"), ("to", "5")])),
            PaginationParams::new(0.0, 5.0)
        );
    }

    #[test]
    fn window_translates_to_offset_and_limit() {
        let params = PaginationParams::new(10.0, 20.0);
        assert_eq!(params.offset(), 10);
        assert_eq!(params.limit(), Some(10));
    }

    #[test]
    fn window_without_upper_bound() {
        assert_eq!(PaginationParams::new(5.0, 0.0).limit(), None);
        assert_eq!(PaginationParams::new(5.0, 5.0).limit(), None);
        assert_eq!(PaginationParams::new(5.0, 3.0).limit(), None);
        assert_eq!(PaginationParams::new(0.0, f64::INFINITY).limit(), None);
    }

    #[test]
    fn negative_and_fractional_offsets_are_floored() {
        assert_eq!(PaginationParams::new(-3.0, 2.0).offset(), 0);
        assert_eq!(PaginationParams::new(2.7, 6.2).offset(), 2);
        assert_eq!(PaginationParams::new(2.7, 6.2).limit(), Some(4));
    }

    #[test]
    fn huge_offsets_are_clamped_to_bigint() {
        let params = PaginationParams::from_query(&query(&[("from", "1e19")]));

        assert_eq!(params.offset(), MAX_WINDOW);
        assert!(params.offset() <= i64::MAX as u64);
        assert_eq!(params.limit(), None);
    }

    #[test]
    fn huge_limits_are_clamped_to_bigint() {
        let params = PaginationParams::from_query(&query(&[("from", "10"), ("to", "1e30")]));

        assert_eq!(params.offset(), 10);
        assert_eq!(params.limit(), Some(MAX_WINDOW - 10));

        let both = PaginationParams::new(1e19, 1e30);
        assert_eq!(both.offset(), MAX_WINDOW);
        assert_eq!(both.limit(), None);
    }
}
