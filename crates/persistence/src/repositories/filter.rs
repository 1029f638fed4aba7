//! Dynamic WHERE clause building for history and ledger listings.
//!
//! Conditions are appended in the same order their values are bound, so
//! placeholder numbers always line up with [`bind_filter_values!`].

use chrono::NaiveDate;
use uuid::Uuid;

use crate::entities::AssetStatusDb;

/// A bound parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FilterValue {
    Uuid(Uuid),
    Date(NaiveDate),
    AssetStatus(AssetStatusDb),
}

#[derive(Debug, Default)]
pub(crate) struct FilterBuilder {
    conditions: Vec<String>,
    values: Vec<FilterValue>,
}

impl FilterBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn next_param(&mut self, value: FilterValue) -> usize {
        self.values.push(value);
        self.values.len()
    }

    /// `column = $n` when `value` is set.
    pub(crate) fn eq_uuid(mut self, column: &str, value: Option<Uuid>) -> Self {
        if let Some(id) = value {
            let n = self.next_param(FilterValue::Uuid(id));
            self.conditions.push(format!("{} = ${}", column, n));
        }
        self
    }

    pub(crate) fn eq_asset_status(mut self, column: &str, value: Option<AssetStatusDb>) -> Self {
        if let Some(status) = value {
            let n = self.next_param(FilterValue::AssetStatus(status));
            self.conditions.push(format!("{} = ${}", column, n));
        }
        self
    }

    /// `(left = $n OR right = $n)` when `value` is set.
    pub(crate) fn either_uuid(mut self, left: &str, right: &str, value: Option<Uuid>) -> Self {
        if let Some(id) = value {
            let n = self.next_param(FilterValue::Uuid(id));
            self.conditions
                .push(format!("({} = ${} OR {} = ${})", left, n, right, n));
        }
        self
    }

    /// Matches the UTC calendar day of a TIMESTAMPTZ column.
    pub(crate) fn on_utc_day(mut self, column: &str, value: Option<NaiveDate>) -> Self {
        if let Some(date) = value {
            let n = self.next_param(FilterValue::Date(date));
            self.conditions
                .push(format!("({} AT TIME ZONE 'UTC')::date = ${}", column, n));
        }
        self
    }

    /// `column = $n` for a DATE column.
    pub(crate) fn eq_date(mut self, column: &str, date: NaiveDate) -> Self {
        let n = self.next_param(FilterValue::Date(date));
        self.conditions.push(format!("{} = ${}", column, n));
        self
    }

    /// The full `WHERE ...` clause, or an empty string without conditions.
    pub(crate) fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub(crate) fn values(&self) -> &[FilterValue] {
        &self.values
    }
}

/// Binds every value collected by a [`FilterBuilder`] to a SQLx query builder.
macro_rules! bind_filter_values {
    ($builder:expr, $filter:expr) => {{
        let mut b = $builder;
        for value in $filter.values() {
            b = match value {
                $crate::repositories::filter::FilterValue::Uuid(id) => b.bind(*id),
                $crate::repositories::filter::FilterValue::Date(date) => b.bind(*date),
                $crate::repositories::filter::FilterValue::AssetStatus(status) => b.bind(*status),
            };
        }
        b
    }};
}

pub(crate) use bind_filter_values;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_has_no_where() {
        let filter = FilterBuilder::new().eq_uuid("p.base_id", None);
        assert_eq!(filter.where_clause(), "");
        assert!(filter.values().is_empty());
    }

    #[test]
    fn test_placeholders_follow_bind_order() {
        let base = Uuid::new_v4();
        let kind = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let filter = FilterBuilder::new()
            .on_utc_day("p.purchase_date", Some(date))
            .eq_uuid("p.base_id", Some(base))
            .eq_uuid("a.equipment_type_id", Some(kind));

        assert_eq!(
            filter.where_clause(),
            "WHERE (p.purchase_date AT TIME ZONE 'UTC')::date = $1 \
             AND p.base_id = $2 AND a.equipment_type_id = $3"
        );
        assert_eq!(
            filter.values(),
            &[
                FilterValue::Date(date),
                FilterValue::Uuid(base),
                FilterValue::Uuid(kind)
            ]
        );
    }

    #[test]
    fn test_either_reuses_one_placeholder() {
        let base = Uuid::new_v4();
        let filter = FilterBuilder::new()
            .eq_uuid("t.from_base_id", None)
            .either_uuid("t.from_base_id", "t.to_base_id", Some(base));
        assert_eq!(
            filter.where_clause(),
            "WHERE (t.from_base_id = $1 OR t.to_base_id = $1)"
        );
        assert_eq!(filter.values().len(), 1);
    }
}
