//! Column capabilities
//!
//! Each table declares a closed set of typed column identifiers. The raw
//! index is the position of the column in the declared schema, which is the
//! number the host uses in constraint and order-by arrays.

use super::constraint::ConstraintRecord;

/// How the planner treats a constraint on a given column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptancePolicy {
    /// Keep the constraint
    Accept,
    /// Keep it only if it is usable or an equality
    EqualityOnly,
    /// Reject the whole plan unless the constraint is usable
    Required,
    /// Keep it, ask the host to omit its own re-check, tolerate unusable
    Hidden,
    /// Drop it silently; the host re-checks it
    Exclude,
}

/// A closed, enumerable set of column identifiers for one table.
pub trait ColumnIndex: Copy + Eq + std::fmt::Debug + 'static {
    /// Every column, in raw-index order
    const ALL: &'static [Self];

    /// Raw host column index
    fn raw(self) -> i32;

    /// Decodes a raw host column index
    fn from_raw(raw: i32) -> Option<Self>;

    /// Declared column name
    fn name(self) -> &'static str;

    /// Hidden columns are constraint inputs, not part of `SELECT *`
    fn is_hidden(self) -> bool {
        false
    }

    /// Planner acceptance policy for constraints on this column
    fn policy(self) -> AcceptancePolicy;

    /// Looks a column up by its declared name
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }

    /// Bit for this column in a host `col_used` mask
    fn mask(self) -> u64 {
        let raw = self.raw();
        if (0..63).contains(&raw) {
            1u64 << raw
        } else {
            1u64 << 63
        }
    }
}

/// Acceptance policy derived from a table's column set. Unknown columns are
/// excluded.
pub fn column_policy<C: ColumnIndex>(record: &ConstraintRecord) -> AcceptancePolicy {
    C::from_raw(record.column).map_or(AcceptancePolicy::Exclude, C::policy)
}

/// Declared column names, in raw-index order
pub fn column_names<C: ColumnIndex>() -> Vec<&'static str> {
    C::ALL.iter().map(|c| c.name()).collect()
}


#[cfg(test)]
mod tests {
    use super::test_columns::SampleColumn;
    use super::*;
    use crate::planner::ConstraintOp;

    #[test]
    fn test_name_round_trips_to_id() {
        for col in SampleColumn::ALL {
            assert_eq!(SampleColumn::from_name(col.name()), Some(*col));
            assert_eq!(SampleColumn::from_raw(col.raw()), Some(*col));
        }
        assert_eq!(SampleColumn::from_name("missing"), None);
    }

    #[test]
    fn test_ids_are_dense() {
        for (i, col) in SampleColumn::ALL.iter().enumerate() {
            assert_eq!(col.raw(), i as i32);
        }
    }

    #[test]
    fn test_unknown_column_is_excluded() {
        let rec = ConstraintRecord::new(0, 17, ConstraintOp::Eq, true);
        assert_eq!(column_policy::<SampleColumn>(&rec), AcceptancePolicy::Exclude);

        let rec = ConstraintRecord::new(0, 3, ConstraintOp::Eq, true);
        assert_eq!(column_policy::<SampleColumn>(&rec), AcceptancePolicy::EqualityOnly);
    }

    #[test]
    fn test_mask() {
        assert_eq!(SampleColumn::Id.mask(), 1);
        assert_eq!(SampleColumn::Stride.mask(), 8);
    }
}
