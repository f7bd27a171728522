//! The report schema.
//!
//! Column order and styling are declared once, as an ordered list of named
//! columns with a width rule and an emphasis rule each.

/// Which row field a column displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKey {
    Date,
    Price,
    Liquidity,
    ExpectedPrice,
}

/// How a column's display width is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidthRule {
    /// Always this width.
    Fixed(f64),
    /// `max(header, longest formatted value) + padding`, floored at `empty_floor`
    /// when the column has no values at all.
    Fit { padding: f64, empty_floor: f64 },
}

/// How cells in a column are emphasized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmphasisRule {
    None,
    /// Observed values strong, interpolated values muted.
    ByProvenance,
}

/// A named report column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub key: ColumnKey,
    pub name: &'static str,
    pub width: WidthRule,
    pub emphasis: EmphasisRule,
}

const FIT: WidthRule = WidthRule::Fit {
    padding: 2.0,
    empty_floor: 18.0,
};

/// The report schema: date, price, liquidity, expected-price placeholder.
pub const REPORT_COLUMNS: [Column; 4] = [
    Column {
        key: ColumnKey::Date,
        name: "Date",
        width: WidthRule::Fixed(12.0),
        emphasis: EmphasisRule::None,
    },
    Column {
        key: ColumnKey::Price,
        name: "Bitcoin Price",
        width: FIT,
        emphasis: EmphasisRule::None,
    },
    Column {
        key: ColumnKey::Liquidity,
        name: "Global Liquidity",
        width: FIT,
        emphasis: EmphasisRule::ByProvenance,
    },
    Column {
        key: ColumnKey::ExpectedPrice,
        name: "Expected Price",
        width: FIT,
        emphasis: EmphasisRule::None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_is_date_price_liquidity_expected() {
        let keys: Vec<_> = REPORT_COLUMNS.iter().map(|c| c.key).collect();
        assert_eq!(
            keys,
            vec![ColumnKey::Date, ColumnKey::Price, ColumnKey::Liquidity, ColumnKey::ExpectedPrice]
        );
        assert_eq!(REPORT_COLUMNS[0].width, WidthRule::Fixed(12.0));

        let emphasized: Vec<_> = REPORT_COLUMNS
            .iter()
            .filter(|c| c.emphasis == EmphasisRule::ByProvenance)
            .map(|c| c.key)
            .collect();
        assert_eq!(emphasized, vec![ColumnKey::Liquidity]);
    }
}
