//! Left-join of the daily price series with the daily liquidity series.

use tracing::debug;

use crate::domain::{DailySeries, LiquidityCell, MergedRow, ProvenanceTags, REPORT_COLUMNS, ReportTable};
use crate::error::PipelineError;

/// Join `liquidity` onto `prices` by date.
///
/// One row per price date, newest first. Liquidity dates with no price are
/// dropped; price dates with no liquidity get an absent cell. Every liquidity
/// value that lands in the table must carry a provenance tag.
pub fn merge(
    prices: &DailySeries,
    liquidity: &DailySeries,
    tags: &ProvenanceTags,
) -> Result<ReportTable, PipelineError> {
    let mut rows = Vec::with_capacity(prices.len());

    for (date, price) in prices.iter() {
        let liquidity = match liquidity.get(date) {
            Some(value) => {
                let provenance = *tags.get(&date).ok_or_else(|| {
                    PipelineError::invalid_input(format!("liquidity value at {date} has no provenance tag"))
                })?;
                Some(LiquidityCell { value, provenance })
            }
            None => None,
        };
        rows.push(MergedRow {
            date,
            price,
            liquidity,
            expected_price: None,
        });
    }

    rows.reverse();

    let unmatched = rows.iter().filter(|r| r.liquidity.is_none()).count();
    debug!(rows = rows.len(), unmatched, "merged price and liquidity series");

    Ok(ReportTable {
        columns: &REPORT_COLUMNS,
        rows,
    })
}
