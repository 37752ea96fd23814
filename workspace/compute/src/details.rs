//! Product detail table: rows built from the remote detail service, text
//! filtering and pagination.

use common::{DetailPage, DetailRow, DetailsResponse, RawProductDetail, Sparkline, round_half_up};
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};

/// Rows-per-page choices offered by the table.
pub const PAGE_SIZES: [usize; 4] = [5, 10, 15, 20];
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Length of the trend series when upstream sends none.
const LAST_WEEK_LEN: usize = 8;
/// Number of page buttons shown at once.
const PAGE_WINDOW: usize = 3;
const SPARKLINE_MAX: f64 = 20.0;
const SPARKLINE_FLAT: f64 = 15.0;

fn payment_share(part: f64, other: f64) -> u32 {
    if part > 0.0 {
        round_half_up(part / (part + other) * 100.0) as u32
    } else {
        0
    }
}

/// Converts one upstream entry into a table row.
pub fn detail_row(fsn_id: &str, raw: &RawProductDetail) -> DetailRow {
    let last_7_days = raw
        .last_week
        .clone()
        .unwrap_or_else(|| vec![0.0; LAST_WEEK_LEN]);

    DetailRow {
        fsn_id: fsn_id.to_string(),
        total_sales: raw.total_sales,
        units: raw.total_units,
        avg_sla: raw.avg_sla.as_ref().and_then(|sla| sla.days()),
        cod_percentage: payment_share(raw.total_cod, raw.total_prepaid),
        prepaid_percentage: payment_share(raw.total_prepaid, raw.total_cod),
        sparkline: sparkline(&last_7_days),
        last_7_days,
    }
}

/// Table rows ordered by FSN id.
pub fn rows_from_response(response: &DetailsResponse) -> Vec<DetailRow> {
    response
        .iter()
        .map(|(fsn_id, raw)| detail_row(fsn_id, raw))
        .collect()
}

/// Rows whose FSN id contains `query` verbatim, ignoring case. Surrounding
/// whitespace is part of the search text.
pub fn filter_rows(rows: &[DetailRow], query: &str) -> Vec<DetailRow> {
    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| row.fsn_id.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Up to three page numbers centred on the current page where possible.
///
/// The window is shifted left at the end of the table so it never repeats
/// the last page.
pub fn page_window(current: usize, total: usize) -> Vec<usize> {
    let shown = total.min(PAGE_WINDOW);
    let first = if current > 2 && total > PAGE_WINDOW {
        (current - 1).min(total + 1 - PAGE_WINDOW)
    } else {
        1
    };
    (first..first + shown).collect()
}

/// Slices one page out of `rows`.
///
/// `per_page` must be one of [`PAGE_SIZES`]. Pages are 1-based; page 1 is
/// always valid, even for an empty table.
#[instrument(skip(rows), fields(num_rows = rows.len()))]
pub fn paginate(rows: Vec<DetailRow>, page: usize, per_page: usize) -> Result<DetailPage> {
    if !PAGE_SIZES.contains(&per_page) {
        return Err(ComputeError::InvalidInput(format!(
            "rows per page must be one of {:?}, got {}",
            PAGE_SIZES, per_page
        )));
    }

    let total_rows = rows.len();
    let total_pages = total_rows.div_ceil(per_page);
    if page < 1 || page > total_pages.max(1) {
        return Err(ComputeError::InvalidInput(format!(
            "page {} is out of range 1..={}",
            page,
            total_pages.max(1)
        )));
    }

    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_rows);
    let rows: Vec<DetailRow> = rows.into_iter().skip(start).take(per_page).collect();
    debug!("Page {} of {} shows rows {}..{}", page, total_pages, start, end);

    Ok(DetailPage {
        first_row: if total_rows == 0 { 0 } else { start + 1 },
        last_row: end,
        rows,
        page,
        per_page,
        total_rows,
        total_pages,
        page_window: page_window(page, total_pages),
    })
}

/// Filters and paginates an upstream detail table in one step.
pub fn details_page(
    response: &DetailsResponse,
    search: &str,
    page: usize,
    per_page: usize,
) -> Result<DetailPage> {
    let rows = filter_rows(&rows_from_response(response), search);
    paginate(rows, page, per_page)
}

/// Bar heights (0-20) for a trend series.
pub fn sparkline(values: &[f64]) -> Sparkline {
    if values.iter().all(|v| *v == 0.0) {
        return Sparkline {
            flat: true,
            heights: vec![0.0; values.len()],
        };
    }

    let max = values.iter().copied().fold(f64::MIN, f64::max);
    let min = values.iter().copied().fold(f64::MAX, f64::min);
    let range = max - min;

    let heights = values
        .iter()
        .map(|value| {
            if range == 0.0 {
                if *value > 0.0 { SPARKLINE_FLAT } else { 0.0 }
            } else {
                (value - min) / range * SPARKLINE_MAX
            }
        })
        .collect();

    Sparkline {
        flat: false,
        heights,
    }
}
