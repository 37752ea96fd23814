//! Marketing budget planning: the prediction request built from calendar
//! events and the allocation of a budget over the predicted distribution.

use common::{
    AllocationReport, InvestmentPrediction, InvestmentRequest, MonthGridDto, StreamAllocation,
    round_to,
};
use model::calendar::{CalendarEvent, EventKind, events_on, month_grid};
use model::streams::INVESTMENT_STREAMS;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, instrument, warn};

use crate::error::{ComputeError, Result};

pub const MIN_BUDGET: u32 = 1_000;
pub const MAX_BUDGET: u32 = 100_000;
pub const BUDGET_STEP: u32 = 100;

/// Checks the budget against the slider bounds and step.
pub fn validate_budget(amount: Decimal) -> Result<()> {
    let in_range = amount >= Decimal::from(MIN_BUDGET) && amount <= Decimal::from(MAX_BUDGET);
    let on_step = (amount % Decimal::from(BUDGET_STEP)).is_zero();
    if in_range && on_step {
        Ok(())
    } else {
        Err(ComputeError::InvalidInput(format!(
            "budget must be between {} and {} in steps of {}, got {}",
            MIN_BUDGET, MAX_BUDGET, BUDGET_STEP, amount
        )))
    }
}

/// Builds the predictor request for `month` (1-12).
///
/// Every day covered by a holiday or sale-day event is listed; pay days are
/// not part of the request.
#[instrument(skip(events), fields(num_events = events.len()))]
pub fn build_request(month: u32, events: &[CalendarEvent]) -> Result<InvestmentRequest> {
    if !(1..=12).contains(&month) {
        return Err(ComputeError::InvalidInput(format!(
            "month must be between 1 and 12, got {}",
            month
        )));
    }

    let mut holiday = Vec::new();
    let mut salesday = Vec::new();
    for event in events {
        match event.kind() {
            EventKind::Holiday => holiday.extend(event.days()),
            EventKind::SaleDay => salesday.extend(event.days()),
            EventKind::PayDay => {}
        }
    }

    debug!(
        "Prediction request for month {}: {} holidays, {} sale days",
        month,
        holiday.len(),
        salesday.len()
    );
    Ok(InvestmentRequest {
        month,
        holiday,
        salesday,
    })
}

/// Spreads `amount` over the investment streams by the predicted fractions.
///
/// Amounts use the unrounded share; only the reported percentage is rounded.
/// Streams missing from the prediction get 0 %. The stream with the largest
/// share is flagged unless every share is zero.
#[instrument(skip(prediction))]
pub fn allocate(prediction: &InvestmentPrediction, amount: Decimal) -> Result<AllocationReport> {
    for key in prediction.keys() {
        if !INVESTMENT_STREAMS.iter().any(|s| s.id == key) {
            warn!("Ignoring unknown investment stream '{}'", key);
        }
    }

    let raw_percentages: Vec<f64> = INVESTMENT_STREAMS
        .iter()
        .map(|stream| prediction.get(stream.id).copied().unwrap_or(0.0) * 100.0)
        .collect();
    let highest = raw_percentages.iter().copied().fold(0.0_f64, f64::max);

    let streams = INVESTMENT_STREAMS
        .iter()
        .zip(raw_percentages)
        .map(|(stream, raw)| -> Result<StreamAllocation> {
            let share = Decimal::from_f64(raw).ok_or_else(|| {
                ComputeError::Decimal(format!(
                    "percentage {} of {} is not a finite number",
                    raw, stream.id
                ))
            })?;
            let allocated = (amount * share / Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

            Ok(StreamAllocation {
                id: stream.id.to_string(),
                name: stream.name.to_string(),
                description: stream.description.to_string(),
                percentage: round_to(raw, 2),
                amount: allocated,
                is_highest: highest > 0.0 && raw == highest,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(AllocationReport {
        total: amount,
        streams,
    })
}

/// Month calendar with the events planned on each day.
pub fn calendar_view(year: i32, month: u32, events: &[CalendarEvent]) -> Result<MonthGridDto> {
    let grid = month_grid(year, month)?;
    let day_events: Vec<Vec<String>> = grid
        .days
        .iter()
        .map(|day| {
            events_on(events, *day)
                .iter()
                .map(|event| event.kind().display_name().to_string())
                .collect()
        })
        .collect();

    Ok(MonthGridDto {
        year: grid.year,
        month: grid.month,
        leading_blanks: grid.leading_blanks,
        days: grid.days,
        trailing_blanks: grid.trailing_blanks,
        events: day_events,
    })
}
