use anyhow::Result;
use chrono::NaiveDate;
use compute::investment::{allocate, build_request, validate_budget};
use model::calendar::{CalendarEvent, EventKind};
use rust_decimal::Decimal;
use tracing::info;

use crate::config::AppConfig;
use crate::remote::RemoteClient;

/// Requests the budget split for `month` and prints the allocation of `amount`.
pub async fn predict(
    config: &AppConfig,
    month: u32,
    holidays: &[NaiveDate],
    sale_days: &[NaiveDate],
    amount: Decimal,
) -> Result<()> {
    validate_budget(amount)?;

    let events: Vec<CalendarEvent> = holidays
        .iter()
        .map(|date| CalendarEvent::on_day(EventKind::Holiday, *date))
        .chain(
            sale_days
                .iter()
                .map(|date| CalendarEvent::on_day(EventKind::SaleDay, *date)),
        )
        .collect();
    let request = build_request(month, &events)?;

    let remote = RemoteClient::new(&config.remote_base_url, config.request_timeout())?;
    let prediction = remote.predict_investment(&request).await?;
    info!("Received prediction for {} streams", prediction.len());

    let report = allocate(&prediction, amount)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
