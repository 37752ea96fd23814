use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{Result, parse_date, parse_month, parse_year};

/// Weather observed on a single day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weather {
    pub mean_temp_c: f64,
    pub total_rain_mm: f64,
    pub total_snow_cm: f64,
}

impl Weather {
    pub fn new(mean_temp_c: f64, total_rain_mm: f64, total_snow_cm: f64) -> Self {
        Self {
            mean_temp_c,
            total_rain_mm,
            total_snow_cm,
        }
    }
}

/// Sales of a single day, optionally with the list price total and the weather.
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    date: NaiveDate,
    gmv: f64,
    mrp: Option<f64>,
    weather: Option<Weather>,
}

impl DayRecord {
    /// Creates a new DayRecord with GMV only.
    pub fn new(date: NaiveDate, gmv: f64) -> Self {
        Self {
            date,
            gmv,
            mrp: None,
            weather: None,
        }
    }

    /// Sets the MRP total of the day.
    pub fn with_mrp(mut self, mrp: f64) -> Self {
        self.mrp = Some(mrp);
        self
    }

    /// Sets the weather of the day.
    pub fn with_weather(mut self, weather: Weather) -> Self {
        self.weather = Some(weather);
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn gmv(&self) -> f64 {
        self.gmv
    }

    pub fn mrp(&self) -> Option<f64> {
        self.mrp
    }

    pub fn weather(&self) -> Option<Weather> {
        self.weather
    }

    pub fn day_of_month(&self) -> u32 {
        self.date.day()
    }

    /// True when the record falls into the given calendar month.
    pub fn is_in_month(&self, year: i32, month: u32) -> bool {
        self.date.year() == year && self.date.month() == month
    }
}

#[derive(Debug, Deserialize)]
struct RawClimateDay {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Mean Temp (°C)")]
    mean_temp: f64,
    #[serde(rename = "Total Rain (mm)")]
    total_rain: f64,
    #[serde(rename = "Total Snow (cm)")]
    total_snow: f64,
    gmv: f64,
}

/// Daily weather and GMV, grouped by year and month.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClimateSeries {
    years: BTreeMap<i32, BTreeMap<u32, Vec<DayRecord>>>,
}

impl ClimateSeries {
    /// Parses `{ "<year>": { "<month>": [ {Date, Mean Temp (°C), ...} ] } }`.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, BTreeMap<String, Vec<RawClimateDay>>> =
            serde_json::from_str(json)?;

        let mut years = BTreeMap::new();
        for (year_key, months) in raw {
            let year = parse_year(&year_key)?;
            let mut parsed_months = BTreeMap::new();
            for (month_key, days) in months {
                let month = parse_month(&month_key)?;
                let mut records = days
                    .into_iter()
                    .map(|day| -> Result<DayRecord> {
                        let date = parse_date(&day.date)?;
                        Ok(DayRecord::new(date, day.gmv).with_weather(Weather::new(
                            day.mean_temp,
                            day.total_rain,
                            day.total_snow,
                        )))
                    })
                    .collect::<Result<Vec<_>>>()?;
                records.sort_by_key(DayRecord::date);
                parsed_months.insert(month, records);
            }
            years.insert(year, parsed_months);
        }

        debug!("Parsed climate series covering {} years", years.len());
        Ok(Self { years })
    }

    pub fn has_year(&self, year: i32) -> bool {
        self.years.contains_key(&year)
    }

    /// Months present for the year, ascending.
    pub fn months(&self, year: i32) -> Vec<u32> {
        self.years
            .get(&year)
            .map(|months| months.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Days of the month; empty when the month is not in the series.
    pub fn month(&self, year: i32, month: u32) -> &[DayRecord] {
        self.years
            .get(&year)
            .and_then(|months| months.get(&month))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn years(&self) -> Vec<i32> {
        self.years.keys().copied().collect()
    }
}

#[derive(Debug, Deserialize)]
struct RawSalesDay {
    gmv: f64,
    mrp: f64,
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    #[serde(rename = "Daywise")]
    daywise: BTreeMap<String, RawSalesDay>,
}

/// Daily GMV and MRP per product category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorySeries {
    categories: BTreeMap<String, Vec<DayRecord>>,
}

impl CategorySeries {
    /// Parses `{ "<category>": { "Daywise": { "YYYY-MM-DD": {gmv, mrp} } } }`.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, RawCategory> = serde_json::from_str(json)?;

        let mut categories = BTreeMap::new();
        for (name, category) in raw {
            let mut records = category
                .daywise
                .into_iter()
                .map(|(date, day)| -> Result<DayRecord> {
                    Ok(DayRecord::new(parse_date(&date)?, day.gmv).with_mrp(day.mrp))
                })
                .collect::<Result<Vec<_>>>()?;
            records.sort_by_key(DayRecord::date);
            categories.insert(name, records);
        }

        debug!("Parsed sales series for {} categories", categories.len());
        Ok(Self { categories })
    }

    /// Category names in alphabetical order.
    pub fn categories(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).collect()
    }

    /// Days of one category, date-ordered; empty for unknown categories.
    pub fn days(&self, category: &str) -> &[DayRecord] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DayRecord])> {
        self.categories
            .iter()
            .map(|(name, days)| (name.as_str(), days.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
