use serde::Deserialize;
use tracing::debug;

use crate::error::{ModelError, Result};

/// Media spend per channel for one month, in thousands.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MediaSpend {
    #[serde(rename = "TV")]
    pub tv: f64,
    #[serde(rename = "Digital")]
    pub digital: f64,
    #[serde(rename = "Sponsorship")]
    pub sponsorship: f64,
    #[serde(rename = "Content Marketing")]
    pub content_marketing: f64,
    #[serde(rename = "Online Marketing")]
    pub online_marketing: f64,
    #[serde(rename = "Affiliates")]
    pub affiliates: f64,
    #[serde(rename = "SEM")]
    pub sem: f64,
    #[serde(rename = "Radio")]
    pub radio: f64,
    #[serde(rename = "Other")]
    pub other: f64,
}

impl MediaSpend {
    /// Channels with their display names, in chart order.
    pub fn channels(&self) -> [(&'static str, f64); 9] {
        [
            ("TV", self.tv),
            ("Digital", self.digital),
            ("Sponsorship", self.sponsorship),
            ("Content Marketing", self.content_marketing),
            ("Online Marketing", self.online_marketing),
            ("Affiliates", self.affiliates),
            ("SEM", self.sem),
            ("Radio", self.radio),
            ("Other", self.other),
        ]
    }

    pub fn total(&self) -> f64 {
        self.channels().iter().map(|(_, value)| value).sum()
    }
}

/// GMV per product category for one month.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryGmv {
    pub entertainment_small: f64,
    pub camera_accessory: f64,
    pub gaming_hardware: f64,
    #[serde(rename = "GameCDDVD")]
    pub game_cd_dvd: f64,
    pub camera: f64,
}

impl CategoryGmv {
    /// `(category key, chart label, gmv)` for each category.
    pub fn entries(&self) -> [(&'static str, &'static str, f64); 5] {
        [
            ("EntertainmentSmall", "Entertainment", self.entertainment_small),
            ("CameraAccessory", "Camera Acc.", self.camera_accessory),
            ("GamingHardware", "Gaming HW", self.gaming_hardware),
            ("GameCDDVD", "Games", self.game_cd_dvd),
            ("Camera", "Cameras", self.camera),
        ]
    }

    pub fn total(&self) -> f64 {
        self.entries().iter().map(|(_, _, value)| value).sum()
    }
}

/// Fixed per-month figures shown on the monthly analysis page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonthlySnapshot {
    pub month: u32,
    pub year: i32,
    pub nps_score: f64,
    pub stock_value: f64,
    pub media_spend: MediaSpend,
    pub category_gmv: CategoryGmv,
    pub avg_gmv: f64,
    pub units_sold: u64,
    pub avg_discount: f64,
    pub saleday_impact: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyTable {
    snapshots: Vec<MonthlySnapshot>,
}

impl MonthlyTable {
    pub fn from_json(json: &str) -> Result<Self> {
        let mut snapshots: Vec<MonthlySnapshot> = serde_json::from_str(json)?;
        if let Some(bad) = snapshots.iter().find(|s| !(1..=12).contains(&s.month)) {
            return Err(ModelError::InvalidPeriod(bad.month.to_string()));
        }
        snapshots.sort_by_key(|s| (s.year, s.month));
        debug!("Parsed {} monthly snapshots", snapshots.len());
        Ok(Self { snapshots })
    }

    /// Snapshot for a month number (1-12).
    pub fn get(&self, month: u32) -> Option<&MonthlySnapshot> {
        self.snapshots.iter().find(|s| s.month == month)
    }

    pub fn snapshots(&self) -> &[MonthlySnapshot] {
        &self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"[{
        "month": 7, "year": 2023, "nps_score": 54.6, "stock_value": 1177,
        "media_spend": {"TV": 0.2, "Digital": 2.5, "Sponsorship": 7.4,
            "Content Marketing": 0.0, "Online Marketing": 1.3, "Affiliates": 0.5,
            "SEM": 5.0, "Radio": 0.0, "Other": 0.0},
        "category_gmv": {"EntertainmentSmall": 100.0, "CameraAccessory": 50.0,
            "GamingHardware": 25.0, "GameCDDVD": 15.0, "Camera": 10.0},
        "avg_gmv": 1285.4, "units_sold": 9134, "avg_discount": 42.25, "saleday_impact": 7.33
    }]"#;

    #[test]
    fn test_parse_snapshot() {
        let table = MonthlyTable::from_json(SNAPSHOT).unwrap();
        let july = table.get(7).unwrap();

        assert_eq!(july.year, 2023);
        assert_eq!(july.category_gmv.total(), 200.0);
        assert!((july.media_spend.total() - 16.9).abs() < 1e-9);
        assert_eq!(july.category_gmv.entries()[3], ("GameCDDVD", "Games", 15.0));
        assert!(table.get(8).is_none());
    }

    #[test]
    fn test_month_out_of_range_is_rejected() {
        let json = SNAPSHOT.replace("\"month\": 7", "\"month\": 13");
        assert!(matches!(
            MonthlyTable::from_json(&json),
            Err(ModelError::InvalidPeriod(_))
        ));
    }
}
