//! SolarEdge monitoring API integration.
//!
//! One blocking HTTP client, three endpoints:
//!
//! - `energy`: the time series the whole pipeline is built around
//! - `overview`: best-effort site snapshot (current power, today, lifetime)
//! - `envBenefits`: best-effort CO2 savings
//!
//! The energy fetch here covers exactly **one** sub-range and does not retry;
//! retry/fallback policy lives in `data::fetch`.

use std::time::Duration;

use chrono::NaiveDateTime;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{DateRange, EnvBenefits, SampleRow, SiteOverview, TimeUnit};
use crate::error::AppError;

const BASE_URL: &str = "https://monitoringapi.solaredge.com/site";

/// Per-request timeout. Exceeding it is an ordinary fetch failure, recovered
/// by the coordinator's fallback policy like any other.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// API credential and site identifier, resolved once at startup.
#[derive(Debug, Clone)]
pub struct SiteCredentials {
    pub api_key: String,
    pub site_id: String,
}

impl SiteCredentials {
    /// Read credentials from the environment (`.env` supported).
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("SE_API_KEY")
            .map_err(|_| AppError::new(2, "Missing SE_API_KEY in environment (.env)."))?;
        let site_id = std::env::var("SE_SITE_ID")
            .map_err(|_| AppError::new(2, "Missing SE_SITE_ID in environment (.env)."))?;
        Ok(Self { api_key, site_id })
    }
}

pub struct SolarClient {
    client: Client,
    credentials: SiteCredentials,
}

impl SolarClient {
    pub fn new(credentials: SiteCredentials) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::new(2, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, credentials })
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{BASE_URL}/{}/{endpoint}", self.credentials.site_id)
    }

    /// Fetch normalized energy samples for one sub-range.
    ///
    /// The caller is responsible for keeping the span within the API's 31-day
    /// cap; an over-long span comes back as a non-2xx status like any other
    /// failure.
    pub fn fetch_energy_range(
        &self,
        time_unit: TimeUnit,
        range: DateRange,
    ) -> Result<Vec<SampleRow>, AppError> {
        let resp = self
            .client
            .get(self.endpoint_url("energy"))
            .query(&[
                ("api_key", self.credentials.api_key.as_str()),
                ("timeUnit", time_unit.api_tag()),
                ("startDate", &range.start.to_string()),
                ("endDate", &range.end.to_string()),
            ])
            .send()
            .map_err(|e| AppError::new(4, format!("Energy request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("Energy request failed with status {}.", resp.status()),
            ));
        }

        let body: EnergyResponse = resp
            .json()
            .map_err(|e| AppError::new(4, format!("Failed to parse energy response: {e}")))?;

        let mut rows = Vec::with_capacity(body.energy.values.len());
        for sample in body.energy.values {
            rows.push(normalize_sample(&sample)?);
        }
        Ok(rows)
    }

    /// Best-effort site snapshot; callers treat an `Err` as "absent".
    pub fn fetch_overview(&self) -> Result<SiteOverview, AppError> {
        let resp = self
            .client
            .get(self.endpoint_url("overview"))
            .query(&[("api_key", self.credentials.api_key.as_str())])
            .send()
            .map_err(|e| AppError::new(4, format!("Overview request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!("Overview request failed with status {}.", resp.status()),
            ));
        }

        let body: OverviewResponse = resp
            .json()
            .map_err(|e| AppError::new(4, format!("Failed to parse overview response: {e}")))?;

        Ok(SiteOverview {
            current_power_w: body.overview.current_power.power,
            today_wh: body.overview.last_day_data.energy,
            lifetime_wh: body.overview.life_time_data.energy,
        })
    }

    /// Best-effort CO2 savings; callers treat an `Err` as "absent".
    pub fn fetch_env_benefits(&self) -> Result<EnvBenefits, AppError> {
        let resp = self
            .client
            .get(self.endpoint_url("envBenefits"))
            .query(&[("api_key", self.credentials.api_key.as_str())])
            .send()
            .map_err(|e| AppError::new(4, format!("Environmental-benefits request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!(
                    "Environmental-benefits request failed with status {}.",
                    resp.status()
                ),
            ));
        }

        let body: EnvBenefitsResponse = resp.json().map_err(|e| {
            AppError::new(4, format!("Failed to parse environmental-benefits response: {e}"))
        })?;

        Ok(EnvBenefits {
            co2_saved_kg: body.env_benefits.gas_emission_saved.co2,
        })
    }
}

#[derive(Debug, Deserialize)]
struct EnergyResponse {
    energy: EnergyBlock,
}

#[derive(Debug, Deserialize)]
struct EnergyBlock {
    #[serde(default)]
    values: Vec<RawSample>,
}

/// A raw sample as the API sends it: combined date-time string plus a value
/// that is null for intervals without a reading.
#[derive(Debug, Deserialize)]
struct RawSample {
    date: String,
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OverviewResponse {
    overview: OverviewBody,
}

#[derive(Debug, Deserialize)]
struct OverviewBody {
    #[serde(rename = "currentPower")]
    current_power: PowerReading,
    #[serde(rename = "lastDayData")]
    last_day_data: EnergyReading,
    #[serde(rename = "lifeTimeData")]
    life_time_data: EnergyReading,
}

#[derive(Debug, Deserialize)]
struct PowerReading {
    #[serde(default)]
    power: f64,
}

#[derive(Debug, Deserialize)]
struct EnergyReading {
    #[serde(default)]
    energy: f64,
}

#[derive(Debug, Deserialize)]
struct EnvBenefitsResponse {
    #[serde(rename = "envBenefits")]
    env_benefits: EnvBenefitsBody,
}

#[derive(Debug, Deserialize)]
struct EnvBenefitsBody {
    #[serde(rename = "gasEmissionSaved")]
    gas_emission_saved: GasEmissionSaved,
}

#[derive(Debug, Deserialize)]
struct GasEmissionSaved {
    #[serde(default)]
    co2: f64,
}

/// Normalize one raw API sample into a `SampleRow`.
///
/// A null value means "no reading for this interval" and becomes 0 Wh.
fn normalize_sample(sample: &RawSample) -> Result<SampleRow, AppError> {
    let timestamp = parse_timestamp(&sample.date)?;
    Ok(SampleRow::new(timestamp, sample.value.unwrap_or(0.0)))
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime, AppError> {
    // The energy endpoint reports "YYYY-MM-DD HH:MM:SS" regardless of
    // granularity, but daily and coarser exports have been seen with a bare
    // date. Accept both, deterministically.
    if let Ok(ts) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(ts);
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(ts) = date.and_hms_opt(0, 0, 0) {
            return Ok(ts);
        }
    }
    Err(AppError::new(
        4,
        format!("Invalid timestamp '{s}' in energy response."),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_value_normalizes_to_zero() {
        let sample = RawSample {
            date: "2023-05-02 14:40:00".to_string(),
            value: None,
        };
        let row = normalize_sample(&sample).unwrap();
        assert_eq!(row.value, 0.0);
        assert_eq!(row.hour_rounded, 15);
    }

    #[test]
    fn present_value_is_kept() {
        let sample = RawSample {
            date: "2023-05-02 12:00:00".to_string(),
            value: Some(150.0),
        };
        let row = normalize_sample(&sample).unwrap();
        assert_eq!(row.value, 150.0);
        assert_eq!((row.year, row.month, row.day), (2023, 5, 2));
    }

    #[test]
    fn bare_date_parses_as_midnight() {
        let ts = parse_timestamp("2023-05-02").unwrap();
        assert_eq!(ts.to_string(), "2023-05-02 00:00:00");
    }

    #[test]
    fn garbage_timestamp_is_an_error() {
        assert!(parse_timestamp("02/05/2023 14:40").is_err());
    }
}
