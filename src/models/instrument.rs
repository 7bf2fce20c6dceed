use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::validation::check_length;

/// A financial security reference, keyed by ISIN.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Instrument {
    pub id: Uuid,
    pub isin: String,
    pub short_name: String,
    pub name: String,
    pub sustainable: bool,
    pub responsible: bool,
    pub sector_name: Option<String>,
    pub currency_code: Option<String>,
    pub country_code: Option<String>,
    pub esg: String,
}

/// Provider-shaped ingest payload (camelCase wire names, vendor field codes).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentPayload {
    pub isin: Option<String>,
    pub short_name: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub sustainable: bool,
    #[serde(default)]
    pub responsible: bool,
    #[serde(rename = "sakmCioSas3Name")]
    pub sector_name: Option<String>,
    #[serde(rename = "sakmCioCurrencyCode")]
    pub currency_code: Option<String>,
    #[serde(rename = "sakmCioCountryCode")]
    pub country_code: Option<String>,
    #[serde(default)]
    pub sustainability_factors: Vec<SustainabilityFactor>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SustainabilityFactor {
    pub sustainability_type: Option<String>,
    pub factor_type: Option<String>,
    pub factor_value: Option<String>,
}

/// The ESG rating buried in the sustainability factors list, or an empty
/// string when no ESG_RATING factor is present. The last match wins.
pub fn esg_rating(factors: &[SustainabilityFactor]) -> String {
    factors
        .iter()
        .filter(|f| {
            f.sustainability_type.as_deref() == Some("ESG")
                && f.factor_type.as_deref() == Some("ESG_RATING")
        })
        .filter_map(|f| f.factor_value.clone())
        .last()
        .unwrap_or_default()
}

impl Instrument {
    pub fn from_payload(payload: InstrumentPayload) -> Result<Self, AppError> {
        let isin = payload.isin.unwrap_or_default();
        if !check_length(&isin, 12) {
            return Err(AppError::Validation(format!("{isin} is not a valid ISIN")));
        }
        let short_name = payload.short_name.unwrap_or_default();
        let name = payload.name.unwrap_or_default();
        if !check_length(&short_name, 128) || !check_length(&name, 128) {
            return Err(AppError::Validation(
                "instrument name fields must be non-empty".to_string(),
            ));
        }
        let esg = esg_rating(&payload.sustainability_factors);
        Ok(Self {
            id: Uuid::new_v4(),
            isin,
            short_name,
            name,
            sustainable: payload.sustainable,
            responsible: payload.responsible,
            sector_name: payload.sector_name,
            currency_code: payload.currency_code,
            country_code: payload.country_code,
            esg,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: serde_json::Value) -> InstrumentPayload {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_esg_extracted_from_factors() {
        let payload = payload(serde_json::json!({
            "isin": "SE0000108656",
            "shortName": "ERIC B",
            "name": "Ericsson B",
            "sustainable": true,
            "sakmCioCurrencyCode": "SEK",
            "sakmCioCountryCode": "SE",
            "sustainabilityFactors": [
                {"sustainabilityType": "CLIMATE", "factorType": "CO2", "factorValue": "low"},
                {"sustainabilityType": "ESG", "factorType": "ESG_RATING", "factorValue": "AA"}
            ]
        }));
        let instrument = Instrument::from_payload(payload).unwrap();
        assert_eq!(instrument.esg, "AA");
        assert_eq!(instrument.currency_code.as_deref(), Some("SEK"));
        assert!(instrument.sustainable);
        assert!(!instrument.responsible);
    }

    #[test]
    fn test_esg_empty_when_absent() {
        let payload = payload(serde_json::json!({
            "isin": "US0378331005",
            "shortName": "AAPL",
            "name": "Apple Inc"
        }));
        let instrument = Instrument::from_payload(payload).unwrap();
        assert_eq!(instrument.esg, "");
    }

    #[test]
    fn test_last_esg_rating_wins() {
        let factors = vec![
            SustainabilityFactor {
                sustainability_type: Some("ESG".into()),
                factor_type: Some("ESG_RATING".into()),
                factor_value: Some("BBB".into()),
            },
            SustainabilityFactor {
                sustainability_type: Some("ESG".into()),
                factor_type: Some("ESG_RATING".into()),
                factor_value: Some("A".into()),
            },
        ];
        assert_eq!(esg_rating(&factors), "A");
    }

    #[test]
    fn test_missing_isin_rejected() {
        let payload = payload(serde_json::json!({
            "shortName": "AAPL",
            "name": "Apple Inc"
        }));
        assert!(matches!(
            Instrument::from_payload(payload),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_isin_too_long_rejected() {
        let payload = payload(serde_json::json!({
            "isin": "US03783310051",
            "shortName": "AAPL",
            "name": "Apple Inc"
        }));
        assert!(Instrument::from_payload(payload).is_err());
    }
}
