use serde::{Deserialize, Serialize};
use url::Url;

/// Oracle price tier, already divided down to the granularity thresholds use.
pub type GasTier = i64;

/// An opaque, already-signed transaction payload (hex string).
pub type SignedTx = String;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Configuration {
    pub eth_node_url: Url,
    pub gas_station_url: Url,
    #[serde(default)]
    pub gas_priced_transactions: Vec<GasPricedTransaction>,
}

/// A threshold group: every blob in `signed_txs` becomes eligible once the
/// published tier is at or below `gas_price`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GasPricedTransaction {
    pub gas_price: GasTier,
    #[serde(default)]
    pub signed_txs: Vec<SignedTx>,
}

impl GasPricedTransaction {
    pub fn is_eligible(&self, price: GasTier) -> bool {
        price <= self.gas_price
    }
}

/// Oracle payload. Only `average` is needed; the other tiers are kept when present.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GasPrice {
    #[serde(default, with = "tier_serde::optional")]
    pub fast: Option<i64>,
    #[serde(default, with = "tier_serde::optional")]
    pub fastest: Option<i64>,
    #[serde(default, rename = "safeLow", with = "tier_serde::optional")]
    pub safe_low: Option<i64>,
    #[serde(with = "tier_serde")]
    pub average: i64,
}

impl GasPrice {
    /// The oracle reports in tenths of the unit thresholds are written in.
    pub fn average_tier(&self) -> GasTier {
        self.average / 10
    }
}

/*
 * Oracles are inconsistent about numbers: some send `300`, others `300.0`.
 * Both are accepted, fractions are truncated, anything non-numeric is rejected.
 */
mod tier_serde {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use serde_json::Number;

    fn to_tier<E: Error>(number: Number) -> Result<i64, E> {
        if let Some(value) = number.as_i64() {
            return Ok(value);
        }
        match number.as_f64() {
            Some(value) if value.is_finite() && value.abs() < i64::MAX as f64 => Ok(value as i64),
            _ => Err(E::custom(format!("gas tier out of range: {number}"))),
        }
    }

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        to_tier(Number::deserialize(deserializer)?)
    }

    pub mod optional {
        use super::*;

        pub fn serialize<S: Serializer>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => serializer.serialize_some(value),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
            Option::<Number>::deserialize(deserializer)?
                .map(to_tier::<D::Error>)
                .transpose()
        }
    }
}
