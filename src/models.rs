use serde::{Deserialize, Serialize};

// ============================================================================
// Wire Models
// Request/response shapes shared by both services and the client
// ============================================================================

/// An order as submitted by a caller. The id is caller-assigned.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Order {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    pub item_type: String,
    #[serde(deserialize_with = "lenient::int")]
    pub quantity: i64,
    #[serde(deserialize_with = "lenient::float")]
    pub price_per_item: f64,
}

/// Per item type aggregate returned by `GET /orders/analysis/`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnalysisResult {
    pub item_type: String,
    pub average_quantity: f64,
    pub average_price: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PredictionRequest {
    pub item_type: String,
    #[serde(deserialize_with = "lenient::int")]
    pub expected_quantity: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PredictionResponse {
    pub item_type: String,
    pub expected_quantity: i64,
    pub predicted_price: f64,
}

/// Body of every non-2xx response
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

// ============================================================================
// Numeric Coercion
// ============================================================================
//
// Callers may send numbers as JSON strings ("10", "250.5") and whole numbers
// as floats (10.0) for integer fields. Anything that is not a finite number,
// or a fractional value for an integer field, is still rejected.
//
// ============================================================================

mod lenient {
    use serde::de::{self, Deserializer, Unexpected, Visitor};
    use std::fmt;

    pub fn int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        deserializer.deserialize_any(IntVisitor)
    }

    pub fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(FloatVisitor)
    }

    /// `i64::MAX as f64` is 2^63, one past the range
    fn whole(value: f64) -> Option<i64> {
        let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
        (value.is_finite() && value.fract() == 0.0 && in_range).then_some(value as i64)
    }

    struct IntVisitor;

    impl<'de> Visitor<'de> for IntVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an integer")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            whole(v).ok_or_else(|| E::invalid_value(Unexpected::Float(v), &self))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            let trimmed = v.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(whole))
                .ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
        }
    }

    struct FloatVisitor;

    impl<'de> Visitor<'de> for FloatVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a finite number")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            v.trim()
                .parse::<f64>()
                .ok()
                .filter(|parsed| parsed.is_finite())
                .ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
        }
    }
}
