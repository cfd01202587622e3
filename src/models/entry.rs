use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// How often an entered amount recurs. The set is closed; anything else in
/// an entries file is a parse failure for that field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frequency {
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn parse(s: &str) -> Option<Frequency> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Some(Frequency::Monthly),
            "yearly" => Some(Frequency::Yearly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
        }
    }
}

impl Default for Frequency {
    /// Fields with no stated frequency count as Monthly.
    fn default() -> Self {
        Frequency::Monthly
    }
}

/// A field value exactly as the input provider supplied it: raw amount text
/// plus raw frequency text, not yet validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEntry {
    pub label: String,
    pub amount: String,
    pub frequency: String,
}

impl RawEntry {
    pub fn new(label: &str, amount: &str, frequency: &str) -> Self {
        Self {
            label: label.to_string(),
            amount: amount.to_string(),
            frequency: frequency.to_string(),
        }
    }
}

/// A validated user-supplied value. Immutable once parsed; entries are never
/// persisted individually, only the aggregated snapshot is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub label: String,
    pub amount: f64,
    pub frequency: Frequency,
}

impl Entry {
    /// Validate a raw field value. The amount must parse as a finite,
    /// non-negative number and the frequency must come from the closed
    /// Monthly/Yearly set (empty text falls back to the Monthly default).
    /// Either failure aborts the whole aggregation pass.
    pub fn parse(raw: &RawEntry) -> AppResult<Entry> {
        let amount: f64 = raw
            .amount
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidAmount(raw.label.clone()))?;

        if !amount.is_finite() || amount < 0.0 {
            return Err(AppError::InvalidAmount(raw.label.clone()));
        }

        let frequency = if raw.frequency.trim().is_empty() {
            Frequency::default()
        } else {
            Frequency::parse(&raw.frequency)
                .ok_or_else(|| AppError::InvalidAmount(raw.label.clone()))?
        };

        Ok(Entry {
            label: raw.label.clone(),
            amount,
            frequency,
        })
    }

    /// Parse a whole field set, failing on the first invalid one so that no
    /// partial totals are produced.
    pub fn parse_all(raws: &[RawEntry]) -> AppResult<Vec<Entry>> {
        raws.iter().map(Entry::parse).collect()
    }
}
