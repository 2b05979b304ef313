use serde::{Deserialize, Deserializer, Serialize};

/// A single recorded expense. Only `category` and `amount` carry meaning;
/// the remaining fields are free text passed through as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub date: String,
    #[serde(deserialize_with = "amount_from_number_or_string")]
    pub amount: f64,
    pub category: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub store: String,
    #[serde(default)]
    pub id: String,
}

/// Raw transaction form input, before trimming and validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionDraft {
    pub date: String,
    pub amount: String,
    pub category: String,
    pub location: String,
    pub store: String,
    pub id: String,
}

// Older entries may hold the amount as the text typed into the form.
fn amount_from_number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(n) => Ok(n),
        Amount::Text(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| serde::de::Error::custom(format!("invalid amount: {s:?}"))),
    }
}
