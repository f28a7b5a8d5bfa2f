//! Domain type representing a single logged expense.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::category::Category;
use crate::domain::common::{Displayable, Identifiable};

/// A single expense record. `id` is assigned at creation and never changes;
/// the receipt photo is kept as raw bytes in memory and base64-encoded only
/// at the serialization boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub title: String,
    pub amount: Decimal,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(
        rename = "photoDataBase64",
        default,
        with = "photo_base64",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo: Option<Vec<u8>>,
}

impl Expense {
    pub fn new(
        title: impl Into<String>,
        amount: Decimal,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount,
            category,
            date,
            photo: None,
        }
    }

    pub fn with_photo(mut self, photo: Vec<u8>) -> Self {
        self.photo = Some(photo);
        self
    }
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        format!("{} ({}, {})", self.title, self.category, self.date)
    }
}

mod photo_base64 {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(photo: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match photo {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            Some(encoded) => STANDARD
                .decode(encoded.as_bytes())
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 16).unwrap()
    }

    #[test]
    fn photo_round_trips_through_base64() {
        let expense = Expense::new("Lunch", dec!(42.50), Category::Food, sample_date())
            .with_photo(vec![0xDE, 0xAD, 0xBE, 0xEF]);
        let json = serde_json::to_string(&expense).unwrap();
        assert!(json.contains("photoDataBase64"));

        let decoded: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.photo, Some(vec![0xDE, 0xAD, 0xBE, 0xEF]));
        assert_eq!(decoded, expense);
    }

    #[test]
    fn photo_field_is_omitted_when_absent() {
        let expense = Expense::new("Bus", dec!(3.20), Category::Transport, sample_date());
        let json = serde_json::to_string(&expense).unwrap();
        assert!(!json.contains("photoDataBase64"));
    }

    #[test]
    fn amount_serializes_as_json_number() {
        let expense = Expense::new("Rent", dec!(1200.00), Category::Bill, sample_date());
        let value = serde_json::to_value(&expense).unwrap();
        assert!(value["amount"].is_number());
    }
}
