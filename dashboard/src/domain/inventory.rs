//! Spare-parts inventory records.

use std::fmt;
use std::str::FromStr;

use money::Money;
use serde::{Deserialize, Serialize};

use super::record::{
    Drafted, Record, RecordId, RecordValidationError, require_non_negative, require_text,
};
use super::stats::{Aggregate, Metric};

/// Free-form part category, such as `Engine` or `Brakes`.
///
/// ## Invariants
/// - Non-empty and free of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PartCategory(String);

impl PartCategory {
    /// Validate and wrap a category name.
    pub fn new(value: impl Into<String>) -> Result<Self, RecordValidationError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RecordValidationError::BlankField { field: "category" });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the category name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PartCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartCategory {
    type Err = RecordValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::new(raw)
    }
}

impl TryFrom<String> for PartCategory {
    type Error = RecordValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PartCategory> for String {
    fn from(value: PartCategory) -> Self {
        value.0
    }
}

/// One stocked spare part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparePart {
    /// Record identifier.
    pub id: RecordId,
    /// Part name.
    pub name: String,
    /// Part category.
    pub category: PartCategory,
    /// Units in stock.
    #[serde(default)]
    pub quantity: Option<u32>,
    /// Unit price.
    #[serde(default)]
    pub price: Option<Money>,
    /// Reorder threshold.
    #[serde(default)]
    pub threshold: Option<u32>,
    /// Optional image URL.
    #[serde(default)]
    pub image: Option<String>,
}

impl SparePart {
    /// A part is low on stock when its quantity is at or below its own
    /// threshold. Absent values read as zero.
    pub fn is_low_stock(&self) -> bool {
        self.quantity.unwrap_or(0) <= self.threshold.unwrap_or(0)
    }

    /// Unit price multiplied by quantity.
    pub fn stock_value(&self) -> Option<Money> {
        self.price
            .map(|price| price.times(self.quantity.unwrap_or(0)))
    }
}

/// Input captured when an operator adds a part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparePartDraft {
    /// Part name.
    pub name: String,
    /// Part category.
    pub category: PartCategory,
    /// Units in stock.
    pub quantity: u32,
    /// Unit price.
    pub price: Money,
    /// Reorder threshold.
    pub threshold: u32,
    /// Optional image URL.
    pub image: Option<String>,
}

impl Record for SparePart {
    type Discriminator = PartCategory;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn discriminator(&self) -> &PartCategory {
        &self.category
    }
}

impl Drafted for SparePart {
    type Draft = SparePartDraft;

    fn from_draft(id: RecordId, draft: SparePartDraft) -> Result<Self, RecordValidationError> {
        let part = Self {
            id,
            name: draft.name.trim().to_owned(),
            category: draft.category,
            quantity: Some(draft.quantity),
            price: Some(draft.price),
            threshold: Some(draft.threshold),
            image: draft.image.filter(|image| !image.trim().is_empty()),
        };
        part.validate()?;
        Ok(part)
    }

    fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("name", &self.name)?;
        require_non_negative("price", self.price)
    }
}

impl Aggregate for SparePart {
    fn metrics() -> Vec<Metric<Self>> {
        vec![
            Metric::CountFlagged {
                name: "lowStockCount",
            },
            Metric::SumQuantity {
                name: "totalUnits",
                field: |part| part.quantity,
            },
            Metric::SumAmount {
                name: "inventoryValue",
                field: SparePart::stock_value,
            },
        ]
    }

    fn is_flagged(&self) -> bool {
        self.is_low_stock()
    }
}
