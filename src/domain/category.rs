use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Wire names and id fields must stay in lockstep with the records in `result.rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    CreditCards,
    PosReceipts,
    Facturas,
    CreditCardSlips,
    Passports,
    CruiseIds,
    CruiseSchedules,
    BoardingPasses,
    OtherDocuments,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl Category {
    pub const ALL: [Category; 9] = [
        Category::CreditCards,
        Category::PosReceipts,
        Category::Facturas,
        Category::CreditCardSlips,
        Category::Passports,
        Category::CruiseIds,
        Category::CruiseSchedules,
        Category::BoardingPasses,
        Category::OtherDocuments,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::CreditCards => "credit_cards",
            Category::PosReceipts => "pos_receipts",
            Category::Facturas => "facturas",
            Category::CreditCardSlips => "credit_card_slips",
            Category::Passports => "passports",
            Category::CruiseIds => "cruise_ids",
            Category::CruiseSchedules => "cruise_schedules",
            Category::BoardingPasses => "boarding_passes",
            Category::OtherDocuments => "other_documents",
        }
    }

    pub fn id_field(self) -> &'static str {
        match self {
            Category::CreditCards => "card_id",
            Category::PosReceipts => "pos_id",
            Category::Facturas => "factura_id",
            Category::CreditCardSlips => "slip_id",
            Category::Passports => "passport_id",
            Category::CruiseIds => "cruise_id",
            Category::CruiseSchedules => "schedule_id",
            Category::BoardingPasses => "boarding_pass_id",
            Category::OtherDocuments => "other_id",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Category::CreditCards => "Credit Cards",
            Category::PosReceipts => "POS Receipts",
            Category::Facturas => "Facturas",
            Category::CreditCardSlips => "Credit Card Slips",
            Category::Passports => "Passports",
            Category::CruiseIds => "Cruise IDs",
            Category::CruiseSchedules => "Cruise Schedules",
            Category::BoardingPasses => "Boarding Passes",
            Category::OtherDocuments => "Other Documents",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == needle)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
