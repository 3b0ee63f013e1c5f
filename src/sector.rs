use serde::{Deserialize, Serialize};
use std::fmt;

/// Industry sector of a candidate or a recorded purchase.
///
/// The integer code returned by [`Sector::code`] is what the transaction store
/// persists, so existing variants must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Technology,
    Utilities,
    RealEstate,
    Financials,
    ConsumerGoods,
    Healthcare,
    Energy,
}

impl Sector {
    pub const ALL: [Sector; 7] = [
        Sector::Technology,
        Sector::Utilities,
        Sector::RealEstate,
        Sector::Financials,
        Sector::ConsumerGoods,
        Sector::Healthcare,
        Sector::Energy,
    ];

    pub fn code(self) -> i16 {
        match self {
            Self::Technology => 0,
            Self::Utilities => 1,
            Self::RealEstate => 2,
            Self::Financials => 3,
            Self::ConsumerGoods => 4,
            Self::Healthcare => 5,
            Self::Energy => 6,
        }
    }

    pub fn from_code(code: i16) -> Option<Self> {
        Self::ALL.into_iter().find(|sector| sector.code() == code)
    }

    /// Parses the snake_case name used in candidate files and on the command line.
    pub fn from_name(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "technology" => Some(Self::Technology),
            "utilities" => Some(Self::Utilities),
            "real_estate" | "realestate" => Some(Self::RealEstate),
            "financials" => Some(Self::Financials),
            "consumer_goods" | "consumergoods" => Some(Self::ConsumerGoods),
            "healthcare" => Some(Self::Healthcare),
            "energy" => Some(Self::Energy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technology => "Technology",
            Self::Utilities => "Utilities",
            Self::RealEstate => "Real Estate",
            Self::Financials => "Financials",
            Self::ConsumerGoods => "Consumer Goods",
            Self::Healthcare => "Healthcare",
            Self::Energy => "Energy",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable_and_unique() {
        let codes: Vec<i16> = Sector::ALL.iter().map(|s| s.code()).collect();
        assert_eq!(codes, vec![0, 1, 2, 3, 4, 5, 6]);
        for sector in Sector::ALL {
            assert_eq!(Sector::from_code(sector.code()), Some(sector));
        }
        assert_eq!(Sector::from_code(7), None);
        assert_eq!(Sector::from_code(-1), None);
    }

    #[test]
    fn names_parse_from_config_spelling() {
        assert_eq!(Sector::from_name("real_estate"), Some(Sector::RealEstate));
        assert_eq!(Sector::from_name("Consumer Goods"), Some(Sector::ConsumerGoods));
        assert_eq!(Sector::from_name("ENERGY"), Some(Sector::Energy));
        assert_eq!(Sector::from_name("crypto"), None);
    }

    #[test]
    fn serde_uses_snake_case() {
        let parsed: Sector = serde_json::from_str("\"consumer_goods\"").unwrap();
        assert_eq!(parsed, Sector::ConsumerGoods);
        assert_eq!(serde_json::to_string(&Sector::RealEstate).unwrap(), "\"real_estate\"");
    }
}
