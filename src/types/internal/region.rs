use std::fmt;
use std::str::FromStr;

use poem_openapi::Enum;
use serde::{Deserialize, Serialize};

use crate::errors::InternalError;

/// One of the three geographic groupings festivals and subscriptions are partitioned by
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[oai(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Bayern,
    Tirol,
    Oesterreich,
}

impl Region {
    /// All regions in canonical order
    pub const ALL: [Region; 3] = [Region::Bayern, Region::Tirol, Region::Oesterreich];

    /// Stored and wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Bayern => "bayern",
            Region::Tirol => "tirol",
            Region::Oesterreich => "oesterreich",
        }
    }
}

impl FromStr for Region {
    type Err = InternalError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "bayern" => Ok(Region::Bayern),
            "tirol" => Ok(Region::Tirol),
            "oesterreich" => Ok(Region::Oesterreich),
            other => Err(InternalError::validation(format!(
                "Unknown region '{}'. Expected one of: bayern, tirol, oesterreich",
                other
            ))),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_the_three_regions() {
        for region in Region::ALL {
            assert_eq!(region.as_str().parse::<Region>().unwrap(), region);
        }
    }

    #[test]
    fn test_parse_rejects_other_values() {
        for value in ["schwaben", "Bayern", "", "all"] {
            let result = value.parse::<Region>();
            assert!(matches!(result, Err(InternalError::Validation(_))), "{value} should be rejected");
        }
    }

    #[test]
    fn test_serde_uses_lowercase() {
        let json = serde_json::to_string(&Region::Oesterreich).unwrap();
        assert_eq!(json, "\"oesterreich\"");
    }
}
