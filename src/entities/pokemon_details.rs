// SPDX-License-Identifier: GPL-3.0-only

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use super::PokemonSummary;

/// Main Pokémon structure with all the info we want to display about it
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonDetails {
    #[serde(flatten)]
    pub summary: PokemonSummary,
    pub classification: String,
    pub height: DimensionRange,
    pub weight: DimensionRange,
    pub resistant: Vec<String>,
    pub weaknesses: Vec<String>,
    /// Probability in `0.0..=1.0`
    pub flee_rate: f64,
    #[serde(rename = "maxCP")]
    pub max_cp: u32,
    #[serde(rename = "maxHP")]
    pub max_hp: u32,
}

impl Debug for PokemonDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PokemonDetails")
            .field("id", &self.summary.id)
            .field("name", &self.summary.name)
            .finish()
    }
}

/// A `{minimum, maximum}` pair of display strings ("0.61m", "0.79m")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionRange {
    pub minimum: String,
    pub maximum: String,
}

impl std::fmt::Display for DimensionRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.minimum, self.maximum)
    }
}

#[cfg(test)]
mod tests {
    use super::PokemonDetails;

    #[test]
    fn details_decode_flattened_api_shape() {
        let value = serde_json::json!({
            "id": "UG9rZW1vbjowMDQ=",
            "number": "004",
            "name": "Charmander",
            "image": "https://img.pokemondb.net/artwork/charmander.jpg",
            "types": ["Fire"],
            "classification": "Lizard Pokémon",
            "weight": { "minimum": "7.44kg", "maximum": "9.56kg" },
            "height": { "minimum": "0.53m", "maximum": "0.68m" },
            "resistant": ["Fire", "Grass", "Ice", "Bug", "Steel", "Fairy"],
            "weaknesses": ["Water", "Ground", "Rock"],
            "fleeRate": 0.1,
            "maxCP": 841,
            "maxHP": 955
        });

        let details: PokemonDetails = serde_json::from_value(value).expect("decode details");
        assert_eq!(details.summary.name, "Charmander");
        assert_eq!(details.classification, "Lizard Pokémon");
        assert_eq!(details.height.to_string(), "0.53m - 0.68m");
        assert_eq!(details.weaknesses, vec!["Water", "Ground", "Rock"]);
        assert_eq!(details.max_cp, 841);
        assert_eq!(details.max_hp, 955);
        assert!((details.flee_rate - 0.1).abs() < f64::EPSILON);
    }
}
