// SPDX-License-Identifier: GPL-3.0-only

use std::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};

/// Opaque identifier the API assigns to a Pokémon.
///
/// It is the only key shared between the list, the detail query and the route.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PokemonId(String);

impl PokemonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Display for PokemonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Debug for PokemonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PokemonId({})", self.0)
    }
}

impl From<&str> for PokemonId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Simple owned data structure, for displaying the Pokémon in the list page (main page)
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub id: PokemonId,
    pub name: String,
    /// Display number as sent by the API ("001"), never parsed
    pub number: String,
    pub image: String,
    pub types: Vec<String>,
}

impl Debug for PokemonSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PokemonSummary")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{PokemonId, PokemonSummary};

    #[test]
    fn summary_decodes_from_api_shape() {
        let value = serde_json::json!({
            "id": "UG9rZW1vbjowMDE=",
            "number": "001",
            "name": "Bulbasaur",
            "image": "https://img.pokemondb.net/artwork/bulbasaur.jpg",
            "types": ["Grass", "Poison"]
        });

        let summary: PokemonSummary = serde_json::from_value(value).expect("decode summary");
        assert_eq!(summary.id, PokemonId::from("UG9rZW1vbjowMDE="));
        assert_eq!(summary.number, "001");
        assert_eq!(summary.types, vec!["Grass", "Poison"]);
    }

    #[test]
    fn identifier_is_transparent_text() {
        let id = PokemonId::new("004");
        assert_eq!(id.to_string(), "004");
        assert_eq!(serde_json::to_value(&id).unwrap(), serde_json::json!("004"));
    }
}
