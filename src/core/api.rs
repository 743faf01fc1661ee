// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    core::graphql::{QueryClient, QueryError},
    entities::{PokemonDetails, PokemonId, PokemonSummary},
};

pub const GET_POKEMONS: &str = r#"
query pokemons($first: Int!) {
  pokemons(first: $first) {
    id
    number
    name
    image
    types
  }
}
"#;

pub const GET_POKEMON_DETAILS: &str = r#"
query pokemon($id: String, $name: String) {
  pokemon(id: $id, name: $name) {
    id
    number
    name
    weight {
      minimum
      maximum
    }
    height {
      minimum
      maximum
    }
    classification
    types
    resistant
    weaknesses
    fleeRate
    maxCP
    maxHP
    image
  }
}
"#;

/// The two ways loading data can fail, as far as the views are concerned
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to load the Pokémon list: {0}")]
    Fetch(#[source] QueryError),

    #[error("failed to load Pokémon details: {0}")]
    DetailFetch(#[source] QueryError),
}

/// Selects a single Pokémon, by identifier, by name, or by both.
///
/// Can only be built with at least one of them set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailsKey {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<PokemonId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl DetailsKey {
    /// Returns `None` when there is nothing to select by
    pub fn new(id: Option<PokemonId>, name: Option<String>) -> Option<Self> {
        if id.is_none() && name.is_none() {
            return None;
        }

        Some(DetailsKey { id, name })
    }

    pub fn id(&self) -> Option<&PokemonId> {
        self.id.as_ref()
    }
}

#[derive(Deserialize)]
struct PokemonsData {
    #[serde(default)]
    pokemons: Option<Vec<PokemonSummary>>,
}

#[derive(Deserialize)]
struct PokemonData {
    #[serde(default)]
    pokemon: Option<PokemonDetails>,
}

/// Typed access to the Pokémon queries on top of any [`QueryClient`]
#[derive(Debug, Clone)]
pub struct PokemonApi<C> {
    client: C,
}

impl<C: QueryClient> PokemonApi<C> {
    pub fn new(client: C) -> Self {
        PokemonApi { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Fetches the first `first` Pokémon, in the order the API returns them
    pub async fn fetch_all(&self, first: u32) -> Result<Vec<PokemonSummary>, ApiError> {
        let data = self
            .client
            .execute(GET_POKEMONS, serde_json::json!({ "first": first }))
            .await
            .map_err(ApiError::Fetch)?;

        let data: PokemonsData =
            serde_json::from_value(data).map_err(|e| ApiError::Fetch(e.into()))?;

        Ok(data.pokemons.unwrap_or_default())
    }

    /// Fetches the full record selected by `key`; `Ok(None)` when nothing matches
    pub async fn fetch_details(&self, key: &DetailsKey) -> Result<Option<PokemonDetails>, ApiError> {
        let variables = serde_json::to_value(key).map_err(|e| ApiError::DetailFetch(e.into()))?;

        let data = self
            .client
            .execute(GET_POKEMON_DETAILS, variables)
            .await
            .map_err(ApiError::DetailFetch)?;

        let data: PokemonData =
            serde_json::from_value(data).map_err(|e| ApiError::DetailFetch(e.into()))?;

        Ok(data.pokemon)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
    };

    use serde_json::Value;

    use super::DetailsKey;
    use crate::{
        core::graphql::{QueryClient, QueryError},
        entities::PokemonId,
    };

    /// Replays canned responses in order and records every query it receives
    #[derive(Clone, Default)]
    pub struct FakeClient {
        responses: Arc<Mutex<VecDeque<Result<Value, QueryError>>>>,
        calls: Arc<Mutex<Vec<(&'static str, Value)>>>,
    }

    impl FakeClient {
        pub fn respond(self, response: Result<Value, QueryError>) -> Self {
            self.responses.lock().unwrap().push_back(response);
            self
        }

        pub fn calls(&self) -> Vec<(&'static str, Value)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl QueryClient for FakeClient {
        async fn execute(&self, query: &'static str, variables: Value) -> Result<Value, QueryError> {
            self.calls.lock().unwrap().push((query, variables));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(QueryError::MissingData))
        }
    }

    pub fn key_for(id: &str) -> DetailsKey {
        DetailsKey::new(Some(PokemonId::from(id)), None).expect("id given")
    }

    pub fn bulbasaur() -> Value {
        serde_json::json!({
            "id": "UG9rZW1vbjowMDE=",
            "number": "001",
            "name": "Bulbasaur",
            "image": "https://img.pokemondb.net/artwork/bulbasaur.jpg",
            "types": ["Grass", "Poison"]
        })
    }

    pub fn charmander() -> Value {
        serde_json::json!({
            "id": "UG9rZW1vbjowMDQ=",
            "number": "004",
            "name": "Charmander",
            "image": "https://img.pokemondb.net/artwork/charmander.jpg",
            "types": ["Fire"]
        })
    }

    pub fn charmander_details() -> Value {
        let mut value = charmander();
        let extra = serde_json::json!({
            "classification": "Lizard Pokémon",
            "weight": { "minimum": "7.44kg", "maximum": "9.56kg" },
            "height": { "minimum": "0.53m", "maximum": "0.68m" },
            "resistant": ["Fire", "Grass", "Ice", "Bug", "Steel", "Fairy"],
            "weaknesses": ["Water", "Ground", "Rock"],
            "fleeRate": 0.1,
            "maxCP": 841,
            "maxHP": 955
        });
        if let (Some(target), Some(extra)) = (value.as_object_mut(), extra.as_object()) {
            target.extend(extra.clone());
        }
        value
    }
}
