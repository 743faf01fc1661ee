// SPDX-License-Identifier: GPL-3.0-only

use crate::{
    app::{route::Route, utils::SearchFilter},
    core::{
        api::DetailsKey,
        pokemon_queries::{PokemonDetailsQuery, PokemonListQuery},
    },
    entities::{PokemonDetails, PokemonSummary},
};

/// What the list page shows, checked in declaration order
#[derive(Debug, PartialEq)]
pub enum ListViewState<'a> {
    Loading,
    Error,
    Empty,
    Populated(Vec<&'a PokemonSummary>),
}

impl<'a> ListViewState<'a> {
    pub fn evaluate(query: &PokemonListQuery, filter: &'a SearchFilter) -> Self {
        if query.loading() {
            ListViewState::Loading
        } else if query.error() {
            ListViewState::Error
        } else if filter.is_empty() {
            ListViewState::Empty
        } else {
            ListViewState::Populated(filter.visible().collect())
        }
    }
}

/// What the detail dialog shows
#[derive(Debug, PartialEq)]
pub enum DetailViewState<'a> {
    /// No identifier in the route, nothing is rendered
    Closed,
    Loading,
    Error,
    /// `None` when the API knows no Pokémon for the identifier
    Loaded(Option<&'a PokemonDetails>),
}

impl<'a> DetailViewState<'a> {
    pub fn evaluate(route: &Route, query: &'a PokemonDetailsQuery) -> Self {
        let Some(id) = route.pokemon_id() else {
            return DetailViewState::Closed;
        };

        // the route can move ahead of the query for a frame
        if query.key().and_then(DetailsKey::id) != Some(id) || query.loading() {
            DetailViewState::Loading
        } else if query.error() {
            DetailViewState::Error
        } else {
            DetailViewState::Loaded(query.details())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{DetailViewState, ListViewState};
    use crate::{
        app::{route::Route, utils::SearchFilter},
        core::{
            api::{
                PokemonApi,
                testing::{FakeClient, bulbasaur, charmander, charmander_details, key_for},
            },
            graphql::QueryError,
            pokemon_queries::{PokemonDetailsQuery, PokemonListQuery},
        },
        entities::PokemonId,
    };

    fn list_client() -> FakeClient {
        FakeClient::default().respond(Ok(serde_json::json!({
            "pokemons": [bulbasaur(), charmander()]
        })))
    }

    #[tokio::test]
    async fn loading_wins_over_everything() {
        let api = PokemonApi::new(list_client());
        let mut query = PokemonListQuery::new(151);
        let mut filter = SearchFilter::default();
        filter.set_search("fire".to_string());

        let fetch = query.fetch(&api);
        assert_eq!(ListViewState::evaluate(&query, &filter), ListViewState::Loading);

        query.resolve(fetch.await);
        filter.set_items(query.items());
        let ListViewState::Populated(items) = ListViewState::evaluate(&query, &filter) else {
            panic!("expected populated list");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Charmander");

        let _refetch = query.fetch(&api);
        assert_eq!(ListViewState::evaluate(&query, &filter), ListViewState::Loading);
    }

    #[tokio::test]
    async fn error_wins_over_previous_items() {
        let api = PokemonApi::new(list_client().respond(Err(QueryError::MissingData)));
        let mut query = PokemonListQuery::new(151);
        let mut filter = SearchFilter::default();

        let fetch = query.fetch(&api);
        query.resolve(fetch.await);
        filter.set_items(query.items());
        assert!(matches!(
            ListViewState::evaluate(&query, &filter),
            ListViewState::Populated(_)
        ));

        let fetch = query.fetch(&api);
        query.resolve(fetch.await);
        filter.set_items(query.items());
        assert_eq!(ListViewState::evaluate(&query, &filter), ListViewState::Error);
    }

    #[tokio::test]
    async fn no_match_is_empty() {
        let api = PokemonApi::new(list_client());
        let mut query = PokemonListQuery::new(151);
        let mut filter = SearchFilter::default();

        let fetch = query.fetch(&api);
        query.resolve(fetch.await);
        filter.set_items(query.items());
        filter.set_search("mew".to_string());

        assert_eq!(ListViewState::evaluate(&query, &filter), ListViewState::Empty);
    }

    #[test]
    fn list_route_keeps_dialog_closed() {
        let query = PokemonDetailsQuery::default();
        assert_eq!(
            DetailViewState::evaluate(&Route::List, &query),
            DetailViewState::Closed
        );
    }

    #[tokio::test]
    async fn dialog_goes_loading_then_loaded() {
        let client = FakeClient::default()
            .respond(Ok(serde_json::json!({ "pokemon": charmander_details() })));
        let api = PokemonApi::new(client);
        let route = Route::Details(PokemonId::from("UG9rZW1vbjowMDQ="));
        let mut query = PokemonDetailsQuery::default();

        assert_eq!(
            DetailViewState::evaluate(&route, &query),
            DetailViewState::Loading
        );

        let fetch = query
            .select(Some(key_for("UG9rZW1vbjowMDQ=")), &api)
            .expect("fetch issued");
        assert_eq!(
            DetailViewState::evaluate(&route, &query),
            DetailViewState::Loading
        );

        query.resolve(fetch.await);
        let DetailViewState::Loaded(Some(details)) = DetailViewState::evaluate(&route, &query)
        else {
            panic!("expected loaded details");
        };
        assert_eq!(details.summary.name, "Charmander");
    }

    #[tokio::test]
    async fn dialog_shows_error_when_details_fail() {
        let client = FakeClient::default().respond(Err(QueryError::MissingData));
        let api = PokemonApi::new(client);
        let mut query = PokemonDetailsQuery::default();

        let fetch = query
            .select(Some(key_for("004")), &api)
            .expect("fetch issued");
        query.resolve(fetch.await);

        assert_eq!(
            DetailViewState::evaluate(&Route::Details(PokemonId::from("004")), &query),
            DetailViewState::Error
        );
    }

    #[test]
    fn empty_items_arc_is_shared() {
        let query = PokemonListQuery::new(151);
        assert!(Arc::ptr_eq(query.items(), query.items()));
    }
}
