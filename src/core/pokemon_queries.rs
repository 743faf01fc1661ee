// SPDX-License-Identifier: GPL-3.0-only

//! The list and detail queries the views read from.
//!
//! Each one owns a [`QueryState`] and hands out the future that performs the
//! fetch, so the caller decides how it gets scheduled.

use std::{future::Future, sync::Arc};

use crate::{
    core::{
        api::{DetailsKey, PokemonApi},
        graphql::QueryClient,
        query::{QueryState, Response},
    },
    entities::{PokemonDetails, PokemonSummary},
};

pub type ListResponse = Response<Arc<[PokemonSummary]>>;
pub type DetailsResponse = Response<Option<PokemonDetails>>;

/// The full collection, loaded in one go
#[derive(Debug)]
pub struct PokemonListQuery {
    first: u32,
    state: QueryState<Arc<[PokemonSummary]>>,
    empty: Arc<[PokemonSummary]>,
}

impl PokemonListQuery {
    pub fn new(first: u32) -> Self {
        PokemonListQuery {
            first,
            state: QueryState::default(),
            empty: Arc::from(Vec::new()),
        }
    }

    pub fn set_limit(&mut self, first: u32) {
        self.first = first;
    }

    /// Starts a new list request and returns the future that resolves it
    pub fn fetch<C: QueryClient>(
        &mut self,
        api: &PokemonApi<C>,
    ) -> impl Future<Output = ListResponse> + Send + use<C> {
        let request = self.state.begin();
        let api = api.clone();
        let first = self.first;

        tracing::info!(first, "fetching Pokémon list");

        async move {
            ListResponse {
                request,
                result: api.fetch_all(first).await.map(Arc::from).map_err(Arc::new),
            }
        }
    }

    pub fn resolve(&mut self, response: ListResponse) -> bool {
        self.state.settle(response)
    }

    /// Empty until the first successful response, then the whole result
    pub fn items(&self) -> &Arc<[PokemonSummary]> {
        self.state.data().unwrap_or(&self.empty)
    }

    pub fn loading(&self) -> bool {
        self.state.loading()
    }

    pub fn error(&self) -> bool {
        self.state.error()
    }
}

/// Outcome of comparing a requested key against what the detail query already holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPlan {
    /// Nothing selected, no query at all
    Skip,
    /// Same key already in flight or settled
    Reuse,
    Fetch(DetailsKey),
}

/// A single Pokémon, selected by [`DetailsKey`]
#[derive(Debug, Default)]
pub struct PokemonDetailsQuery {
    key: Option<DetailsKey>,
    state: QueryState<Option<PokemonDetails>>,
}

impl PokemonDetailsQuery {
    pub fn plan(&self, key: Option<&DetailsKey>) -> FetchPlan {
        match key {
            None => FetchPlan::Skip,
            Some(key) if self.key.as_ref() == Some(key) => FetchPlan::Reuse,
            Some(key) => FetchPlan::Fetch(key.clone()),
        }
    }

    /// Points the query at `key`, returning the fetch to run if one is needed
    pub fn select<C: QueryClient>(
        &mut self,
        key: Option<DetailsKey>,
        api: &PokemonApi<C>,
    ) -> Option<impl Future<Output = DetailsResponse> + Send + use<C>> {
        let key = match self.plan(key.as_ref()) {
            FetchPlan::Skip => {
                self.clear();
                return None;
            }
            FetchPlan::Reuse => return None,
            FetchPlan::Fetch(key) => key,
        };

        self.state.reset();
        let request = self.state.begin();
        self.key = Some(key.clone());
        let api = api.clone();

        tracing::info!(?key, "fetching Pokémon details");

        Some(async move {
            DetailsResponse {
                request,
                result: api.fetch_details(&key).await.map_err(Arc::new),
            }
        })
    }

    /// Forgets the key and whatever was loaded for it
    pub fn clear(&mut self) {
        self.key = None;
        self.state.reset();
    }

    pub fn resolve(&mut self, response: DetailsResponse) -> bool {
        self.state.settle(response)
    }

    pub fn key(&self) -> Option<&DetailsKey> {
        self.key.as_ref()
    }

    pub fn details(&self) -> Option<&PokemonDetails> {
        self.state.data().and_then(Option::as_ref)
    }

    pub fn loading(&self) -> bool {
        self.state.loading()
    }

    pub fn error(&self) -> bool {
        self.state.error()
    }
}
