// SPDX-License-Identifier: GPL-3.0-only

use std::sync::Arc;

use crate::entities::PokemonSummary;

/// A search string after trimming and lower-casing; never empty
#[derive(Debug, Clone, PartialEq, Eq)]
struct Needle(String);

impl Needle {
    fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim().to_lowercase();
        (!needle.is_empty()).then_some(Needle(needle))
    }

    /// Name and types are compared lower-cased, the number as raw text
    fn matches(&self, pokemon: &PokemonSummary) -> bool {
        pokemon.name.to_lowercase().contains(&self.0)
            || pokemon.number.contains(&self.0)
            || pokemon
                .types
                .iter()
                .any(|t| t.to_lowercase().contains(&self.0))
    }
}

/// Keeps the Pokémon matching `search`, in their original order.
///
/// A search that is blank after trimming keeps everything.
pub fn filter_pokemon<'a, I>(items: I, search: &str) -> Vec<&'a PokemonSummary>
where
    I: IntoIterator<Item = &'a PokemonSummary>,
{
    match Needle::parse(search) {
        Some(needle) => items.into_iter().filter(|p| needle.matches(p)).collect(),
        None => items.into_iter().collect(),
    }
}

/// The search box state, memoized on (list snapshot, search text).
#[derive(Debug)]
pub struct SearchFilter {
    items: Arc<[PokemonSummary]>,
    search: String,
    visible: Vec<PokemonSummary>,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            items: Arc::from(Vec::new()),
            search: String::new(),
            visible: Vec::new(),
        }
    }
}

impl SearchFilter {
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Recomputes only when a different snapshot is handed in
    pub fn set_items(&mut self, items: &Arc<[PokemonSummary]>) {
        if Arc::ptr_eq(&self.items, items) {
            return;
        }

        self.items = Arc::clone(items);
        self.refresh();
    }

    pub fn set_search(&mut self, search: String) {
        if self.search == search {
            return;
        }

        self.search = search;
        self.refresh();
    }

    pub fn visible(&self) -> std::slice::Iter<'_, PokemonSummary> {
        self.visible.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    fn refresh(&mut self) {
        self.visible = filter_pokemon(self.items.iter(), &self.search)
            .into_iter()
            .cloned()
            .collect();
    }
}
