// SPDX-License-Identifier: GPL-3.0-only

mod pokemon_details;
mod pokemon_summary;

pub use pokemon_details::PokemonDetails;
pub use pokemon_summary::{PokemonId, PokemonSummary};
