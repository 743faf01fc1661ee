// SPDX-License-Identifier: GPL-3.0-only

use crate::entities::PokemonId;

/// Where the user currently is. The detail route overlays the list, it never replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    List,
    Details(PokemonId),
}

impl Route {
    pub fn pokemon_id(&self) -> Option<&PokemonId> {
        match self {
            Route::List => None,
            Route::Details(id) => Some(id),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::List => write!(f, "/pokemon"),
            Route::Details(id) => write!(f, "/pokemon/{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Route;
    use crate::entities::PokemonId;

    #[test]
    fn only_detail_route_carries_an_identifier() {
        assert_eq!(Route::default(), Route::List);
        assert!(Route::List.pokemon_id().is_none());
        assert_eq!(
            Route::Details(PokemonId::from("004")).pokemon_id(),
            Some(&PokemonId::from("004"))
        );
    }

    #[test]
    fn routes_render_as_paths() {
        assert_eq!(Route::List.to_string(), "/pokemon");
        assert_eq!(Route::Details(PokemonId::from("004")).to_string(), "/pokemon/004");
    }
}
