// SPDX-License-Identifier: GPL-3.0-only

use cosmic::{
    cosmic_config::{self, CosmicConfigEntry, cosmic_config_derive::CosmicConfigEntry},
    theme,
};
use serde::{Deserialize, Serialize};

pub const APP_ID: &str = "dev.graphdex.GraphDex";

pub const DEFAULT_ENDPOINT: &str = "https://graphql-pokemon2.vercel.app";

#[derive(Debug, Clone, CosmicConfigEntry, PartialEq)]
#[version = 1]
pub struct GraphDexConfig {
    pub app_theme: AppTheme,
    /// GraphQL endpoint exposing the `pokemons` and `pokemon` queries
    pub endpoint: String,
    /// Value sent as `first` when loading the list
    pub list_limit: u32,
    pub pokemon_per_row: usize,
}

impl Default for GraphDexConfig {
    fn default() -> Self {
        Self {
            app_theme: Default::default(),
            endpoint: String::from(DEFAULT_ENDPOINT),
            list_limit: 151,
            pokemon_per_row: 4,
        }
    }
}

impl GraphDexConfig {
    pub fn config_handler() -> Option<cosmic_config::Config> {
        match cosmic_config::Config::new(APP_ID, Self::VERSION) {
            Ok(handler) => Some(handler),
            Err(err) => {
                tracing::error!(error = %err, "failed to open config");
                None
            }
        }
    }

    /// Reads the stored config, falling back to defaults field by field
    pub fn config(handler: Option<&cosmic_config::Config>) -> GraphDexConfig {
        let Some(handler) = handler else {
            return GraphDexConfig::default();
        };

        match GraphDexConfig::get_entry(handler) {
            Ok(config) => config,
            Err((errors, config)) => {
                for err in errors {
                    tracing::warn!(error = %err, "invalid config entry, using default");
                }
                config
            }
        }
    }

    /// Cards-per-row, never below one
    pub fn columns(&self) -> usize {
        self.pokemon_per_row.max(1)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum AppTheme {
    Dark,
    Light,
    #[default]
    System,
}

impl AppTheme {
    /// Same order as the settings dropdown
    pub const ALL: [AppTheme; 3] = [AppTheme::System, AppTheme::Dark, AppTheme::Light];

    pub fn theme(&self) -> theme::Theme {
        match self {
            Self::Dark => theme::Theme::dark(),
            Self::Light => theme::Theme::light(),
            Self::System => theme::system_preference(),
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or_default()
    }
}
