// SPDX-License-Identifier: GPL-3.0-only

pub mod api;
pub mod graphql;
pub mod image_cache;
pub mod pokemon_queries;
pub mod query;
pub mod settings;
