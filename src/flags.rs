// SPDX-License-Identifier: GPL-3.0-only

use cosmic::cosmic_config;

use crate::config::GraphDexConfig;

/// Flags given to our COSMIC application to use in it's "init" function.
#[derive(Clone, Debug)]
pub struct Flags {
    pub config_handler: Option<cosmic_config::Config>,
    pub config: GraphDexConfig,
}

pub fn flags() -> Flags {
    let config_handler = GraphDexConfig::config_handler();
    let config = GraphDexConfig::config(config_handler.as_ref());

    Flags {
        config_handler,
        config,
    }
}
