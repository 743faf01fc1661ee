// SPDX-License-Identifier: GPL-3.0-only

use cosmic::{
    app::Settings,
    iced::{Limits, Size},
};

pub fn init() -> Settings {
    Settings::default()
        .size_limits(Limits::NONE.min_width(640.0).min_height(360.0))
        .size(Size::new(1200.0, 800.0))
        .debug(false)
}
