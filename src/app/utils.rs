// SPDX-License-Identifier: GPL-3.0-only

mod filters;

pub use filters::SearchFilter;
