// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: (C) 2025 Cranky Kernel <crankykernel@proton.me>

pub mod api;
pub mod catalog;
pub mod config;
pub mod models;
pub mod tui;

pub use api::TvMazeClient;
pub use catalog::Catalog;
pub use config::Config;
pub use tui::run_tui;
