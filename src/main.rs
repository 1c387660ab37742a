#[macro_use]
extern crate derive_more;
#[macro_use]
extern crate lazy_static;

use std::path::PathBuf;
use std::{env, process};

use ggez::conf::{WindowMode, WindowSetup};
use ggez::event::run;
use ggez::ContextBuilder;
use tracing_subscriber::EnvFilter;

use crate::app::palette::Palette;
use crate::app::prefs::Prefs;
use crate::app::App;
use crate::error::{Error, ErrorConversion, Result};

mod app;
mod basic;
mod chain;
mod color;
mod error;
mod rendering;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = start() {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn start() -> Result {
    let wm = WindowMode::default().dimensions(800., 600.).resizable(true);
    let ws = WindowSetup::default().title("Snake Skeleton").vsync(true);

    let mut builder = ContextBuilder::new("snake_skeleton", "gorilskij")
        .window_mode(wm)
        .window_setup(ws);
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        builder = builder.add_resource_path(PathBuf::from(manifest_dir).join("resources"));
    }

    let (ctx, event_loop) = builder
        .build()
        .map_err(Error::from)
        .with_trace_step("main::start")?;

    let app = App::new(Prefs::default(), Palette::default(), &ctx)?;
    run(ctx, event_loop, app)
}
