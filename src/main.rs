use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;
use tilecraft::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use tilecraft::{Config, Dimension, lesson};

/// 2D rendering lessons: textures, tiled backgrounds, sprite clips and text.
#[derive(Debug, Parser)]
#[command(name = "tilecraft", version)]
struct Cli {
    /// Lesson to run
    #[arg(value_parser = clap::value_parser!(u8).range(1..=i64::from(lesson::LESSON_COUNT)))]
    lesson: u8,

    /// Resource directory [default: res/ beside the executable's bin/]
    #[arg(long)]
    res_dir: Option<PathBuf>,

    /// Window width in pixels
    #[arg(long, default_value_t = SCREEN_WIDTH, value_parser = clap::value_parser!(i32).range(1..))]
    width: i32,

    /// Window height in pixels
    #[arg(long, default_value_t = SCREEN_HEIGHT, value_parser = clap::value_parser!(i32).range(1..))]
    height: i32,
}

fn run(cli: Cli) -> tilecraft::Result<()> {
    let config = match cli.res_dir {
        Some(res_dir) => Config::new(res_dir),
        None => Config::from_executable()?,
    }
    .with_screen(Dimension::new(cli.width, cli.height));

    let lesson = lesson::by_number(cli.lesson)?;
    tilecraft::run(config, lesson)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
