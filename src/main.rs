//! `badgegen`: writes every badge in a catalog as a PNG.
//!
//! Usage:
//!   badgegen --out-dir icons
//!   badgegen --catalog my-icons.json --font /path/to/Bold.ttf --collect-failures
//!   badgegen --dump-catalog > catalog.json

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use badge_renderer::{BadgeCatalog, BadgeRenderer, BatchDriver, FailurePolicy};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Render circular line and station badges to PNG", version)]
struct Args {
    /// Directory the PNG files are written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Bold TrueType/OpenType face. Defaults to $BADGEGEN_FONT, then common system fonts.
    #[arg(long)]
    font: Option<PathBuf>,

    /// JSON catalog to render instead of the built-in icon set.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Keep going after a failed badge and report every failure at the end.
    #[arg(long)]
    collect_failures: bool,

    /// Print the catalog as JSON and exit without rendering.
    #[arg(long)]
    dump_catalog: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => BadgeCatalog::from_path(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => BadgeCatalog::builtin(),
    };

    if args.dump_catalog {
        println!("{}", catalog.to_json_pretty()?);
        return Ok(ExitCode::SUCCESS);
    }

    let specs = catalog.expand(&args.out_dir)?;
    let renderer = BadgeRenderer::with_system_font(args.font.as_deref()).context("loading font")?;

    let policy = if args.collect_failures {
        FailurePolicy::CollectAll
    } else {
        FailurePolicy::FailFast
    };
    let report = BatchDriver::new(renderer).with_policy(policy).run(&specs)?;

    for failure in &report.failures {
        eprintln!("failed {}: {}", failure.path.display(), failure.error);
    }
    if report.is_success() {
        println!(
            "Generated {} badge(s) in {}",
            report.written.len(),
            args.out_dir.display()
        );
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
