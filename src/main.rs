use anyhow::{Context, Result};
use clap::Parser;
use shot_squeeze::cli::{Args, Commands, LayoutArgs};
use shot_squeeze::logger::{self, Verbosity};
use shot_squeeze::{
    compress_screenshots, get_image_info, plan_batch, print_plan, CompressionOptions,
    EmptySourcePolicy, PipelineConfig,
};

fn main() {
    let args = Args::parse();
    logger::set_verbosity(Verbosity::from_flags(args.quiet, args.verbose));

    if let Err(e) = run(args) {
        shot_squeeze::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Commands::Run {
            layout,
            allow_empty,
        } => {
            let policy = if allow_empty {
                EmptySourcePolicy::Skip
            } else {
                EmptySourcePolicy::Fail
            };
            let config = build_config(layout)?.with_empty_source(policy);
            compress_screenshots(&config)
                .with_context(|| format!("compressing {:?}", config.source_dir))?;
        }
        Commands::Plan { layout } => {
            let config = build_config(layout)?;
            let plan = plan_batch(&config)?;
            print_plan(&plan);
        }
        Commands::Info { input, scale } => {
            let options = CompressionOptions::new(None, scale)?;
            get_image_info(&input, &options)?;
        }
    }

    Ok(())
}

fn build_config(layout: LayoutArgs) -> Result<PipelineConfig> {
    let options = CompressionOptions::new(layout.quality, layout.scale)?;
    let mut config = PipelineConfig::new(layout.source).with_options(options);
    if let Some(staging) = layout.staging {
        config = config.with_staging_dir(staging);
    }
    if let Some(thumbnails) = layout.thumbnails {
        config = config.with_thumbnails_dir(thumbnails);
    }
    Ok(config)
}
