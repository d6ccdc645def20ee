use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "shot-squeeze",
    about = "Batch-compress JPEG screenshots and generate thumbnails",
    long_about = "shot-squeeze recompresses every .jpg file in a screenshots directory, writes a \
                  scaled-down thumbnail for each one, and then replaces the directory with the \
                  recompressed copies. Anything in the directory that is not a .jpg file is removed \
                  with it; run `plan` first to see what that would be.",
    version,
    after_help = "EXAMPLES:\n  \
    shot-squeeze plan ./assets/screenshots\n  \
    shot-squeeze run ./assets/screenshots\n  \
    shot-squeeze run ./shots --staging /tmp/_shots --thumbs ./thumbs -Q 70 -s 0.25\n  \
    shot-squeeze info ./assets/screenshots/home.jpg"
)]
pub struct Args {
    #[arg(short = 'q', long, global = true, help = "Only print errors")]
    pub quiet: bool,

    #[arg(short = 'v', long, global = true, help = "Print per-step details")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args, Debug, Clone)]
pub struct LayoutArgs {
    #[arg(help = "Directory holding the original screenshots")]
    pub source: PathBuf,

    #[arg(
        long,
        value_name = "DIR",
        help = "Staging directory (default: sibling `_<source-name>`)",
        long_help = "Directory the recompressed full-size images are written to before they \
                     replace the source directory. Must be absent or empty, and must not \
                     be inside the source directory."
    )]
    pub staging: Option<PathBuf>,

    #[arg(
        long = "thumbs",
        value_name = "DIR",
        help = "Thumbnails directory (default: sibling `thumbs`)"
    )]
    pub thumbnails: Option<PathBuf>,

    #[arg(
        short = 'Q',
        long,
        help = "JPEG quality (1-100, default: 60)",
        long_help = "JPEG quality from 1 (smallest files) to 100 (best fidelity). \
                     Applied to both the full-size copies and the thumbnails."
    )]
    pub quality: Option<u8>,

    #[arg(
        short = 's',
        long,
        help = "Thumbnail scale factor (0-1, default: 0.3)",
        long_help = "Both sides of each thumbnail are the original sides times this factor, \
                     rounded down."
    )]
    pub scale: Option<f64>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Compress screenshots, write thumbnails, and replace the source directory",
        long_about = "Recompress every .jpg in SOURCE into the staging directory, write a thumbnail \
                      of each into the thumbnails directory, then swap the staging directory into \
                      SOURCE's place. Stops at the first failure; SOURCE is only replaced once every \
                      image has been staged. Running it twice recompresses already compressed images."
    )]
    Run {
        #[command(flatten)]
        layout: LayoutArgs,

        #[arg(
            long,
            help = "Succeed without changes when SOURCE has no .jpg files",
            long_help = "By default a source directory without any .jpg files is an error. \
                         With this flag the run succeeds and leaves SOURCE untouched."
        )]
        allow_empty: bool,
    },

    #[command(about = "Show what `run` would process and what it would delete, without writing")]
    Plan {
        #[command(flatten)]
        layout: LayoutArgs,
    },

    #[command(
        about = "Display image information and the thumbnail size a run would produce",
        long_about = "Decode a single image and print its dimensions, color type, and file size, \
                      along with the thumbnail dimensions for the given scale."
    )]
    Info {
        #[arg(help = "Image file path to analyze")]
        input: PathBuf,

        #[arg(short = 's', long, help = "Thumbnail scale factor (0-1, default: 0.3)")]
        scale: Option<f64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_run_with_layout() {
        let args = Args::parse_from([
            "shot-squeeze",
            "run",
            "shots",
            "--staging",
            "stage",
            "--thumbs",
            "th",
            "-Q",
            "70",
            "-s",
            "0.5",
            "--allow-empty",
        ]);

        match args.command {
            Commands::Run {
                layout,
                allow_empty,
            } => {
                assert_eq!(layout.source, PathBuf::from("shots"));
                assert_eq!(layout.staging, Some(PathBuf::from("stage")));
                assert_eq!(layout.thumbnails, Some(PathBuf::from("th")));
                assert_eq!(layout.quality, Some(70));
                assert_eq!(layout.scale, Some(0.5));
                assert!(allow_empty);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_global_quiet_after_subcommand() {
        let args = Args::parse_from(["shot-squeeze", "plan", "shots", "--quiet"]);
        assert!(args.quiet);
        assert!(!args.verbose);
    }
}
