//! Command line previewer for NIfTI volumes and images.

use std::io;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;
use env_logger::Env;
use log::debug;

use niicat::render::DEFAULT_DPI;
use niicat::{Axis, Backend, Input, Preview, Resolution, Result, Selection};

/// Generate previews of NIfTI images and png/jpeg images on the terminal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The NIfTI volume or image file to show
    input: PathBuf,

    /// Resolution for plotting
    #[arg(
        short,
        long,
        value_name = "N",
        default_value_t = DEFAULT_DPI,
        env = "NIICAT_DPI",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    dpi: u32,

    /// Slice number to show (0-indexed, default: middle slice)
    #[arg(short, long, value_name = "N")]
    slice: Option<usize>,

    /// Volume number to show for 4D data (0-indexed, default: middle volume)
    #[arg(short, long, value_name = "N", conflicts_with = "movie")]
    volume: Option<usize>,

    /// Axis to slice along: sagittal, coronal or axial
    #[arg(short, long, value_name = "AXIS", default_value_t = Axis::Axial)]
    axis: Axis,

    /// Display all volumes of a 4D image sequentially as a movie
    #[arg(long)]
    movie: bool,

    /// Pause between movie frames, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 100)]
    delay: u64,

    /// Terminal graphics backend: imgcat, img2sixel or sixel
    #[arg(
        short,
        long,
        value_name = "BACKEND",
        default_value_t = Backend::Imgcat,
        env = "NIICAT_BACKEND"
    )]
    backend: Backend,

    /// Program to run instead of the backend's default helper
    #[arg(long, value_name = "PROGRAM", env = "NIICAT_HELPER")]
    helper: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    debug!("{:?}", args);

    if let Err(e) = run(&args) {
        eprintln!("ERROR: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let input = Input::open(&args.input)?;
    let mut preview = Preview::new(args.axis)
        .selection(Selection {
            slice: args.slice,
            volume: args.volume,
        })
        .resolution(Resolution::new(args.dpi)?);
    if args.movie {
        preview = preview.movie(Duration::from_millis(args.delay));
    }
    let open_sink = || args.backend.sink(args.helper.as_deref());
    let shown = preview.run(&input, open_sink, io::stdout())?;
    debug!("{} frame(s) shown", shown);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(&["niicat", "brain.nii.gz"]).unwrap();
        assert_eq!(args.input, PathBuf::from("brain.nii.gz"));
        assert_eq!(args.slice, None);
        assert_eq!(args.volume, None);
        assert_eq!(args.axis, Axis::Axial);
        assert_eq!(args.delay, 100);
        assert!(!args.movie);
    }

    #[test]
    fn flags() {
        let args = Args::try_parse_from(&[
            "niicat", "-d", "120", "-s", "3", "-v", "1", "-a", "coronal", "-b", "sixel", "bold.nii",
        ])
        .unwrap();
        assert_eq!(args.dpi, 120);
        assert_eq!(args.slice, Some(3));
        assert_eq!(args.volume, Some(1));
        assert_eq!(args.axis, Axis::Coronal);
        assert_eq!(args.backend, Backend::Sixel);
    }

    #[test]
    fn rejects_bad_combinations() {
        assert!(Args::try_parse_from(&["niicat", "--movie", "-v", "2", "bold.nii"]).is_err());
        assert!(Args::try_parse_from(&["niicat", "--dpi", "0", "bold.nii"]).is_err());
        assert!(Args::try_parse_from(&["niicat", "--axis", "oblique", "bold.nii"]).is_err());
        assert!(Args::try_parse_from(&["niicat", "--backend", "kitty", "bold.nii"]).is_err());
    }
}
