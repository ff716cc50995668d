use clap::{ArgAction, Parser, Subcommand};
use smart_thumbs::config::{self, Overrides};
use smart_thumbs::{output, process};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

fn version_string() -> &'static str {
    let on_tag = env!("THUMBS_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("THUMBS_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "smart-thumbs")]
#[command(about = "Batch content-aware thumbnail generator")]
#[command(long_about = "\
Batch content-aware thumbnail generator

Walks the input directory and writes one JPEG thumbnail per image into the
output directory. Each thumbnail is cut from the most interesting region of
the source (edges, skin tones, saturated colour) at the target aspect ratio,
then scaled to exactly WIDTHxHEIGHT with a Lanczos3 filter.

  input/                      output/
  ├── config.toml             (optional, see gen-config)
  ├── photo.png          →    ├── photo_thumb.jpg
  ├── notes.txt               │   (not an image: skipped)
  └── trips/
      └── beach.jpg      →    └── beach_thumb.jpg

Files are recognized by content, not extension. GIFs use their first frame.
Sources smaller than the target are an error: thumbnails are never upscaled.

Run 'smart-thumbs gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
#[command(disable_help_flag = true)]
struct Cli {
    /// Thumbnail width in px [default: 350]
    #[arg(short = 'w', long = "width", value_name = "PX")]
    width: Option<u32>,

    /// Thumbnail height in px [default: 197]
    #[arg(short = 'h', long = "height", value_name = "PX")]
    height: Option<u32>,

    /// Input directory [default: ./input]
    #[arg(long = "in", value_name = "DIR")]
    input: Option<PathBuf>,

    /// Output directory, created if missing [default: ./output]
    #[arg(long = "out", value_name = "DIR")]
    output: Option<PathBuf>,

    /// Report failing files and continue; still exits non-zero at the end
    #[arg(long)]
    keep_going: bool,

    /// Print help (-h is --height)
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a stock config.toml with all options documented
    GenConfig,
}

/// Rewrite single-dash long flags (`-in dir`, `-out=dir`) to their `--` form.
fn normalize_go_flags(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    const LONG_FLAGS: [&str; 2] = ["-in", "-out"];

    let mut past_separator = false;
    args.into_iter()
        .map(|arg| {
            if past_separator {
                return arg;
            }
            match arg.to_str() {
                Some("--") => {
                    past_separator = true;
                    arg
                }
                Some(s)
                    if LONG_FLAGS.iter().any(|flag| {
                        s == *flag || s.strip_prefix(flag).is_some_and(|r| r.starts_with('='))
                    }) =>
                {
                    OsString::from(format!("-{s}"))
                }
                _ => arg,
            }
        })
        .collect()
}

fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_go_flags(std::env::args_os()));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_error(err.as_ref());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(Command::GenConfig) = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let cwd = std::env::current_dir()?;
    let input = cli.input.unwrap_or_else(|| cwd.join("input"));
    let output_dir = cli.output.unwrap_or_else(|| cwd.join("output"));

    let thumbs_config = config::load_config(&input)?.apply_overrides(&Overrides {
        width: cli.width,
        height: cli.height,
        keep_going: cli.keep_going,
    })?;
    let process_config = process::ProcessConfig::new(&thumbs_config, input, output_dir);

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::print_process_event(&event);
        }
    });
    let result = process::process(&process_config, Some(tx));
    printer.join().map_err(|_| "output thread panicked")?;
    result?;

    Ok(())
}
