//! Command-line front end: encodes one identifier and writes the SVG to a file or stdout.

use std::process::ExitCode;

use barcos::barcode::{Barcode, Framing};
use barcos::helper::{save_svg, to_svg_string, SvgOptions};
use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SymbologyArg {
    Code39,
    Nw7,
}

#[derive(Parser, Debug)]
#[command(name = "barcos")]
#[command(about = "Encode an identifier as a Code 39 or NW-7 barcode in SVG")]
#[command(version)]
struct Cli {
    /// Text to encode
    text: String,

    #[arg(short, long, value_enum, default_value = "nw7")]
    symbology: SymbologyArg,

    /// NW-7 start character (A-D)
    #[arg(long, default_value_t = 'A')]
    start: char,

    /// NW-7 stop character (A-D)
    #[arg(long, default_value_t = 'A')]
    stop: char,

    /// Width of a narrow element in pixels
    #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
    scale: i32,

    /// Barcode height in pixels
    #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
    height: i32,

    #[arg(long, default_value = "white")]
    background: String,

    #[arg(long, default_value = "black")]
    foreground: String,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    dir: String,

    /// Output file name, overwritten if it exists
    #[arg(short, long, default_value = "barcode.svg")]
    output: String,

    /// Print the SVG to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,
}

fn run(cli: &Cli) -> barcos::Result<()> {
    let barcode = match cli.symbology {
        SymbologyArg::Code39 => Barcode::encode_code39(&cli.text, cli.scale, cli.height)?,
        SymbologyArg::Nw7 => Barcode::encode_nw7(
            &cli.text,
            Framing::new(cli.start, cli.stop),
            cli.scale,
            cli.height,
        )?,
    };
    let options = SvgOptions {
        background: cli.background.clone(),
        foreground: cli.foreground.clone(),
    };
    let svg = to_svg_string(&barcode, &options)?;

    if cli.stdout {
        print!("{svg}");
    } else {
        let path = save_svg(&svg, Some(cli.dir.as_str()), Some(cli.output.as_str()))?;
        println!("Saved barcode to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Failed to generate barcode: {err}");
            ExitCode::FAILURE
        }
    }
}
