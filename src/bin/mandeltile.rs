extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate image;
extern crate log;
extern crate mandeltile;
extern crate num;

use clap::{App, AppSettings, Arg, ArgMatches};
use image::ColorType;
use log::info;
use mandeltile::preview::write_preview;
use mandeltile::{render, Canvas, FractalParameters, Palette};
use num::Complex;
use std::io;
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_number<T: FromStr>(s: &str, err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(err.to_string()),
    }
}

const X: &str = "x";
const Y: &str = "y";
const RADIUS: &str = "radius";
const SIZE: &str = "size";
const DEPTH: &str = "depth";
const EXPOSURE: &str = "exposure";
const PALETTE: &str = "palette";
const OUTPUT: &str = "output";
const PREVIEW: &str = "preview";

// Mirrors the library defaults; clap wants them as borrowed strings.
const DEFAULT_SIZE: &str = "200x200";
const DEFAULT_DEPTH: &str = "128";
const DEFAULT_EXPOSURE: &str = "4";
const DEFAULT_OUTPUT: &str = "mandel.png";

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandeltile")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tiled, multi-threaded Mandelbrot renderer")
        .setting(AppSettings::AllowNegativeNumbers)
        .arg(
            Arg::with_name(X)
                .required(true)
                .index(1)
                .validator(|s| validate_number::<f64>(&s, "Could not parse the x coordinate"))
                .help("Real part of the centre of the view"),
        )
        .arg(
            Arg::with_name(Y)
                .required(true)
                .index(2)
                .validator(|s| validate_number::<f64>(&s, "Could not parse the y coordinate"))
                .help("Imaginary part of the centre of the view"),
        )
        .arg(
            Arg::with_name(RADIUS)
                .required(true)
                .index(3)
                .validator(|s| validate_number::<f64>(&s, "Could not parse the radius"))
                .help("Width of the (square) view on the complex plane"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value(DEFAULT_SIZE)
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image; each side is rounded up to a power of two"),
        )
        .arg(
            Arg::with_name(DEPTH)
                .long(DEPTH)
                .short("d")
                .takes_value(true)
                .default_value(DEFAULT_DEPTH)
                .validator(|s| validate_number::<u32>(&s, "Could not parse iteration depth"))
                .help("Maximum iterations per pixel"),
        )
        .arg(
            Arg::with_name(EXPOSURE)
                .long(EXPOSURE)
                .short("e")
                .takes_value(true)
                .default_value(DEFAULT_EXPOSURE)
                .validator(|s| validate_number::<f64>(&s, "Could not parse exposure"))
                .help("Scale applied to the iteration ratio before colouring"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .long(PALETTE)
                .short("p")
                .takes_value(true)
                .possible_values(&["gradient", "hsv"])
                .default_value("gradient")
                .help("Colour source"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value(DEFAULT_OUTPUT)
                .help("Output file; the format follows the extension"),
        )
        .arg(
            Arg::with_name(PREVIEW)
                .long(PREVIEW)
                .help("Print a text preview of the view to stdout"),
        )
        .get_matches()
}

// The validators have already checked every number, so the parses
// below only fail on values clap never hands us.
fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, failure::Error> {
    let raw = matches.value_of(name).unwrap_or_default();
    T::from_str(raw).map_err(|_| failure::format_err!("Could not parse {} from {:?}", name, raw))
}

fn run(matches: &ArgMatches) -> Result<(), failure::Error> {
    let center = Complex::new(value::<f64>(matches, X)?, value::<f64>(matches, Y)?);
    let params = FractalParameters::new(
        center,
        value(matches, RADIUS)?,
        value(matches, DEPTH)?,
        value(matches, EXPOSURE)?,
    )?;

    let size = matches.value_of(SIZE).unwrap_or_default();
    let (width, height) = parse_pair::<usize>(size, 'x')
        .ok_or_else(|| failure::format_err!("Could not parse output image size {:?}", size))?;
    let canvas = Canvas::rounded(width, height)?;
    info!("canvas {}x{}, depth {}", canvas.0, canvas.1, params.depth());

    if matches.is_present(PREVIEW) {
        let stdout = io::stdout();
        write_preview(&params, &mut stdout.lock())?;
    }

    let palette = match matches.value_of(PALETTE) {
        Some("hsv") => Palette::Hsv,
        _ => Palette::default(),
    };

    let frame = render(canvas, &params, &palette)?;
    let output = matches.value_of(OUTPUT).unwrap_or(DEFAULT_OUTPUT);
    image::save_buffer(
        output,
        &frame.to_rgb8(),
        frame.width() as u32,
        frame.height() as u32,
        ColorType::RGB(8),
    )?;
    println!("Saved {}x{} image to {}", frame.width(), frame.height(), output);
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
