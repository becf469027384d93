//! rasterflow CLI - stream raw rasters through crop, scale and fit stages.
//!
//! Input is headerless interleaved 8-bit pixel data; the geometry is given on
//! the command line. Rows are pulled one at a time, so memory use stays
//! proportional to a scanline rather than the whole frame.

use clap::{Parser, Subcommand, ValueEnum};
use rasterflow::{
    ColorModelDescriptor, Image, ImageGeometry, Noise, RawReader, ScanlineSource, Solid,
};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// Streaming raster resampling and cropping
#[derive(Parser)]
#[command(name = "rasterflow")]
#[command(author = "rasterflow contributors")]
#[command(version)]
#[command(about = "Crop, scale and fit raw rasters one scanline at a time", long_about = None)]
#[command(after_help = "EXAMPLES:
    rasterflow convert -i frame.raw -o thumb.ppm -w 1920 -H 1080 -n 3 --fit 320x240 -f ppm
    rasterflow convert -i frame.raw -o band.raw -w 640 -H 480 --crop 640,100,0,200
    rasterflow generate -o red.ppm -w 64 -H 64 --color ff0000 -f ppm
    rasterflow generate -o noise.raw -w 64 -H 64 --noise -n 1 --seed 7
    rasterflow info -i frame.raw -w 1920 -H 1080 -n 4

Set RUST_LOG=debug to trace pipeline construction.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a raw image through a pipeline and write the result
    ///
    /// Stages apply in order: crop, scale, fit.
    #[command(visible_alias = "c")]
    Convert {
        /// Input raw pixel file
        #[arg(short, long, help = "Path to raw pixel data file")]
        input: PathBuf,

        /// Output file path
        #[arg(short, long, help = "Path for the output file")]
        output: PathBuf,

        /// Image width in pixels
        #[arg(short, long)]
        width: u32,

        /// Image height in pixels
        #[arg(short = 'H', long)]
        height: u32,

        /// Number of interleaved components (1=gray, 2=gray+alpha, 3=RGB, 4=RGBA)
        #[arg(short = 'n', long, default_value = "1")]
        components: u32,

        /// Crop rectangle as W,H,X,Y
        #[arg(long, value_parser = parse_crop)]
        crop: Option<Crop>,

        /// Scale to exact dimensions WxH
        #[arg(long, value_parser = parse_size)]
        scale: Option<Size>,

        /// Interpolation used by --scale
        #[arg(short, long, default_value = "bilinear", value_enum)]
        method: Method,

        /// Fit inside a WxH box, keeping the aspect ratio
        #[arg(long, value_parser = parse_size)]
        fit: Option<Size>,

        /// Output format: raw (binary pixels) or ppm (PGM/PPM, alpha dropped)
        #[arg(short, long, default_value = "raw", value_enum)]
        format: OutputFormat,
    },

    /// Write a single-colour or random-noise image
    #[command(visible_alias = "g")]
    Generate {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Image width in pixels
        #[arg(short, long)]
        width: u32,

        /// Image height in pixels
        #[arg(short = 'H', long)]
        height: u32,

        /// Pixel colour as hex bytes, one byte per component (e.g. 80, ff0000, ff000080)
        #[arg(long, value_parser = parse_color, required_unless_present = "noise", conflicts_with = "noise")]
        color: Option<Color>,

        /// Fill with uniformly random samples instead of a colour
        #[arg(long)]
        noise: bool,

        /// Number of components for --noise
        #[arg(short = 'n', long, default_value = "3")]
        components: u32,

        /// Seed for --noise; omitted means a fresh random image every run
        #[arg(long, requires = "noise")]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, default_value = "raw", value_enum)]
        format: OutputFormat,
    },

    /// Describe a raw image and check its size against the geometry
    #[command(visible_alias = "i")]
    Info {
        /// Input raw pixel file
        #[arg(short, long, help = "Path to the raw pixel file to inspect")]
        input: PathBuf,

        /// Image width in pixels
        #[arg(short, long)]
        width: u32,

        /// Image height in pixels
        #[arg(short = 'H', long)]
        height: u32,

        /// Number of interleaved components
        #[arg(short = 'n', long, default_value = "1")]
        components: u32,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Raw binary pixel data
    Raw,
    /// Portable GrayMap / PixMap
    Ppm,
}

#[derive(Clone, Debug, ValueEnum)]
enum Method {
    /// Nearest neighbour
    Nearest,
    /// Bilinear interpolation
    Bilinear,
}

#[derive(Clone, Copy, Debug)]
struct Size {
    width: u32,
    height: u32,
}

/// Sample bytes of one pixel.
#[derive(Clone, Debug)]
struct Color(Vec<u8>);

enum Fill {
    Solid(Color),
    Noise { components: u32, seed: Option<u64> },
}

#[derive(Clone, Copy, Debug)]
struct Crop {
    width: u32,
    height: u32,
    x: u32,
    y: u32,
}

fn parse_size(s: &str) -> Result<Size, String> {
    let (width, height) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got {:?}", s))?;
    Ok(Size {
        width: width.trim().parse().map_err(|e| format!("width: {}", e))?,
        height: height.trim().parse().map_err(|e| format!("height: {}", e))?,
    })
}

fn parse_crop(s: &str) -> Result<Crop, String> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("{:?}: {}", s, e))?;
    match values[..] {
        [width, height, x, y] => Ok(Crop {
            width,
            height,
            x,
            y,
        }),
        _ => Err(format!("expected W,H,X,Y, got {:?}", s)),
    }
}

fn parse_color(s: &str) -> Result<Color, String> {
    let hex = s.trim_start_matches('#');
    if hex.is_empty() || hex.len() % 2 != 0 {
        return Err(format!("expected an even number of hex digits, got {:?}", s));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            hex.get(i..i + 2)
                .and_then(|byte| u8::from_str_radix(byte, 16).ok())
                .ok_or_else(|| format!("invalid hex colour {:?}", s))
        })
        .collect::<Result<Vec<u8>, String>>()
        .map(Color)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            width,
            height,
            components,
            crop,
            scale,
            method,
            fit,
            format,
        } => convert_image(
            &input,
            &output,
            ImageGeometry {
                width,
                height,
                components,
            },
            crop,
            scale,
            &method,
            fit,
            &format,
        ),
        Commands::Generate {
            output,
            width,
            height,
            color,
            noise,
            components,
            seed,
            format,
        } => {
            let fill = match color {
                Some(color) if !noise => Fill::Solid(color),
                _ => Fill::Noise { components, seed },
            };
            generate_image(&output, width, height, fill, &format)
        }
        Commands::Info {
            input,
            width,
            height,
            components,
        } => show_info(
            &input,
            ImageGeometry {
                width,
                height,
                components,
            },
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn convert_image(
    input: &PathBuf,
    output: &PathBuf,
    geometry: ImageGeometry,
    crop: Option<Crop>,
    scale: Option<Size>,
    method: &Method,
    fit: Option<Size>,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let reader = RawReader::new(BufReader::new(File::open(input)?), geometry)?;
    let mut image = Image::new(reader);

    if let Some(c) = crop {
        image = image.crop(c.width, c.height, c.x, c.y)?;
    }
    if let Some(s) = scale {
        image = match method {
            Method::Nearest => image.scale_nearest(s.width, s.height)?,
            Method::Bilinear => image.scale_bilinear(s.width, s.height)?,
        };
    }
    if let Some(f) = fit {
        image = image.fit(f.width, f.height)?;
    }

    let (width, height, components) = (image.width(), image.height(), image.components());
    let written = write_image(image, output, format)?;
    println!(
        "✓ Converted {}x{} to {}x{} ({} components, {} bytes) at {:?}",
        geometry.width, geometry.height, width, height, components, written, output
    );
    Ok(())
}

fn generate_image(
    output: &PathBuf,
    width: u32,
    height: u32,
    fill: Fill,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let image = match fill {
        Fill::Solid(color) => Image::new(Solid::new(width, height, color.0)?),
        Fill::Noise { components, seed } => {
            Image::new(Noise::new(width, height, components, seed)?)
        }
    };
    let components = image.components();
    let written = write_image(image, output, format)?;
    println!(
        "✓ Generated {}x{} image ({} components, {} bytes) at {:?}",
        width, height, components, written, output
    );
    Ok(())
}

fn write_image(
    image: Image,
    output: &PathBuf,
    format: &OutputFormat,
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut writer = BufWriter::new(File::create(output)?);
    let written = match format {
        OutputFormat::Raw => image.write_raw(&mut writer)?,
        OutputFormat::Ppm => image.write_pnm(&mut writer)?,
    };
    Ok(written)
}

fn show_info(input: &PathBuf, geometry: ImageGeometry) -> Result<(), Box<dyn std::error::Error>> {
    geometry.validate()?;
    let frame = geometry.frame_len()?;
    let size = fs::metadata(input)?.len();

    println!("File: {:?}", input);
    println!("Size: {} bytes", size);
    println!();
    println!("  Dimensions: {}x{}", geometry.width, geometry.height);
    println!("  Components: {}", geometry.components);
    println!("  Scanline:   {} bytes", geometry.scanline_len());
    println!("  Frame:      {} bytes", frame);
    match ColorModelDescriptor::new(geometry) {
        Ok(descriptor) => {
            println!("  Layout:     {:?}", descriptor.layout);
            println!("  Color:      {:?}", descriptor.color_model);
            println!(
                "  Alpha:      {}",
                if descriptor.has_alpha { "Yes" } else { "No" }
            );
        }
        Err(e) => println!("  Color:      Unknown ({})", e),
    }

    let frame = frame as u64;
    if size < frame {
        println!();
        println!(
            "  Warning: file holds {} complete rows of {}",
            size / geometry.scanline_len() as u64,
            geometry.height
        );
    } else if size > frame {
        println!();
        println!("  Warning: {} trailing bytes after the frame", size - frame);
    }
    Ok(())
}
