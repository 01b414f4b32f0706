use std::fs::File;
use std::io::BufWriter;

use lq_dot24::{Config, Matrix, Model, Printer, Resolution};

/// Pack a grayscale image into one bit per pixel, MSB first. Pixels darker
/// than the threshold print as ink.
fn threshold_filter(image: &image::GrayImage, threshold: u8) -> Matrix {
    let (width, height) = image.dimensions();
    let line_size = (width as usize + 7) / 8;

    (0..height)
        .map(|y| {
            let mut row = vec![0u8; line_size];
            for x in 0..width {
                if image.get_pixel(x, y).0[0] < threshold {
                    row[x as usize / 8] |= 0x80 >> (x % 8);
                }
            }
            row
        })
        .collect()
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        println!("Usage: cargo run --example print_image <IMAGE> [OUTPUT]");
        println!("\nRenders IMAGE at 180 dpi, one page, black threshold 128.");
        return;
    }

    let input = &args[1];
    let output = args.get(2).map(String::as_str).unwrap_or("image.prn");

    let image = image::open(input).expect("cannot open image").grayscale();
    let gray = image.to_luma8();
    let (width, height) = gray.dimensions();
    let mut raster = threshold_filter(&gray, 128);

    let config = Config::new(Resolution::Dpi180, Resolution::Dpi180, width, height);

    let file = File::create(output).expect("cannot create output file");
    let mut printer =
        Printer::new(Model::LQ510, config, BufWriter::new(file)).expect("bad configuration");
    printer.print(&mut raster).expect("encoding failed");

    println!("Wrote {}x{} page to {}", width, height, output);
}
