use std::fs::File;
use std::io::BufWriter;

use qrcode::QrCode;

use lq_dot24::{Config, Matrix, Model, Printer, Resolution};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let text = args.get(1).map(String::as_str).unwrap_or("lq-dot24");
    let output = args.get(2).map(String::as_str).unwrap_or("qr.prn");

    let code = QrCode::new(text).expect("cannot encode text");
    let qr: image::GrayImage = code
        .render::<image::Luma<u8>>()
        .quiet_zone(false)
        .min_dimensions(240, 240)
        .build();
    let (qr_width, qr_height) = qr.dimensions();

    // Center the code on a 2 x 2 inch page at 180 dpi.
    let width = 360u32;
    let height = 360u32;
    let line_size = (width as usize + 7) / 8;
    let x0 = width.saturating_sub(qr_width) / 2;
    let y0 = height.saturating_sub(qr_height) / 2;

    let mut raster: Matrix = vec![vec![0u8; line_size]; height as usize];
    for y in 0..qr_height.min(height - y0) {
        for x in 0..qr_width.min(width - x0) {
            if qr.get_pixel(x, y).0[0] < 128 {
                let px = (x0 + x) as usize;
                raster[(y0 + y) as usize][px / 8] |= 0x80 >> (px % 8);
            }
        }
    }

    let config = Config::new(Resolution::Dpi180, Resolution::Dpi180, width, height);

    let file = File::create(output).expect("cannot create output file");
    let mut printer =
        Printer::new(Model::LQ510, config, BufWriter::new(file)).expect("bad configuration");
    printer.print(&mut raster).expect("encoding failed");

    println!("Wrote QR page for {:?} to {}", text, output);
}
