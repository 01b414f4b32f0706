use std::fs::File;
use std::io::BufWriter;

use lq_dot24::{Config, Matrix, Model, Printer, Resolution};

#[derive(Debug, PartialEq)]
enum DemoPage {
    Blank,
    Dot,
    Stripes,
    Checker,
}

impl DemoPage {
    fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "blank" => Some(Self::Blank),
            "dot" => Some(Self::Dot),
            "stripes" => Some(Self::Stripes),
            "checker" => Some(Self::Checker),
            _ => None,
        }
    }

    fn all_options() -> Vec<&'static str> {
        vec!["blank", "dot", "stripes", "checker"]
    }
}

fn print_usage() {
    println!("Usage: cargo run --example print_demo [PAGE] [OUTPUT]");
    println!("Pages:");
    println!("  blank      Empty page, trailer only");
    println!("  dot        Single dot in the top left corner");
    println!("  stripes    Horizontal stripe pattern with blank gaps");
    println!("  checker    Checkerboard across the full page");
    println!("\nOUTPUT defaults to out.prn. Feed it to the printer raw:");
    println!("  lp -d lq510 -o raw out.prn");
}

fn main() {
    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{}:{}] {} - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.level(),
                record.args()
            )
        })
        .init();

    let args: Vec<String> = std::env::args().collect();

    let page = if args.len() > 1 {
        let arg = &args[1];
        if arg == "--help" || arg == "-h" {
            print_usage();
            return;
        }
        match DemoPage::from_str(arg) {
            Some(p) => p,
            None => {
                eprintln!("Error: Unknown page '{}'", arg);
                eprintln!("Available pages: {}", DemoPage::all_options().join(", "));
                print_usage();
                return;
            }
        }
    } else {
        DemoPage::Stripes
    };

    let output = args.get(2).map(String::as_str).unwrap_or("out.prn");

    // 4 x 2 inches at 360 dpi
    let width = 1440u32;
    let height = 720u32;
    let line_size = (width as usize + 7) / 8;

    let mut raster: Matrix = match page {
        DemoPage::Blank => vec![vec![0u8; line_size]; height as usize],
        DemoPage::Dot => {
            let mut rows = vec![vec![0u8; line_size]; height as usize];
            rows[0][0] = 0x80;
            rows
        }
        DemoPage::Stripes => (0..height)
            .map(|y| {
                if y % 96 < 24 {
                    vec![0xFF; line_size]
                } else {
                    vec![0x00; line_size]
                }
            })
            .collect(),
        DemoPage::Checker => (0..height)
            .map(|y| {
                let byte = if y % 48 < 24 { 0xF0 } else { 0x0F };
                vec![byte; line_size]
            })
            .collect(),
    };

    let config = Config::new(Resolution::Dpi360, Resolution::Dpi360, width, height)
        .bidirectional(true);

    let file = File::create(output).expect("cannot create output file");
    let mut printer =
        Printer::new(Model::LQ510, config, BufWriter::new(file)).expect("bad configuration");
    printer.print(&mut raster).expect("encoding failed");

    println!("Wrote {:?} page to {}", page, output);
}
