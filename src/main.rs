use breadboard::layout::LayoutEngine;
use breadboard::measure::RectTable;
use breadboard::model::DomainGraph;
use breadboard::svg::SvgRenderer;
use breadboard::wiring::{extract_wiring, extract_wiring_for};
use std::env;
use std::fs;
use std::process;

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <discovery.json> <rects.json> [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <file>       Output file (default: stdout)");
    eprintln!("  -b, --base <prefix>       Element id base of the breadboard (default: none)");
    eprintln!("  -w, --lane-width <px>     Width of a single swim lane (default: 16)");
    eprintln!("  -n, --netns <id>          Only wire up this network namespace (repeatable)");
    eprintln!("      --no-style            Don't embed the default stylesheet");
    process::exit(1);
}

fn read(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {}: {}", path, e);
            process::exit(1);
        }
    }
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        usage(&args[0]);
    }

    let graph_path = &args[1];
    let rects_path = &args[2];
    let mut output_path: Option<String> = None;
    let mut base = String::new();
    let mut engine = LayoutEngine::default();
    let mut netnsids: Vec<u64> = Vec::new();
    let mut renderer = SvgRenderer::default();

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(args[i].clone());
                }
            }
            "-b" | "--base" => {
                i += 1;
                if i < args.len() {
                    base = args[i].clone();
                }
            }
            "-w" | "--lane-width" => {
                i += 1;
                if i < args.len() {
                    match args[i].parse::<f64>() {
                        Ok(w) if w > 0.0 => engine = engine.with_lane_width(w),
                        _ => {
                            eprintln!("Invalid lane width: {}", args[i]);
                            process::exit(1);
                        }
                    }
                }
            }
            "-n" | "--netns" => {
                i += 1;
                if i < args.len() {
                    match args[i].parse::<u64>() {
                        Ok(id) => netnsids.push(id),
                        Err(_) => {
                            eprintln!("Invalid network namespace id: {}", args[i]);
                            process::exit(1);
                        }
                    }
                }
            }
            "--no-style" => renderer.embed_style = false,
            "-h" | "--help" => usage(&args[0]),
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let graph = match DomainGraph::from_json(&read(graph_path)) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("{}: {}", graph_path, e);
            process::exit(1);
        }
    };

    let rects = match RectTable::from_json(&read(rects_path)) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}: {}", rects_path, e);
            process::exit(1);
        }
    };

    let wires = if netnsids.is_empty() {
        extract_wiring(&graph, &base)
    } else {
        extract_wiring_for(&graph, &netnsids, &base)
    };
    log::info!("extracted {} wires", wires.len());

    let layout = engine.layout(&wires, &rects);
    log::info!(
        "laid out {} wires and {} external wires in {} lanes",
        layout.wires.len(),
        layout.externals.len(),
        layout.lanes
    );
    let svg = renderer.render(&layout, &base, &[]);

    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &svg) {
                eprintln!("Failed to write {}: {}", path, e);
                process::exit(1);
            }
        }
        None => print!("{}", svg),
    }
}
