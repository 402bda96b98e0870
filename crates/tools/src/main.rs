use std::env;
use std::fs;
use std::sync::Arc;

use histo::method::{BinMethod, DateBinMethod, DateBinType, NumericBinMethod, UniqueBinMethod};
use histo::sort::SortOrder;
use layers::layer::LayerId;
use layers::vector::VectorLayer;
use style::config::StyleConfig;
use style::reader::{StyleReader, to_config};
use tracing_subscriber::EnvFilter;
use workbench::context::Workbench;
use workbench::ingest::features_from_json;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let mut args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let cmd = args[1].clone();
    args.drain(0..2);

    match cmd.as_str() {
        "hist" => cmd_hist(args),
        "style" => cmd_style(args),
        _ => Err(usage()),
    }
}

fn usage() -> String {
    [
        "usage:",
        "  sphere hist <features.json> <field> [--method unique|numeric|date]",
        "              [--width W] [--offset O] [--date-type T]",
        "              [--sort count|key|label] [--desc]",
        "  sphere style <style.json>",
    ]
    .join("\n")
}

fn cmd_hist(args: Vec<String>) -> Result<(), String> {
    if args.len() < 2 {
        return Err(usage());
    }

    let path = args[0].clone();
    let field = args[1].clone();

    let mut method_name = "unique".to_string();
    let mut width = 10.0f64;
    let mut offset = 0.0f64;
    let mut date_type = "day".to_string();
    let mut sort = "key".to_string();
    let mut desc = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--method" => method_name = take_value(&args, &mut i)?,
            "--width" => {
                width = take_value(&args, &mut i)?
                    .parse::<f64>()
                    .map_err(|e| format!("--width: {e}"))?;
            }
            "--offset" => {
                offset = take_value(&args, &mut i)?
                    .parse::<f64>()
                    .map_err(|e| format!("--offset: {e}"))?;
            }
            "--date-type" => date_type = take_value(&args, &mut i)?,
            "--sort" => sort = take_value(&args, &mut i)?,
            "--desc" => desc = true,
            s => return Err(format!("unknown arg: {s}\n\n{}", usage())),
        }
        i += 1;
    }

    let method: Box<dyn BinMethod> = match method_name.as_str() {
        "unique" => Box::new(UniqueBinMethod::new()),
        "numeric" => Box::new(NumericBinMethod::new(width, offset)),
        "date" => {
            let bin_type = DateBinType::parse(&date_type)
                .ok_or_else(|| format!("unknown date type: {date_type}"))?;
            Box::new(DateBinMethod::new(bin_type))
        }
        other => return Err(format!("unknown bin method: {other}")),
    };

    let order = match (sort.as_str(), desc) {
        ("count", false) => SortOrder::CountAsc,
        ("count", true) => SortOrder::CountDesc,
        ("key", false) => SortOrder::KeyAsc,
        ("key", true) => SortOrder::KeyDesc,
        ("label", false) => SortOrder::LabelAsc,
        ("label", true) => SortOrder::LabelDesc,
        (other, _) => return Err(format!("unknown sort: {other}")),
    };

    let json = fs::read_to_string(&path).map_err(|e| format!("read {path}: {e}"))?;
    let features = features_from_json(&json).map_err(|e| e.to_string())?;
    let feature_count = features.len();

    let mut workbench = Workbench::new();
    let mut layer = VectorLayer::new(LayerId(1), path.as_str());
    for feature in features {
        layer.add_feature(feature);
    }
    let layer_id = workbench.add_vector_layer(layer);

    let histogram = workbench
        .histogram(layer_id, &field, method)
        .ok_or_else(|| "layer vanished".to_string())?;

    println!("{feature_count} features, {} bins by '{field}'", histogram.len());
    for bin in histogram.sorted_bins(order) {
        let color = bin.color();
        let color = if color.is_empty() { "(mixed)" } else { &color };
        println!("{:>8}  {:<24} {}", bin.count(), bin.label(), color);
    }
    Ok(())
}

fn cmd_style(args: Vec<String>) -> Result<(), String> {
    if args.len() != 1 {
        return Err(usage());
    }

    let path = args[0].clone();
    let json = fs::read_to_string(&path).map_err(|e| format!("read {path}: {e}"))?;
    let config = StyleConfig::from_json(&json).map_err(|e| e.to_string())?;

    let mut reader = StyleReader::new();
    let (key, style) = reader.resolve(&config);
    let (key_again, style_again) = reader.resolve(&config);

    println!("cache key: {key}");
    println!(
        "memoized:  {} (same key: {})",
        Arc::ptr_eq(&style, &style_again),
        key == key_again
    );
    let (images, fills, strokes) = reader.cached_parts();
    println!("cached parts: image={images} fill={fills} stroke={strokes}");

    let mut round_trip = StyleConfig::default();
    to_config(&style, &mut round_trip);
    let pretty = serde_json::to_string_pretty(&round_trip).map_err(|e| e.to_string())?;
    println!("resolved config:\n{pretty}");
    Ok(())
}

fn take_value(args: &[String], i: &mut usize) -> Result<String, String> {
    let flag = args[*i].clone();
    *i += 1;
    if *i >= args.len() {
        return Err(format!("{flag} requires a value"));
    }
    Ok(args[*i].clone())
}
