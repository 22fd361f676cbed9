//! Benchmark for blueprint string encoding and decoding.
//!
//! Builds a synthetic smelting array with the builder API, then times the
//! codec on it and on a book holding several copies.
//!
//! Usage: `bench-blueprint [columns]` (default 200). Set `RUST_LOG=debug` to
//! see the codec's own log lines.

use std::time::Instant;

use factorio_blueprint::model::{
    BlueprintBuilder, CircuitCondition, Comparator, ControlBehavior, GameVersion, Position,
    SignalId, WireColor,
};
use factorio_blueprint::{
    Blueprint, BlueprintBook, DEFAULT_VERSION_BYTE, Document, WriterOptions, decode_str, encode,
    encode_to_string, encode_with_options, validate_blueprint, validate_book,
};
use flate2::Compression;
use tracing_subscriber::EnvFilter;

const VERSION: GameVersion = GameVersion::new(2, 0, 15, 4);

/// Copies of the array placed in the benchmark book.
const BOOK_COPIES: usize = 8;

// =============================================================================
// SYNTHETIC DATA
// =============================================================================

/// One column is a furnace pair fed by inserters from a shared belt, plus a
/// pole every fourth column and a lamp showing the furnace's output.
fn build_array(columns: usize) -> Blueprint {
    let mut builder = BlueprintBuilder::new()
        .label(format!("Smelting array x{columns}"))
        .version(VERSION)
        .icon(SignalId::item("stone-furnace"))
        .icon(SignalId::item("iron-plate"));

    let mut number = 0u32;
    let mut last_pole = None;
    for column in 0..columns {
        let x = column as f64 * 2.0;

        for y in 0..8 {
            builder = builder.entity("transport-belt", Position::new(x + 0.5, y as f64 + 0.5), |e| {
                e.direction(4)
            });
            number += 1;
        }

        for (y, direction) in [(-1.5, 8), (9.5, 0)] {
            builder = builder
                .entity("inserter", Position::new(x + 1.5, y), |e| e.direction(direction))
                .entity("stone-furnace", Position::new(x + 1.0, y - 2.0), |e| e);
            number += 2;
        }

        if column % 4 == 0 {
            let pole = number + 1;
            builder = builder.entity("small-electric-pole", Position::new(x + 0.5, -3.5), |e| {
                match last_pole {
                    Some(previous) => e.neighbour(previous),
                    None => e,
                }
            });
            number += 1;

            let behavior = ControlBehavior {
                circuit_condition: Some(CircuitCondition::constant(
                    SignalId::item("iron-plate"),
                    Comparator::Greater,
                    100,
                )),
                ..Default::default()
            };
            builder = builder
                .entity("small-lamp", Position::new(x + 1.5, -3.5), |e| {
                    e.control_behavior(behavior)
                })
                .connect((pole, 1), (pole + 1, 1), WireColor::Green);
            number += 1;
            last_pole = Some(pole);
        }
    }

    let mut blueprint = builder.build();

    // Back-links complete the copper wiring in both directions.
    if let Some(entities) = blueprint.entities.as_mut() {
        let poles: Vec<u32> = entities
            .iter()
            .filter(|e| e.name == "small-electric-pole")
            .map(|e| e.entity_number)
            .collect();
        for pair in poles.windows(2) {
            if let Some(pole) = entities.iter_mut().find(|e| e.entity_number == pair[0]) {
                pole.neighbours.get_or_insert_with(Vec::new).push(pair[1]);
            }
        }
    }

    blueprint
}

fn throughput(bytes: usize, seconds: f64) -> f64 {
    (bytes as f64 / 1_000_000.0) / seconds
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let columns: usize = std::env::args()
        .nth(1)
        .map(|arg| arg.parse().expect("columns must be a number"))
        .unwrap_or(200);

    let build_start = Instant::now();
    let blueprint = build_array(columns);
    let build_time = build_start.elapsed();

    let entity_count = blueprint.entities.as_ref().map_or(0, Vec::len);
    println!("Built {} entities in {:?}", entity_count, build_time);
    validate_blueprint(&blueprint).expect("synthetic blueprint should be valid");

    let document = Document::Blueprint(blueprint.clone());
    let json = document.to_json().expect("Failed to serialize");
    println!("JSON payload: {} bytes", json.len());

    // Benchmark encoding (best compression, what the game writes)
    let encode_start = Instant::now();
    let encoded = encode_to_string(&document, DEFAULT_VERSION_BYTE).expect("Failed to encode");
    let encode_time = encode_start.elapsed();

    println!("\nEncode (best): {} bytes in {:?}", encoded.len(), encode_time);
    println!("  Throughput: {:.2} MB/s (JSON)", throughput(json.len(), encode_time.as_secs_f64()));
    println!("  Ratio: {:.1}x", json.len() as f64 / encoded.len() as f64);

    // Benchmark encoding (fast compression)
    let fast_start = Instant::now();
    let fast = encode_with_options(
        &document,
        DEFAULT_VERSION_BYTE,
        Vec::new(),
        WriterOptions::new().compression(Compression::fast()),
    )
    .expect("Failed to encode fast");
    let fast_time = fast_start.elapsed();

    println!("\nEncode (fast): {} bytes in {:?}", fast.len(), fast_time);
    println!("  Throughput: {:.2} MB/s (JSON)", throughput(json.len(), fast_time.as_secs_f64()));
    println!(
        "  Size vs best: {:.1}% larger",
        (fast.len() as f64 / encoded.len() as f64 - 1.0) * 100.0
    );

    // Benchmark decoding
    let decode_start = Instant::now();
    let (version, decoded) = decode_str(&encoded).expect("Failed to decode");
    let decode_time = decode_start.elapsed();

    println!("\nDecode: {:?}", decode_time);
    println!("  Throughput: {:.2} MB/s (JSON)", throughput(json.len(), decode_time.as_secs_f64()));
    assert_eq!(version, DEFAULT_VERSION_BYTE);
    assert_eq!(decoded, document, "Round trip should preserve the blueprint");

    // Book of copies; children stay serialized until asked for
    let mut book = BlueprintBook::new(VERSION);
    book.label = Some("Smelting".to_string());
    for _ in 0..BOOK_COPIES {
        book.add_blueprint(&blueprint).expect("Failed to add blueprint");
    }
    validate_book(&book).expect("book should be valid");
    let book = Document::Book(book);

    let book_start = Instant::now();
    let book_bytes = encode(&book, DEFAULT_VERSION_BYTE, Vec::new()).expect("Failed to encode book");
    let book_encode_time = book_start.elapsed();

    let book_decode_start = Instant::now();
    let (_, decoded_book) =
        factorio_blueprint::decode(book_bytes.as_slice()).expect("Failed to decode book");
    let book_decode_time = book_decode_start.elapsed();

    let expand_start = Instant::now();
    let children = decoded_book
        .as_book()
        .map(|b| b.children().filter(|child| child.is_ok()).count())
        .unwrap_or(0);
    let expand_time = expand_start.elapsed();

    println!("\nBook ({} copies): {} bytes", BOOK_COPIES, book_bytes.len());
    println!("  Encode: {:?}", book_encode_time);
    println!("  Decode (children unexpanded): {:?}", book_decode_time);
    println!("  Expand {} children: {:?}", children, expand_time);
    assert_eq!(children, BOOK_COPIES);
}
