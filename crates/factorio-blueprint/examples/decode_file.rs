//! Simple decoder to inspect blueprint strings.
//!
//! Reads a blueprint string from the file given as the first argument (or
//! stdin) and prints a summary, expanding books recursively.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;

use factorio_blueprint::{decode_str, validate_document, Blueprint, BlueprintBook, Document};

fn print_blueprint(blueprint: &Blueprint, indent: usize) {
    let pad = "  ".repeat(indent);
    println!(
        "{}Blueprint \"{}\" (version {})",
        pad,
        blueprint.label.as_deref().unwrap_or(""),
        blueprint.game_version()
    );

    let entities = blueprint.entities.as_deref().unwrap_or_default();
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for entity in entities {
        *counts.entry(entity.name.as_str()).or_default() += 1;
    }
    println!("{}  Entities: {}", pad, entities.len());
    for (name, count) in counts.iter().take(10) {
        println!("{}    {:>5} x {}", pad, count, name);
    }
    if counts.len() > 10 {
        println!("{}    ... and {} more kinds", pad, counts.len() - 10);
    }

    if let Some(tiles) = &blueprint.tiles {
        println!("{}  Tiles: {}", pad, tiles.len());
    }
    if let Some(schedules) = &blueprint.schedules {
        println!("{}  Train schedules: {}", pad, schedules.len());
    }
}

fn print_book(book: &BlueprintBook, indent: usize) {
    let pad = "  ".repeat(indent);
    println!(
        "{}Book \"{}\" (version {}, {} entries, active {})",
        pad,
        book.label.as_deref().unwrap_or(""),
        book.game_version(),
        book.len(),
        book.active_index
    );
    for entry in book.entries() {
        match entry.decode() {
            Ok(child) => print_document(&child, indent + 1),
            Err(e) => println!("{}  [{}] not decodable: {}", pad, entry.index, e),
        }
    }
}

fn print_document(document: &Document, indent: usize) {
    match document {
        Document::Blueprint(blueprint) => print_blueprint(blueprint, indent),
        Document::Book(book) => print_book(book, indent),
    }
}

fn main() {
    let input = match std::env::args().nth(1) {
        Some(path) => {
            println!("Reading: {}", path);
            fs::read_to_string(&path).expect("Failed to read file")
        }
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .expect("Failed to read stdin");
            input
        }
    };
    println!("String length: {} bytes", input.trim().len());

    let (version, document) = decode_str(&input).expect("Failed to decode");
    println!("Format version tag: {} ({:?})", version, version as char);

    println!("\n=== Contents ===");
    print_document(&document, 0);

    println!("\n=== Validation ===");
    match validate_document(&document) {
        Ok(()) => println!("OK"),
        Err(e) => println!("Invalid: {}", e),
    }
}
