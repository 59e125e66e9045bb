//! Basic usage example for the EngineerVault library.
//!
//! This example filters the built-in catalog and then looks up books on
//! Open Library.

use engineer_vault::catalog::{filter, Catalog};
use engineer_vault::models::{FilterSelection, Level};
use engineer_vault::sources::{BookSource, LookupOutcome, OpenLibrarySource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::builtin();
    println!("Catalog holds {} resources", catalog.len());

    // Narrow the catalog by text and level
    let selection = FilterSelection::new("control").level(Level::Research);
    for resource in filter(catalog.resources(), &selection) {
        println!("  {} ({})", resource.title, resource.summary());
    }

    // Look up books remotely
    let source = OpenLibrarySource::new()?;
    println!("\nSearching {}...", source.name());

    match source.lookup("control systems engineering").await {
        LookupOutcome::Found(books) => {
            for (i, book) in books.iter().take(3).enumerate() {
                println!("\n{}. {}", i + 1, book.title);
                println!("   Author: {}", book.author);
                println!("   Year: {}", book.year);
                if let Some(link) = book.best_link() {
                    println!("   Link: {}", link);
                }
            }
        }
        LookupOutcome::NoMatches => println!("No books found."),
        LookupOutcome::Failed(e) => eprintln!("  Error: {}", e),
    }

    Ok(())
}
