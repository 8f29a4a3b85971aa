//! List command implementation.

use tickbars_lib::prelude::*;

/// Prints the supported instruments.
pub(crate) fn list_instruments() {
    let instruments = InstrumentRegistry::global().all();

    println!("{:<10} {:<10} {:<10} {:<8}", "ID", "NAME", "CATEGORY", "DECIMALS");
    println!("{}", "-".repeat(41));

    for instrument in &instruments {
        println!(
            "{:<10} {:<10} {:<10} {:<8}",
            instrument.id(),
            instrument.name(),
            instrument.category().as_str(),
            instrument.decimals()
        );
    }

    println!("\nTotal: {} instruments", instruments.len());
}
