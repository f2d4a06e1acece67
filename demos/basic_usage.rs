//! Basic usage example for the pbdesign library.
//!
//! This example generates a few Plackett-Burman designs and checks their
//! structural properties.

use pbdesign::construct::PlackettBurman;
use pbdesign::{calculate_co_occurrence, generate_pbdesign, is_orthogonal, PBBuilder};

fn main() {
    println!("pbdesign - Basic Usage Example\n");

    // 7 factors in 8 runs
    println!("Generating a design for 7 factors...");
    let pb8 = generate_pbdesign(7).expect("Failed to generate PB8");

    println!("PB8 Design:");
    println!("  Runs: {}", pb8.runs());
    println!("  Factors: {}", pb8.factors());
    println!();

    println!("Design contents:");
    println!("{}", pb8);

    println!("Verifying orthogonality...");
    match is_orthogonal(pb8.data()) {
        Ok(true) => println!("✓ All factor columns are orthogonal"),
        Ok(false) => println!("✗ Some factor columns are correlated"),
        Err(e) => println!("✗ Invalid matrix: {}", e),
    }

    let report = pb8.balance_report();
    println!("Balance (+1 / -1 per factor):");
    for (i, (plus, minus)) in report
        .plus_counts
        .iter()
        .zip(report.minus_counts.iter())
        .enumerate()
    {
        println!("  Factor {}: {} / {}", i, plus, minus);
    }

    println!();

    // 11 factors in 12 runs, from the Toeplitz seed
    println!("Generating a design for 11 factors...");
    let pb12 = generate_pbdesign(11).expect("Failed to generate PB12");
    let co = calculate_co_occurrence(pb12.data()).expect("Co-occurrence failed");
    println!("Co-occurrence of factors 1 and 2: {}", co[[1, 2]]);

    println!();

    // Doubling: 23 factors need 24 runs, reached from the 12-run seed
    let (seed, doublings) = PlackettBurman::resolve_seed(24).expect("24 runs is supported");
    println!("24 runs = {} doubled {} time(s)", seed, doublings);

    let pb24 = PBBuilder::new()
        .factors(23)
        .build()
        .expect("Failed to generate PB24");
    println!("PB24 orthogonal: {}", pb24.is_orthogonal());

    // 28 runs cannot be reached from any seed
    match generate_pbdesign(25) {
        Ok(_) => println!("Unexpectedly generated 25 factors"),
        Err(e) => println!("25 factors: {}", e),
    }
}
