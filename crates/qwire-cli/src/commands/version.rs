//! Version command implementation.

use console::style;

use qwire_hal::QecCode;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - visual quantum circuit graph compiler",
        style("qwire").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qwire-ir       Circuit graph, operations and tableau model");
    println!("  qwire-compile  Validation, scheduling and request emission");
    println!("  qwire-hal      Simulation engine client");
    println!("  qwire-cli      Command-line interface");
    println!();
    println!("Error correcting codes:");
    for code in QecCode::ALL {
        println!("  {:<12} {}", code.name(), style(code.description()).dim());
    }
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
