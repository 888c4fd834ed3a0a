// File: ./src/cli.rs
//! Shared command-line interface logic, like printing help.

pub fn print_help(binary_name: &str) {
    println!(
        "Schoolcal v{} - Collaborative school-event calendar",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>] [--verbose] <command>", binary_name);
    println!();
    println!("COMMANDS:");
    println!("    grid   [--dept <name>]                   Month-style week grid");
    println!("    table  [--dept <name>]                   Dense table with merged week/date cells");
    println!("    export [--dept <name>] [-o <file>]       Export events as CSV (UTF-8 with BOM)");
    println!("    import <file.csv>                        Bulk import; prints imported/skipped counts");
    println!("    add <M/D or YYYY-MM-DD> <content> --dept <name> [--section <name>]");
    println!("    delete <id>                              Delete an event");
    println!("    config show                              Print the current configuration");
    println!("    config set <key> <value>                 Change one setting");
    println!("    watch  [--dept <name>] [--interval <s>]  Re-render the grid whenever events change");
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -v, --verbose         Debug-level logging.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("IMPORT FORMAT:");
    println!("    Header row, then: date, content, department, section");
    println!("    Dates are month/day without a year (9/2, 12-25); the year comes from");
    println!("    the configured range. Files produced by 'export' import as-is.");
    println!();
    println!("CONFIG KEYS:");
    println!("    {}", crate::config::SETTABLE_KEYS.join(", "));
    println!("    Week labels: week_label is a template, e.g. \"Week {{n}}\".");
    println!();
    println!("EXAMPLES:");
    println!("    {} config set range_start 2024-08-25", binary_name);
    println!("    {} config set semester_start 2024-09-02", binary_name);
    println!("    {} add 9/2 \"Opening ceremony\" --dept \"Student Affairs\"", binary_name);
    println!("    {} export --dept \"Academic Affairs\" -o academic.csv", binary_name);
}
