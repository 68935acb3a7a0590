use budget_allocator::{
    Allocation, AllocationRequest, AllocationResult, AllocatorConfig, BudgetAllocator, Catalog,
    Offering, load_catalog_from_csv, load_catalog_from_json, load_config_from_json,
    save_catalog_to_csv, save_catalog_to_json,
};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

const COLUMNS: [&str; 5] = ["id", "name", "category", "location", "price"];

fn render_line<'a>(widths: &[usize], cells: impl Iterator<Item = &'a str>) -> String {
    let mut line = String::from("|");
    for (ci, cell) in cells.enumerate() {
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(widths[ci].saturating_sub(cell.len())));
        line.push_str(" |");
    }
    line
}

fn render_rows_as_text_table(rows: &[[String; 5]]) -> String {
    let mut widths: Vec<usize> = COLUMNS.iter().map(|n| n.len()).collect();
    for row in rows {
        for (ci, cell) in row.iter().enumerate() {
            if cell.len() > widths[ci] {
                widths[ci] = cell.len();
            }
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_line(&widths, COLUMNS.iter().copied()));
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in rows {
        out.push_str(&render_line(&widths, row.iter().map(String::as_str)));
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn offering_row(offering: &Offering) -> [String; 5] {
    [
        offering.id.clone(),
        offering.name.clone().unwrap_or_default(),
        offering.category.clone(),
        offering.location.clone(),
        offering.price.to_string(),
    ]
}

fn render_catalog(catalog: &Catalog) -> String {
    let rows: Vec<[String; 5]> = catalog.offerings().iter().map(offering_row).collect();
    render_rows_as_text_table(&rows)
}

fn print_help() {
    println!(
        "Commands:\n  help                                     Show this help\n  show                                     Show the catalog\n  add <id> <category> <location> <price> [name...]\n                                           Upsert an offering (use _ for spaces)\n  remove <id>                              Remove an offering\n  find <budget> <location> <cat1,cat2,...> Find min/max combinations within budget\n  config show                              Show category and location enumerations\n  config load <json_path>                  Load enumerations from a JSON file\n  config default                           Use the wedding marketplace enumerations\n  config open                              Accept any category and location\n  save <json|csv> <path>                   Persist the catalog to disk\n  load <json|csv> <path>                   Load a catalog from disk\n  quit|exit                                Exit"
    );
}

fn print_config(config: &AllocatorConfig) {
    let describe = |values: &[String]| {
        if values.is_empty() {
            "(any)".to_string()
        } else {
            values.join(", ")
        }
    };
    println!("Categories : {}", describe(&config.categories));
    println!("Locations  : {}", describe(&config.locations));
}

fn print_allocation(label: &str, allocation: &Allocation) {
    println!("{label} combination (total {}):", allocation.total_price);
    for selection in &allocation.selections {
        println!(
            "  {:<16} {:<12} {:<24} {}",
            selection.category,
            selection.offering.id,
            selection.offering.name.as_deref().unwrap_or(""),
            selection.offering.price
        );
    }
}

fn print_result(result: &AllocationResult) {
    match result {
        AllocationResult::Success {
            min_combination,
            max_combination,
        } => {
            println!("Status: success");
            print_allocation("Minimum", min_combination);
            print_allocation("Maximum", max_combination);
        }
        AllocationResult::Partial {
            available_categories,
            missing_categories,
        } => {
            println!("Status: partial");
            println!("Missing categories  : {}", missing_categories.join(", "));
            println!("Available categories: {}", available_categories.join(", "));
        }
        AllocationResult::Infeasible {
            min_total_price,
            budget,
        } => {
            println!(
                "Status: no_combination (cheapest total {min_total_price} exceeds budget {budget})"
            );
        }
    }
}

fn token(raw: &str) -> String {
    raw.replace('_', " ")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let mut catalog = Catalog::new();
    let mut allocator = BudgetAllocator::new(AllocatorConfig::wedding());

    println!("Budget Allocator (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "show" => println!("{}", render_catalog(&catalog)),
            "add" => {
                let id = parts.next();
                let category = parts.next();
                let location = parts.next();
                let price = parts.next().and_then(|s| s.parse::<f64>().ok());
                let name = parts.collect::<Vec<_>>().join(" ");
                match (id, category, location, price) {
                    (Some(id), Some(category), Some(location), Some(price)) => {
                        let mut offering =
                            Offering::new(id, token(category), token(location), price);
                        if !name.is_empty() {
                            offering = offering.with_name(name);
                        }
                        match catalog.upsert_within(offering, allocator.config()) {
                            Ok(()) => println!("Upserted offering {id}."),
                            Err(e) => println!("Error: {e}"),
                        }
                    }
                    _ => println!("Usage: add <id> <category> <location> <price> [name...]"),
                }
            }
            "remove" => match parts.next() {
                Some(id) => {
                    if catalog.remove(id) {
                        println!("Removed offering {id}.");
                    } else {
                        println!("Offering {id} not found.");
                    }
                }
                None => println!("Usage: remove <id>"),
            },
            "find" => {
                let budget = parts.next().and_then(|s| s.parse::<f64>().ok());
                let location = parts.next();
                let categories = parts.collect::<Vec<_>>().join(" ");
                match (budget, location) {
                    (Some(budget), Some(location)) if !categories.is_empty() => {
                        let request = AllocationRequest::new(
                            budget,
                            token(location),
                            categories
                                .split(',')
                                .map(str::trim)
                                .filter(|c| !c.is_empty()),
                        );
                        match allocator.allocate(catalog.offerings(), &request) {
                            Ok(result) => print_result(&result),
                            Err(e) => println!("Error: {e}"),
                        }
                    }
                    _ => println!("Usage: find <budget> <location> <cat1,cat2,...>"),
                }
            }
            "config" => match parts.next() {
                Some("show") => print_config(allocator.config()),
                Some("default") => {
                    allocator = BudgetAllocator::new(AllocatorConfig::wedding());
                    println!("Using wedding marketplace enumerations.");
                }
                Some("open") => {
                    allocator = BudgetAllocator::new(AllocatorConfig::default());
                    println!("Accepting any category and location.");
                }
                Some("load") => match parts.next() {
                    Some(path) => match load_config_from_json(path) {
                        Ok(config) => {
                            allocator = BudgetAllocator::new(config);
                            println!("Config loaded from {path}.");
                        }
                        Err(e) => println!("Error: {e}"),
                    },
                    None => println!("Usage: config load <json_path>"),
                },
                _ => println!("Usage: config <show|load|default|open>"),
            },
            "save" | "load" => {
                let format = parts.next();
                let path = parts.next();
                match (cmd, format, path) {
                    ("save", Some("json"), Some(path)) => match save_catalog_to_json(&catalog, path)
                    {
                        Ok(()) => println!("Catalog saved to {path}."),
                        Err(e) => println!("Error: {e}"),
                    },
                    ("save", Some("csv"), Some(path)) => match save_catalog_to_csv(&catalog, path) {
                        Ok(()) => println!("Catalog saved to {path}."),
                        Err(e) => println!("Error: {e}"),
                    },
                    ("load", Some("json"), Some(path)) => match load_catalog_from_json(path)
                        .and_then(|loaded| {
                            loaded.validate_against(allocator.config())?;
                            Ok(loaded)
                        })
                    {
                        Ok(loaded) => {
                            catalog = loaded;
                            println!("Catalog loaded from {path}.");
                        }
                        Err(e) => println!("Error: {e}"),
                    },
                    ("load", Some("csv"), Some(path)) => match load_catalog_from_csv(path)
                        .and_then(|loaded| {
                            loaded.validate_against(allocator.config())?;
                            Ok(loaded)
                        })
                    {
                        Ok(loaded) => {
                            catalog = loaded;
                            println!("Catalog loaded from {path}.");
                        }
                        Err(e) => println!("Error: {e}"),
                    },
                    _ => println!("Usage: {cmd} <json|csv> <path>"),
                }
            }
            other => println!("Unknown command '{other}'. Type 'help'."),
        }
    }
}
