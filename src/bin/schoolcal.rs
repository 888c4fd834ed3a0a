use anyhow::{Context, Result, anyhow, bail};
use schoolcal::cli::print_help;
use schoolcal::codec::export_csv;
use schoolcal::config::Config;
use schoolcal::context::{AppContext, StandardContext};
use schoolcal::logging;
use schoolcal::model::date::parse_date;
use schoolcal::model::resolver::resolve_import_date;
use schoolcal::model::{DepartmentFilter, NewEvent};
use schoolcal::render::{render_grid, render_table};
use schoolcal::store::EventStore;
use schoolcal::view::CalendarView;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use strum::{Display, EnumString};

const BIN: &str = "schoolcal";

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
enum Command {
    Grid,
    Table,
    Export,
    Import,
    Add,
    Delete,
    Config,
    Watch,
}

/// Removes `--flag value` from `args` and returns the value.
fn take_value(args: &mut Vec<String>, names: &[&str]) -> Result<Option<String>> {
    let Some(pos) = args.iter().position(|a| names.contains(&a.as_str())) else {
        return Ok(None);
    };
    if pos + 1 >= args.len() {
        bail!("{} requires a value", args[pos]);
    }
    let value = args.remove(pos + 1);
    args.remove(pos);
    Ok(Some(value))
}

fn take_switch(args: &mut Vec<String>, names: &[&str]) -> bool {
    match args.iter().position(|a| names.contains(&a.as_str())) {
        Some(pos) => {
            args.remove(pos);
            true
        }
        None => false,
    }
}

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() || take_switch(&mut args, &["-h", "--help", "help"]) {
        print_help(BIN);
        return Ok(());
    }

    let root = take_value(&mut args, &["-r", "--root"])?.map(PathBuf::from);
    let verbose = take_switch(&mut args, &["-v", "--verbose"]);
    let ctx: Arc<dyn AppContext> = Arc::new(StandardContext::new(root));

    let mut config = Config::load_or_default(ctx.as_ref())?;
    let level = if verbose { "debug".to_string() } else { config.log_level.clone() };
    if let Err(e) = logging::init(ctx.as_ref(), &level) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    if args.is_empty() {
        print_help(BIN);
        return Ok(());
    }
    let command_arg = args.remove(0);
    let Ok(command) = command_arg.parse::<Command>() else {
        eprintln!("Unknown command '{}'", command_arg);
        print_help(BIN);
        std::process::exit(2);
    };
    log::debug!("Running '{}'", command);
    let filter = DepartmentFilter::parse(take_value(&mut args, &["-d", "--dept"])?.as_deref());

    match command {
        Command::Grid => {
            let store = EventStore::open(ctx.clone())?;
            print_grid(&store, &config, &filter);
        }
        Command::Table => {
            let store = EventStore::open(ctx.clone())?;
            let view = CalendarView::compute(store.snapshot(), &config.semester, &filter);
            println!("{} - {}", config.semester.name, filter);
            print!("{}", render_table(&view.rows, &config.weekday_names));
        }
        Command::Export => {
            let output = take_value(&mut args, &["-o", "--output"])?;
            let store = EventStore::open(ctx.clone())?;
            let csv = export_csv(store.snapshot(), &filter, &config.semester, &config.weekday_names)?;
            match output {
                Some(path) => {
                    fs::write(&path, csv).with_context(|| format!("Failed to write {}", path))?;
                    eprintln!("Exported to {}", path);
                }
                None => print!("{}", csv),
            }
        }
        Command::Import => {
            let path = args.first().ok_or_else(|| anyhow!("Usage: {} import <file.csv>", BIN))?;
            let text = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
            let author = ensure_author(&mut config, ctx.as_ref())?;
            let mut store = EventStore::open(ctx.clone())?;
            let report = store.import_csv(&text, &config.semester, &author);
            println!(
                "Imported {} event(s); skipped {} row(s); {} write(s) failed.",
                report.imported, report.skipped, report.failed
            );
        }
        Command::Add => {
            let section = take_value(&mut args, &["-s", "--section"])?;
            let (date_arg, content) = match args.as_slice() {
                [date, content, ..] => (date.clone(), content.clone()),
                _ => bail!("Usage: {} add <date> <content> --dept <name> [--section <name>]", BIN),
            };
            let DepartmentFilter::Only(department) = filter else {
                bail!("add requires --dept <name>");
            };
            let date = parse_date(&date_arg)
                .or_else(|| {
                    resolve_import_date(&date_arg, config.semester.range_start, config.semester.range_end)
                })
                .ok_or_else(|| anyhow!("'{}' is not a date", date_arg))?;
            let section = match (section, config.department(&department)) {
                (Some(s), _) => s,
                (None, Some(dept)) => dept.default_section().to_string(),
                (None, None) => {
                    eprintln!("Note: '{}' is not a configured department", department);
                    String::new()
                }
            };
            let author = ensure_author(&mut config, ctx.as_ref())?;
            let mut store = EventStore::open(ctx.clone())?;
            let id = store.create(
                NewEvent {
                    date,
                    department,
                    section,
                    content,
                },
                &author,
            )?;
            if !config.semester.contains(date) {
                eprintln!("Note: {} is outside the configured range", date);
            }
            println!("Created {}", id);
        }
        Command::Delete => {
            let id = args.first().ok_or_else(|| anyhow!("Usage: {} delete <id>", BIN))?;
            let mut store = EventStore::open(ctx.clone())?;
            if store.delete(id)? {
                println!("Deleted {}", id);
            } else {
                bail!("No event with id {}", id);
            }
        }
        Command::Config => match args.first().map(String::as_str) {
            Some("set") => {
                let (key, value) = match &args[1..] {
                    [key, value, ..] => (key.as_str(), value.as_str()),
                    [key] => (key.as_str(), ""),
                    _ => bail!("Usage: {} config set <key> <value>", BIN),
                };
                config.set_field(key, value)?;
                config.save(ctx.as_ref())?;
                println!("{} updated", key);
            }
            Some("show") | None => {
                print!("{}", toml::to_string_pretty(&config)?);
            }
            Some(other) => bail!("Unknown config action '{}'", other),
        },
        Command::Watch => {
            let secs = match take_value(&mut args, &["-i", "--interval"])? {
                Some(s) => s.parse::<u64>().with_context(|| format!("Bad interval '{}'", s))?,
                None => 5,
            };
            let mut store = EventStore::open(ctx.clone())?;
            print_grid(&store, &config, &filter);
            loop {
                std::thread::sleep(Duration::from_secs(secs.max(1)));
                match store.refresh_if_changed() {
                    Ok(true) => print_grid(&store, &config, &filter),
                    Ok(false) => {}
                    Err(e) => log::warn!("Reload failed: {:#}", e),
                }
            }
        }
    }
    Ok(())
}

fn print_grid(store: &EventStore, config: &Config, filter: &DepartmentFilter) {
    let view = CalendarView::compute(store.snapshot(), &config.semester, filter);
    print!("{}", render_grid(&view.weeks, &config.semester, &config.weekday_names));
    if view.out_of_range > 0 {
        println!("\n{} event(s) fall outside the configured range.", view.out_of_range);
    }
}

/// Events need an author; the first write persists a generated one.
fn ensure_author(config: &mut Config, ctx: &dyn AppContext) -> Result<String> {
    if config.author_id.trim().is_empty() {
        config.save(ctx)?;
    }
    Ok(config.author_id.clone())
}
