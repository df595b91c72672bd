//! Command-line front end for the todolite core.
//!
//! # Responsibility
//! - Wire the file-backed store, storage adapter, and engine together.
//! - Translate arguments into engine calls and print the results.
//!
//! # Invariants
//! - All list state lives in the core; this binary owns none of it.
//! - Expected failures surface as an error message and a nonzero exit
//!   code, never as a panic.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use todolite_core::{
    default_log_level, due_date_status, format_due_date, init_logging, FileKvStore, FilterOption,
    KvTodoRepository, SortOption, TodoId, TodoItem, TodoRepository, TodoService,
};

type CliService = TodoService<KvTodoRepository<FileKvStore>>;

const USAGE: &str = "\
usage: todolite <command> [args]

commands:
  add <title> [--due YYYY-MM-DD]    create a new todo
  list [--sort <option> | --filter <option>]
                                    print todos
  toggle <id>                       flip completion state
  rm <id>                           delete a todo
  due <id> <YYYY-MM-DD|none>        set or clear a due date
  clear                             remove all persisted todos
  help                              show this message

sort options:   created-asc created-desc due-date-asc due-date-desc
filter options: all overdue today this-week this-month no-due-date

data directory: $TODOLITE_DATA_DIR (default ./.todolite)";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let command = match args.first() {
        Some(command) => command.as_str(),
        None => {
            eprintln!("{USAGE}");
            return Err("missing command".to_string());
        }
    };

    if matches!(command, "help" | "--help" | "-h") {
        println!("{USAGE}");
        return Ok(());
    }

    let data_dir = resolve_data_dir()?;
    // A broken log setup should not block the todo list itself.
    if let Err(message) = init_logging(
        default_log_level(),
        &data_dir.join("logs").to_string_lossy(),
    ) {
        eprintln!("warning: logging disabled: {message}");
    }

    let store = FileKvStore::open(&data_dir).map_err(|err| err.to_string())?;
    let mut repo = KvTodoRepository::new(store);

    if command == "clear" {
        repo.clear_todos().map_err(|err| err.to_string())?;
        println!("cleared all todos");
        return Ok(());
    }

    let mut service = TodoService::new(repo);
    service.load_from_storage().map_err(|err| err.to_string())?;

    match command {
        "add" => cmd_add(&mut service, &args[1..]),
        "list" => cmd_list(&service, &args[1..]),
        "toggle" => cmd_toggle(&mut service, &args[1..]),
        "rm" => cmd_rm(&mut service, &args[1..]),
        "due" => cmd_due(&mut service, &args[1..]),
        other => Err(format!("unknown command `{other}`; run `todolite help`")),
    }
}

fn cmd_add(service: &mut CliService, args: &[String]) -> Result<(), String> {
    let title = args
        .first()
        .ok_or("usage: todolite add <title> [--due YYYY-MM-DD]")?;
    let due = flag_value(&args[1..], "--due")?;

    let item = service
        .create(title, due.as_deref())
        .map_err(|err| err.to_string())?;
    println!("added {}", item.id);
    print_item(&item);
    Ok(())
}

fn cmd_list(service: &CliService, args: &[String]) -> Result<(), String> {
    let sort = flag_value(args, "--sort")?;
    let filter = flag_value(args, "--filter")?;
    if sort.is_some() && filter.is_some() {
        return Err("use either --sort or --filter, not both".to_string());
    }

    let items = if let Some(value) = filter {
        let option = FilterOption::parse(&value)
            .ok_or_else(|| format!("unknown filter option `{value}`"))?;
        service.filtered_view(option)
    } else if let Some(value) = sort {
        let option =
            SortOption::parse(&value).ok_or_else(|| format!("unknown sort option `{value}`"))?;
        service.sorted_view(option)
    } else {
        service.list_all()
    };

    if items.is_empty() {
        println!("no todos");
        return Ok(());
    }
    for item in &items {
        print_item(item);
    }
    Ok(())
}

fn cmd_toggle(service: &mut CliService, args: &[String]) -> Result<(), String> {
    let id = parse_id(args.first().ok_or("usage: todolite toggle <id>")?)?;
    let item = service.toggle(id).map_err(|err| err.to_string())?;
    println!(
        "{} {}",
        if item.completed { "completed" } else { "reopened" },
        item.id
    );
    Ok(())
}

fn cmd_rm(service: &mut CliService, args: &[String]) -> Result<(), String> {
    let id = parse_id(args.first().ok_or("usage: todolite rm <id>")?)?;
    service.delete(id).map_err(|err| err.to_string())?;
    println!("removed {id}");
    Ok(())
}

fn cmd_due(service: &mut CliService, args: &[String]) -> Result<(), String> {
    let usage = "usage: todolite due <id> <YYYY-MM-DD|none>";
    let id = parse_id(args.first().ok_or(usage)?)?;
    let value = args.get(1).ok_or(usage)?;
    let due = if value == "none" {
        None
    } else {
        Some(value.as_str())
    };

    let item = service
        .update_due_date(id, due)
        .map_err(|err| err.to_string())?;
    println!("due date for {}: {}", item.id, format_due_date(item.due_date));
    Ok(())
}

fn print_item(item: &TodoItem) {
    let marker = if item.completed { "x" } else { " " };
    let status = due_date_status(item.due_date, item.completed);
    println!(
        "[{marker}] {}  {}  (due: {}, {})",
        item.id,
        item.title,
        format_due_date(item.due_date),
        status.as_str()
    );
}

fn parse_id(value: &str) -> Result<TodoId, String> {
    value
        .parse::<TodoId>()
        .map_err(|_| format!("invalid todo id `{value}`"))
}

/// Returns the value following `name`, or an error when the flag is present
/// without one.
fn flag_value(args: &[String], name: &str) -> Result<Option<String>, String> {
    match args.iter().position(|arg| arg == name) {
        Some(index) => match args.get(index + 1) {
            Some(value) => Ok(Some(value.clone())),
            None => Err(format!("{name} requires a value")),
        },
        None => Ok(None),
    }
}

fn resolve_data_dir() -> Result<PathBuf, String> {
    if let Ok(dir) = env::var("TODOLITE_DATA_DIR") {
        let trimmed = dir.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }
    let cwd = env::current_dir().map_err(|err| format!("cannot resolve working directory: {err}"))?;
    Ok(cwd.join(".todolite"))
}
