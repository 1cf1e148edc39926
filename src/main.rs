use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use user_store_module::types::{DEFAULT_DB_PATH, DEFAULT_SLOT_KEY};
use user_store_module::{
    Controller, Field, FieldSet, Notice, StorageLocation, StoreError, UserStoreConfig, logging,
};

const STORAGE_WARNING: &str =
    "This tool stores user data in plain text in a local database. Do not enter real credentials.";

/// Manage a small list of user records kept in a local key-value slot.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database file holding the slot.
    #[arg(long, env = "USER_STORE_DB", default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Keep everything in memory; nothing is written to disk.
    #[arg(long, conflicts_with = "db")]
    in_memory: bool,

    /// Slot key the record array is stored under.
    #[arg(long, env = "USER_STORE_KEY", default_value = DEFAULT_SLOT_KEY)]
    key: String,

    /// Only name and email (no username/password).
    #[arg(long)]
    basic: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every stored record.
    List {
        /// Print passwords instead of masking them.
        #[arg(long)]
        show_passwords: bool,
    },
    /// Add a new record.
    Add(FieldArgs),
    /// Edit the record at INDEX; only the given fields change.
    Update {
        index: usize,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete the record at INDEX.
    Delete {
        index: usize,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete every record and the slot itself.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Interactive form-and-list session.
    Shell,
}

#[derive(Args, Debug, Default)]
struct FieldArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    password: Option<String>,
}

impl FieldArgs {
    fn apply(self, ctl: &mut Controller) -> Result<()> {
        let pairs = [
            (Field::Name, self.name),
            (Field::Email, self.email),
            (Field::Username, self.username),
            (Field::Password, self.password),
        ];
        for (field, value) in pairs {
            if let Some(value) = value {
                if !ctl.draft().field_set().contains(field) {
                    bail!("--{field} is not available with --basic");
                }
                ctl.set_field(field, value)?;
            }
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(if cli.verbose { "debug" } else { "warn" });

    let config = UserStoreConfig {
        location: if cli.in_memory {
            StorageLocation::InMemory
        } else {
            StorageLocation::File(cli.db.clone())
        },
        slot_key: cli.key.as_str().into(),
        field_set: if cli.basic {
            FieldSet::Basic
        } else {
            FieldSet::Credentials
        },
    };
    let mut ctl = Controller::open(&config)
        .with_context(|| format!("opening database {}", cli.db.display()))?;

    match cli.command {
        Command::List { show_passwords } => print_list(&ctl, show_passwords),
        Command::Add(fields) => {
            fields.apply(&mut ctl)?;
            report(ctl.submit())?;
        }
        Command::Update { index, fields } => {
            ctl.begin_edit(index)?;
            fields.apply(&mut ctl)?;
            report(ctl.submit())?;
        }
        Command::Delete { index, yes } => {
            let notice = if yes {
                ctl.delete_at(index, &mut |_: &str| true)?
            } else {
                ctl.delete_at(index, &mut prompt_stdin)?
            };
            println!("{}", notice.message());
        }
        Command::Clear { yes } => {
            let notice = if yes {
                ctl.clear_all(&mut |_: &str| true)?
            } else {
                ctl.clear_all(&mut prompt_stdin)?
            };
            println!("{}", notice.message());
        }
        Command::Shell => shell(&mut ctl)?,
    }
    Ok(())
}

/// Print the notice, or turn a validation rejection into a readable error.
fn report(result: Result<Notice, StoreError>) -> Result<()> {
    match result {
        Ok(notice) => {
            println!("{}", notice.message());
            Ok(())
        }
        Err(StoreError::Validation(e)) => bail!("{}", e.message()),
        Err(e) => Err(e.into()),
    }
}

fn print_list(ctl: &Controller, show_passwords: bool) {
    if ctl.store().is_empty() {
        println!("No users added yet.");
        println!("Fill out the form to get started.");
        return;
    }
    for row in ctl.list_rows(show_passwords) {
        println!("{row}");
    }
}

fn prompt_stdin(question: &str) -> bool {
    print!("{question} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

// ─── Interactive shell ──────────────────────────────────────────────────────

const SHELL_HELP: &str = "\
commands:
  set <field> <value>   fill a form field (name, email, username, password)
  show                  print the form
  submit                add or update from the form
  edit <index>          load a record into the form
  cancel                discard the form and stop editing
  delete <index>        delete a record (asks first)
  clear                 delete all records (asks first)
  list                  print the records
  toggle-password       show or hide the password in the form
  help                  this text
  quit                  leave";

fn shell(ctl: &mut Controller) -> Result<()> {
    println!("{STORAGE_WARNING}");
    println!("{SHELL_HELP}");
    let stdin = io::stdin();
    loop {
        print!("{}> ", ctl.mode().heading());
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let line = line.trim();
        let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        let outcome: Result<()> = match cmd {
            "" => Ok(()),
            "quit" | "exit" => return Ok(()),
            "help" => {
                println!("{SHELL_HELP}");
                Ok(())
            }
            "list" => {
                print_list(ctl, false);
                Ok(())
            }
            "show" => {
                print_form(ctl);
                Ok(())
            }
            "set" => shell_set(ctl, rest),
            "submit" => report(ctl.submit()),
            "edit" => parse_index(rest).and_then(|i| {
                ctl.begin_edit(i)?;
                print_form(ctl);
                Ok(())
            }),
            "cancel" => ctl.cancel_edit().map_err(Into::into),
            "delete" => parse_index(rest).and_then(|i| {
                let notice = ctl.delete_at(i, &mut prompt_stdin)?;
                println!("{}", notice.message());
                Ok(())
            }),
            "clear" => {
                if ctl.can_clear_all() {
                    ctl.clear_all(&mut prompt_stdin)
                        .map(|n| println!("{}", n.message()))
                        .map_err(Into::into)
                } else {
                    println!("No users to clear.");
                    Ok(())
                }
            }
            "toggle-password" => ctl.toggle_password().map(|_| print_form(ctl)).map_err(Into::into),
            other => {
                println!("unknown command: {other} (try `help`)");
                Ok(())
            }
        };
        if let Err(e) = outcome {
            println!("error: {e}");
        }
    }
}

fn shell_set(ctl: &mut Controller, rest: &str) -> Result<()> {
    let (field, value) = rest.split_once(' ').unwrap_or((rest, ""));
    let field: Field = field.parse().map_err(anyhow::Error::msg)?;
    if !ctl.draft().field_set().contains(field) {
        bail!("{field} is not part of this form");
    }
    ctl.set_field(field, value)?;
    Ok(())
}

fn parse_index(s: &str) -> Result<usize> {
    s.parse().with_context(|| format!("expected a record index, got {s:?}"))
}

fn print_form(ctl: &Controller) {
    let draft = ctl.draft();
    println!("{}", draft.mode().heading());
    for field in draft.field_set().fields() {
        let value = draft.record().get(*field);
        if *field == Field::Password && !draft.show_password() {
            println!("  {field}: {}", "*".repeat(value.chars().count()));
        } else {
            println!("  {field}: {value}");
        }
    }
    if let Some(index) = ctl.editing_index() {
        println!("  (editing record {index})");
    }
}
