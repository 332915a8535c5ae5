use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;

use ordered_ini::generator::to_ini;
use ordered_ini::{Document, EditorSettings, IniFile, IniValue, Placement};

/// Order-preserving INI file editor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the editor settings file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// INI (or .json) file to operate on; created if missing
    #[arg(value_name = "INI")]
    file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Where to put a section or key
#[derive(clap::Args, Debug)]
#[group(required = true, multiple = false)]
struct Target {
    /// Place immediately before PIVOT
    #[arg(long, value_name = "PIVOT")]
    before: Option<String>,

    /// Place immediately after PIVOT
    #[arg(long, value_name = "PIVOT")]
    after: Option<String>,

    /// Place first
    #[arg(long)]
    start: bool,

    /// Place last
    #[arg(long)]
    end: bool,
}

impl Target {
    fn placement(&self) -> Placement<'_> {
        match (&self.before, &self.after) {
            (Some(pivot), _) => Placement::Before(pivot),
            (_, Some(pivot)) => Placement::After(pivot),
            _ if self.start => Placement::Start,
            _ => Placement::End,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the whole file as INI
    Show,
    /// List section names in order
    Sections,
    /// Print a section, or a single value when KEY is given
    Get { section: String, key: Option<String> },
    /// Create a section, or empty an existing one
    SetSection { name: String },
    /// Delete a section and all its keys
    RemoveSection { name: String },
    /// Rename a section
    RenameSection { old: String, new: String },
    /// Move a section
    MoveSection {
        name: String,
        #[command(flatten)]
        target: Target,
    },
    /// Add a key; with VALUE, set it (overwriting in place)
    SetKey {
        section: String,
        key: String,
        value: Option<String>,
    },
    /// Overwrite the value of an existing key
    Write {
        section: String,
        key: String,
        value: String,
    },
    /// Rename a key
    RenameKey {
        section: String,
        old: String,
        new: String,
    },
    /// Empty the value of a key, keeping the key
    ClearKey { section: String, key: String },
    /// Delete a key
    RemoveKey { section: String, key: String },
    /// Move a key to the end of another section
    MoveKey {
        section: String,
        key: String,
        to_section: String,
    },
    /// Move a key within its section
    ReorderKey {
        section: String,
        key: String,
        #[command(flatten)]
        target: Target,
    },
    /// Print the file as JSON
    ExportJson,
    /// Replace the file contents with a JSON document
    ImportJson { json_file: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => EditorSettings::from_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => EditorSettings::default(),
    };

    // Initialize the logger; RUST_LOG still wins over the configured level
    let log_level = settings.log_level.clone();
    env_logger::init_from_env(Env::default().default_filter_or(log_level));

    let file = IniFile::open_with_settings(args.file.clone(), settings)
        .with_context(|| format!("failed to open {}", args.file.display()))?;

    run(&file, args.command).with_context(|| format!("failed to edit {}", args.file.display()))
}

fn run(file: &IniFile, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Show => print!("{}", file.to_ini_string()?),
        Command::Sections => {
            for name in file.section_names()? {
                println!("{}", name);
            }
        }
        Command::Get { section, key: None } => {
            let contents = file.section(&section)?;
            print!("{}", to_ini(&Document::from_iter([(section, contents)])));
        }
        Command::Get {
            section,
            key: Some(key),
        } => match file.value(&section, &key)? {
            IniValue::Scalar(value) => println!("{}", value),
            IniValue::List(items) => {
                for item in items {
                    println!("{}", item);
                }
            }
        },
        Command::SetSection { name } => file.set_section(&name)?,
        Command::RemoveSection { name } => {
            file.remove_section(&name)?;
        }
        Command::RenameSection { old, new } => file.rename_section(&old, &new)?,
        Command::MoveSection { name, target } => file.move_section(&name, target.placement())?,
        Command::SetKey {
            section,
            key,
            value: None,
        } => file.set_key(&section, &key)?,
        Command::SetKey {
            section,
            key,
            value: Some(value),
        } => file.set_keys(&section, [(key, value)])?,
        Command::Write {
            section,
            key,
            value,
        } => file.write_value(&section, &key, value)?,
        Command::RenameKey { section, old, new } => file.rename_key(&section, &old, &new)?,
        Command::ClearKey { section, key } => file.clear_value(&section, &key)?,
        Command::RemoveKey { section, key } => {
            file.remove_key(&section, &key)?;
        }
        Command::MoveKey {
            section,
            key,
            to_section,
        } => file.move_key_to_section(&section, &key, &to_section)?,
        Command::ReorderKey {
            section,
            key,
            target,
        } => file.move_key(&section, &key, target.placement())?,
        Command::ExportJson => println!("{}", file.export_json()?),
        Command::ImportJson { json_file } => {
            let json = std::fs::read_to_string(&json_file)
                .with_context(|| format!("failed to read {}", json_file.display()))?;
            file.import_json(&json)?;
            info!("Imported {} into {}", json_file.display(), file.path().display());
        }
    }
    Ok(())
}
