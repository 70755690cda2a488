use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use folio_dash::edit::FieldEdit;
use folio_dash::model::Section;
use folio_dash::output::{
    format_colors, format_errors, format_page, format_preset_list, format_section_list,
    format_status, format_visibility_table, should_use_colors,
};
use folio_dash::session::Dashboard;
use folio_dash::source::ConfiguredDocument;
use folio_dash::store::FileStore;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_STORAGE: i32 = 5;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PresetKind {
    Colors,
    Visibility,
}

#[derive(Subcommand, Debug)]
enum AddCommand {
    /// Add a placeholder project
    Project,
    /// Add an empty skill category
    Skill { name: String },
    /// Add a placeholder social link
    Social,
    /// Add a timeline entry
    Timeline { year: String, title: String },
    /// Add a skill stat (percentage 0-100)
    Stat {
        name: String,
        percentage: i64,
        #[arg(default_value = "")]
        category: String,
    },
}

#[derive(Subcommand, Debug)]
enum RemoveCommand {
    /// Remove a project by id
    Project { id: u32 },
    /// Remove a skill category by name
    Skill { name: String },
    /// Remove a social link by index (0-based)
    Social { index: usize },
    /// Remove a timeline entry by id
    Timeline { id: String },
    /// Remove every stat with this name
    Stat { name: String },
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Preview the rendered page (default if no subcommand)
    Show {
        /// Also open the published site in a browser
        #[arg(long)]
        open: bool,
    },
    /// List editable sections
    Sections,
    /// List color and visibility presets
    Presets,
    /// Show the color palette
    Colors,
    /// Show every visibility item and whether it is shown
    Visibility,
    /// Print one section (or everything) as JSON
    Get { section: Option<Section> },
    /// Export the configuration or one section to a JSON file
    Export {
        section: Option<Section>,
        /// Write to stdout instead of a file
        #[arg(long)]
        stdout: bool,
        /// Directory to write into (defaults to the export_dir setting)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Import a JSON file: a complete export replaces everything,
    /// anything else replaces the selected section
    Import {
        file: PathBuf,
        /// Section replaced by a partial import
        #[arg(short, long, default_value = "colors")]
        section: Section,
    },
    /// Set fields, e.g. `personal.name="Sam Rivera" colors.primary=#111111`
    Set {
        #[arg(required = true)]
        edits: Vec<FieldEdit>,
    },
    /// Replace a whole section with the JSON in a file
    Replace { section: Section, file: PathBuf },
    /// Apply a named preset
    Preset { kind: PresetKind, name: String },
    /// Hide a whole visibility section if fully shown, show it otherwise
    Toggle { section: String },
    /// Hide one visibility item
    Hide { section: String, item: String },
    /// Show one visibility item
    Unhide { section: String, item: String },
    /// Clear the stored configuration and return to the defaults
    Reset {
        /// Only restore the default color palette
        #[arg(long)]
        colors: bool,
    },
    /// Add an item to a collection
    #[command(subcommand)]
    Add(AddCommand),
    /// Remove an item from a collection
    #[command(subcommand)]
    Remove(RemoveCommand),
}

#[derive(Parser, Debug)]
#[command(name = "folio-dash")]
#[command(about = "Portfolio configuration dashboard", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to settings file (defaults to ~/.config/folio-dash/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Print the dashboard's last status, if any
fn print_status(dashboard: &mut Dashboard, use_colors: bool) {
    if let Some(status) = dashboard.take_status() {
        println!("{}", format_status(&status, use_colors));
    }
}

/// Persist, or report the failure and exit with the storage code
fn save_or_exit(dashboard: &mut Dashboard, use_colors: bool) {
    if dashboard.save().is_err() {
        if let Some(status) = dashboard.take_status() {
            eprintln!("{}", format_status(&status, use_colors));
        }
        std::process::exit(EXIT_STORAGE);
    }
}

/// Report validation problems and exit with the config code
fn exit_with_errors(title: &str, errors: &[String]) -> ! {
    eprintln!("{}:", title);
    eprintln!("{}", format_errors(errors));
    std::process::exit(EXIT_CONFIG);
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Show { open: false });
    folio_dash::diagnostics::set_verbose(cli.verbose);
    let use_colors = should_use_colors();

    // Load settings
    let settings_path = cli.config.map(PathBuf::from);
    let settings = match folio_dash::config::load_settings(settings_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = folio_dash::config::validate_settings(&settings) {
        exit_with_errors("Settings errors", &errors);
    }

    let document = match ConfiguredDocument::from_settings(&settings) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let store = FileStore::new(settings.store_dir(), settings.quota_bytes);
    folio_dash::diag!("Store directory: {}", store.dir().display());

    // Keep stdout clean for machine-readable output
    let machine_output = matches!(
        command,
        Commands::Get { .. } | Commands::Export { stdout: true, .. }
    );
    if machine_output {
        folio_dash::diagnostics::activate();
    }

    let mut dashboard = Dashboard::new(Box::new(store), settings.storage_key.clone());
    let origin = dashboard.load(&document).await;
    folio_dash::diag!("Configuration loaded from {}", origin);
    dashboard.take_status();

    match command {
        Commands::Show { open } => {
            println!("{}", format_page(&dashboard.view(), use_colors));

            if open {
                let Some(ref url) = settings.site_url else {
                    eprintln!("No site_url configured in settings.");
                    std::process::exit(EXIT_CONFIG);
                };
                if let Err(e) = folio_dash::browser::open_site(url) {
                    eprintln!("Failed to open browser: {:#}", e);
                    std::process::exit(EXIT_NETWORK);
                }
                println!("Opening {} in browser", url);
            }
        }
        Commands::Sections => {
            println!("{}", format_section_list(dashboard.current_section(), use_colors));
        }
        Commands::Presets => {
            println!("{}", format_preset_list());
        }
        Commands::Colors => {
            println!("{}", format_colors(&dashboard.config().colors, use_colors));
        }
        Commands::Visibility => {
            println!(
                "{}",
                format_visibility_table(&dashboard.config().visibility, use_colors)
            );
        }
        Commands::Get { section } => match dashboard.export_string(section) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Export failed: {:#}", e);
                std::process::exit(EXIT_STORAGE);
            }
        },
        Commands::Export { section, stdout, dir } => {
            if stdout {
                match dashboard.export_string(section) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Export failed: {:#}", e);
                        std::process::exit(EXIT_STORAGE);
                    }
                }
            } else {
                let dir = dir.unwrap_or_else(|| settings.export_dir());
                let result = dashboard.export_to_dir(section, &dir);
                print_status(&mut dashboard, use_colors);
                if result.is_err() {
                    std::process::exit(EXIT_STORAGE);
                }
            }
        }
        Commands::Import { file, section } => {
            dashboard.select_section(section);
            if let Err(err) = dashboard.import_file(&file) {
                exit_with_errors("Import rejected", &err.messages());
            }
            save_or_exit(&mut dashboard, use_colors);
            print_status(&mut dashboard, use_colors);
        }
        Commands::Set { edits } => {
            if let Err(errors) = dashboard.apply_edits(&edits) {
                exit_with_errors("Edit rejected", &errors);
            }
            save_or_exit(&mut dashboard, use_colors);
            print_status(&mut dashboard, use_colors);
        }
        Commands::Replace { section, file } => {
            let text = match std::fs::read_to_string(&file) {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("Failed to read {}: {}", file.display(), e);
                    std::process::exit(EXIT_CONFIG);
                }
            };
            if let Err(errors) = dashboard.apply_section_json(section, &text) {
                exit_with_errors("Section rejected", &errors);
            }
            save_or_exit(&mut dashboard, use_colors);
            print_status(&mut dashboard, use_colors);
        }
        Commands::Preset { kind, name } => {
            let applied = match kind {
                PresetKind::Colors => dashboard.apply_color_preset(&name),
                PresetKind::Visibility => dashboard.apply_visibility_preset(&name),
            };
            if applied {
                save_or_exit(&mut dashboard, use_colors);
            }
            print_status(&mut dashboard, use_colors);
        }
        Commands::Toggle { section } => {
            dashboard.toggle_section(&section);
            save_or_exit(&mut dashboard, use_colors);
            print_status(&mut dashboard, use_colors);
        }
        Commands::Hide { section, item } => {
            dashboard.set_visibility(&section, &item, false);
            save_or_exit(&mut dashboard, use_colors);
            print_status(&mut dashboard, use_colors);
        }
        Commands::Unhide { section, item } => {
            dashboard.set_visibility(&section, &item, true);
            save_or_exit(&mut dashboard, use_colors);
            print_status(&mut dashboard, use_colors);
        }
        Commands::Reset { colors } => {
            if colors {
                dashboard.reset_colors();
                save_or_exit(&mut dashboard, use_colors);
            } else if dashboard.reset().is_err() {
                if let Some(status) = dashboard.take_status() {
                    eprintln!("{}", format_status(&status, use_colors));
                }
                std::process::exit(EXIT_STORAGE);
            }
            print_status(&mut dashboard, use_colors);
        }
        Commands::Add(add) => {
            let result = match add {
                AddCommand::Project => {
                    dashboard.add_project();
                    Ok(())
                }
                AddCommand::Skill { name } => dashboard.add_skill_category(&name),
                AddCommand::Social => {
                    dashboard.add_social_link();
                    Ok(())
                }
                AddCommand::Timeline { year, title } => {
                    dashboard.add_timeline_entry(&year, &title);
                    Ok(())
                }
                AddCommand::Stat {
                    name,
                    percentage,
                    category,
                } => dashboard.add_stat(&name, percentage, &category),
            };
            if let Err(e) = result {
                exit_with_errors("Add rejected", &[e]);
            }
            save_or_exit(&mut dashboard, use_colors);
            print_status(&mut dashboard, use_colors);
        }
        Commands::Remove(remove) => {
            let removed = match remove {
                RemoveCommand::Project { id } => dashboard.remove_project(id),
                RemoveCommand::Skill { name } => dashboard.remove_skill_category(&name),
                RemoveCommand::Social { index } => dashboard.remove_social_link(index),
                RemoveCommand::Timeline { id } => dashboard.remove_timeline_entry(&id),
                RemoveCommand::Stat { name } => dashboard.remove_stat(&name),
            };
            if removed {
                save_or_exit(&mut dashboard, use_colors);
            }
            print_status(&mut dashboard, use_colors);
        }
    }

    if machine_output {
        for line in folio_dash::diagnostics::drain() {
            eprintln!("{}", line);
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
