//! Command-line front end over the family document store.
//!
//! # Responsibility
//! - Resolve database and logging settings from flags and environment.
//! - Map subcommands onto `FamilyService` operations and print results.
//!
//! # Invariants
//! - Every mutating subcommand saves the whole document before exiting.
//! - Failures print one `error:` line to stderr and exit non-zero.

use clap::{Parser, Subcommand};
use famtree_core::db::open_db;
use famtree_core::{
    advanced_member_search, init_logging, union_display_name, AdvancedSearchOptions,
    DocumentRepository, FamilyService, Gender, LogLevel, MemberDraft, NameOptions, Relative,
    SaveMode, SearchField, SqliteDocumentRepository, Union, UnionDraft,
};
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "famtree", version, about = "Family tree members and unions")]
struct Cli {
    /// SQLite database file holding the family document
    #[arg(long, env = "FAMTREE_DB", default_value = "famtree.db")]
    db: PathBuf,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, env = "FAMTREE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Directory for rolling log files; logging is off when unset
    #[arg(long, env = "FAMTREE_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replace the stored document with a JSON file (current or legacy shape)
    Import {
        /// JSON file to read
        file: PathBuf,
    },

    /// Write the stored document as pretty-printed JSON
    Export {
        /// Output file; stdout when omitted
        file: Option<PathBuf>,
    },

    /// List all members and unions
    List,

    /// Search members by name, places or notes
    Search {
        /// The search query
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// Also match birth/death places and notes
        #[arg(long)]
        all_fields: bool,

        /// Match characters in order instead of a substring
        #[arg(long)]
        fuzzy: bool,
    },

    /// Show ancestors, descendants, spouses and siblings of a member
    Tree {
        /// Member ID
        id: u64,

        /// Generations to walk in each direction
        #[arg(short, long, default_value_t = 3)]
        depth: usize,
    },

    /// Classify how one member relates to another
    Relation {
        /// Member ID
        member: u64,

        /// Other member ID
        other: u64,
    },

    /// Add a member, or edit one with --id
    AddMember {
        first_name: String,
        last_name: String,

        /// Edit this member instead of creating one
        #[arg(long)]
        id: Option<u64>,

        /// Union listing the member as a child
        #[arg(long)]
        parent_union: Option<u64>,

        /// male|female|other
        #[arg(long)]
        gender: Option<String>,

        #[arg(long)]
        birth_date: Option<String>,

        #[arg(long)]
        birth_place: Option<String>,

        /// Marks the member as deceased
        #[arg(long)]
        death_date: Option<String>,
    },

    /// Add a union between two members, or edit one with --id
    AddUnion {
        partner1: u64,
        partner2: u64,

        /// Edit this union instead of creating one; unset fields keep their
        /// stored values
        #[arg(long)]
        id: Option<u64>,

        /// Child member ID; repeat for several children. Replaces the stored
        /// children when editing
        #[arg(long = "child")]
        children: Vec<u64>,

        #[arg(long)]
        marriage_date: Option<String>,
    },

    /// Delete a member and every union it is a partner of
    DeleteMember {
        /// Member ID
        id: u64,
    },

    /// Delete a union; its children keep existing without parents
    DeleteUnion {
        /// Union ID
        id: u64,
    },

    /// Remove the stored document and settings
    Clear,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| LogLevel::build_default().to_string());
        init_logging(&level, absolute_path(log_dir)?)?;
    }

    let conn = open_db(&cli.db).map_err(|err| err.to_string())?;
    let mut service = FamilyService::new(SqliteDocumentRepository::new(&conn));
    let loaded = service.initialize();
    if !loaded.ok {
        return Err(loaded.message);
    }
    info!(
        "event=cli_command module=cli status=start command={}",
        command_name(&cli.command)
    );

    match cli.command {
        Command::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .map_err(|err| format!("cannot read `{}`: {err}", file.display()))?;
            let report = service.import_json(&text).map_err(|err| err.to_string())?;
            persist(&service)?;
            println!(
                "imported {} members and {} unions ({} shape, {} skipped)",
                report.document.members.len(),
                report.document.unions.len(),
                report.shape.as_str(),
                report.skipped_members
            );
        }
        Command::Export { file } => {
            let text = service.export_json().map_err(|err| err.to_string())?;
            match file {
                Some(path) => std::fs::write(&path, text)
                    .map_err(|err| format!("cannot write `{}`: {err}", path.display()))?,
                None => println!("{text}"),
            }
        }
        Command::List => print_listing(&service),
        Command::Search {
            query,
            limit,
            all_fields,
            fuzzy,
        } => {
            let mut fields = vec![SearchField::Name];
            if all_fields {
                fields.extend([
                    SearchField::BirthPlace,
                    SearchField::DeathPlace,
                    SearchField::Notes,
                ]);
            }
            let options = AdvancedSearchOptions {
                limit,
                fields,
                fuzzy,
                ..AdvancedSearchOptions::default()
            };
            for member in advanced_member_search(service.store().members(), &query, &options) {
                println!("{}\t{}", member.id, member.full_name(NameOptions::FULL));
            }
        }
        Command::Tree { id, depth } => {
            let resolver = service.resolver();
            let member = resolver
                .member(id)
                .ok_or_else(|| format!("member {id} not found"))?;
            let tree = resolver.family_tree(member, depth);
            println!("{} ({})", member.full_name(NameOptions::FULL), member.status_text());
            print_relatives("ancestors", &tree.ancestors);
            print_relatives("descendants", &tree.descendants);
            for spouse in tree.spouses {
                println!("  spouse: {} {}", spouse.id, spouse.short_name());
            }
            for sibling in tree.siblings {
                println!("  sibling: {} {}", sibling.id, sibling.short_name());
            }
        }
        Command::Relation { member, other } => {
            let resolver = service.resolver();
            let first = resolver
                .member(member)
                .ok_or_else(|| format!("member {member} not found"))?;
            let second = resolver
                .member(other)
                .ok_or_else(|| format!("member {other} not found"))?;
            println!("{}", resolver.relationship_type(first, second));
        }
        Command::AddMember {
            first_name,
            last_name,
            id,
            parent_union,
            gender,
            birth_date,
            birth_place,
            death_date,
        } => {
            let mut draft = match id.and_then(|id| service.store().member(id)) {
                Some(existing) => MemberDraft::from(existing),
                None => MemberDraft::named("", ""),
            };
            draft.first_name = first_name;
            draft.last_name = last_name;
            if death_date.is_some() {
                draft.is_alive = false;
            }
            draft.parent_union_id = parent_union.or(draft.parent_union_id);
            if let Some(label) = gender {
                draft.gender = Gender::parse(&label)
                    .ok_or_else(|| format!("unknown gender `{label}`"))?;
            }
            draft.birth_date = birth_date.or(draft.birth_date);
            draft.birth_place = birth_place.or(draft.birth_place);
            draft.death_date = death_date.or(draft.death_date);

            let member = service
                .save_member(&draft, save_mode(id))
                .map_err(|err| err.to_string())?;
            persist(&service)?;
            println!("saved member {}", member.id);
        }
        Command::AddUnion {
            partner1,
            partner2,
            id,
            children,
            marriage_date,
        } => {
            let existing = id.and_then(|id| service.store().union(id));
            let draft = union_draft(existing, partner1, partner2, children, marriage_date);
            let saved = service
                .save_union(&draft, save_mode(id))
                .map_err(|err| err.to_string())?;
            persist(&service)?;
            println!("saved union {}", saved.id);
        }
        Command::DeleteMember { id } => {
            let report = service.delete_member(id);
            if !report.removed {
                return Err(format!("member {id} not found"));
            }
            persist(&service)?;
            println!(
                "deleted member {id}, {} unions removed, {} children detached",
                report.removed_unions.len(),
                report.orphaned_children.len()
            );
        }
        Command::DeleteUnion { id } => {
            if !service.delete_union(id) {
                return Err(format!("union {id} not found"));
            }
            persist(&service)?;
            println!("deleted union {id}");
        }
        Command::Clear => {
            let response = service.clear_all_data();
            if !response.ok {
                return Err(response.message);
            }
            println!("{}", response.message);
        }
    }

    Ok(())
}

fn persist<R: DocumentRepository>(service: &FamilyService<R>) -> Result<(), String> {
    let response = service.save();
    if response.ok {
        Ok(())
    } else {
        Err(response.message)
    }
}

/// Flags override the edited union's fields; children are replaced only when
/// at least one `--child` was given.
fn union_draft(
    existing: Option<&Union>,
    partner1: u64,
    partner2: u64,
    children: Vec<u64>,
    marriage_date: Option<String>,
) -> UnionDraft {
    let mut draft = existing.map(UnionDraft::from).unwrap_or_default();
    draft.member1_id = partner1;
    draft.member2_id = partner2;
    if !children.is_empty() {
        draft.children_ids = children;
    }
    draft.marriage_date = marriage_date.or(draft.marriage_date);
    draft
}

fn save_mode(id: Option<u64>) -> SaveMode {
    id.map_or(SaveMode::Create, SaveMode::Edit)
}

fn print_listing<R: DocumentRepository>(service: &FamilyService<R>) {
    let members = service.store().members();
    for member in members {
        let parent = member
            .parent_union_id
            .map_or_else(|| "-".to_string(), |id| id.to_string());
        println!(
            "member {}\t{}\t{}\tparent_union={}",
            member.id,
            member.full_name(NameOptions::FULL),
            member.status_text(),
            parent
        );
    }
    for entry in service.store().unions() {
        println!(
            "union {}\t{}\tchildren={:?}",
            entry.id,
            union_display_name(entry, members),
            entry.children_ids
        );
    }
}

fn print_relatives(label: &str, relatives: &[Relative<'_>]) {
    for relative in relatives {
        println!(
            "  {label} gen {}: {} {}",
            relative.generation,
            relative.member.id,
            relative.member.short_name()
        );
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Import { .. } => "import",
        Command::Export { .. } => "export",
        Command::List => "list",
        Command::Search { .. } => "search",
        Command::Tree { .. } => "tree",
        Command::Relation { .. } => "relation",
        Command::AddMember { .. } => "add-member",
        Command::AddUnion { .. } => "add-union",
        Command::DeleteMember { .. } => "delete-member",
        Command::DeleteUnion { .. } => "delete-union",
        Command::Clear => "clear",
    }
}

fn absolute_path(path: &Path) -> Result<PathBuf, String> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|err| format!("cannot resolve `{}`: {err}", path.display()))
}
