//! notebridge: turn whiteboard sticky notes into issue tracker drafts.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use notebridge::draft::{FieldEdit, IssueDraft};
use notebridge::{config, document, session, tracker};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "notebridge")]
#[command(about = "Turn whiteboard sticky notes into issue tracker drafts", long_about = None)]
struct Args {
    /// Board export: a file response, a node lookup response, or a bare node
    #[arg(value_name = "EXPORT")]
    export: PathBuf,

    /// Keep only notes in this section
    #[arg(long, short = 's', value_name = "NAME")]
    section: Vec<String>,

    /// Keep only notes with this fill color (#rrggbb)
    #[arg(long, short = 'c', value_name = "HEX")]
    color: Vec<String>,

    /// Draft only these notes (default: every visible note)
    #[arg(long, value_name = "ID")]
    select: Vec<String>,

    /// Tracker label id to put on every draft
    #[arg(long, short = 'l', value_name = "ID")]
    label: Vec<String>,

    /// Edit a draft before output, e.g. `12:34.title=Fix login`
    #[arg(long = "set", value_name = "ID.FIELD=VALUE")]
    edits: Vec<FieldEdit>,

    /// Print the section and color filter options instead of drafts
    #[arg(long)]
    options: bool,

    /// Print create-issue request bodies instead of drafts
    #[arg(long)]
    requests: bool,

    /// Board URL, used to link requests back to their notes
    #[arg(long, value_name = "URL")]
    board_url: Option<String>,

    /// Load config from this file instead of ./notebridge.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = args
        .config
        .as_deref()
        .map_or_else(config::Config::load, config::Config::load_from);

    let root = document::load_export(&args.export).map_err(io::Error::other)?;
    let mut state = session::Session::from_config(&cfg);
    let found = state.load(&root).map_err(io::Error::other)?;

    if found == 0 {
        eprintln!("No sticky notes found");
        return Ok(());
    }

    state.set_section_filter(args.section);
    state.set_color_filter(args.color);

    if args.options {
        let options = serde_json::json!({
            "sections": state.section_options(),
            "colors": state.color_options(),
        });
        return print_json(&options);
    }

    if args.select.is_empty() {
        state.toggle_all_visible();
    } else {
        for id in &args.select {
            state.select_note(id);
        }
    }

    let store = state.configure();
    store.set_label_ids(&args.label);

    let now = Instant::now();
    for edit in &args.edits {
        store.update_field(&edit.id, edit.field, &edit.value, now);
    }
    store.flush(&mut |drafts: &[IssueDraft]| {
        log::info!("{} draft(s) ready", drafts.len());
    });

    if args.requests {
        let file_key = match args.board_url.as_deref() {
            Some(url) => Some(document::board_key(url).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Invalid board URL {url}: expected /file/<key> or /board/<key>"),
                )
            })?),
            None => None,
        };
        let link = file_key.as_deref().map(|file_key| tracker::BackLink {
            base_url: &cfg.board_base_url,
            file_key,
        });
        let batch = tracker::issue_requests(store.drafts(), link);
        for id in &batch.rejected {
            eprintln!("Skipped draft {id}: empty title");
        }
        print_json(&batch.ready)
    } else {
        print_json(store.drafts())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    println!("{json}");
    Ok(())
}
