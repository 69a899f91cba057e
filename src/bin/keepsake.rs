use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use keepsake::{
    CanvasSession, Document, DocumentStore, EditorSurface, KeepsakeResult, SessionOptions,
    ViewerSurface, compile_page, fingerprint_display_list, normalize,
};

#[derive(Parser, Debug)]
#[command(name = "keepsake", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a document JSON and report page/element counts.
    Validate(ValidateArgs),
    /// Normalize a stored document (legacy shapes included) to the current schema.
    Normalize(NormalizeArgs),
    /// Compile one page into its display-list JSON.
    Scene(SceneArgs),
    /// Print per-page scene fingerprints for reproducibility checks.
    Fingerprint(ValidateArgs),
    /// Compile a document through both surfaces and compare fingerprints per page.
    Parity(ValidateArgs),
}

/// The CLI never persists; sessions run against a discarding store.
struct DiscardStore;

impl DocumentStore for DiscardStore {
    fn save(&mut self, _document: &Document) -> KeepsakeResult<()> {
        Ok(())
    }
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct NormalizeArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Page index (0-based).
    #[arg(long, default_value_t = 0)]
    page: usize,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Normalize(args) => cmd_normalize(args),
        Command::Scene(args) => cmd_scene(args),
        Command::Fingerprint(args) => cmd_fingerprint(args),
        Command::Parity(args) => cmd_parity(args),
    }
}

fn load_document(path: &PathBuf) -> anyhow::Result<Document> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read document '{}'", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("parse json '{}'", path.display()))?;
    Ok(normalize(&value))
}

fn write_out(out: Option<PathBuf>, json: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&path, json)
                .with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let doc = load_document(&args.in_path)?;
    doc.validate()?;
    let elements: usize = doc.pages.iter().map(|p| p.elements.len()).sum();
    println!("ok: {} page(s), {} element(s)", doc.pages.len(), elements);
    Ok(())
}

fn cmd_normalize(args: NormalizeArgs) -> anyhow::Result<()> {
    let doc = load_document(&args.in_path)?;
    let json = serde_json::to_string_pretty(&doc.to_value())?;
    write_out(args.out, &json)
}

fn cmd_scene(args: SceneArgs) -> anyhow::Result<()> {
    let doc = load_document(&args.in_path)?;
    let page = doc
        .pages
        .get(args.page)
        .with_context(|| format!("page {} out of range ({} pages)", args.page, doc.pages.len()))?;
    let list = compile_page(page);
    let json = serde_json::to_string_pretty(&list)?;
    write_out(args.out, &json)
}

fn cmd_fingerprint(args: ValidateArgs) -> anyhow::Result<()> {
    let viewer = ViewerSurface::new(load_document(&args.in_path)?);
    for i in 0..viewer.page_count() {
        let list = viewer.scene(i).context("page index in range")?;
        println!("{} {}", list.page_id, fingerprint_display_list(&list));
    }
    Ok(())
}

fn cmd_parity(args: ValidateArgs) -> anyhow::Result<()> {
    let doc = load_document(&args.in_path)?;
    let viewer = ViewerSurface::new(doc.clone());
    let mut editor = EditorSurface::new(CanvasSession::new(
        doc,
        Box::new(DiscardStore),
        SessionOptions::default(),
    ));

    let mut mismatches = 0usize;
    for i in 0..viewer.page_count() {
        editor.session_mut().set_active_page(i);
        let ed = editor.fingerprint();
        let vw = viewer
            .fingerprint(i)
            .context("page index in range")?;
        let verdict = if ed == vw { "ok" } else { "MISMATCH" };
        if ed != vw {
            mismatches += 1;
        }
        println!("page {i}: editor {ed} viewer {vw} {verdict}");
    }

    anyhow::ensure!(mismatches == 0, "{mismatches} page(s) out of parity");
    println!("parity ok");
    Ok(())
}
