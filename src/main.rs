use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use mddoc::{Config, Document, DocxRenderer, HtmlRenderer, TypstRenderer, output};

#[derive(Parser)]
#[command(name = "mddoc")]
#[command(about = "Convert Markdown text to Word, HTML or PDF documents")]
struct Cli {
    /// Input Markdown file
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Docx)]
    format: OutputFormat,

    /// Output file (defaults to input name with the format's extension)
    #[arg(short, long, conflicts_with = "out_dir")]
    output: Option<PathBuf>,

    /// Write into this directory under a generated, unique file name
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Owner id embedded in generated file names
    #[arg(long, default_value = "0")]
    owner: String,

    /// Title used when the text has no level-1 heading
    #[arg(short, long, default_value = "")]
    title: String,

    /// TOML config file overriding the bundled style sheet
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Leave out the creation date line
    #[arg(long)]
    no_date: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Docx,
    /// HTML fragment
    Html,
    /// Standalone HTML page
    Page,
    Typst,
    Pdf,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Docx => "docx",
            OutputFormat::Html | OutputFormat::Page => "html",
            OutputFormat::Typst => "typ",
            OutputFormat::Pdf => "pdf",
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(path) => println!("Created {}", path.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> mddoc::Result<PathBuf> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::compiled_default(),
    };

    let markdown = fs::read_to_string(&cli.input).map_err(|e| {
        std::io::Error::new(e.kind(), format!("reading {}: {}", cli.input.display(), e))
    })?;

    let doc = mddoc::parse(&markdown, &cli.title);
    if doc.is_empty() {
        log::warn!("{} has no content, writing an empty document", cli.input.display());
    }

    let now = chrono::Local::now().naive_local();
    let date = (!cli.no_date).then(|| now.date());
    let bytes = render(cli.format, &doc, &config, date)?;

    let extension = cli.format.extension();
    match (&cli.out_dir, &cli.output) {
        (Some(dir), _) => {
            let name = output::artifact_file_name(&cli.owner, now, extension);
            Ok(output::write_artifact(dir, &name, &bytes)?)
        }
        (None, explicit) => {
            let path = explicit
                .clone()
                .unwrap_or_else(|| cli.input.with_extension(extension));
            write(&path, &bytes)?;
            Ok(path)
        }
    }
}

fn render(
    format: OutputFormat,
    doc: &Document,
    config: &Config,
    date: Option<chrono::NaiveDate>,
) -> mddoc::Result<Vec<u8>> {
    let bytes = match format {
        OutputFormat::Docx => {
            let mut renderer = DocxRenderer::new(config);
            if let Some(date) = date {
                renderer = renderer.with_date(date);
            }
            renderer.render_to_vec(doc)?
        }
        OutputFormat::Html => HtmlRenderer::new(config).render(doc).into_bytes(),
        OutputFormat::Page => {
            let mut renderer = HtmlRenderer::new(config);
            if let Some(date) = date {
                renderer = renderer.with_date(date);
            }
            renderer.render_page(doc).into_bytes()
        }
        OutputFormat::Typst | OutputFormat::Pdf => {
            let mut renderer = TypstRenderer::new(config);
            if let Some(date) = date {
                renderer = renderer.with_date(date);
            }
            let markup = renderer.render(doc);
            match format {
                OutputFormat::Pdf => mddoc::typst_to_pdf(markup)?,
                _ => markup.into_bytes(),
            }
        }
    };
    Ok(bytes)
}

fn write(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    fs::write(path, bytes).map_err(|e| {
        std::io::Error::new(e.kind(), format!("writing {}: {}", path.display(), e))
    })
}
