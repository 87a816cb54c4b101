use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use figstack::{ConvertOpts, Converter, FigmaClient};

#[derive(Parser, Debug)]
#[command(name = "figstack", version)]
struct Cli {
    /// Figma API token.
    #[arg(long, env = "FIGMA_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert one page of a Figma file into a template and print it as JSON.
    Convert(ConvertArgs),
    /// Convert every page of a Figma file; prints a name-keyed JSON object.
    ConvertAll(ConvertAllArgs),
    /// List the pages of a Figma file.
    ListPages(ListPagesArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Figma file key.
    file_key: String,

    /// Page name; defaults to the file's first page.
    #[arg(long)]
    page: Option<String>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct ConvertAllArgs {
    /// Figma file key.
    file_key: String,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct ListPagesArgs {
    /// Figma file key.
    file_key: String,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output width in pixels.
    #[arg(long, default_value_t = 1200)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = 1200)]
    height: u32,

    /// Clip duration in seconds (video mode).
    #[arg(long, default_value_t = 5.0)]
    duration: f64,

    /// Fetch rendered node images and substitute them for placeholders.
    #[arg(long)]
    populate_images: bool,

    /// Still-image output: no fps field, minimal clip length.
    #[arg(long)]
    image_only: bool,

    /// Compact JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,
}

impl OutputArgs {
    fn to_opts(&self) -> ConvertOpts {
        ConvertOpts {
            output_width: self.width,
            output_height: self.height,
            duration: self.duration,
            populate_images: self.populate_images,
            image_only: self.image_only,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let token = cli
        .token
        .context("a Figma API token is required (--token or FIGMA_TOKEN)")?;
    let converter = Converter::new(FigmaClient::new(token));

    match cli.cmd {
        Command::Convert(args) => {
            let template = converter
                .convert(&args.file_key, args.page.as_deref(), &args.output.to_opts())
                .with_context(|| format!("convert file '{}'", args.file_key))?;
            print_json(&template, args.output.compact)
        }
        Command::ConvertAll(args) => {
            let templates = converter
                .convert_all_pages(&args.file_key, &args.output.to_opts())
                .with_context(|| format!("convert all pages of '{}'", args.file_key))?;
            print_json(&templates, args.output.compact)
        }
        Command::ListPages(args) => {
            let pages = converter
                .list_pages(&args.file_key)
                .with_context(|| format!("list pages of '{}'", args.file_key))?;
            print_json(&pages, false)
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T, compact: bool) -> anyhow::Result<()> {
    let s = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{s}");
    Ok(())
}
