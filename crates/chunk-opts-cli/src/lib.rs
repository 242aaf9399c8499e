//! `chunk-opts` command-line front end.
//!
//! Opens an R Markdown file, seeds the setup chunk's baseline from its existing options call,
//! applies the edits given as flags and prints (or writes back) the result.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;

use chunk_opts::{
    ChunkDocument, ChunkOptionsConfig, EditDirectives, EditorSurface, Position, SetupChunkPanel,
    Tokenizer,
};
use chunk_opts_lexer::{CallArgumentExtractor, RMarkdownLexer, find_chunks, find_setup_chunk};

/// Rewrite the knitr chunk options call of an R Markdown setup chunk
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "chunk-opts", version, about, long_about = None)]
pub struct Cli {
    /// R Markdown file to edit
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// 1-based line of the chunk header to edit (default: the setup chunk)
    #[arg(long, value_name = "LINE")]
    pub chunk: Option<usize>,

    /// Value for `echo`
    #[arg(long, value_name = "VALUE")]
    pub echo: Option<String>,

    /// Value for `eval`
    #[arg(long, value_name = "VALUE")]
    pub eval: Option<String>,

    /// Value for `include`
    #[arg(long, value_name = "VALUE")]
    pub include: Option<String>,

    /// Set `message` to TRUE or FALSE
    #[arg(long, value_name = "BOOL")]
    pub message: Option<bool>,

    /// Set `warning` to TRUE or FALSE
    #[arg(long, value_name = "BOOL")]
    pub warning: Option<bool>,

    /// Value for `fig.width`
    #[arg(long, value_name = "VALUE", default_value = "")]
    pub fig_width: String,

    /// Value for `fig.height`
    #[arg(long, value_name = "VALUE", default_value = "")]
    pub fig_height: String,

    /// JSON config overriding the call shape and layout
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the options currently set as JSON and exit
    #[arg(long)]
    pub print_baseline: bool,

    /// Write the result back to FILE instead of stdout
    #[arg(long)]
    pub in_place: bool,
}

impl Cli {
    /// Form edits described by the flags.
    pub fn edit_directives(&self) -> EditDirectives {
        EditDirectives {
            echo: self.echo.clone(),
            eval: self.eval.clone(),
            include: self.include.clone(),
            message: self.message.into(),
            warning: self.warning.into(),
            fig_height: self.fig_height.clone(),
            fig_width: self.fig_width.clone(),
        }
    }

    fn load_config(&self) -> Result<ChunkOptionsConfig> {
        match &self.config {
            Some(path) => ChunkOptionsConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display())),
            None => Ok(ChunkOptionsConfig::default()),
        }
    }
}

/// Open a panel on the chunk headed at 1-based `line`, or on the setup chunk.
pub fn open_panel(
    doc: &ChunkDocument,
    line: Option<usize>,
    config: ChunkOptionsConfig,
) -> Result<SetupChunkPanel<RMarkdownLexer>> {
    let lexer = RMarkdownLexer::from_config(&config).context("failed to build R Markdown lexer")?;
    let chunks = find_chunks(&lexer.tokenize(&doc.text()));

    let chunk = match line {
        Some(line) => {
            let row = line
                .checked_sub(1)
                .ok_or_else(|| anyhow!("chunk lines are 1-based"))?;
            chunks
                .iter()
                .find(|chunk| chunk.header.row == row)
                .ok_or_else(|| anyhow!("no code chunk starts on line {line}"))?
        }
        None => find_setup_chunk(&chunks).ok_or_else(|| anyhow!("document has no R chunk"))?,
    };
    if !chunk.is_r() {
        bail!("chunk on line {} is not an R chunk", chunk.header.row + 1);
    }
    tracing::debug!(row = chunk.header.row, label = ?chunk.label, "editing chunk");

    let mut extractor =
        CallArgumentExtractor::new(&config).context("failed to build option extractor")?;
    let mut panel = SetupChunkPanel::open(Position::new(chunk.header.row, 0), lexer, config);
    panel.initialize_with(doc, &mut extractor);
    Ok(panel)
}

/// Run the command, writing output to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let config = cli.load_config()?;
    let text = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;

    let mut doc = ChunkDocument::new(&text);
    let mut panel = open_panel(&doc, cli.chunk, config)?;

    if cli.print_baseline {
        let baseline = panel.baseline().options().cloned().unwrap_or_default();
        writeln!(out, "{}", serde_json::to_string_pretty(&baseline)?)?;
        return Ok(());
    }

    let outcome = panel.commit(&mut doc, &cli.edit_directives())?;
    tracing::info!(
        replaced = %outcome.replaced,
        located = outcome.located,
        "chunk options written"
    );

    let result = doc.text_for_saving();
    if cli.in_place {
        std::fs::write(&cli.file, result)
            .with_context(|| format!("failed to write {}", cli.file.display()))?;
    } else {
        out.write_all(result.as_bytes())?;
    }
    Ok(())
}
