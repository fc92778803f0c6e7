use anyhow::{Context, Result, bail};
use rune_bidi::{BaseDirection, Paragraph, Resolver};
use rune_config::BidiConfig;
use std::path::PathBuf;

const USAGE: &str = "usage: rune-bidi [--ltr|--rtl|--auto] [--config PATH] TEXT...";

#[derive(Debug, Default)]
struct Args {
    direction: Option<BaseDirection>,
    config: Option<PathBuf>,
    text: Vec<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--ltr" => parsed.direction = Some(BaseDirection::Ltr),
            "--rtl" => parsed.direction = Some(BaseDirection::Rtl),
            "--auto" => parsed.direction = Some(BaseDirection::Auto),
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "-h" | "--help" => bail!("{USAGE}"),
            "--" => parsed.text.extend(args.by_ref()),
            other if other.starts_with("--config=") => {
                parsed.config = Some(PathBuf::from(&other["--config=".len()..]));
            }
            other if other.starts_with("--") => bail!("unknown option {other}\n{USAGE}"),
            _ => parsed.text.push(arg),
        }
    }
    if parsed.text.is_empty() {
        bail!("{USAGE}");
    }
    Ok(parsed)
}

fn init_logging(config: &BidiConfig) {
    let filter = config.logging.filter.as_deref().unwrap_or("warn");
    let env = env_logger::Env::default().default_filter_or(filter);
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn join<T: ToString>(values: impl IntoIterator<Item = T>) -> String {
    values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn report(para: &Paragraph, config: &BidiConfig) -> Result<()> {
    println!("base level: {}", para.base_level());
    println!("direction:  {:?}", para.direction());
    println!("levels:     {}", join(para.levels()));

    for span in para.paragraphs() {
        let line = para.slice_line(span.range.start, span.range.end)?;
        if para.paragraphs().len() > 1 {
            println!(
                "paragraph {}..{} at level {}",
                span.range.start, span.range.end, span.level
            );
        }
        if config.output.show_runs {
            for run in line.visual_runs() {
                println!(
                    "  run {}..{} level {} {:?}",
                    run.start + line.start(),
                    run.limit + line.start(),
                    run.level,
                    run.direction()
                );
            }
        }
        let order = line.visual_order().into_iter().map(|i| i + line.start());
        println!("visual:     {}", join(order));
        println!("reordered:  {}", line.reordered_text(config.output.mirror)?);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    let config = BidiConfig::load(args.config.as_deref())?;
    init_logging(&config);

    let text = args.text.join(" ");
    let base = args.direction.unwrap_or_else(|| config.base_direction());
    log::debug!("resolving {} chars with base {base:?}", text.chars().count());

    let para = Resolver::new()
        .with_options(config.resolve_options())
        .resolve(&text, base)
        .with_context(|| format!("failed to resolve {text:?}"))?;
    report(&para, &config)
}
