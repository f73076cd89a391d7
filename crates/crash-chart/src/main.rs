// File: crates/crash-chart/src/main.rs
// Summary: CLI that loads the incident CSV once, renders a bar/pie chart to SVG (and PNG),
//          and optionally keeps re-rendering as selections change on stdin.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crash_chart_core::controls::{CHART_TYPE, OPERATOR, YEAR};
use crash_chart_core::{ChartKind, ControlEvent, Dashboard, RenderOptions, YearMode};

/// Render airplane-incident charts grouped by operator.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Incident CSV with Date, Operator, Fatalities and Aboard columns
    #[arg(default_value = "airplane_crashes.csv")]
    input: PathBuf,

    /// TOML file with render options (size, insets, theme, year_mode, ...)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Year to show (defaults to the first year in the data)
    #[arg(long)]
    year: Option<i32>,

    /// Only operators containing this text (case-sensitive)
    #[arg(long)]
    operator: Option<String>,

    /// Chart type
    #[arg(long, value_enum)]
    chart: Option<ChartArg>,

    /// How Date values become years
    #[arg(long, value_enum)]
    year_mode: Option<YearModeArg>,

    /// Theme preset: light or dark
    #[arg(long)]
    theme: Option<String>,

    /// SVG output path
    #[arg(long, default_value = "target/out/crash_chart.svg")]
    out: PathBuf,

    /// Also rasterize each render to this PNG path
    #[arg(long)]
    png: Option<PathBuf>,

    /// Read selection changes from stdin and re-render after each one
    #[arg(long)]
    interactive: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ChartArg {
    Bar,
    Pie,
}

impl From<ChartArg> for ChartKind {
    fn from(arg: ChartArg) -> Self {
        match arg {
            ChartArg::Bar => ChartKind::Bar,
            ChartArg::Pie => ChartKind::Pie,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum YearModeArg {
    /// Date read as a number; only bare years match
    Raw,
    /// Date parsed as a calendar date
    Calendar,
}

impl From<YearModeArg> for YearMode {
    fn from(arg: YearModeArg) -> Self {
        match arg {
            YearModeArg::Raw => YearMode::Raw,
            YearModeArg::Calendar => YearMode::Calendar,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let opts = build_options(&args)?;
    log::info!("using input file: {}", args.input.display());
    let mut dashboard = Dashboard::initialize(&args.input, opts)
        .with_context(|| format!("failed to load '{}'", args.input.display()))?;

    for event in initial_events(&args) {
        dashboard.handle(event)?;
    }
    write_outputs(&dashboard, &args)?;

    if args.interactive {
        run_interactive(&mut dashboard, &args)?;
    }
    Ok(())
}

/// Config file first, then CLI overrides.
fn build_options(args: &Args) -> Result<RenderOptions> {
    let mut opts = match &args.config {
        Some(p) => RenderOptions::load(p).with_context(|| format!("reading config {}", p.display()))?,
        None => RenderOptions::default(),
    };
    if let Some(mode) = args.year_mode {
        opts.year_mode = mode.into();
    }
    if let Some(theme) = &args.theme {
        opts.theme = theme.clone();
    }
    Ok(opts)
}

fn initial_events(args: &Args) -> Vec<ControlEvent> {
    let mut events = Vec::new();
    if let Some(year) = args.year {
        events.push(ControlEvent::Year(year));
    }
    if let Some(op) = &args.operator {
        events.push(ControlEvent::Operator(op.clone()));
    }
    if let Some(kind) = args.chart {
        events.push(ControlEvent::Chart(kind.into()));
    }
    events
}

fn write_outputs(dashboard: &Dashboard, args: &Args) -> Result<()> {
    dashboard.write_svg(&args.out)?;
    println!("Wrote {}", args.out.display());
    if let Some(png) = &args.png {
        dashboard.write_png(png)?;
        println!("Wrote {}", png.display());
    }
    Ok(())
}

enum Command {
    Event(ControlEvent),
    Options,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let cmd = match head {
        "year" => Command::Event(ControlEvent::Year(
            rest.trim().parse().with_context(|| format!("not a year: '{}'", rest.trim()))?,
        )),
        "operator" => Command::Event(ControlEvent::Operator(rest.to_string())),
        "chart" => Command::Event(ControlEvent::Chart(rest.parse()?)),
        "options" => Command::Options,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => anyhow::bail!("unknown command '{other}' (try 'help')"),
    };
    Ok(Some(cmd))
}

fn run_interactive(dashboard: &mut Dashboard, args: &Args) -> Result<()> {
    print_help();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line?;

        let command = match parse_command(&line) {
            Ok(Some(c)) => c,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{e:#}");
                continue;
            }
        };
        match command {
            Command::Event(event) => match dashboard.handle(event) {
                Ok(true) => write_outputs(dashboard, args)?,
                Ok(false) => {}
                Err(e) => eprintln!("{e}"),
            },
            Command::Options => print_options(dashboard),
            Command::Help => print_help(),
            Command::Quit => break,
        }
    }
    Ok(())
}

fn print_help() {
    println!("commands: year <n> | operator [text] | chart <bar|pie> | options | help | quit");
}

fn print_options(dashboard: &Dashboard) {
    for id in [YEAR, OPERATOR, CHART_TYPE] {
        let Some(widget) = dashboard.controls().get(id) else { continue };
        let shown: Vec<&str> = widget.options().iter().take(20).map(String::as_str).collect();
        let more = widget.options().len().saturating_sub(shown.len());
        println!(
            "{id} = {:?}  options: {}{}",
            widget.value().unwrap_or_default(),
            shown.join(" | "),
            if more > 0 { format!(" (+{more} more)") } else { String::new() }
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert!(matches!(parse_command("year 1985").unwrap(), Some(Command::Event(ControlEvent::Year(1985)))));
        assert!(matches!(parse_command("chart PIE").unwrap(), Some(Command::Event(ControlEvent::Chart(ChartKind::Pie)))));
        assert!(matches!(
            parse_command("operator Pan Am").unwrap(),
            Some(Command::Event(ControlEvent::Operator(ref s))) if s == "Pan Am"
        ));
        assert!(matches!(parse_command("operator").unwrap(), Some(Command::Event(ControlEvent::Operator(ref s))) if s.is_empty()));
        assert!(parse_command("   ").unwrap().is_none());
        assert!(parse_command("year soon").is_err());
        assert!(parse_command("zoom 2").is_err());
    }

    #[test]
    fn enum_flags_are_validated_by_clap() {
        let args = Args::try_parse_from(["crash-chart", "data.csv", "--chart", "pie", "--year-mode", "calendar"]).unwrap();
        assert_eq!(args.chart, Some(ChartArg::Pie));
        assert_eq!(args.input, PathBuf::from("data.csv"));
        let events = initial_events(&args);
        assert_eq!(events, vec![ControlEvent::Chart(ChartKind::Pie)]);
        assert_eq!(build_options(&args).unwrap().year_mode, YearMode::Calendar);

        assert!(Args::try_parse_from(["crash-chart", "--chart", "line"]).is_err());
        assert!(Args::try_parse_from(["crash-chart", "--year-mode", "fiscal"]).is_err());
    }

    #[test]
    fn input_defaults_and_is_passed_through() {
        let args = Args::try_parse_from(["crash-chart", "--year", "1985"]).unwrap();
        assert_eq!(args.input, PathBuf::from("airplane_crashes.csv"));
        assert_eq!(initial_events(&args), vec![ControlEvent::Year(1985)]);
    }
}
