use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::LevelFilter;

use flp::json_output;
use flp::project::Project;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Copy, Clone, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
    Jsonl,
}

struct FlpDump {
    input: PathBuf,
    output_format: OutputFormat,
    output: Box<dyn Write>,
    verify: bool,
}

fn command() -> Command {
    Command::new("flp_dump")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Utility to dump FL Studio project files")
        .arg(
            Arg::new("INPUT")
                .required(true)
                .value_name("FLP")
                .help("Project file to dump"),
        )
        .arg(
            Arg::new("output-format")
                .short('o')
                .long("output-format")
                .value_parser(["text", "json", "jsonl"])
                .default_value("text")
                .help("One line per event (text/jsonl) or a single JSON document"),
        )
        .arg(
            Arg::new("output-target")
                .short('f')
                .long("output-target")
                .value_name("FILE")
                .help("Write output to a file instead of stdout"),
        )
        .arg(
            Arg::new("verify")
                .long("verify")
                .action(ArgAction::SetTrue)
                .help("Re-serialize the parsed file and fail unless it is byte-identical to the input"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help("-v for info, -vv for debug, -vvv for trace"),
        )
}

impl FlpDump {
    fn from_cli_matches(matches: &ArgMatches) -> Result<Self> {
        let input = PathBuf::from(matches.get_one::<String>("INPUT").expect("required"));

        let output_format = match matches
            .get_one::<String>("output-format")
            .expect("has default")
            .as_str()
        {
            "json" => OutputFormat::Json,
            "jsonl" => OutputFormat::Jsonl,
            _ => OutputFormat::Text,
        };

        let output: Box<dyn Write> = match matches.get_one::<String>("output-target") {
            Some(path) => Box::new(BufWriter::new(
                File::create(path)
                    .with_context(|| format!("failed to create output file `{path}`"))?,
            )),
            None => Box::new(io::stdout()),
        };

        Ok(FlpDump {
            input,
            output_format,
            output,
            verify: matches.get_flag("verify"),
        })
    }

    fn run(&mut self) -> Result<()> {
        let data = fs::read(&self.input)
            .with_context(|| format!("failed to read `{}`", self.input.display()))?;

        let file = flp::parse(&data)
            .with_context(|| format!("failed to parse `{}`", self.input.display()))?;

        if self.verify {
            let reserialized = flp::serialize(&file);
            if reserialized != data {
                bail!(
                    "re-serialization of `{}` is not byte-identical ({} bytes in, {} bytes out)",
                    self.input.display(),
                    data.len(),
                    reserialized.len()
                );
            }
            writeln!(self.output, "OK: {} round-trips byte-for-byte", self.input.display())?;
            return Ok(());
        }

        match self.output_format {
            OutputFormat::Text => self.dump_text(&file),
            OutputFormat::Json => self.dump_json(&file),
            OutputFormat::Jsonl => self.dump_jsonl(&file),
        }
    }

    fn dump_text(&mut self, file: &flp::FlpFile) -> Result<()> {
        let project = Project::new(file);
        writeln!(self.output, "version: {}", file.version())?;
        if let Some(title) = project.title() {
            writeln!(self.output, "title: {title}")?;
        }
        if let Some(tempo) = project.tempo() {
            writeln!(self.output, "tempo: {tempo} BPM")?;
        }
        for plugin in project.plugins() {
            writeln!(
                self.output,
                "plugin: {} ({})",
                plugin.name.as_deref().unwrap_or("?"),
                plugin.vendor.as_deref().unwrap_or("?")
            )?;
        }
        writeln!(self.output)?;

        let mut offset = 22usize;
        for (index, event) in file.events.iter().enumerate() {
            let summary = json_output::summarize(event, index, offset, file.use_unicode());
            let value = summary
                .value
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default();
            writeln!(
                self.output,
                "{index:5}  {offset:8}  {id:3}  {name:<20}  {kind:<7}  {len:6}  {value}",
                id = summary.id,
                name = summary.name.unwrap_or("-"),
                kind = summary.kind,
                len = summary.payload_len,
            )?;
            offset += event.serialized_len();
        }
        Ok(())
    }

    fn dump_json(&mut self, file: &flp::FlpFile) -> Result<()> {
        let document = serde_json::json!({
            "version": file.version(),
            "use_unicode": file.use_unicode(),
            "events": collect_summaries(file),
        });
        serde_json::to_writer_pretty(&mut self.output, &document)?;
        writeln!(self.output)?;
        Ok(())
    }

    fn dump_jsonl(&mut self, file: &flp::FlpFile) -> Result<()> {
        for summary in collect_summaries(file) {
            serde_json::to_writer(&mut self.output, &summary)?;
            writeln!(self.output)?;
        }
        Ok(())
    }
}

fn collect_summaries(file: &flp::FlpFile) -> Vec<json_output::EventSummary> {
    let mut offset = 22usize;
    file.events
        .iter()
        .enumerate()
        .map(|(index, event)| {
            let summary = json_output::summarize(event, index, offset, file.use_unicode());
            offset += event.serialized_len();
            summary
        })
        .collect()
}

fn main() -> Result<()> {
    let matches = command().get_matches();

    let level = match matches.get_count("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    FlpDump::from_cli_matches(&matches)?.run()
}
