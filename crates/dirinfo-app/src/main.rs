use std::io::{self, BufRead, Write};

use anyhow::bail;
use dirinfo_core::config::{Settings, load_config};
use dirinfo_rfc::rfc::vcard::{DirectoryInfoReader, DirectoryInfoWriter, ScanOptions, WriteOptions};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Re-folded content lines.
    Fmt,
    /// One JSON object per content line.
    Json,
}

impl Mode {
    fn from_arg(arg: Option<&str>) -> anyhow::Result<Self> {
        match arg {
            None | Some("fmt") => Ok(Self::Fmt),
            Some("json") => Ok(Self::Json),
            Some(other) => bail!("unknown mode {other:?}, expected `fmt` or `json`"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let mode = Mode::from_arg(std::env::args().nth(1).as_deref())?;

    let config = load_config()?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping info");
    }

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    let count = run(mode, &config, stdin, stdout)?;

    tracing::info!(lines = count, ?mode, "Done");

    Ok(())
}

/// Copies content lines from `input` to `output` in the chosen format and
/// returns how many were written.
fn run<R: BufRead, W: Write>(
    mode: Mode,
    config: &Settings,
    input: R,
    mut output: W,
) -> anyhow::Result<usize> {
    let mut reader = DirectoryInfoReader::new(input).with_options(ScanOptions::from(&config.reader));
    let mut count = 0;

    match mode {
        Mode::Fmt => {
            let options = WriteOptions::try_from(&config.writer)?;
            let mut writer = DirectoryInfoWriter::with_options(output, options);
            while let Some(record) = reader.read_record()? {
                writer.write_all(&record)?;
                count += record.len();
            }
            writer.flush()?;
        }
        Mode::Json => {
            for line in reader {
                serde_json::to_writer(&mut output, &line?)?;
                output.write_all(b"\n")?;
                count += 1;
            }
            output.flush()?;
        }
    }

    Ok(count)
}
