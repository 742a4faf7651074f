//! `docker-format enrich` command handler
//!
//! Reads one `{"tag","time","record"}` event per line, groups consecutive
//! events that share a tag into a batch, runs each batch through
//! `RecordFilter::emit_stream` and writes the re-emitted events as NDJSON
//! in input order. Lines that fail to decode are logged and skipped.

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tracing::{info, warn};

use docker_format_core::config::DockerFormatConfig;
use docker_format_core::error::{DockerFormatError, RecordError};
use docker_format_core::pipeline::{CollectingRouter, RecordFilter};
use docker_format_core::types::{Event, Record};
use docker_format_filter::{ConfigSource, FilterConfig, RecordEnricher};

use crate::cli::EnrichArgs;
use crate::error::CliError;

/// Maximum number of events handed to the filter in one batch.
pub const MAX_BATCH: usize = 256;

/// Counters reported once the input is exhausted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnrichSummary {
    /// Events written to the output.
    pub events: usize,
    /// Lines that could not be decoded.
    pub skipped: usize,
    /// Batches passed through the filter.
    pub batches: usize,
}

/// Execute the `enrich` command against stdin or `--input`.
pub async fn execute(args: EnrichArgs, config: &DockerFormatConfig) -> Result<(), CliError> {
    let mut enricher = RecordEnricher::new(FilterConfig::from_core(&config.filter))?;
    let mut stdout = BufWriter::new(tokio::io::stdout());

    let result = match &args.input {
        Some(path) => {
            info!(path = %path.display(), "enriching events from file");
            let file = tokio::fs::File::open(path).await?;
            run(&mut enricher, BufReader::new(file), &mut stdout).await
        }
        None => {
            info!("enriching events from stdin");
            run(&mut enricher, BufReader::new(tokio::io::stdin()), &mut stdout).await
        }
    };
    stdout.flush().await?;
    let summary = result?;

    info!(
        events = summary.events,
        skipped = summary.skipped,
        batches = summary.batches,
        cached_containers = enricher.resolver_mut().store().len(),
        "enrichment finished"
    );
    Ok(())
}

/// Enrich every event from `reader` and write the results to `writer`.
pub async fn run<S, R, W>(
    enricher: &mut RecordEnricher<S>,
    mut reader: R,
    writer: &mut W,
) -> Result<EnrichSummary, CliError>
where
    S: ConfigSource,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut summary = EnrichSummary::default();
    let mut batch = Batch::default();
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let read = match reader.read_until(b'\n', &mut buf).await {
            Ok(read) => read,
            Err(e) => {
                flush(enricher, &mut batch, writer, &mut summary).await?;
                return Err(e.into());
            }
        };
        if read == 0 {
            break;
        }
        line_no += 1;

        let line = buf.trim_ascii();
        if line.is_empty() {
            continue;
        }

        // Decoded from bytes: invalid UTF-8 is just another malformed line.
        let event: Event<Value> = match serde_json::from_slice(line) {
            Ok(event) => event,
            Err(e) => {
                let err = RecordError::Decode {
                    line: line_no,
                    reason: e.to_string(),
                };
                warn!(error = %err, "skipping malformed event");
                summary.skipped += 1;
                continue;
            }
        };

        if batch.tag != event.tag || batch.events.len() >= MAX_BATCH {
            flush(enricher, &mut batch, writer, &mut summary).await?;
            batch.tag = event.tag;
        }
        batch.events.push((event.time, event.record));
    }

    flush(enricher, &mut batch, writer, &mut summary).await?;
    Ok(summary)
}

#[derive(Default)]
struct Batch {
    tag: String,
    events: Vec<(Value, Record)>,
}

async fn flush<S, W>(
    enricher: &mut RecordEnricher<S>,
    batch: &mut Batch,
    writer: &mut W,
    summary: &mut EnrichSummary,
) -> Result<(), CliError>
where
    S: ConfigSource,
    W: AsyncWrite + Unpin,
{
    if batch.events.is_empty() {
        return Ok(());
    }

    let mut router = CollectingRouter::new();
    let mut chain = || summary.batches += 1;
    enricher.emit_stream(&batch.tag, batch.events.drain(..), &mut router, &mut chain);

    for (tag, time, record) in router.emitted {
        let mut line = serde_json::to_vec(&Event::new(tag, time, record))
            .map_err(|e| DockerFormatError::from(RecordError::Encode(e.to_string())))?;
        line.push(b'\n');
        writer.write_all(&line).await?;
        summary.events += 1;
    }
    Ok(())
}
