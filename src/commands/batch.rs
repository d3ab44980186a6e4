use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use common::Configuration;
use otlptranslator::{MetricDescriptor, MetricNamer};
use serde::Serialize;

use super::NamerArgs;

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// JSON lines file of `{"name", "unit", "kind"}` objects; stdin when omitted
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) namer: NamerArgs,
}

/// One output line: the descriptor plus its Prometheus name
#[derive(Debug, Serialize)]
struct TranslatedMetric<'a> {
    #[serde(flatten)]
    metric: &'a MetricDescriptor,
    prometheus_name: String,
}

impl BatchArgs {
    pub fn run(self, config: &Configuration) -> anyhow::Result<()> {
        let namer = self.namer.metric_namer(config);

        let reader: Box<dyn BufRead> = match &self.input {
            Some(path) => Box::new(BufReader::new(File::open(path).with_context(|| {
                format!("Failed to open input file {}", path.display())
            })?)),
            None => Box::new(io::stdin().lock()),
        };

        let stdout = io::stdout();
        let mut writer = BufWriter::new(stdout.lock());
        let count = translate_lines(reader, &mut writer, &namer)?;
        writer.flush().context("Failed to flush output")?;

        tracing::info!(count, "Translated metric names");
        Ok(())
    }
}

/// Translate every non-blank JSON line of `reader` and write one JSON line per
/// metric to `writer`. Returns the number of metrics translated.
pub(crate) fn translate_lines<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    namer: &MetricNamer,
) -> anyhow::Result<usize> {
    let mut count = 0;

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("Failed to read line {line_number}"))?;
        if line.trim().is_empty() {
            continue;
        }

        let metric: MetricDescriptor = serde_json::from_str(&line)
            .with_context(|| format!("Invalid metric descriptor on line {line_number}"))?;
        let translated = TranslatedMetric {
            prometheus_name: namer.build(&metric),
            metric: &metric,
        };

        serde_json::to_writer(&mut *writer, &translated)
            .with_context(|| format!("Failed to write result for line {line_number}"))?;
        writeln!(writer).context("Failed to write output")?;
        count += 1;
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: &str, namer: &MetricNamer) -> anyhow::Result<(usize, String)> {
        let mut output = Vec::new();
        let count = translate_lines(Cursor::new(input), &mut output, namer)?;
        Ok((count, String::from_utf8(output)?))
    }

    #[test]
    fn test_translate_lines() {
        let input = concat!(
            r#"{"name": "http.server.duration", "unit": "ms", "kind": "gauge"}"#,
            "\n\n",
            r#"{"name": "requests", "unit": "1", "kind": "counter"}"#,
            "\n",
        );

        let (count, output) = run(input, &MetricNamer::new("")).unwrap();
        assert_eq!(count, 2);

        let lines: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines[0]["prometheus_name"], "http_server_duration_milliseconds");
        assert_eq!(lines[0]["unit"], "ms");
        assert_eq!(lines[1]["prometheus_name"], "requests_total");
        assert_eq!(lines[1]["kind"], "monotonic_sum");
    }

    #[test]
    fn test_translate_lines_reports_line_number() {
        let input = "{\"name\": \"ok\"}\n{\"name\": \"bad\", \"kind\": \"timer\"}\n";
        let err = run(input, &MetricNamer::new("")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid metric descriptor on line 2");
    }

    #[test]
    fn test_run_reads_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.jsonl");
        std::fs::write(&path, "{\"name\": \"jobs\", \"kind\": \"counter\"}\n").unwrap();

        let args = BatchArgs {
            input: Some(path),
            namer: NamerArgs::default(),
        };
        assert!(args.run(&Configuration::default()).is_ok());

        let missing = BatchArgs {
            input: Some(dir.path().join("missing.jsonl")),
            namer: NamerArgs::default(),
        };
        assert!(missing.run(&Configuration::default()).is_err());
    }
}
