//! Subcommand implementations.

use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use dsv_codec::{DsvReader, DsvWriter, FormatConfig, Record, format_line};

use crate::cli::{CatArgs, ConvertArgs, OutputArg};

/// Stream records from a table to stdout.
pub fn run_cat(args: &CatArgs) -> Result<()> {
    let config = FormatConfig::new(&args.delimiter, &args.enclosure, args.header)
        .context("invalid format configuration")?;
    let reader = DsvReader::open(&args.file, config)
        .with_context(|| format!("open {}", args.file.display()))?;

    let stdout = io::stdout().lock();
    let mut out = BufWriter::new(stdout);
    let count = cat_records(reader, &config, args.output, &mut out)
        .with_context(|| format!("cat {}", args.file.display()))?;
    out.flush().context("flush stdout")?;
    tracing::info!(records = count, "cat complete");
    Ok(())
}

/// Stream every record from `reader` into `out`.
///
/// Plain output reproduces the table in its original column order: the
/// header line (when one is in effect) comes first, and named records are
/// serialized in header order rather than mapping order.
fn cat_records(
    reader: DsvReader,
    config: &FormatConfig,
    output: OutputArg,
    out: &mut impl Write,
) -> Result<u64> {
    let headers: Option<Vec<String>> = reader.headers().map(<[String]>::to_vec);
    if let Some(headers) = &headers
        && matches!(output, OutputArg::Plain)
    {
        writeln!(out, "{}", format_line(headers, config))?;
    }

    let mut count = 0u64;
    for record in reader {
        let record = record.context("read record")?;
        match output {
            OutputArg::Json => {
                serde_json::to_writer(&mut *out, &record).context("encode record as JSON")?;
                writeln!(out)?;
            }
            OutputArg::Plain => {
                let row = row_in_column_order(&record, headers.as_deref());
                writeln!(out, "{}", format_line(&row, config))?;
            }
        }
        count += 1;
    }
    Ok(count)
}

/// Re-encode a table from one format configuration into another, one
/// record in flight at a time.
pub fn run_convert(args: &ConvertArgs) -> Result<()> {
    let input_config = FormatConfig::new(&args.delimiter, &args.enclosure, args.header)
        .context("invalid input format configuration")?;
    let output_config = FormatConfig::new(
        args.out_delimiter.as_deref().unwrap_or(&args.delimiter),
        args.out_enclosure.as_deref().unwrap_or(&args.enclosure),
        args.header,
    )
    .context("invalid output format configuration")?;

    let reader = DsvReader::open(&args.input, input_config)
        .with_context(|| format!("open {}", args.input.display()))?;
    let headers: Option<Vec<String>> = reader.headers().map(<[String]>::to_vec);

    let mut writer = DsvWriter::create(&args.output, output_config)
        .with_context(|| format!("create {}", args.output.display()))?;
    if let Some(headers) = &headers {
        writer.write_header(headers).context("write header")?;
    }

    let mut count = 0u64;
    for record in reader {
        let record =
            record.with_context(|| format!("read {}", args.input.display()))?;
        let row = row_in_column_order(&record, headers.as_deref());
        writer
            .write_row(&row)
            .with_context(|| format!("write {}", args.output.display()))?;
        count += 1;
    }
    writer.finish().context("finish output")?;
    tracing::info!(records = count, "convert complete");
    Ok(())
}

/// Field values of a record in the original column order: positional for
/// headerless records, header order for named ones.
fn row_in_column_order(record: &Record, headers: Option<&[String]>) -> Vec<String> {
    match headers {
        Some(headers) => headers
            .iter()
            .map(|name| record.get(name).unwrap_or("").to_string())
            .collect(),
        None => record.values().iter().map(|v| (*v).to_string()).collect(),
    }
}
