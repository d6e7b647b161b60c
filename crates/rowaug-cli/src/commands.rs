//! Command implementations.

use std::fs;

use anyhow::{Context, bail};
use tracing::info;

use rowaug_core::{AugmentationContext, Augmentor};
use rowaug_ingest::{CsvReader, CsvWriter, LineWriter, ReadMode};
use rowaug_model::{FieldMap, get_by_index};
use rowaug_services::{
    ColumnNameIndexMapper, QuotaCell, QuotaNode, TokenIssuer, UniquenessChecker, is_valid_email,
};
use rowaug_sql::{SqlCodeGenerator, SqlConfig};

use crate::cli::{AugmentArgs, SqlArgs, TokensArgs};

/// Parses a delimiter argument: a single character, or the escapes `\t`
/// and `\\`.
pub fn parse_delimiter(arg: &str) -> anyhow::Result<u8> {
    let delimiter = match arg {
        "\\t" | "\t" => '\t',
        "\\\\" => '\\',
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => bail!("delimiter must be a single character, got '{arg}'"),
            }
        }
    };
    u8::try_from(delimiter).with_context(|| format!("delimiter '{delimiter}' is not ASCII"))
}

pub fn run_tokens(args: &TokensArgs) -> anyhow::Result<()> {
    let mut issuer = TokenIssuer::new(args.length, args.case.into())?;
    if let Some(path) = &args.from_file {
        issuer.read_from_file(path, b'\t')?;
    }

    let mut writer = match &args.output {
        Some(path) => Some(LineWriter::create(path)?),
        None => None,
    };
    for _ in 0..args.count {
        let token = issuer.get_unique_token()?;
        match &mut writer {
            Some(writer) => writer.write_line(&token)?,
            None => println!("{token}"),
        }
    }
    if let Some(writer) = writer {
        writer.close()?;
    }
    info!(count = args.count, "issued tokens");
    Ok(())
}

pub fn run_sql(args: &SqlArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config '{}'", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid config '{}'", path.display()))?
        }
        None => {
            let Some(table) = &args.table else {
                bail!("either --table or --config is required");
            };
            SqlConfig::new(table, &args.default_type)
        }
    };

    let delimiter = parse_delimiter(&args.delimiter)?;
    let mut generator = SqlCodeGenerator::from_csv(&args.input, delimiter, config)?;

    let mut statements = vec![generator.drop_table(), generator.create_table()];
    let inserts = generator.insert_statements()?;
    if !inserts.is_empty() {
        statements.push(inserts);
    }
    let sql = statements.join("\n") + "\n";

    match &args.output {
        Some(path) => fs::write(path, sql)
            .with_context(|| format!("failed to write '{}'", path.display()))?,
        None => print!("{sql}"),
    }
    Ok(())
}

pub fn run_augment(args: &AugmentArgs) -> anyhow::Result<()> {
    let delimiter = parse_delimiter(&args.delimiter)?;
    let output_delimiter = match &args.output_delimiter {
        Some(arg) => parse_delimiter(arg)?,
        None => delimiter,
    };

    let mut reader = CsvReader::open(&args.input, delimiter)?;
    let header = reader
        .header()
        .map(<[String]>::to_vec)
        .filter(|names| !names.is_empty())
        .with_context(|| format!("input '{}' has no header row", args.input.display()))?;

    let augmentor = build_augmentor(args, &header)?;
    let mode = if args.skip_empty {
        ReadMode::SkipEmptyLines
    } else {
        ReadMode::ReturnEveryLine
    };

    let mut writer = CsvWriter::create(&args.output, output_delimiter)?;
    process_records(&mut reader, &mut writer, augmentor, &header, mode)?;
    writer.close()?;
    Ok(())
}

/// Builds the pipeline the flags describe: services registered into the
/// context, one named rule per requested augmentation.
fn build_augmentor(args: &AugmentArgs, header: &[String]) -> anyhow::Result<Augmentor> {
    let mut context = AugmentationContext::new().with_mapper(ColumnNameIndexMapper::new(header)?);
    if args.token_column.is_some() {
        let mut issuer = TokenIssuer::new(args.token_length, args.token_case.into())?;
        if let Some(path) = &args.token_file {
            issuer.read_from_file(path, b'\t')?;
        }
        context = context.with_tokens(issuer);
    }
    if args.unique_column.is_some() {
        context = context.with_unique(UniquenessChecker::new());
    }
    if let Some(path) = &args.quota_file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read quota targets '{}'", path.display()))?;
        let targets: QuotaNode = serde_json::from_str(&text)
            .with_context(|| format!("invalid quota targets '{}'", path.display()))?;
        context = context.with_quota(QuotaCell::new(targets)?);
    }

    let mut augmentor = Augmentor::with_context(context);

    if let Some(column) = args.email_column.clone() {
        augmentor.add_rule("email", move |ctx, record: &[String]| {
            let index = ctx.mapper()?.require_column_number(&column)?;
            let value = get_by_index(record, index).unwrap_or_default();
            let mut out = FieldMap::new();
            out.insert(format!("{column}_valid"), is_valid_email(value));
            Ok(out)
        })?;
    }
    if let Some(column) = args.unique_column.clone() {
        augmentor.add_rule("unique", move |ctx, record: &[String]| {
            let index = ctx.mapper()?.require_column_number(&column)?;
            let value = get_by_index(record, index).unwrap_or_default().to_string();
            let is_new = ctx.unique_mut()?.is_new(&value, &column, false);
            let mut out = FieldMap::new();
            out.insert(format!("{column}_is_new"), is_new);
            Ok(out)
        })?;
    }
    if let Some(column) = args.quota_column.clone() {
        augmentor.add_rule("quota", move |ctx, record: &[String]| {
            let index = ctx.mapper()?.require_column_number(&column)?;
            let cell = get_by_index(record, index).unwrap_or_default().to_string();
            let admitted = ctx.quota_mut()?.add(1, &[cell.as_str()], false);
            let mut out = FieldMap::new();
            out.insert("in_sample", admitted);
            Ok(out)
        })?;
    }
    if let Some(column) = args.token_column.clone() {
        augmentor.add_rule("token", move |ctx, _record| {
            let token = ctx.tokens_mut()?.get_unique_token()?;
            let mut out = FieldMap::new();
            out.insert(column.clone(), token);
            Ok(out)
        })?;
    }

    Ok(augmentor)
}

fn process_records(
    reader: &mut CsvReader,
    writer: &mut CsvWriter,
    mut augmentor: Augmentor,
    header: &[String],
    mode: ReadMode,
) -> anyhow::Result<()> {
    let mut header_written = false;
    let mut records = 0usize;
    while let Some(record) = reader.next_record(mode)? {
        let augmented = augmentor
            .augment(&record)
            .with_context(|| format!("record {} failed", reader.line_number()))?;

        if !header_written {
            let names: Vec<&str> = header
                .iter()
                .map(String::as_str)
                .chain(augmented.keys())
                .collect();
            writer.write_record(names)?;
            header_written = true;
        }

        let mut row = record;
        if row.len() < header.len() {
            row.resize(header.len(), String::new()); // right-pad short records
        }
        row.extend(augmented.values().map(ToString::to_string));
        writer.write_record(&row)?;
        records += 1;
    }
    if !header_written {
        // no data records; still emit the original header
        writer.write_record(header)?;
    }
    info!(records, "augmented records");
    Ok(())
}
