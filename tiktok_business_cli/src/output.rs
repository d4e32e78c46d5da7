use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tiktok_business_api::ResourceKind;

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct EntityRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    #[serde(rename = "Status")]
    status: String,
}

#[derive(Tabled, Serialize)]
struct FieldRow {
    #[tabled(rename = "Field")]
    #[serde(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

const STATUS_FIELDS: &[&str] = &["operation_status", "secondary_status", "status"];

fn name_fields(kind: ResourceKind) -> &'static [&'static str] {
    match kind {
        ResourceKind::Campaign | ResourceKind::Spc => &["campaign_name"],
        ResourceKind::AdGroup => &["adgroup_name"],
        ResourceKind::Ad => &["ad_name"],
        ResourceKind::Image | ResourceKind::Video => &["file_name", "material_id"],
        ResourceKind::Identity => &["display_name"],
        ResourceKind::Account => &["advertiser_name", "name"],
        ResourceKind::Report => &[],
    }
}

// -- Row builders --

fn first_text(item: &Value, fields: &[&str]) -> String {
    fields
        .iter()
        .find_map(|field| item.get(*field).filter(|v| !v.is_null()))
        .map(value_text)
        .unwrap_or_default()
}

fn build_entity_rows(kind: ResourceKind, items: &[Value]) -> Vec<EntityRow> {
    items
        .iter()
        .map(|item| EntityRow {
            id: first_text(item, &[kind.id_field()]),
            name: first_text(item, name_fields(kind)),
            status: first_text(item, STATUS_FIELDS),
        })
        .collect()
}

fn build_field_rows(value: &Value) -> Vec<FieldRow> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(field, value)| FieldRow {
                field: field.clone(),
                value: value_text(value),
            })
            .collect(),
        Value::Null => Vec::new(),
        other => vec![FieldRow {
            field: "value".to_string(),
            value: value_text(other),
        }],
    }
}

/// Flattens report rows (`{"dimensions": {...}, "metrics": {...}}`) into a
/// header line plus one record per row. Column order follows the first row.
fn build_report_records(rows: &[Value]) -> (Vec<String>, Vec<Vec<String>>) {
    let mut headers: Vec<String> = Vec::new();
    for section in ["dimensions", "metrics"] {
        if let Some(Value::Object(map)) = rows.first().and_then(|row| row.get(section)) {
            headers.extend(map.keys().cloned());
        }
    }

    let records = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|header| {
                    row.get("dimensions")
                        .and_then(|d| d.get(header))
                        .or_else(|| row.get("metrics").and_then(|m| m.get(header)))
                        .map(value_text)
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    (headers, records)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// -- Printers --

pub fn print_entities(kind: ResourceKind, items: &[Value], format: &OutputFormat) -> Result<()> {
    let rows = build_entity_rows(kind, items);
    match format {
        OutputFormat::Json => print_json(&items),
        OutputFormat::Csv => print_csv(&rows)?,
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => print_markdown(Table::new(rows)),
    }
    Ok(())
}

pub fn print_fields(value: &Value, format: &OutputFormat) -> Result<()> {
    let rows = build_field_rows(value);
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Csv => print_csv(&rows)?,
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => print_markdown(Table::new(rows)),
    }
    Ok(())
}

pub fn print_report(rows: &[Value], format: &OutputFormat) -> Result<()> {
    if let OutputFormat::Json = format {
        print_json(&rows);
        return Ok(());
    }

    let (headers, records) = build_report_records(rows);
    if let OutputFormat::Csv = format {
        let mut wtr = csv::Writer::from_writer(std::io::stdout());
        wtr.write_record(&headers)?;
        for record in &records {
            wtr.write_record(record)?;
        }
        wtr.flush()?;
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(headers);
    for record in records {
        builder.push_record(record);
    }
    let table = builder.build();
    match format {
        OutputFormat::Markdown => print_markdown(table),
        _ => println!("{}", table),
    }
    Ok(())
}

fn print_csv<T: Serialize>(rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn print_markdown(mut table: Table) {
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
