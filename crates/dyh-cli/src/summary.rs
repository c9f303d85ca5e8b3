use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dyh_catalog::{CatalogReport, RuleCatalog};
use dyh_engine::Evaluation;
use dyh_model::{AnswerSet, QuestionId, StrategyId, StrategyMatch};

use crate::cli::OutputFormatArg;

pub fn print_determination(evaluation: &Evaluation, format: OutputFormatArg) -> Result<()> {
    let determination = &evaluation.determination;
    if let OutputFormatArg::Json = format {
        println!("{}", serde_json::to_string_pretty(determination)?);
        return Ok(());
    }

    let mut table = Table::new();
    apply_table_style(&mut table);
    match &determination.strategy {
        StrategyMatch::Matched(strategy) => {
            table.add_row(vec![
                header_cell("Strategy"),
                Cell::new(strategy.id.as_str())
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold),
            ]);
            table.add_row(vec![header_cell("Name"), Cell::new(&strategy.name)]);
            if !strategy.description.is_empty() {
                table.add_row(vec![header_cell("Description"), Cell::new(&strategy.description)]);
            }
        }
        StrategyMatch::Unmatched => {
            table.add_row(vec![
                header_cell("Strategy"),
                Cell::new("no tailored strategy").fg(Color::Yellow),
            ]);
        }
    }
    let no_answers: Vec<&str> = determination.no_answers.iter().map(QuestionId::as_str).collect();
    table.add_row(vec![header_cell("Critical \"no\""), list_cell(&no_answers)]);
    let eligible: Vec<&str> = evaluation.eligible.iter().map(StrategyId::as_str).collect();
    table.add_row(vec![header_cell("Eligible"), list_cell(&eligible)]);
    table.add_row(vec![
        header_cell("Catalog"),
        dim_cell(format!(
            "{} ({})",
            determination.catalog_version,
            short_fingerprint(&determination.catalog_fingerprint)
        )),
    ]);
    println!("{table}");
    Ok(())
}

pub fn print_catalog_report(report: &CatalogReport, format: OutputFormatArg) -> Result<()> {
    if let OutputFormatArg::Json = format {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let mut header = Table::new();
    apply_table_style(&mut header);
    let counts = &report.counts;
    let field_schema = report
        .field_schema
        .map_or_else(|| "-".to_string(), |version| version.to_string());
    let rows: [(&str, String); 8] = [
        ("Catalog version", report.catalog_version.clone()),
        ("Fingerprint", report.fingerprint.clone()),
        ("Field schema", field_schema),
        ("Questions", counts.questions.to_string()),
        (
            "Critical questions",
            report
                .critical_questions
                .iter()
                .map(QuestionId::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        ("Field aliases", counts.field_aliases.to_string()),
        ("Strategies", counts.strategies.to_string()),
        ("Assignments checked", counts.assignments_checked.to_string()),
    ];
    for (label, value) in rows {
        header.add_row(vec![header_cell(label), Cell::new(value)]);
    }
    println!("{header}");

    if report.overlaps.is_empty() {
        println!("No overlapping strategies.");
        return Ok(());
    }
    let mut overlaps = Table::new();
    overlaps.set_header(vec![
        header_cell("Selected"),
        header_cell("Shadows"),
        header_cell("Example answers"),
    ]);
    apply_table_style(&mut overlaps);
    for overlap in &report.overlaps {
        overlaps.add_row(vec![
            Cell::new(overlap.winner.as_str()).add_attribute(Attribute::Bold),
            Cell::new(overlap.shadowed.as_str()),
            dim_cell(format_answers(&overlap.witness)),
        ]);
    }
    println!("Overlaps ({}): priority decides", counts.overlaps);
    println!("{overlaps}");
    Ok(())
}

pub fn print_strategies(catalog: &RuleCatalog, format: OutputFormatArg) -> Result<()> {
    if let OutputFormatArg::Json = format {
        let report = CatalogReport::from_catalog(catalog);
        println!("{}", serde_json::to_string_pretty(&report.strategies)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Priority"),
        header_cell("Id"),
        header_cell("Name"),
        header_cell("Example answers"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for strategy in catalog.strategies() {
        let example = catalog
            .analysis()
            .witness(&strategy.id)
            .map_or_else(|| "-".to_string(), format_answers);
        table.add_row(vec![
            Cell::new(strategy.priority),
            Cell::new(strategy.id.as_str()).add_attribute(Attribute::Bold),
            Cell::new(&strategy.name),
            dim_cell(example),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn format_answers(answers: &AnswerSet) -> String {
    if answers.is_empty() {
        return "(no answers)".to_string();
    }
    answers
        .iter()
        .map(|(question, value)| format!("{question}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn short_fingerprint(fingerprint: &str) -> &str {
    fingerprint.get(..12).unwrap_or(fingerprint)
}

fn list_cell(values: &[&str]) -> Cell {
    if values.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(values.join(", "))
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
