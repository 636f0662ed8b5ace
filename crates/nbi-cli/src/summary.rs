use std::collections::BTreeMap;
use std::path::PathBuf;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use nbi_core::BatchResult;
use nbi_model::{EntityKind, FailedRule, Severity};

/// Rules listed in the "top rules" table.
const TOP_RULES: usize = 15;

pub fn print_summary(result: &BatchResult, written: &[PathBuf]) {
    if result.is_rejected() {
        println!("Batch rejected");
        for failure in &result.failures {
            println!("- {}: {}", failure.rule, failure.description);
        }
        return;
    }

    println!(
        "Bridges: {} submitted, {} evaluated, {} border",
        result.submitted, result.evaluated, result.border_bridges
    );
    println!(
        "Excluded from staging: {} entities on {} bridges",
        result.fatal_keys.len(),
        result.affected_records.len()
    );
    print_severity_table(result);
    print_dataset_table(result);
    print_rule_table(&result.failures);
    print_code_tally(result);
    if !written.is_empty() {
        println!();
        println!("Output:");
        for path in written {
            println!("- {}", path.display());
        }
    }
}

fn print_severity_table(result: &BatchResult) {
    let counts = result.severity_counts();
    let mut fatal: BTreeMap<Severity, usize> = BTreeMap::new();
    for failure in result.failures.iter().filter(|failure| failure.fatal) {
        *fatal.entry(failure.severity).or_insert(0) += 1;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Failures"),
        header_cell("Fatal"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for &severity in Severity::all() {
        table.add_row(vec![
            severity_cell(severity),
            count_cell(counts.get(&severity).copied(), severity_color(severity)),
            count_cell(fatal.get(&severity).copied(), Color::Red),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.failures.len()).add_attribute(Attribute::Bold),
        count_cell(Some(result.fatal_failures()), Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

fn print_dataset_table(result: &BatchResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Duplicates"),
        header_cell("Removed"),
        header_cell("Nulled"),
        header_cell("Truncated"),
        header_cell("Zeroed"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for &kind in EntityKind::all() {
        let changes = result.sanitize_summary.get(kind);
        let duplicates = result.duplicates.entries(kind).len();
        if duplicates == 0 && changes.removed == 0 && changes.changed() == 0 {
            continue;
        }
        table.add_row(vec![
            dataset_cell(kind),
            count_cell(Some(duplicates), Color::Yellow),
            count_cell(Some(changes.removed), Color::Red),
            count_cell(Some(changes.nulled), Color::Yellow),
            count_cell(Some(changes.truncated), Color::Yellow),
            count_cell(Some(changes.zeroed), Color::Yellow),
        ]);
    }
    if table.row_count() > 0 {
        println!();
        println!("Datasets:");
        println!("{table}");
    }
}

fn print_rule_table(failures: &[FailedRule]) {
    if failures.is_empty() {
        return;
    }
    let mut by_rule: BTreeMap<&str, (&FailedRule, usize)> = BTreeMap::new();
    for failure in failures {
        by_rule.entry(&failure.rule).or_insert((failure, 0)).1 += 1;
    }
    let mut ranked: Vec<_> = by_rule.into_values().collect();
    ranked.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then(a.0.severity.cmp(&b.0.severity))
            .then(a.0.rule.cmp(&b.0.rule))
    });

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Severity"),
        header_cell("Dataset"),
        header_cell("Item"),
        header_cell("Count"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Right);
    for (failure, count) in ranked.iter().take(TOP_RULES) {
        let rule = if failure.fatal {
            Cell::new(&failure.rule)
                .fg(Color::Red)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(&failure.rule)
        };
        table.add_row(vec![
            rule,
            severity_cell(failure.severity),
            Cell::new(&failure.dataset),
            Cell::new(&failure.item),
            Cell::new(count).fg(severity_color(failure.severity)),
            Cell::new(&failure.description),
        ]);
    }
    println!();
    if ranked.len() > TOP_RULES {
        println!("Top rules ({TOP_RULES} of {}):", ranked.len());
    } else {
        println!("Rules:");
    }
    println!("{table}");
}

fn print_code_tally(result: &BatchResult) {
    if result.code_tally.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Item"),
        header_cell("Temporary code"),
        header_cell("Count"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for (item, value, count) in result.code_tally.entries() {
        table.add_row(vec![Cell::new(item), Cell::new(value), Cell::new(count)]);
    }
    println!();
    println!("Temporary codes:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn severity_cell(severity: Severity) -> Cell {
    let cell = Cell::new(severity.label().to_uppercase()).fg(severity_color(severity));
    match severity {
        Severity::Safety | Severity::Critical => cell.add_attribute(Attribute::Bold),
        Severity::Error | Severity::Flag => cell,
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Safety => Color::Magenta,
        Severity::Critical | Severity::Error => Color::Red,
        Severity::Flag => Color::Yellow,
    }
}

pub fn dataset_cell(kind: EntityKind) -> Cell {
    match kind {
        EntityKind::Bridge => Cell::new(kind)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        EntityKind::Route => Cell::new(format!("  -> {kind}")).fg(Color::DarkGrey),
        _ => Cell::new(kind).fg(Color::Blue),
    }
}

pub fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
