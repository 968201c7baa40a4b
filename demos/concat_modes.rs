//! Walk through every concat mode on small tables
//!
//! Run with: cargo run --example concat_modes

use tablecat::{concat, Column, ConcatArgs, How, LazyFrame, Result, Table};

fn print_table(title: &str, table: &Table) {
    println!("{title}  {} rows, schema {}", table.row_count(), table.schema());
    for (name, column) in table.names().iter().zip(table.columns()) {
        println!("  {name:>4}: {:?}", column.to_values());
    }
    println!();
}

fn main() -> Result<()> {
    println!("=== tablecat: concat modes ===\n");

    let a = Table::from_columns([
        ("a", Column::from(vec![1i8, 2, 3])),
        ("b", Column::from(vec![Some(true), Some(false), None])),
    ])?;
    let b = Table::from_columns([
        ("a", Column::from(vec![43i16, 2, 3])),
        ("b", Column::from(vec![Some(32i64), Some(1), None])),
    ])?;
    print_table("a", &a);
    print_table("b", &b);

    // Vertical
    let stacked = concat([a.clone(), a.clone()], How::Vertical)?;
    print_table("vertical [a, a]", &stacked);

    match concat([a.clone(), b.clone()], How::Vertical) {
        Ok(_) => println!("vertical [a, b] unexpectedly succeeded\n"),
        Err(err) => println!("vertical [a, b] fails: {err}\n"),
    }

    // Vertical relaxed
    let widened = concat([a.clone(), b.clone()], How::VerticalRelaxed)?;
    print_table("vertical_relaxed [a, b]", &widened);

    // Horizontal
    let tall = Table::from_columns([
        ("x", Column::from(vec![0i64, 1, 2])),
        ("y", Column::from(vec!["p", "q", "r"])),
    ])?;
    let single = Table::from_columns([("z", Column::from(vec![42i64]))])?;

    let strict = ConcatArgs::new(How::Horizontal).with_strict(true);
    let broadcast = concat([tall.clone(), single.clone()], strict)?;
    print_table("horizontal strict [tall, single]", &broadcast);

    let relaxed = ConcatArgs::new(How::Horizontal).with_strict(false);
    let padded = concat([tall.clone(), single.clone()], relaxed)?;
    print_table("horizontal relaxed [tall, single]", &padded);

    // Deferred
    let mut lazy: LazyFrame = a.clone().lazy();
    for _ in 0..3 {
        lazy = concat([lazy, b.clone().lazy()], How::VerticalRelaxed)?;
    }
    println!("lazy plan: {:?}", lazy);
    println!("lazy schema: {}", lazy.collect_schema()?);
    print_table("lazy collect", &lazy.collect()?);

    Ok(())
}
