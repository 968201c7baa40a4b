//! Long chains of inputs must not grow the call stack

use tablecat::{concat, concat_columns, Column, ConcatArgs, How, LazyFrame, Table};

const N: usize = 10_000;

fn single(v: i64) -> Table {
    Table::from_columns([("a", Column::from(vec![v]))]).unwrap()
}

#[test]
fn test_eager_flat_many_inputs() {
    let out = concat((0..N as i64).map(single), How::Vertical).unwrap();
    assert_eq!(out.shape(), (N, 1));
    assert_eq!(out.column("a").unwrap().get(N - 1), tablecat::Value::Int64(N as i64 - 1));
}

#[test]
fn test_eager_chained_many_inputs() {
    let mut acc = single(0);
    for i in 1..=N as i64 {
        acc = concat([acc, single(i)], How::VerticalRelaxed).unwrap();
    }
    assert_eq!(acc.shape(), (N + 1, 1));
}

#[test]
fn test_lazy_flat_many_inputs() {
    let lazy: LazyFrame = concat((0..N as i64).map(|i| single(i).lazy()), How::Vertical).unwrap();
    assert_eq!(lazy.collect().unwrap().shape(), (N, 1));
}

#[test]
fn test_lazy_chained_many_inputs() {
    let mut acc = single(0).lazy();
    for i in 1..=N as i64 {
        acc = concat([acc, single(i).lazy()], How::Vertical).unwrap();
    }
    assert_eq!(acc.plan().concat_count(), 1);
    assert_eq!(acc.collect().unwrap().shape(), (N + 1, 1));
}

#[test]
fn test_lazy_deeply_nested_plan() {
    // Alternating modes cannot be spliced, so every call adds a level
    let mut acc = single(0).lazy();
    for i in 1..=N as i64 {
        let how = if i % 2 == 0 {
            How::Vertical
        } else {
            How::VerticalRelaxed
        };
        acc = concat([acc, single(i).lazy()], ConcatArgs::new(how)).unwrap();
    }
    assert_eq!(acc.plan().concat_count(), N);
    assert!(format!("{:?}", acc).contains("arity: 2"));
    assert_eq!(acc.collect_schema().unwrap(), single(0).schema());
    assert_eq!(acc.collect().unwrap().shape(), (N + 1, 1));
    drop(acc);
}

#[test]
fn test_concat_many_columns() {
    let out = concat_columns((0..N as i32).map(|i| Column::from(vec![i]))).unwrap();
    assert_eq!(out.len(), N);
}
