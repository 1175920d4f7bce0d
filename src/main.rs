//! Reduces a named matrix and prints the echelon forms, optionally with every row operation.
//!
//! Each answer can be given as a command line argument instead, in the order they are asked for,
//! e.g. `echelon Q demos/matrices.json A both y`. The name `*` reduces every matrix in the file.
//! Use `RUST_LOG=debug` to log each reduction.

use std::io::{stdout, Write};
use std::str::FromStr;

use anyhow::Context;
use echelon::{pretty::Presenter, utils, Form};
use fp::{Field, Fp, Rationals, Reals, ValidPrime};

/// The field to reduce over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldChoice {
    Rationals,
    Reals,
    Prime(ValidPrime),
}

impl FromStr for FieldChoice {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "q" | "rational" | "rationals" => Ok(Self::Rationals),
            "r" | "real" | "reals" | "float" => Ok(Self::Reals),
            p => p
                .parse()
                .map(Self::Prime)
                .with_context(|| format!("Expected Q, R or a prime, got {s}")),
        }
    }
}

fn main() -> anyhow::Result<()> {
    utils::init_logging()?;

    let field: FieldChoice = query::with_default("Field (Q, R or a prime)", "Q", str::parse);
    match field {
        FieldChoice::Rationals => run(Rationals),
        FieldChoice::Reals => run(Reals),
        FieldChoice::Prime(p) => run(Fp::new(p)),
    }
}

fn run<F: Field>(field: F) -> anyhow::Result<()> {
    let matrices = utils::query_collection(field)?;
    eprintln!("Available: {}", matrices.names().join(", "));

    let name: String = query::raw("Matrix name (* for all)", |s| {
        if s.is_empty() {
            Err("no name given")
        } else {
            Ok(s.to_owned())
        }
    });
    let form: Form = query::with_default("Form (ref, rref or both)", "both", query::parse);
    let show_steps = query::yes_no("Show steps");

    let presenter = Presenter::new(form, show_steps);
    let mut out = stdout().lock();
    if name == "*" {
        for (i, (name, result)) in matrices.reduce_all(form, show_steps).iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            presenter.write_selected(&mut out, name, matrices.get(name)?)?;
            presenter.write_result(&mut out, result)?;
        }
    } else {
        let matrix = matrices.get(&name)?;
        let result = echelon::reduce(matrix, form, show_steps);
        presenter.write_selected(&mut out, &echelon::normalize_name(&name), matrix)?;
        presenter.write_result(&mut out, &result)?;
    }
    out.flush()?;
    Ok(())
}
