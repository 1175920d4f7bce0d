//! Text output for reductions. Nothing here takes part in the computation: a [`Presenter`] only
//! reads a finished [`ReductionResult`].

use std::io::{self, Write};

use fp::{Field, Matrix};
use itertools::Itertools;

use crate::reduce::{Form, ReductionResult};
use crate::step::Step;

/// Renders a matrix one bracketed row per line, with each column right-aligned to its widest
/// entry:
///
/// ```text
/// [1   2]
/// [0  -2]
/// ```
///
/// A matrix with no rows renders as `[]`.
pub fn render_matrix<F: Field>(matrix: &Matrix<F>) -> String {
    if matrix.rows() == 0 {
        return String::from("[]");
    }
    let entries: Vec<Vec<String>> = matrix
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect();

    let widths: Vec<usize> = (0..matrix.columns())
        .map(|c| {
            entries
                .iter()
                .map(|row| row[c].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    entries
        .iter()
        .map(|row| {
            format!(
                "[{}]",
                row.iter()
                    .zip(&widths)
                    .format_with("  ", |(entry, &width), f| f(&format_args!(
                        "{entry:>width$}"
                    )))
            )
        })
        .join("\n")
}

fn render_pivots(pivots: &[usize]) -> String {
    format!("[{}]", pivots.iter().format(", "))
}

/// Writes reductions in the layout of a worked example: the input, then optionally every step,
/// then the requested echelon forms with their pivot columns. Pivot columns are numbered from 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Presenter {
    pub form: Form,
    pub show_steps: bool,
}

impl Presenter {
    pub fn new(form: Form, show_steps: bool) -> Self {
        Self { form, show_steps }
    }

    pub fn write_selected<F: Field>(
        &self,
        out: &mut impl Write,
        name: &str,
        matrix: &Matrix<F>,
    ) -> io::Result<()> {
        writeln!(out, "Selected matrix: {name}")?;
        writeln!(out, "{}", render_matrix(matrix))?;
        writeln!(out)
    }

    pub fn write_result<F: Field>(
        &self,
        out: &mut impl Write,
        result: &ReductionResult<F>,
    ) -> io::Result<()> {
        if self.show_steps {
            write_steps(out, "--- REF steps ---", &result.ref_steps)?;
            write_steps(out, "--- RREF steps ---", &result.rref_steps)?;
        }

        let ref_form = result.ref_form.as_ref().filter(|_| self.form.includes_ref());
        let rref_form = result
            .rref_form
            .as_ref()
            .filter(|_| self.form.includes_rref());

        if let Some(m) = ref_form {
            writeln!(out, "Row Echelon Form (REF):")?;
            writeln!(out, "{}", render_matrix(m))?;
            writeln!(out, "Pivot columns (REF): {}", render_pivots(&result.pivots))?;
        }
        if let Some(m) = rref_form {
            if ref_form.is_some() {
                writeln!(out)?;
            }
            writeln!(out, "Reduced Row Echelon Form (RREF):")?;
            writeln!(out, "{}", render_matrix(m))?;
            writeln!(out, "Pivot columns (RREF): {}", render_pivots(&result.pivots))?;
        }
        Ok(())
    }

    /// [`Self::write_selected`] followed by [`Self::write_result`], collected into a string.
    pub fn render<F: Field>(
        &self,
        name: &str,
        matrix: &Matrix<F>,
        result: &ReductionResult<F>,
    ) -> io::Result<String> {
        let mut buf = Vec::new();
        self.write_selected(&mut buf, name, matrix)?;
        self.write_result(&mut buf, result)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

fn write_steps<F: Field>(out: &mut impl Write, title: &str, steps: &[Step<F>]) -> io::Result<()> {
    if steps.is_empty() {
        return Ok(());
    }
    writeln!(out, "{title}")?;
    for step in steps {
        writeln!(out, "{}", step.operation)?;
        writeln!(out, "{}", render_matrix(&step.matrix))?;
        writeln!(out)?;
    }
    Ok(())
}
