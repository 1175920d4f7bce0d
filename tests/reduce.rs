use echelon::{pretty::Presenter, reduce, Form, MatrixCollection, NotFound, ReductionResult};
use expect_test::expect;
use fp::matrix::arbitrary::MatrixArbParams;
use fp::{Field, Fp, Matrix, Rationals, Reals, Subspace, ValidPrime};
use proptest::prelude::*;
use rstest::rstest;

/// Checks everything we know about the reduction of `m` with all outputs and the trace on.
fn check_reduction<F: Field>(m: &Matrix<F>) {
    let result = reduce(m, Form::Both, true);
    let ref_form = result.ref_form.clone().unwrap();
    let rref_form = result.rref_form.clone().unwrap();

    assert_eq!(ref_form.rows(), m.rows());
    assert_eq!(ref_form.columns(), m.columns());
    assert_eq!(rref_form.rows(), m.rows());
    assert_eq!(rref_form.columns(), m.columns());

    // Shape of the echelon forms
    assert!(ref_form.is_row_echelon(), "{ref_form}");
    assert!(rref_form.is_reduced_row_echelon(), "{rref_form}");
    for (row, column) in ref_form.leading_entries() {
        assert!(ref_form.field().is_one(&ref_form[row][column]));
    }

    // Both forms have the pivots we report
    let columns = |m: &Matrix<F>| -> Vec<usize> {
        m.leading_entries().into_iter().map(|(_, c)| c).collect()
    };
    assert_eq!(columns(&ref_form), result.pivots);
    assert_eq!(columns(&rref_form), result.pivots);
    assert!(result.pivots.windows(2).all(|w| w[0] < w[1]));

    // Row space is preserved
    let original = Subspace::from_rows(m.clone());
    let reduced = Subspace::from_rows(rref_form.clone());
    assert_eq!(original.dimension(), result.rank());
    assert_eq!(reduced.dimension(), result.rank());
    for row in m.iter().chain(ref_form.iter()) {
        assert!(reduced.contains(row));
    }
    for row in ref_form.iter().chain(rref_form.iter()) {
        assert!(original.contains(row));
    }
    assert_eq!(
        reduced.basis().iter().collect::<Vec<_>>(),
        rref_form.iter().take(result.rank()).collect::<Vec<_>>()
    );

    check_trace(m, &result);

    // RREF is unique, so the untraced reduction has to agree
    let mut oracle = m.clone();
    assert_eq!(oracle.row_reduce(), result.rank());
    assert_eq!(oracle, rref_form);

    // Reducing a reduced matrix does nothing
    let again = reduce(&rref_form, Form::Both, true);
    assert_eq!(again.rref_form.as_ref(), Some(&rref_form));
    assert_eq!(again.ref_form.as_ref(), Some(&rref_form));
    assert!(again.ref_steps.is_empty());
    assert!(again.rref_steps.is_empty());
}

/// Replaying the steps on a fresh copy passes through every snapshot and ends at the echelon
/// forms.
fn check_trace<F: Field>(m: &Matrix<F>, result: &ReductionResult<F>) {
    let mut replayed = m.clone();
    for step in &result.ref_steps {
        step.operation.apply(&mut replayed);
        assert_eq!(replayed, step.matrix, "after {}", step.operation);
    }
    assert_eq!(Some(&replayed), result.ref_form.as_ref());

    for step in &result.rref_steps {
        step.operation.apply(&mut replayed);
        assert_eq!(replayed, step.matrix, "after {}", step.operation);
    }
    assert_eq!(Some(&replayed), result.rref_form.as_ref());

    let mut bulk = m.clone();
    echelon::replay(&mut bulk, result.ref_steps.iter().chain(&result.rref_steps));
    assert_eq!(bulk, replayed);
}

fn q(rows: &[Vec<i64>]) -> Matrix<Rationals> {
    Matrix::from_vec(Rationals, rows).unwrap()
}

proptest! {
    #[test]
    fn reduce_rational(m in any::<Matrix<Rationals>>()) {
        check_reduction(&m);
    }

    #[test]
    fn reduce_mod_p(m in any::<Matrix<Fp>>()) {
        check_reduction(&m);
    }

    #[test]
    fn reduce_mod_2(
        m in Matrix::<Fp>::arbitrary_mod_p_with(ValidPrime::new(2), MatrixArbParams::default())
    ) {
        check_reduction(&m);
    }

    #[test]
    fn reduce_low_rank(m in Matrix::<Rationals>::arbitrary_low_rank(3)) {
        let result = reduce(&m, Form::Rref, false);
        prop_assert!(result.rank() <= 3);
        check_reduction(&m);
    }

    #[test]
    fn form_does_not_change_answer(m in any::<Matrix<Rationals>>()) {
        let both = reduce(&m, Form::Both, false);
        let ref_only = reduce(&m, Form::Ref, false);
        let rref_only = reduce(&m, Form::Rref, false);

        prop_assert_eq!(&ref_only.ref_form, &both.ref_form);
        prop_assert_eq!(&rref_only.rref_form, &both.rref_form);
        prop_assert!(ref_only.rref_form.is_none());
        prop_assert!(rref_only.ref_form.is_none());
        prop_assert_eq!(&ref_only.pivots, &both.pivots);
        prop_assert_eq!(&rref_only.pivots, &both.pivots);
    }
}

#[rstest]
#[case::example(
    &[vec![0, 2, 4], vec![1, 2, 3], vec![2, 4, 8]],
    &[vec![1, 2, 3], vec![0, 1, 2], vec![0, 0, 1]],
    &[vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]],
    &[0, 1, 2]
)]
#[case::identity(
    &[vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]],
    &[vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]],
    &[vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]],
    &[0, 1, 2]
)]
#[case::zero(
    &[vec![0, 0], vec![0, 0]],
    &[vec![0, 0], vec![0, 0]],
    &[vec![0, 0], vec![0, 0]],
    &[]
)]
#[case::dependent_rows(
    &[vec![1, 2, 3], vec![2, 4, 6], vec![1, 0, 1]],
    &[vec![1, 2, 3], vec![0, 1, 1], vec![0, 0, 0]],
    &[vec![1, 0, 1], vec![0, 1, 1], vec![0, 0, 0]],
    &[0, 1]
)]
#[case::wide(
    &[vec![0, 0, 2, 4]],
    &[vec![0, 0, 1, 2]],
    &[vec![0, 0, 1, 2]],
    &[2]
)]
#[case::tall(
    &[vec![0], vec![0], vec![5]],
    &[vec![1], vec![0], vec![0]],
    &[vec![1], vec![0], vec![0]],
    &[0]
)]
fn examples(
    #[case] input: &[Vec<i64>],
    #[case] ref_form: &[Vec<i64>],
    #[case] rref_form: &[Vec<i64>],
    #[case] pivots: &[usize],
) {
    let result = reduce(&q(input), Form::Both, true);
    assert_eq!(result.ref_form, Some(q(ref_form)));
    assert_eq!(result.rref_form, Some(q(rref_form)));
    assert_eq!(result.pivots, pivots);
    check_reduction(&q(input));
}

#[test]
fn reduce_reals() {
    // Dyadic entries, so every intermediate value is exact in f64.
    let m = Matrix::parse(
        Reals,
        &[vec!["0", "0.5", "1"], vec!["4", "2", "2"], vec!["2", "1", "3"]],
    )
    .unwrap();
    check_reduction(&m);

    let result = reduce(&m, Form::Both, true);
    let expected = Matrix::parse(
        Reals,
        &[vec!["1", "0.5", "0.5"], vec!["0", "1", "2"], vec!["0", "0", "1"]],
    )
    .unwrap();
    assert_eq!(result.ref_form, Some(expected));
    assert_eq!(result.rref_form, Some(Matrix::identity(Reals, 3)));
    assert_eq!(result.pivots, [0, 1, 2]);
    assert_eq!(result.ref_steps[0].description(), "Swap R1 ↔ R2");
    assert_eq!(result.ref_steps[1].description(), "R1 ← R1 / (4)");
}

#[test]
fn identity_needs_no_steps() {
    let result = reduce(&Matrix::identity(Rationals, 3), Form::Both, true);
    assert!(result.ref_steps.is_empty());
    assert!(result.rref_steps.is_empty());
}

#[test]
fn example_trace() {
    let m = q(&[vec![0, 2, 4], vec![1, 2, 3], vec![2, 4, 8]]);
    let result = reduce(&m, Form::Both, true);
    let describe = |steps: &[echelon::Step<Rationals>]| {
        steps
            .iter()
            .map(echelon::Step::description)
            .collect::<Vec<_>>()
            .join("\n")
    };
    let actual = format!(
        "{}\n---\n{}",
        describe(&result.ref_steps),
        describe(&result.rref_steps)
    );
    expect![[r#"
        Swap R1 ↔ R2
        R3 ← R3 - (2)·R1
        R2 ← R2 / (2)
        R3 ← R3 / (2)
        ---
        R1 ← R1 - (3)·R3
        R2 ← R2 - (2)·R3
        R1 ← R1 - (2)·R2"#]]
    .assert_eq(&actual);
}

#[test]
fn trace_mod_5() {
    let p = Fp::new(ValidPrime::new(5));
    let m = Matrix::from_vec(p, &[vec![1, 2], vec![3, 4]]).unwrap();
    let result = reduce(&m, Form::Both, true);
    let descriptions: Vec<String> = result
        .ref_steps
        .iter()
        .chain(&result.rref_steps)
        .map(echelon::Step::description)
        .collect();
    // 4 - 3 * 2 = -2 = 3 mod 5
    assert_eq!(
        descriptions,
        ["R2 ← R2 - (3)·R1", "R2 ← R2 / (3)", "R1 ← R1 - (2)·R2"]
    );
    assert_eq!(result.rref_form, Some(Matrix::identity(p, 2)));
}

#[test]
fn presented_ref_with_steps() {
    let mut matrices = MatrixCollection::new(Rationals);
    matrices.insert("a", q(&[vec![0, 2, 4], vec![1, 2, 3], vec![2, 4, 8]]));

    let result = matrices.reduce("A", Form::Ref, true).unwrap();
    assert!(result.rref_steps.is_empty());
    let output = Presenter::new(Form::Ref, true)
        .render("A", matrices.get("a").unwrap(), &result)
        .unwrap();
    expect![[r#"
        Selected matrix: A
        [0  2  4]
        [1  2  3]
        [2  4  8]

        --- REF steps ---
        Swap R1 ↔ R2
        [1  2  3]
        [0  2  4]
        [2  4  8]

        R3 ← R3 - (2)·R1
        [1  2  3]
        [0  2  4]
        [0  0  2]

        R2 ← R2 / (2)
        [1  2  3]
        [0  1  2]
        [0  0  2]

        R3 ← R3 / (2)
        [1  2  3]
        [0  1  2]
        [0  0  1]

        Row Echelon Form (REF):
        [1  2  3]
        [0  1  2]
        [0  0  1]
        Pivot columns (REF): [0, 1, 2]
    "#]]
    .assert_eq(&output);
}

#[test]
fn missing_matrix() {
    let mut matrices = MatrixCollection::new(Rationals);
    matrices.insert("A", Matrix::identity(Rationals, 2));
    assert_eq!(
        matrices.reduce("B", Form::Both, false).unwrap_err(),
        NotFound {
            requested: "B".to_owned(),
            available: vec!["A".to_owned()],
        }
    );
}
