use std::collections::BTreeMap;

use fp::{Field, Matrix, MatrixError};
use maybe_rayon::prelude::*;
use serde_json::Value;
use thiserror::Error;

use crate::reduce::{reduce, Form, ReductionResult};

/// The key a matrix is stored under: surrounding whitespace is dropped and letters are
/// upper-cased, so `" a "` and `"A"` name the same matrix.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("matrix {requested:?} not found. Available: {}", .available.join(", "))]
pub struct NotFound {
    pub requested: String,
    pub available: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("expected a JSON object mapping names to matrices")]
    NotAnObject,
    #[error("matrix {name}: {source}")]
    Matrix {
        name: String,
        #[source]
        source: MatrixError,
    },
    #[error("more than one matrix is named {0:?}")]
    Duplicate(String),
}

/// Named matrices over a common field, looked up by [`normalize_name`].
#[derive(Debug, Clone)]
pub struct MatrixCollection<F: Field> {
    field: F,
    matrices: BTreeMap<String, Matrix<F>>,
}

impl<F: Field> MatrixCollection<F> {
    pub fn new(field: F) -> Self {
        Self {
            field,
            matrices: BTreeMap::new(),
        }
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    /// Adds a matrix, returning the matrix previously stored under the same name, if any.
    pub fn insert(&mut self, name: &str, matrix: Matrix<F>) -> Option<Matrix<F>> {
        debug_assert!(matrix.field() == &self.field);
        self.matrices.insert(normalize_name(name), matrix)
    }

    pub fn get(&self, name: &str) -> Result<&Matrix<F>, NotFound> {
        self.matrices
            .get(&normalize_name(name))
            .ok_or_else(|| NotFound {
                requested: name.to_owned(),
                available: self.names(),
            })
    }

    /// The normalized names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.matrices.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Matrix<F>)> {
        self.matrices.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Looks up `name` and reduces it. See [`reduce`].
    pub fn reduce(
        &self,
        name: &str,
        form: Form,
        trace: bool,
    ) -> Result<ReductionResult<F>, NotFound> {
        let matrix = self.get(name)?;
        Ok(reduce(matrix, form, trace))
    }

    /// Reduces every matrix in the collection, in name order. With the `concurrent` feature the
    /// reductions run in parallel.
    pub fn reduce_all(&self, form: Form, trace: bool) -> Vec<(String, ReductionResult<F>)> {
        tracing::debug!(
            matrices = self.len(),
            threads = maybe_rayon::current_num_threads(),
            "reducing collection"
        );
        self.matrices
            .maybe_par_iter()
            .map(|(name, matrix)| (name.clone(), reduce(matrix, form, trace)))
            .collect()
    }

    /// Reads a collection from a JSON object such as `{"A": [["1", "2"], [3, "1/2"]]}`. Entries
    /// are read as in [`Matrix::from_json`].
    pub fn from_json(field: F, json: &Value) -> Result<Self, CollectionError> {
        let object = json.as_object().ok_or(CollectionError::NotAnObject)?;
        let mut collection = Self::new(field);
        for (name, value) in object {
            let matrix = Matrix::from_json(collection.field.clone(), value).map_err(|source| {
                CollectionError::Matrix {
                    name: name.clone(),
                    source,
                }
            })?;
            if collection.insert(name, matrix).is_some() {
                return Err(CollectionError::Duplicate(normalize_name(name)));
            }
        }
        tracing::debug!(matrices = collection.len(), "loaded collection");
        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp::Rationals;
    use serde_json::json;

    fn collection() -> MatrixCollection<Rationals> {
        let mut c = MatrixCollection::new(Rationals);
        c.insert("A", Matrix::from_vec(Rationals, &[vec![1, 2], vec![3, 4]]).unwrap());
        c
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let c = collection();
        assert!(c.get("a").is_ok());
        assert!(c.get("  A\n").is_ok());
    }

    #[test]
    fn missing_name_lists_available() {
        let c = collection();
        let err = c.reduce("B", Form::Both, false).unwrap_err();
        assert_eq!(
            err,
            NotFound {
                requested: "B".into(),
                available: vec!["A".into()],
            }
        );
        assert_eq!(err.to_string(), r#"matrix "B" not found. Available: A"#);
    }

    #[test]
    fn reduce_all_in_name_order() {
        let mut c = collection();
        c.insert("c", Matrix::new(Rationals, 2, 2));
        c.insert("b", Matrix::identity(Rationals, 2));
        let results = c.reduce_all(Form::Rref, false);
        let names: Vec<&str> = results.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
        assert_eq!(
            results.iter().map(|(_, r)| r.rank()).collect::<Vec<_>>(),
            [2, 2, 0]
        );
    }

    #[test]
    fn from_json() {
        let c = MatrixCollection::from_json(
            Rationals,
            &json!({ "a": [["1", "1/2"], [0, 2]], "Z": [[0, 0]] }),
        )
        .unwrap();
        assert_eq!(c.names(), ["A", "Z"]);
        assert_eq!(c.get("z").unwrap().columns(), 2);
        assert_eq!(
            c.iter().map(|(name, m)| (name, m.rows())).collect::<Vec<_>>(),
            [("A", 2), ("Z", 1)]
        );
    }

    #[test]
    fn from_json_errors() {
        assert_eq!(
            MatrixCollection::from_json(Rationals, &json!([])).unwrap_err(),
            CollectionError::NotAnObject
        );
        assert_eq!(
            MatrixCollection::from_json(Rationals, &json!({ "a": [[1], []] }))
                .unwrap_err()
                .to_string(),
            "matrix a: row 2 has 0 entries, expected 1"
        );
        assert_eq!(
            MatrixCollection::from_json(Rationals, &json!({ "a": [[1]], " A": [[2]] }))
                .unwrap_err(),
            CollectionError::Duplicate("A".into())
        );
    }
}
