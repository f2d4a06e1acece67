//! Python bindings for pbdesign.
//!
//! This module exposes the generator and validators to Python using PyO3.
//! Enable the `python` feature to use this. Matrices cross the boundary as
//! nested lists; every error is raised as `ValueError`.

use ndarray::Array2;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyFloat, PyList, PyLong, PyString, PyTuple};

use crate::construct::FactorCount;
use crate::error::{Error, MatrixDefect};

fn to_py_err(err: Error) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn to_rows<T: Clone>(a: &Array2<T>) -> Vec<Vec<T>> {
    a.rows().into_iter().map(|r| r.to_vec()).collect()
}

fn type_name(obj: &PyAny) -> String {
    obj.get_type()
        .name()
        .map_or_else(|_| "object".to_string(), str::to_string)
}

fn is_sequence(obj: &PyAny) -> bool {
    obj.is_instance_of::<PyList>() || obj.is_instance_of::<PyTuple>()
}

/// Name of a Python scalar type that must not pass as an integer level.
///
/// `bool` is a subclass of `int`, so it has to be rejected explicitly.
fn non_integer_type(value: &PyAny) -> Option<&'static str> {
    if value.is_instance_of::<PyBool>() {
        Some("bool")
    } else if value.is_instance_of::<PyFloat>() {
        Some("float")
    } else {
        None
    }
}

/// Convert a Python factor count, rejecting everything but positive ints.
fn factor_count(obj: &PyAny) -> Result<FactorCount, Error> {
    if obj.is_none() {
        return FactorCount::try_from(None::<i64>);
    }
    if obj.is_instance_of::<PyBool>() {
        return Err(Error::invalid_argument(
            "number of factors must be a positive integer, got bool",
        ));
    }
    if obj.is_instance_of::<PyLong>() {
        let value: i64 = obj
            .extract()
            .map_err(|_| Error::invalid_argument("number of factors is out of range"))?;
        return FactorCount::try_from(value);
    }
    if obj.is_instance_of::<PyFloat>() || obj.is_instance_of::<PyString>() {
        return Err(Error::invalid_argument(format!(
            "number of factors must be a positive integer, got {}",
            obj.repr().map_or_else(|_| type_name(obj), |r| r.to_string())
        )));
    }
    Err(Error::invalid_argument(format!(
        "number of factors must be a positive integer, got {}",
        type_name(obj)
    )))
}

/// Convert nested Python lists into an integer matrix, reporting the same
/// defects as [`assert_matrix`](crate::assert_matrix).
fn extract_matrix(obj: &PyAny) -> Result<Array2<i64>, Error> {
    if !is_sequence(obj) {
        return Err(MatrixDefect::NotAnArray {
            detail: type_name(obj),
        }
        .into());
    }

    let items: Vec<&PyAny> = obj
        .iter()
        .and_then(|it| it.collect::<PyResult<Vec<_>>>())
        .map_err(|e| MatrixDefect::NotAnArray {
            detail: e.to_string(),
        })?;

    let nested = items.iter().filter(|item| is_sequence(item)).count();
    if !items.is_empty() && nested == 0 {
        return Err(MatrixDefect::NotTwoDimensional { ndim: 1 }.into());
    }
    if nested != items.len() {
        return Err(MatrixDefect::NotAnArray {
            detail: "a mix of rows and scalars".to_string(),
        }
        .into());
    }

    let mut rows: Vec<Vec<&PyAny>> = Vec::with_capacity(items.len());
    for item in items {
        let row = item
            .iter()
            .and_then(|it| it.collect::<PyResult<Vec<_>>>())
            .map_err(|e| MatrixDefect::NotAnArray {
                detail: e.to_string(),
            })?;
        rows.push(row);
    }

    let factors = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|r| r.len() != factors) {
        return Err(MatrixDefect::NotAnArray {
            detail: "ragged rows".to_string(),
        }
        .into());
    }
    if rows.iter().flatten().any(|v| is_sequence(v)) {
        return Err(MatrixDefect::NotTwoDimensional { ndim: 3 }.into());
    }

    let mut data = Array2::zeros((rows.len(), factors));
    for (i, row) in rows.iter().enumerate() {
        for (j, value) in row.iter().enumerate() {
            if let Some(element_type) = non_integer_type(value) {
                return Err(MatrixDefect::NonIntegerElements { element_type }.into());
            }
            data[[i, j]] = value.extract::<i64>().map_err(|_| {
                MatrixDefect::NonIntegerElements {
                    element_type: "object",
                }
            })?;
        }
    }

    Ok(data)
}

/// Generate a Plackett-Burman design as a list of rows.
#[pyfunction]
fn generate_pbdesign(num_factors: &PyAny) -> PyResult<Vec<Vec<i8>>> {
    let count = factor_count(num_factors).map_err(to_py_err)?;
    let design = crate::PlackettBurman::new()
        .generate_for(count)
        .map_err(to_py_err)?;
    Ok(to_rows(design.data()))
}

/// Validate a design matrix, raising `ValueError` if it is malformed.
#[pyfunction]
fn assert_matrix(matrix: &PyAny) -> PyResult<()> {
    let data = extract_matrix(matrix).map_err(to_py_err)?;
    crate::assert_matrix(&data).map_err(to_py_err)
}

/// Check whether all pairs of columns are orthogonal.
#[pyfunction]
fn is_orthogonal(matrix: &PyAny) -> PyResult<bool> {
    let data = extract_matrix(matrix).map_err(to_py_err)?;
    crate::is_orthogonal(&data).map_err(to_py_err)
}

/// Check whether every column has equal numbers of 1 and -1.
#[pyfunction]
fn is_balanced(matrix: &PyAny) -> PyResult<bool> {
    let data = extract_matrix(matrix).map_err(to_py_err)?;
    crate::is_balanced(&data).map_err(to_py_err)
}

/// Compute the co-occurrence matrix of positive levels.
#[pyfunction]
fn calculate_co_occurrence(matrix: &PyAny) -> PyResult<Vec<Vec<usize>>> {
    let data = extract_matrix(matrix).map_err(to_py_err)?;
    let co = crate::calculate_co_occurrence(&data).map_err(to_py_err)?;
    Ok(to_rows(&co))
}

/// The pbdesign Python module.
#[pymodule]
fn pbdesign(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(generate_pbdesign, m)?)?;
    m.add_function(wrap_pyfunction!(assert_matrix, m)?)?;
    m.add_function(wrap_pyfunction!(is_orthogonal, m)?)?;
    m.add_function(wrap_pyfunction!(is_balanced, m)?)?;
    m.add_function(wrap_pyfunction!(calculate_co_occurrence, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}

