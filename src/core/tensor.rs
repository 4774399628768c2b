//! Labeled tensors: an `ndarray` buffer paired with one name per axis.
//!
//! Axes are matched by name, never by position. The central primitive is
//! [`NamedTensor::align_to`], which reorders a tensor's axes into a target
//! axis list and inserts size-1 axes for the names it does not carry, so that
//! two tensors with different (but compatible) axis sets can be broadcast
//! against each other.
//!
//! # Example
//!
//! ```
//! use anofox_seasonality::core::NamedTensor;
//!
//! let a = NamedTensor::from_shape_vec(["date"], &[3], vec![1.0, 2.0, 3.0]).unwrap();
//! let b = NamedTensor::from_shape_vec(["channel"], &[2], vec![10.0, 100.0]).unwrap();
//!
//! let product = a.mul(&b).unwrap();
//! assert_eq!(product.dims(), &["date".to_string(), "channel".to_string()]);
//! assert_eq!(product.shape(), &[3, 2]);
//! assert_eq!(product.get(&[2, 1]), Some(300.0));
//! ```

use crate::error::{Result, SeasonalityError};
use ndarray::{Array2, ArrayD, ArrayViewD, Axis, IxDyn, Zip};
use std::collections::BTreeMap;

/// A dense `f64` tensor with one unique name per axis.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTensor {
    dims: Vec<String>,
    data: ArrayD<f64>,
}

impl NamedTensor {
    /// Wrap an array, naming its axes in order.
    pub fn new<I, S>(dims: I, data: ArrayD<f64>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dims: Vec<String> = dims.into_iter().map(Into::into).collect();
        if dims.len() != data.ndim() {
            return Err(SeasonalityError::InvalidShape {
                expected: dims.len(),
                got: data.ndim(),
            });
        }
        check_unique(&dims)?;
        Ok(Self { dims, data })
    }

    /// Build a tensor from a row-major buffer.
    pub fn from_shape_vec<I, S>(dims: I, shape: &[usize], values: Vec<f64>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let expected: usize = shape.iter().product();
        let got = values.len();
        let data = ArrayD::from_shape_vec(IxDyn(shape), values)
            .map_err(|_| SeasonalityError::BufferLength { expected, got })?;
        Self::new(dims, data)
    }

    /// Tensor of the given shape with every element set to `value`.
    pub fn full<I, S>(dims: I, shape: &[usize], value: f64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(dims, ArrayD::from_elem(IxDyn(shape), value))
    }

    /// Zero-dimensional tensor holding a single value.
    pub fn scalar(value: f64) -> Self {
        Self {
            dims: Vec::new(),
            data: ArrayD::from_elem(IxDyn(&[]), value),
        }
    }

    /// Wrap a matrix as a tensor over `[row_dim, col_dim]`.
    pub fn from_matrix(
        row_dim: impl Into<String>,
        col_dim: impl Into<String>,
        matrix: Array2<f64>,
    ) -> Result<Self> {
        Self::new([row_dim.into(), col_dim.into()], matrix.into_dyn())
    }

    /// Axis names in storage order.
    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Position of the named axis.
    pub fn axis_index(&self, dim: &str) -> Option<usize> {
        self.dims.iter().position(|d| d == dim)
    }

    pub fn has_dim(&self, dim: &str) -> bool {
        self.axis_index(dim).is_some()
    }

    /// Length of the named axis.
    pub fn size_of(&self, dim: &str) -> Option<usize> {
        self.axis_index(dim).map(|axis| self.data.len_of(Axis(axis)))
    }

    /// Axis sizes keyed by name (order-insensitive view of the shape).
    pub fn sizes(&self) -> BTreeMap<String, usize> {
        self.dims
            .iter()
            .cloned()
            .zip(self.data.shape().iter().copied())
            .collect()
    }

    /// Element at a positional index (in storage axis order).
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        if index.len() != self.ndim() {
            return None;
        }
        self.data.get(index).copied()
    }

    /// Iterate over elements in logical row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.data.iter()
    }

    /// View this tensor over the axis list `dims`.
    ///
    /// Own axes are reordered to follow `dims`; every name in `dims` the
    /// tensor does not carry becomes a size-1 axis. Fails with
    /// [`SeasonalityError::UnknownAxis`] if the tensor has an axis that is not
    /// in `dims`.
    pub fn align_to(&self, dims: &[String]) -> Result<ArrayViewD<'_, f64>> {
        check_unique(dims)?;

        let mut positions = Vec::with_capacity(self.dims.len());
        for dim in &self.dims {
            let pos = dims
                .iter()
                .position(|d| d == dim)
                .ok_or_else(|| SeasonalityError::UnknownAxis(dim.clone()))?;
            positions.push(pos);
        }

        let mut order: Vec<usize> = (0..self.dims.len()).collect();
        order.sort_by_key(|&axis| positions[axis]);

        let mut view = self.data.view().permuted_axes(order);
        for (i, dim) in dims.iter().enumerate() {
            if !self.has_dim(dim) {
                view = view.insert_axis(Axis(i));
            }
        }
        Ok(view)
    }

    /// Materialize this tensor over `dims` with the full broadcast `shape`.
    pub fn broadcast_to(&self, dims: &[String], shape: &[usize]) -> Result<Self> {
        if dims.len() != shape.len() {
            return Err(SeasonalityError::InvalidShape {
                expected: dims.len(),
                got: shape.len(),
            });
        }
        for (dim, &size) in dims.iter().zip(shape) {
            if let Some(own) = self.size_of(dim) {
                if own != size && own != 1 {
                    return Err(SeasonalityError::DimensionMismatch {
                        axis: dim.clone(),
                        expected: size,
                        got: own,
                    });
                }
            }
        }

        let aligned = self.align_to(dims)?;
        let data = aligned
            .broadcast(shape)
            .ok_or_else(|| SeasonalityError::InvalidShape {
                expected: shape.len(),
                got: aligned.ndim(),
            })?
            .to_owned();
        Ok(Self {
            dims: dims.to_vec(),
            data,
        })
    }

    /// Reorder axes by name.
    pub fn transpose<S: AsRef<str>>(&self, order: &[S]) -> Result<Self> {
        if order.len() != self.ndim() {
            return Err(SeasonalityError::InvalidShape {
                expected: self.ndim(),
                got: order.len(),
            });
        }
        let mut axes = Vec::with_capacity(order.len());
        for dim in order {
            let dim = dim.as_ref();
            let axis = self
                .axis_index(dim)
                .ok_or_else(|| SeasonalityError::UnknownAxis(dim.to_string()))?;
            if axes.contains(&axis) {
                return Err(SeasonalityError::DuplicateAxis(dim.to_string()));
            }
            axes.push(axis);
        }

        let dims = axes.iter().map(|&axis| self.dims[axis].clone()).collect();
        let data = self.data.view().permuted_axes(axes).to_owned();
        Ok(Self { dims, data })
    }

    /// Sum over the named axis, removing it.
    pub fn sum_dim(&self, dim: &str) -> Result<Self> {
        let axis = self
            .axis_index(dim)
            .ok_or_else(|| SeasonalityError::UnknownAxis(dim.to_string()))?;
        let mut dims = self.dims.clone();
        dims.remove(axis);
        Ok(Self {
            dims,
            data: self.data.sum_axis(Axis(axis)),
        })
    }

    /// Elementwise product over the union of both axis sets.
    ///
    /// Output axes are this tensor's axes followed by the axes only `other`
    /// carries.
    pub fn mul(&self, other: &Self) -> Result<Self> {
        let dims = union_dims(&self.dims, &other.dims);
        zip_with(self, other, &dims, |a, b| a * b)
    }

    /// Elementwise sum over the union of both axis sets.
    pub fn add(&self, other: &Self) -> Result<Self> {
        let dims = union_dims(&self.dims, &other.dims);
        zip_with(self, other, &dims, |a, b| a + b)
    }
}

/// `a`'s axes followed by the axes of `b` that `a` does not have.
pub fn union_dims(a: &[String], b: &[String]) -> Vec<String> {
    let mut dims = a.to_vec();
    for dim in b {
        if !dims.contains(dim) {
            dims.push(dim.clone());
        }
    }
    dims
}

/// Full shape of `dims` across `operands`.
///
/// Each axis takes the size of the operands that carry it (size-1 axes
/// broadcast); axes no operand carries have size 1.
pub fn broadcast_shape(dims: &[String], operands: &[&NamedTensor]) -> Result<Vec<usize>> {
    let mut shape = Vec::with_capacity(dims.len());
    for dim in dims {
        let mut size = 1;
        for operand in operands {
            match operand.size_of(dim) {
                Some(1) | None => {}
                Some(n) if size == 1 => size = n,
                Some(n) if n != size => {
                    return Err(SeasonalityError::DimensionMismatch {
                        axis: dim.clone(),
                        expected: size,
                        got: n,
                    });
                }
                Some(_) => {}
            }
        }
        shape.push(size);
    }
    Ok(shape)
}

/// Align `a` and `b` onto `dims`, broadcast, and combine elementwise.
pub fn zip_with<F>(a: &NamedTensor, b: &NamedTensor, dims: &[String], f: F) -> Result<NamedTensor>
where
    F: Fn(f64, f64) -> f64,
{
    let shape = broadcast_shape(dims, &[a, b])?;
    let a_view = a.align_to(dims)?;
    let b_view = b.align_to(dims)?;
    let a_full = a_view
        .broadcast(shape.as_slice())
        .ok_or_else(|| SeasonalityError::InvalidShape {
            expected: shape.len(),
            got: a_view.ndim(),
        })?;
    let b_full = b_view
        .broadcast(shape.as_slice())
        .ok_or_else(|| SeasonalityError::InvalidShape {
            expected: shape.len(),
            got: b_view.ndim(),
        })?;

    let data = Zip::from(&a_full)
        .and(&b_full)
        .map_collect(|&x, &y| f(x, y));
    Ok(NamedTensor {
        dims: dims.to_vec(),
        data,
    })
}

fn check_unique(dims: &[String]) -> Result<()> {
    for (i, dim) in dims.iter().enumerate() {
        if dims[..i].contains(dim) {
            return Err(SeasonalityError::DuplicateAxis(dim.clone()));
        }
    }
    Ok(())
}
