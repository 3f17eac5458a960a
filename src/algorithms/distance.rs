use super::VectorDistance;
use crate::error::Result;
use crate::utils::squared_euclidean;
use crate::utils::validation::validate_dimension;

#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanDistance;

impl EuclideanDistance {
    pub fn new() -> Self {
        Self
    }
}

impl VectorDistance for EuclideanDistance {
    fn distance(&self, a: &[f64], b: &[f64]) -> Result<f64> {
        validate_dimension(b, a.len())?;
        Ok(squared_euclidean(a, b).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecError;

    #[test]
    fn test_euclidean_distance() {
        let euclidean = EuclideanDistance::new();
        assert_eq!(euclidean.distance(&[0.0, 0.0], &[3.0, 4.0]).unwrap(), 5.0);
        assert_eq!(euclidean.distance(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_identity_and_symmetry() {
        let euclidean = EuclideanDistance::new();
        let a = [8.9, 0.0, 9.0, 0.0, 0.0, 0.0, 0.0, 0.0, 9.0];
        let b = [0.0, 0.0, 9.0, 0.0, 9.0, 0.0, 8.4, 9.0, 9.0];

        assert_eq!(euclidean.distance(&a, &a).unwrap(), 0.0);
        assert_eq!(
            euclidean.distance(&a, &b).unwrap(),
            euclidean.distance(&b, &a).unwrap()
        );
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = EuclideanDistance::new()
            .distance(&[1.0, 2.0, 3.0], &[1.0])
            .unwrap_err();
        assert_eq!(err, RecError::DimensionMismatch { expected: 3, actual: 1 });
    }
}
