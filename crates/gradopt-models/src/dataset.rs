//! Dataset loading, normalization and train/test splitting.
//!
//! A [`Dataset`] is a feature matrix (rows = samples, columns = features)
//! with a label vector. Column 0 is reserved for the bias term and is
//! always 1.0; loaders and constructors insert it, and
//! [`Dataset::normalize`] leaves it untouched.

use gradopt_core::types::{DMatrix, DVector, Scalar};
use rand::Rng;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Errors produced by the dataset layer.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Underlying I/O failure while reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line of the input could not be parsed.
    #[error("Parse error on line {line}: {reason}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What went wrong
        reason: String,
    },

    /// A row's feature count disagrees with the rest of the dataset.
    #[error("Row {row} has {actual} features, expected {expected}")]
    RowLength {
        /// 0-based row index
        row: usize,
        /// Expected feature count
        expected: usize,
        /// Actual feature count
        actual: usize,
    },

    /// The label vector's length disagrees with the feature matrix.
    #[error("Have {rows} feature rows but {labels} labels")]
    LabelLength {
        /// Feature row count
        rows: usize,
        /// Label count
        labels: usize,
    },

    /// No usable rows.
    #[error("Dataset is empty")]
    Empty,

    /// A split ratio outside `[0, 1]`.
    #[error("Invalid test ratio {value}; expected a value in [0, 1]")]
    InvalidRatio {
        /// The offending ratio
        value: f64,
    },
}

/// A labeled dataset with a bias column.
#[derive(Debug, Clone)]
pub struct Dataset<T>
where
    T: Scalar,
{
    features: DMatrix<T>,
    labels: DVector<T>,
}

impl<T> Dataset<T>
where
    T: Scalar,
{
    /// Builds a dataset from raw feature rows (without bias) and labels.
    ///
    /// Each row gains a leading bias entry of 1.0, so the resulting
    /// feature count is `rows[0].len() + 1`.
    pub fn from_rows(rows: Vec<Vec<T>>, labels: Vec<T>) -> Result<Self, DatasetError> {
        if rows.is_empty() {
            return Err(DatasetError::Empty);
        }
        if rows.len() != labels.len() {
            return Err(DatasetError::LabelLength {
                rows: rows.len(),
                labels: labels.len(),
            });
        }

        let width = rows[0].len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(DatasetError::RowLength {
                    row: i,
                    expected: width,
                    actual: row.len(),
                });
            }
        }

        let n = rows.len();
        let d = width + 1;
        let mut features = DMatrix::zeros(n, d);
        for (i, row) in rows.iter().enumerate() {
            features[(i, 0)] = T::one();
            for (j, value) in row.iter().enumerate() {
                features[(i, j + 1)] = *value;
            }
        }

        Ok(Self {
            features,
            labels: DVector::from_vec(labels),
        })
    }

    /// Loads a CSV file whose rows are `feature_count` numeric columns
    /// followed by a numeric label.
    pub fn load_csv<P: AsRef<Path>>(path: P, feature_count: usize) -> Result<Self, DatasetError> {
        Self::load_csv_with_labels(path, feature_count, |field| {
            field.trim().parse::<f64>().ok().map(<T as Scalar>::from_f64)
        })
    }

    /// Loads a CSV file, mapping the label column through `parse_label`.
    ///
    /// Rows whose label maps to `None` are skipped — the hook for datasets
    /// carrying classes the caller does not want. Feature columns that fail
    /// to parse are an error, not a skip.
    pub fn load_csv_with_labels<P, F>(
        path: P,
        feature_count: usize,
        parse_label: F,
    ) -> Result<Self, DatasetError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<T>,
    {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);

        let mut rows = Vec::new();
        let mut labels = Vec::new();
        let mut skipped = 0usize;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() < feature_count + 1 {
                return Err(DatasetError::Parse {
                    line: line_no,
                    reason: format!(
                        "expected {} columns, found {}",
                        feature_count + 1,
                        fields.len()
                    ),
                });
            }

            let label = match parse_label(fields[feature_count]) {
                Some(label) => label,
                None => {
                    skipped += 1;
                    continue;
                }
            };

            let mut row = Vec::with_capacity(feature_count);
            for field in &fields[..feature_count] {
                let value = field.trim().parse::<f64>().map_err(|e| DatasetError::Parse {
                    line: line_no,
                    reason: format!("bad feature value {field:?}: {e}"),
                })?;
                row.push(<T as Scalar>::from_f64(value));
            }

            rows.push(row);
            labels.push(label);
        }

        if skipped > 0 {
            log::debug!("skipped {skipped} rows with unmapped labels");
        }
        log::info!(
            "loaded {} samples with {} features (+bias) from {}",
            rows.len(),
            feature_count,
            path.as_ref().display()
        );

        Self::from_rows(rows, labels)
    }

    /// Number of samples.
    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    /// Number of features including the bias column.
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// The feature matrix (column 0 is the bias).
    pub fn features(&self) -> &DMatrix<T> {
        &self.features
    }

    /// The label vector.
    pub fn labels(&self) -> &DVector<T> {
        &self.labels
    }

    /// One sample's feature row (including bias) as an owned vector.
    pub fn sample(&self, index: usize) -> DVector<T> {
        self.features.row(index).transpose()
    }

    /// Z-score normalizes every feature column in place, leaving the bias
    /// column untouched. Constant columns are guarded by `+1e-8`.
    pub fn normalize(&mut self) {
        let n = self.n_samples();
        if n == 0 {
            return;
        }
        let n_t = <T as Scalar>::from_usize(n);
        let guard = <T as Scalar>::from_f64(1e-8);

        for j in 1..self.n_features() {
            let mut mean = T::zero();
            for i in 0..n {
                mean += self.features[(i, j)];
            }
            mean /= n_t;

            let mut variance = T::zero();
            for i in 0..n {
                let centered = self.features[(i, j)] - mean;
                variance += centered * centered;
            }
            let std = <T as num_traits::Float>::sqrt(variance / n_t);

            for i in 0..n {
                self.features[(i, j)] = (self.features[(i, j)] - mean) / (std + guard);
            }
        }
    }

    /// Splits into `(train, test)` after a Fisher–Yates shuffle of the row
    /// indices. `test_ratio` is the fraction of samples assigned to the
    /// test set, rounded down.
    pub fn train_test_split<R: Rng>(
        &self,
        test_ratio: f64,
        rng: &mut R,
    ) -> Result<(Self, Self), DatasetError> {
        if !(0.0..=1.0).contains(&test_ratio) {
            return Err(DatasetError::InvalidRatio { value: test_ratio });
        }

        let total = self.n_samples();
        let test_size = (total as f64 * test_ratio) as usize;
        let train_size = total - test_size;

        let mut indices: Vec<usize> = (0..total).collect();
        for i in (1..total).rev() {
            let j = rng.gen_range(0..=i);
            indices.swap(i, j);
        }

        let select = |picked: &[usize]| {
            let mut features = DMatrix::zeros(picked.len(), self.n_features());
            let mut labels = DVector::zeros(picked.len());
            for (row, &idx) in picked.iter().enumerate() {
                features.row_mut(row).copy_from(&self.features.row(idx));
                labels[row] = self.labels[idx];
            }
            Self { features, labels }
        };

        let train = select(&indices[..train_size]);
        let test = select(&indices[train_size..]);
        log::debug!(
            "split {} samples into {} train / {} test",
            total,
            train.n_samples(),
            test.n_samples()
        );
        Ok((train, test))
    }

    /// A hardcoded two-cluster binary dataset (one feature): class 0 near
    /// x = 1, class 1 near x = 5.
    pub fn two_cluster() -> Self {
        let raw = [
            (1.0, 0.0),
            (2.0, 0.0),
            (1.5, 0.0),
            (0.5, 0.0),
            (4.0, 1.0),
            (5.0, 1.0),
            (4.5, 1.0),
            (6.0, 1.0),
        ];
        let rows = raw
            .iter()
            .map(|(x, _)| vec![<T as Scalar>::from_f64(*x)])
            .collect();
        let labels = raw.iter().map(|(_, y)| <T as Scalar>::from_f64(*y)).collect();
        Self::from_rows(rows, labels).expect("hardcoded dataset is well-formed")
    }

    /// A hardcoded linearly separable three-class dataset (two features):
    /// clusters near (1,1), (5,1) and (3,5).
    pub fn three_class() -> Self {
        let raw = [
            (1.0, 1.0, 0.0),
            (1.2, 0.8, 0.0),
            (0.8, 1.1, 0.0),
            (1.4, 1.3, 0.0),
            (5.0, 1.0, 1.0),
            (4.8, 0.9, 1.0),
            (5.2, 1.2, 1.0),
            (4.6, 1.4, 1.0),
            (3.0, 5.0, 2.0),
            (2.8, 4.8, 2.0),
            (3.2, 5.2, 2.0),
            (3.4, 4.6, 2.0),
        ];
        let rows = raw
            .iter()
            .map(|(a, b, _)| vec![<T as Scalar>::from_f64(*a), <T as Scalar>::from_f64(*b)])
            .collect();
        let labels = raw
            .iter()
            .map(|(_, _, y)| <T as Scalar>::from_f64(*y))
            .collect();
        Self::from_rows(rows, labels).expect("hardcoded dataset is well-formed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::io::Write;

    fn write_temp_csv(contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "gradopt-dataset-test-{}-{}.csv",
            std::process::id(),
            contents.len()
        ));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_from_rows_inserts_bias() {
        let data =
            Dataset::<f64>::from_rows(vec![vec![2.0], vec![4.0]], vec![0.0, 1.0]).unwrap();
        assert_eq!(data.n_samples(), 2);
        assert_eq!(data.n_features(), 2);
        assert_relative_eq!(data.features()[(0, 0)], 1.0);
        assert_relative_eq!(data.features()[(1, 0)], 1.0);
        assert_relative_eq!(data.features()[(1, 1)], 4.0);
    }

    #[test]
    fn test_from_rows_errors() {
        assert!(matches!(
            Dataset::<f64>::from_rows(vec![], vec![]),
            Err(DatasetError::Empty)
        ));
        assert!(matches!(
            Dataset::<f64>::from_rows(vec![vec![1.0]], vec![0.0, 1.0]),
            Err(DatasetError::LabelLength { .. })
        ));
        assert!(matches!(
            Dataset::<f64>::from_rows(vec![vec![1.0], vec![1.0, 2.0]], vec![0.0, 1.0]),
            Err(DatasetError::RowLength { row: 1, .. })
        ));
    }

    #[test]
    fn test_load_csv() {
        let path = write_temp_csv("1.0,2.0,0\n3.0,4.0,1\n\n5.0,6.0,1\n");
        let data = Dataset::<f64>::load_csv(&path, 2).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(data.n_samples(), 3);
        assert_eq!(data.n_features(), 3);
        assert_relative_eq!(data.features()[(0, 1)], 1.0);
        assert_relative_eq!(data.features()[(2, 2)], 6.0);
        assert_relative_eq!(data.labels()[1], 1.0);
    }

    #[test]
    fn test_load_csv_with_label_mapper_skips_rows() {
        let path = write_temp_csv("1.0,setosa\n2.0,versicolor\n3.0,virginica\n");
        let data = Dataset::<f64>::load_csv_with_labels(&path, 1, |label| match label.trim() {
            "setosa" => Some(0.0),
            "versicolor" => Some(1.0),
            _ => None,
        })
        .unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(data.n_samples(), 2);
        assert_relative_eq!(data.labels()[0], 0.0);
        assert_relative_eq!(data.labels()[1], 1.0);
    }

    #[test]
    fn test_load_csv_bad_feature_is_error() {
        let path = write_temp_csv("1.0,2.0,0\nx,4.0,1\n");
        let err = Dataset::<f64>::load_csv(&path, 2).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, DatasetError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_normalize_centers_features_and_keeps_bias() {
        let mut data = Dataset::<f64>::from_rows(
            vec![vec![1.0, 10.0], vec![2.0, 20.0], vec![3.0, 30.0]],
            vec![0.0, 1.0, 0.0],
        )
        .unwrap();
        data.normalize();

        for j in 1..data.n_features() {
            let mean: f64 = (0..3).map(|i| data.features()[(i, j)]).sum::<f64>() / 3.0;
            assert_relative_eq!(mean, 0.0, epsilon = 1e-10);
        }
        for i in 0..3 {
            assert_relative_eq!(data.features()[(i, 0)], 1.0);
        }
    }

    #[test]
    fn test_train_test_split_partitions() {
        let data = Dataset::<f64>::from_rows(
            (0..10).map(|i| vec![i as f64]).collect(),
            (0..10).map(|i| i as f64).collect(),
        )
        .unwrap();

        let mut rng = SmallRng::seed_from_u64(7);
        let (train, test) = data.train_test_split(0.3, &mut rng).unwrap();

        assert_eq!(train.n_samples(), 7);
        assert_eq!(test.n_samples(), 3);
        assert_eq!(train.n_features(), data.n_features());

        // Every original label appears exactly once across the split.
        let mut seen: Vec<f64> = train
            .labels()
            .iter()
            .chain(test.labels().iter())
            .copied()
            .collect();
        seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(seen, (0..10).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    fn test_train_test_split_bad_ratio() {
        let data = Dataset::<f64>::two_cluster();
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(matches!(
            data.train_test_split(1.5, &mut rng),
            Err(DatasetError::InvalidRatio { .. })
        ));
    }

    #[test]
    fn test_hardcoded_datasets() {
        let two = Dataset::<f64>::two_cluster();
        assert_eq!(two.n_samples(), 8);
        assert_eq!(two.n_features(), 2);

        let three = Dataset::<f64>::three_class();
        assert_eq!(three.n_samples(), 12);
        assert_eq!(three.n_features(), 3);
        assert!(three.labels().iter().all(|&y| y == 0.0 || y == 1.0 || y == 2.0));
    }
}
