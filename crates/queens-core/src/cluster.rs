use rand::{rngs::StdRng, Rng, SeedableRng};

/// Configuration for k-means clustering
#[derive(Debug, Clone)]
pub struct KMeansConfig {
    /// Number of restarts; the run with the lowest distortion wins
    pub restarts: usize,
    /// Maximum Lloyd iterations per restart
    pub max_iter: usize,
    /// RNG seed for centroid initialization
    pub seed: u64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            restarts: 10,
            max_iter: 300,
            seed: 0,
        }
    }
}

/// K-means clusterer over 3-dimensional points
#[derive(Debug, Clone)]
pub struct KMeans {
    k: usize,
    config: KMeansConfig,
}

/// Result of a clustering run
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterModel {
    /// Cluster centers, `k` of them
    pub centroids: Vec<[f64; 3]>,
    /// Index into `centroids` for each input sample
    pub labels: Vec<usize>,
    /// Sum of squared distances from each sample to its centroid
    pub distortion: f64,
}

impl KMeans {
    /// Create a clusterer for `k` clusters with the default configuration
    pub fn new(k: usize) -> Self {
        Self::with_config(k, KMeansConfig::default())
    }

    /// Create a clusterer with a specific configuration
    pub fn with_config(k: usize, config: KMeansConfig) -> Self {
        Self { k, config }
    }

    /// Create a clusterer with a specific seed
    pub fn with_seed(k: usize, seed: u64) -> Self {
        Self::with_config(k, KMeansConfig { seed, ..KMeansConfig::default() })
    }

    /// Cluster `samples`, keeping the best of `restarts` seeded runs.
    ///
    /// The same seed always produces the same model. With no samples or
    /// no clusters requested the model is empty.
    pub fn fit(&self, samples: &[[f64; 3]]) -> ClusterModel {
        if self.k == 0 || samples.is_empty() {
            return ClusterModel {
                centroids: Vec::new(),
                labels: Vec::new(),
                distortion: 0.0,
            };
        }

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut best = self.run_once(samples, &mut rng);
        for _ in 1..self.config.restarts {
            let candidate = self.run_once(samples, &mut rng);
            if candidate.distortion < best.distortion {
                best = candidate;
            }
        }
        best
    }

    /// One restart: seed centroids, then iterate until assignments settle
    fn run_once(&self, samples: &[[f64; 3]], rng: &mut StdRng) -> ClusterModel {
        let mut centroids = self.seed_centroids(samples, rng);
        let mut labels = assign(samples, &centroids);
        for _ in 0..self.config.max_iter {
            let next_centroids = mean_centroids(samples, &labels, &centroids);
            let next_labels = assign(samples, &next_centroids);
            let settled = next_labels == labels;
            centroids = next_centroids;
            labels = next_labels;
            if settled {
                break;
            }
        }
        let distortion = distortion(samples, &centroids, &labels);
        ClusterModel {
            centroids,
            labels,
            distortion,
        }
    }

    /// K-means++ initialization: later centroids are drawn with probability
    /// proportional to squared distance from the nearest earlier one
    fn seed_centroids(&self, samples: &[[f64; 3]], rng: &mut StdRng) -> Vec<[f64; 3]> {
        let mut centroids = Vec::with_capacity(self.k);
        centroids.push(samples[rng.gen_range(0..samples.len())]);

        let mut weights: Vec<f64> = samples
            .iter()
            .map(|&s| distance_sq(s, centroids[0]))
            .collect();
        while centroids.len() < self.k {
            let total: f64 = weights.iter().sum();
            let next = if total > 0.0 {
                weighted_pick(&weights, total, rng)
            } else {
                // every sample already coincides with a centroid
                rng.gen_range(0..samples.len())
            };
            let picked = samples[next];
            centroids.push(picked);
            for (weight, &sample) in weights.iter_mut().zip(samples) {
                let d = distance_sq(sample, picked);
                if d < *weight {
                    *weight = d;
                }
            }
        }
        centroids
    }
}

/// Squared Euclidean distance between two points
fn distance_sq(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}

/// Index of the nearest centroid; ties go to the lowest index
fn nearest(centroids: &[[f64; 3]], sample: [f64; 3]) -> usize {
    let mut best = 0;
    let mut best_d = distance_sq(centroids[0], sample);
    for (i, &centroid) in centroids.iter().enumerate().skip(1) {
        let d = distance_sq(centroid, sample);
        if d < best_d {
            best = i;
            best_d = d;
        }
    }
    best
}

fn assign(samples: &[[f64; 3]], centroids: &[[f64; 3]]) -> Vec<usize> {
    samples.iter().map(|&s| nearest(centroids, s)).collect()
}

/// Recompute each centroid as the mean of its members; a centroid that
/// lost all members keeps its previous position
fn mean_centroids(
    samples: &[[f64; 3]],
    labels: &[usize],
    previous: &[[f64; 3]],
) -> Vec<[f64; 3]> {
    let mut sums = vec![[0.0f64; 3]; previous.len()];
    let mut counts = vec![0usize; previous.len()];
    for (&sample, &label) in samples.iter().zip(labels) {
        for channel in 0..3 {
            sums[label][channel] += sample[channel];
        }
        counts[label] += 1;
    }
    sums.iter()
        .zip(&counts)
        .zip(previous)
        .map(|((sum, &count), &prev)| {
            if count == 0 {
                prev
            } else {
                let n = count as f64;
                [sum[0] / n, sum[1] / n, sum[2] / n]
            }
        })
        .collect()
}

fn distortion(samples: &[[f64; 3]], centroids: &[[f64; 3]], labels: &[usize]) -> f64 {
    samples
        .iter()
        .zip(labels)
        .map(|(&sample, &label)| distance_sq(sample, centroids[label]))
        .sum()
}

/// Draw an index with probability `weights[i] / total`; requires `total > 0`
fn weighted_pick(weights: &[f64], total: f64, rng: &mut StdRng) -> usize {
    let mut target = rng.gen::<f64>() * total;
    let mut last_positive = 0;
    for (i, &weight) in weights.iter().enumerate() {
        if weight > 0.0 {
            last_positive = i;
            target -= weight;
            if target <= 0.0 {
                return i;
            }
        }
    }
    last_positive
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [f64; 3] = [255.0, 0.0, 0.0];
    const GREEN: [f64; 3] = [0.0, 255.0, 0.0];
    const BLUE: [f64; 3] = [0.0, 0.0, 255.0];

    #[test]
    fn test_recovers_exact_groups() {
        let samples = vec![RED, RED, RED, GREEN, GREEN, BLUE, BLUE, BLUE];
        let model = KMeans::new(3).fit(&samples);

        assert_eq!(model.distortion, 0.0);
        assert_eq!(model.labels.len(), samples.len());

        // each group collapses onto one centroid, and the groups stay apart
        assert_eq!(model.labels[0], model.labels[1]);
        assert_eq!(model.labels[0], model.labels[2]);
        assert_eq!(model.labels[3], model.labels[4]);
        assert_eq!(model.labels[5], model.labels[6]);
        assert_eq!(model.labels[5], model.labels[7]);
        assert_ne!(model.labels[0], model.labels[3]);
        assert_ne!(model.labels[0], model.labels[5]);
        assert_ne!(model.labels[3], model.labels[5]);

        let mut centroids = model.centroids.clone();
        centroids.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(centroids, vec![BLUE, GREEN, RED]);
    }

    #[test]
    fn test_single_cluster_takes_the_mean() {
        let samples = vec![[0.0, 0.0, 0.0], [10.0, 0.0, 0.0]];
        let model = KMeans::new(1).fit(&samples);

        assert_eq!(model.centroids, vec![[5.0, 0.0, 0.0]]);
        assert_eq!(model.labels, vec![0, 0]);
        assert_eq!(model.distortion, 50.0);
    }

    #[test]
    fn test_identical_samples_label_lowest_centroid() {
        let samples = vec![[9.0, 9.0, 9.0]; 6];
        let model = KMeans::new(2).fit(&samples);

        assert_eq!(model.centroids.len(), 2);
        assert_eq!(model.labels, vec![0; 6]);
        assert_eq!(model.distortion, 0.0);
    }

    #[test]
    fn test_more_clusters_than_points() {
        let samples = vec![RED, BLUE];
        let model = KMeans::new(5).fit(&samples);

        assert_eq!(model.centroids.len(), 5);
        assert_eq!(model.labels.len(), 2);
        assert!(model.labels.iter().all(|&l| l < 5));
        assert_eq!(model.distortion, 0.0);
    }

    #[test]
    fn test_same_seed_same_model() {
        let samples: Vec<[f64; 3]> = (0..40)
            .map(|i| {
                let v = f64::from(i);
                [v * 3.0 % 97.0, v * 7.0 % 89.0, v * 11.0 % 83.0]
            })
            .collect();

        let first = KMeans::with_seed(4, 7).fit(&samples);
        let second = KMeans::with_seed(4, 7).fit(&samples);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        let model = KMeans::new(3).fit(&[]);
        assert!(model.centroids.is_empty());
        assert!(model.labels.is_empty());
        assert_eq!(model.distortion, 0.0);
    }
}
