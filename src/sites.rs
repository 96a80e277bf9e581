//! Site preprocessing: exact deduplication followed by a tiny positive jitter.

use std::collections::HashSet;

use rand::Rng;

use crate::error::{VoronoiError, VoronoiResult};
use crate::geometry::Point;

/// Reads sites from a flat coordinate array `[x, y, x, y, ...]`.
pub fn sites_from_flat(coords: &[f64]) -> VoronoiResult<Vec<Point>> {
    if coords.len() % 2 != 0 {
        return Err(VoronoiError::OddCoordinateCount { len: coords.len() });
    }
    Ok(coords.chunks_exact(2).map(|c| [c[0], c[1]]).collect())
}

/// Rejects sites with NaN or infinite coordinates.
pub fn validate_sites(sites: &[Point]) -> VoronoiResult<()> {
    match sites.iter().position(|s| !s[0].is_finite() || !s[1].is_finite()) {
        Some(index) => Err(VoronoiError::NonFiniteSite { index, x: sites[index][0], y: sites[index][1] }),
        None => Ok(()),
    }
}

/// Removes exact duplicates, keeping the first occurrence and the input order.
pub fn dedup_sites(sites: &[Point]) -> Vec<Point> {
    let mut seen = HashSet::with_capacity(sites.len());
    sites
        .iter()
        // Adding 0.0 folds -0.0 into 0.0 so both hash alike.
        .filter(|s| seen.insert([(s[0] + 0.0).to_bits(), (s[1] + 0.0).to_bits()]))
        .copied()
        .collect()
}

/// Largest absolute coordinate per axis, floored at 1.
pub fn max_xy(sites: &[Point]) -> [f64; 2] {
    sites.iter().fold([1.0, 1.0], |acc, s| [acc[0].max(s[0].abs()), acc[1].max(s[1].abs())])
}

/// Offsets every site by an independent random amount in
/// `[0, epsilon * scale * max|coordinate|)` on each axis.
///
/// The jitter breaks exact degeneracies (coincident or collinear sites) while staying
/// far below anything visible.
pub fn jitter_sites<R: Rng + ?Sized>(sites: &mut [Point], epsilon: f64, scale: f64, rng: &mut R) {
    if sites.is_empty() {
        return;
    }

    let magnitude = max_xy(sites);
    let offset_x = epsilon * scale * magnitude[0];
    let offset_y = epsilon * scale * magnitude[1];

    for site in sites.iter_mut() {
        site[0] += rng.r#gen::<f64>() * offset_x;
        site[1] += rng.r#gen::<f64>() * offset_y;
    }
}

/// Deduplicates `sites`, then jitters the survivors.
pub fn preprocess_sites<R: Rng + ?Sized>(sites: &[Point], epsilon: f64, scale: f64, rng: &mut R) -> Vec<Point> {
    let mut unique = dedup_sites(sites);
    jitter_sites(&mut unique, epsilon, scale, rng);
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DEFAULT_EPSILON;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let sites = [[3.0, 1.0], [1.0, 1.0], [3.0, 1.0], [2.0, 2.0], [1.0, 1.0], [-0.0, 0.0], [0.0, 0.0]];
        let unique = dedup_sites(&sites);
        assert_eq!(unique, vec![[3.0, 1.0], [1.0, 1.0], [2.0, 2.0], [-0.0, 0.0]]);
    }

    #[test]
    fn test_max_xy_floors_at_one() {
        assert_eq!(max_xy(&[[0.1, -0.5]]), [1.0, 1.0]);
        assert_eq!(max_xy(&[[-300.0, 2.0], [100.0, -40.0]]), [300.0, 40.0]);
    }

    #[test]
    fn test_jitter_is_small_and_positive() {
        let mut rng = StdRng::seed_from_u64(7);
        let sites = [[100.0, 100.0], [200.0, 100.0], [150.0, 200.0], [100.0, 100.0]];
        let processed = preprocess_sites(&sites, DEFAULT_EPSILON, 100.0, &mut rng);

        assert_eq!(processed.len(), 3);
        let bound_x = DEFAULT_EPSILON * 100.0 * 200.0;
        let bound_y = DEFAULT_EPSILON * 100.0 * 200.0;
        for (p, s) in processed.iter().zip([[100.0, 100.0], [200.0, 100.0], [150.0, 200.0]]) {
            assert!(p[0] >= s[0] && p[0] - s[0] < bound_x);
            assert!(p[1] >= s[1] && p[1] - s[1] < bound_y);
        }
    }

    #[test]
    fn test_jitter_is_reproducible_with_seed() {
        let sites = [[1.0, 2.0], [3.0, 4.0], [5.0, 0.0]];
        let a = preprocess_sites(&sites, DEFAULT_EPSILON, 100.0, &mut StdRng::seed_from_u64(42));
        let b = preprocess_sites(&sites, DEFAULT_EPSILON, 100.0, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_flat_sites_and_validation() {
        let sites = sites_from_flat(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(sites, vec![[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(
            sites_from_flat(&[1.0, 2.0, 3.0, 4.0, 5.0]),
            Err(VoronoiError::OddCoordinateCount { len: 5 })
        );
        assert_eq!(sites_from_flat(&[]), Ok(Vec::new()));
        assert!(validate_sites(&sites).is_ok());
        assert_eq!(
            validate_sites(&[[0.0, 0.0], [f64::NAN, 1.0]]).map_err(|e| matches!(e, VoronoiError::NonFiniteSite { index: 1, .. })),
            Err(true)
        );
    }
}
