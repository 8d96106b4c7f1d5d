use crate::consts::{MAX_WEIGHT, METRIC_TABLE_LEN};

/// Precomputed perceptual weight lookups for byte differences.
///
/// Both tables are indexed by `a - b + 255`, so index 255 is a zero
/// difference and the valid range is 0..=510. The color table is a
/// Gaussian falloff whose width is set by the caller's outlier
/// sensitivity; the map table is a linear ramp scaled by the map weight.
/// Computed once per synthesis and shared read-only across workers.
#[derive(Debug)]
pub struct MetricTables {
    color: Vec<u16>,
    map: Vec<u16>,
}

impl MetricTables {
    pub fn new(sensitivity_to_outliers: f32, map_weight: f32) -> Self {
        let sigma = 255.0 * sensitivity_to_outliers as f64;
        let two_sigma_sq = 2.0 * sigma * sigma;
        let mut color = vec![0u16; METRIC_TABLE_LEN];
        let mut map = vec![0u16; METRIC_TABLE_LEN];
        for i in 0..METRIC_TABLE_LEN {
            let d = i as f64 - 255.0;
            let falloff = MAX_WEIGHT as f64 * (1.0 - (-(d * d) / two_sigma_sq).exp());
            color[i] = falloff.round().min(MAX_WEIGHT as f64) as u16;
            let ramp = d.abs() * map_weight as f64 * MAX_WEIGHT as f64 / 255.0;
            map[i] = ramp.round().min(MAX_WEIGHT as f64) as u16;
        }
        Self { color, map }
    }

    #[inline]
    pub fn color_diff(&self, a: u8, b: u8) -> u64 {
        self.color[(a as i32 - b as i32 + 255) as usize] as u64
    }

    #[inline]
    pub fn map_diff(&self, a: u8, b: u8) -> u64 {
        self.map[(a as i32 - b as i32 + 255) as usize] as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_difference_weighs_nothing() {
        let tables = MetricTables::new(0.117, 0.5);
        assert_eq!(tables.color_diff(77, 77), 0);
        assert_eq!(tables.map_diff(200, 200), 0);
    }

    #[test]
    fn tables_are_symmetric() {
        let tables = MetricTables::new(0.117, 0.5);
        for (a, b) in [(0u8, 255u8), (10, 20), (128, 127)] {
            assert_eq!(tables.color_diff(a, b), tables.color_diff(b, a));
            assert_eq!(tables.map_diff(a, b), tables.map_diff(b, a));
        }
    }

    #[test]
    fn weight_grows_with_difference() {
        let tables = MetricTables::new(0.117, 0.5);
        let mut prior = 0;
        for d in 0..=255u8 {
            let w = tables.color_diff(d, 0);
            assert!(w >= prior);
            prior = w;
        }
        // The default sigma saturates well before the full byte range.
        assert_eq!(tables.color_diff(255, 0), MAX_WEIGHT as u64);
    }

    #[test]
    fn map_table_is_linear_in_the_weight() {
        let half = MetricTables::new(0.117, 0.5);
        let full = MetricTables::new(0.117, 1.0);
        assert_eq!(full.map_diff(100, 0), 2 * half.map_diff(100, 0));
    }
}
