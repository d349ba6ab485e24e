//! Bucket schedule: the ascending list of bucket counts a table may use.

use crate::error::ScheduleError;
use std::borrow::Cow;

/// Smallest bucket count of the default schedule.
pub const MIN_BUCKETS: usize = 519;
/// Largest bucket count of the default schedule; growth stops here.
pub const MAX_BUCKETS: usize = 65521;

/// Default schedule of bucket counts, roughly doubling at each step.
pub const DEFAULT_BUCKET_COUNTS: [usize; 8] =
    [MIN_BUCKETS, 1021, 2053, 4093, 8191, 16381, 32771, MAX_BUCKETS];

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BucketSchedule {
    sizes: Cow<'static, [usize]>,
}

impl BucketSchedule {
    /// Validates `sizes`: non-empty, no zero entry, strictly ascending.
    pub fn new(sizes: Vec<usize>) -> Result<Self, ScheduleError> {
        Self::validate(&sizes)?;
        Ok(Self {
            sizes: Cow::Owned(sizes),
        })
    }

    fn validate(sizes: &[usize]) -> Result<(), ScheduleError> {
        let first = *sizes.first().ok_or(ScheduleError::Empty)?;
        if first == 0 {
            return Err(ScheduleError::ZeroBuckets);
        }
        for (index, pair) in sizes.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(ScheduleError::NotAscending { index: index + 1 });
            }
        }
        Ok(())
    }

    pub fn min(&self) -> usize {
        self.sizes[0]
    }

    pub fn max(&self) -> usize {
        self.sizes[self.sizes.len() - 1]
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn contains(&self, bucket_count: usize) -> bool {
        self.sizes.binary_search(&bucket_count).is_ok()
    }

    /// Bucket count a table holding `bindings` entries in `current` buckets
    /// must move to before linking one more binding, or `None` if it can
    /// stay. Steps up until `bindings < target` or the maximum is reached.
    pub fn grow_target(&self, bindings: usize, current: usize) -> Option<usize> {
        let mut pos = self.sizes.iter().position(|&s| s == current)?;
        while bindings >= self.sizes[pos] && pos + 1 < self.sizes.len() {
            pos += 1;
        }
        let target = self.sizes[pos];
        (target != current).then_some(target)
    }
}

impl Default for BucketSchedule {
    fn default() -> Self {
        Self {
            sizes: Cow::Borrowed(&DEFAULT_BUCKET_COUNTS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_bounds() {
        let s = BucketSchedule::default();
        assert_eq!(s.min(), 519);
        assert_eq!(s.max(), 65521);
        assert_eq!(s.sizes(), &DEFAULT_BUCKET_COUNTS);
        assert!(s.contains(4093));
        assert!(!s.contains(4096));
    }

    #[test]
    fn no_growth_below_load_factor_one() {
        let s = BucketSchedule::default();
        assert_eq!(s.grow_target(0, 519), None);
        assert_eq!(s.grow_target(518, 519), None);
    }

    #[test]
    fn grows_one_step_at_threshold() {
        let s = BucketSchedule::default();
        assert_eq!(s.grow_target(519, 519), Some(1021));
        assert_eq!(s.grow_target(1021, 1021), Some(2053));
    }

    /// A table far past its threshold skips intermediate sizes.
    #[test]
    fn grows_several_steps_when_needed() {
        let s = BucketSchedule::default();
        assert_eq!(s.grow_target(5000, 519), Some(8191));
    }

    #[test]
    fn stops_at_maximum() {
        let s = BucketSchedule::default();
        assert_eq!(s.grow_target(65521, 65521), None);
        assert_eq!(s.grow_target(1_000_000, 65521), None);
        assert_eq!(s.grow_target(1_000_000, 519), Some(65521));
    }

    #[test]
    fn unknown_current_size_never_grows() {
        let s = BucketSchedule::default();
        assert_eq!(s.grow_target(10_000, 600), None);
    }

    #[test]
    fn validation_rejects_bad_schedules() {
        assert_eq!(BucketSchedule::new(vec![]), Err(ScheduleError::Empty));
        assert_eq!(BucketSchedule::new(vec![0, 3]), Err(ScheduleError::ZeroBuckets));
        assert_eq!(
            BucketSchedule::new(vec![3, 7, 7]),
            Err(ScheduleError::NotAscending { index: 2 })
        );
        assert_eq!(
            BucketSchedule::new(vec![11, 5]),
            Err(ScheduleError::NotAscending { index: 1 })
        );
    }

    #[test]
    fn custom_schedule() {
        let s = BucketSchedule::new(vec![2, 5, 11]).unwrap();
        assert_eq!(s.min(), 2);
        assert_eq!(s.max(), 11);
        assert_eq!(s.grow_target(2, 2), Some(5));
        assert_eq!(s.grow_target(6, 2), Some(11));
        assert_eq!(s.grow_target(40, 11), None);
    }
}
