//! Builder for tables with a custom hasher or bucket schedule.

use crate::error::ScheduleError;
use crate::hash::{KeyHasher, Poly65599};
use crate::schedule::BucketSchedule;
use crate::sym_table::SymTable;

/// Configures a [`SymTable`]. The default builder produces the same table as
/// [`SymTable::new`].
#[derive(Clone, Debug, Default)]
pub struct SymTableBuilder<H = Poly65599> {
    hasher: H,
    schedule: BucketSchedule,
}

impl SymTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<H: KeyHasher> SymTableBuilder<H> {
    /// Replaces the key hasher.
    pub fn hasher<H2: KeyHasher>(self, hasher: H2) -> SymTableBuilder<H2> {
        SymTableBuilder {
            hasher,
            schedule: self.schedule,
        }
    }

    pub fn schedule(mut self, schedule: BucketSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Validates `sizes` and uses them as the bucket schedule.
    pub fn bucket_counts(self, sizes: &[usize]) -> Result<Self, ScheduleError> {
        Ok(self.schedule(BucketSchedule::new(sizes.to_vec())?))
    }

    pub fn build<'v, V: ?Sized>(self) -> SymTable<'v, V, H> {
        SymTable::with_parts(self.hasher, self.schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, Default)]
    struct LenHasher;
    impl KeyHasher for LenHasher {
        fn accumulate(&self, key: &str) -> u32 {
            key.len() as u32
        }
    }

    #[test]
    fn default_builder_matches_new() {
        let t: SymTable<i32> = SymTableBuilder::new().build();
        assert_eq!(t.bucket_count(), 519);
        assert_eq!(t.schedule(), &BucketSchedule::default());
    }

    #[test]
    fn custom_schedule_starts_at_its_minimum() {
        let t: SymTable<i32> = SymTableBuilder::new()
            .bucket_counts(&[7, 13])
            .unwrap()
            .build();
        assert_eq!(t.bucket_count(), 7);
        assert_eq!(t.schedule().max(), 13);
    }

    #[test]
    fn invalid_schedule_is_rejected() {
        let err = SymTableBuilder::new().bucket_counts(&[13, 7]).unwrap_err();
        assert_eq!(err, ScheduleError::NotAscending { index: 1 });
    }

    #[test]
    fn custom_hasher_is_used() {
        let v = 0;
        let mut t = SymTableBuilder::new()
            .bucket_counts(&[8])
            .unwrap()
            .hasher(LenHasher)
            .build();
        t.put("abc", &v).unwrap();
        t.put("xyz", &v).unwrap();
        t.put("q", &v).unwrap();
        let s = t.stats();
        assert_eq!(s.non_empty_buckets, 2);
        assert_eq!(s.max_chain, 2);
        assert!(t.contains("xyz"));
    }
}
