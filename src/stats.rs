//! Chain-length diagnostics for a table's current bucket array.

use core::fmt;

/// Snapshot returned by [`SymTable::stats`](crate::SymTable::stats).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stats {
    pub bucket_count: usize,
    pub binding_count: usize,
    pub non_empty_buckets: usize,
    /// Longest chain.
    pub max_chain: usize,
    /// Shortest chain; empty buckets count as 0.
    pub min_chain: usize,
    /// `binding_count / non_empty_buckets`, or `None` when the table is empty.
    pub average_chain: Option<f64>,
}

impl Stats {
    pub(crate) fn from_chain_lengths<I>(bucket_count: usize, lengths: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut binding_count = 0;
        let mut non_empty_buckets = 0;
        let mut max_chain = 0;
        let mut min_chain = usize::MAX;
        for len in lengths {
            binding_count += len;
            if len > 0 {
                non_empty_buckets += 1;
            }
            max_chain = max_chain.max(len);
            min_chain = min_chain.min(len);
        }
        if min_chain == usize::MAX {
            min_chain = 0;
        }
        let average_chain =
            (non_empty_buckets > 0).then(|| binding_count as f64 / non_empty_buckets as f64);
        Self {
            bucket_count,
            binding_count,
            non_empty_buckets,
            max_chain,
            min_chain,
            average_chain,
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "++> Max #bindings in a bucket: {}", self.max_chain)?;
        writeln!(f, "++> Min #bindings in a bucket: {}", self.min_chain)?;
        match self.average_chain {
            Some(avg) => write!(f, "++> Weighted average bucket size: {avg:.6}"),
            None => write!(f, "++> Weighted average bucket size: n/a"),
        }
    }
}
