//! Hedge-group partitioning.
//!
//! The pool splits into groups of 3 with the remainder absorbed as pairs:
//! a leftover of one would leave an unhedgeable singleton, so one triple
//! is broken down into two pairs instead.

use crate::error::SchedulerError;

/// Group sizes for a pool of `count` accounts, in placement order.
///
/// Every size is 2 or 3 and the sizes sum to `count`.
pub fn partition_sizes(count: usize) -> Result<Vec<usize>, SchedulerError> {
    if count < 2 {
        return Err(SchedulerError::TooFewAccounts(count));
    }
    let triples = count / 3;
    let remainder = count % 3;
    let mut sizes = Vec::new();
    match remainder {
        0 => sizes.extend(std::iter::repeat(3).take(triples)),
        1 => {
            sizes.extend(std::iter::repeat(3).take(triples - 1));
            sizes.extend([2, 2]);
        }
        _ => {
            sizes.extend(std::iter::repeat(3).take(triples));
            sizes.push(2);
        }
    }
    Ok(sizes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_few_accounts() {
        assert!(matches!(
            partition_sizes(0),
            Err(SchedulerError::TooFewAccounts(0))
        ));
        assert!(matches!(
            partition_sizes(1),
            Err(SchedulerError::TooFewAccounts(1))
        ));
    }

    #[test]
    fn test_known_partitions() {
        assert_eq!(partition_sizes(2).unwrap(), vec![2]);
        assert_eq!(partition_sizes(3).unwrap(), vec![3]);
        assert_eq!(partition_sizes(4).unwrap(), vec![2, 2]);
        assert_eq!(partition_sizes(5).unwrap(), vec![3, 2]);
        assert_eq!(partition_sizes(6).unwrap(), vec![3, 3]);
        assert_eq!(partition_sizes(7).unwrap(), vec![3, 2, 2]);
    }

    #[test]
    fn test_partition_covers_pool_exactly() {
        for count in 2..200 {
            let sizes = partition_sizes(count).unwrap();
            assert_eq!(sizes.iter().sum::<usize>(), count, "count={count}");
            assert!(
                sizes.iter().all(|&s| s == 2 || s == 3),
                "count={count} sizes={sizes:?}"
            );
        }
    }
}
