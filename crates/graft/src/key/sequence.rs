use graft_core::stmt::Value;
use graft_core::{Error, Result};

/// A source of fresh identifier values.
///
/// `next` must be safe to call once per entity needing a before-insert
/// identifier; uniqueness is required, ordering is not.
pub trait Sequence {
    fn next(&mut self) -> Result<Value>;
}

/// Integer sequence counting up from a start value.
#[derive(Debug)]
pub struct IntSequence {
    next: i64,
}

impl IntSequence {
    pub fn starting_at(next: i64) -> Self {
        Self { next }
    }
}

impl Sequence for IntSequence {
    fn next(&mut self) -> Result<Value> {
        let value = self.next;
        self.next += 1;
        Ok(Value::I64(value))
    }
}

/// Draws identifier blocks from an inner sequence and hands them out one at
/// a time: one inner `next()` per `block_size` identifiers.
///
/// The inner sequence must yield the first identifier of each block, the
/// way a database sequence declared with `INCREMENT BY block_size` does,
/// so the blocks it hands out never overlap.
#[derive(Debug)]
pub struct BlockSequence<S> {
    inner: S,
    block_size: u64,

    /// Next value to hand out and how many of the current block remain
    current: Option<(i64, u64)>,
}

impl<S: Sequence> BlockSequence<S> {
    pub fn new(inner: S, block_size: u64) -> Result<Self> {
        if block_size == 0 {
            return Err(Error::invalid_mapping("block size must be at least 1"));
        }
        Ok(Self {
            inner,
            block_size,
            current: None,
        })
    }
}

impl<S: Sequence> Sequence for BlockSequence<S> {
    fn next(&mut self) -> Result<Value> {
        if let Some((next, remaining)) = &mut self.current {
            if *remaining > 0 {
                let value = *next;
                *next += 1;
                *remaining -= 1;
                return Ok(Value::I64(value));
            }
        }

        let start = self.inner.next()?.to_i64()?;
        self.current = Some((start + 1, self.block_size - 1));
        Ok(Value::I64(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts how often the inner sequence is consulted.
    struct Counting {
        inner: IntSequence,
        calls: usize,
    }

    impl Sequence for Counting {
        fn next(&mut self) -> Result<Value> {
            self.calls += 1;
            self.inner.next()
        }
    }

    #[test]
    fn blocks_consult_the_inner_sequence_once_per_block() {
        // Stand-in for a database sequence whose increment matches the
        // block size.
        struct Stride {
            next: i64,
        }
        impl Sequence for Stride {
            fn next(&mut self) -> Result<Value> {
                let value = self.next;
                self.next += 3;
                Ok(Value::I64(value))
            }
        }

        let mut seq = BlockSequence::new(Stride { next: 100 }, 3).unwrap();
        let drawn: Vec<i64> = (0..7)
            .map(|_| seq.next().unwrap().to_i64().unwrap())
            .collect();
        assert_eq!(vec![100, 101, 102, 103, 104, 105, 106], drawn);
    }

    #[test]
    fn exhausted_block_triggers_a_fresh_draw() {
        let mut seq = BlockSequence::new(
            Counting {
                inner: IntSequence::starting_at(0),
                calls: 0,
            },
            2,
        )
        .unwrap();

        seq.next().unwrap();
        seq.next().unwrap();
        seq.next().unwrap();
        assert_eq!(2, seq.inner.calls);
    }

    #[test]
    fn zero_block_size_is_rejected() {
        let err = BlockSequence::new(IntSequence::starting_at(0), 0).unwrap_err();
        assert!(err.is_configuration());
    }
}
