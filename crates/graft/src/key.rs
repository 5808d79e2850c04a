mod assembler;
pub use assembler::KeyAssembler;

mod batch;
pub use batch::BatchInsert;

mod sequence;
pub use sequence::{BlockSequence, IntSequence, Sequence};

mod strategy;
pub use strategy::KeyStrategy;
