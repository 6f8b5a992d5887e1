use crate::{ChunkCapacity, Usize};

pub trait Sailed {}

macro_rules! chunk_capacity {
    ($($n:literal)*) => {
        $(
            impl Sailed for Usize<$n> {}
            impl ChunkCapacity for Usize<$n> {}
        )*
    };
}

chunk_capacity! {
    1 2 3 4 5 6 7 8
    9 10 11 12 13 14 15 16
    17 18 19 20 21 22 23 24
    25 26 27 28 29 30 31 32
    48 64 96 128 192 256 384 512
    768 1024
}
