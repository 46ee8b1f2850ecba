mod try_cell;

pub use try_cell::TryOnceCell;
