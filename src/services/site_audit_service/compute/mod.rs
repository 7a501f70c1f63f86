pub mod scores;

pub use scores::score_set;
