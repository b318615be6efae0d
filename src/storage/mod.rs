mod high_score;

pub use high_score::{HighScoreStore, StorageError, data_dir};
