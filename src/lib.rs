pub mod benchmarks;
pub mod category;
pub mod category_score;
pub mod cleaning;
pub mod comparison;
pub mod config;
pub mod export;
pub mod leaderboard;
pub mod normalize;
pub mod position;
pub mod profile;
pub mod stat_record;

pub use benchmarks::{BenchmarkEntry, BenchmarkTable};
pub use category::{ALL_CATEGORIES, Category};
pub use category_score::{CategoryBreakdown, StatInput, score_category};
pub use comparison::{ComparisonSession, ConfidenceTier, PlayerSlot, confidence};
pub use normalize::{ScoringConfig, normalize};
pub use position::{Position, position_from_text};
pub use profile::{PlayerProfile, StatLine};
pub use stat_record::StatRecord;
