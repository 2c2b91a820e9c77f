pub mod random;
pub mod settings;
pub mod stat;

pub use random::DBox;
pub use random::MersenneTwister;
pub use settings::RngSettings;
pub use stat::Stat;
pub use stat::StatTable;
pub use stat::StatValue;
