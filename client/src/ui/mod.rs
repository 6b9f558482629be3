mod stats;

pub use stats::StatsPlugin;
