pub mod aggregate;
pub mod chart;

pub use aggregate::{aggregate_category, SkillStats};
pub use chart::{
    category_stats, radar_chart, CategoryStats, ChartError, Eligibility, RadarChart, RadarSeries,
    MAX_CHART_SKILLS, MIN_CHART_SKILLS,
};
