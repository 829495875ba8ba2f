use serde::Serialize;
use thiserror::Error;

use super::aggregate::{aggregate_category, SkillStats};
use crate::roster::{Category, Team, MAX_LEVEL};

/// Fewest eligible skills a radar chart is drawn for
pub const MIN_CHART_SKILLS: usize = 5;
/// Most eligible skills a radar chart is drawn for
pub const MAX_CHART_SKILLS: usize = 8;

/// Whether a category's aggregated skills can be charted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Eligibility {
    Renderable,
    NotRenderable { count: usize },
}

impl Eligibility {
    pub fn from_count(count: usize) -> Self {
        if (MIN_CHART_SKILLS..=MAX_CHART_SKILLS).contains(&count) {
            Eligibility::Renderable
        } else {
            Eligibility::NotRenderable { count }
        }
    }

    pub fn is_renderable(&self) -> bool {
        matches!(self, Eligibility::Renderable)
    }
}

/// Aggregated statistics for one category of a team
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    pub category: Category,
    pub skills: Vec<SkillStats>,
    pub eligibility: Eligibility,
}

pub fn category_stats(team: &Team, category: Category) -> CategoryStats {
    let skills = aggregate_category(team.skills.get(category), &team.members);
    let eligibility = Eligibility::from_count(skills.len());
    CategoryStats {
        category,
        skills,
        eligibility,
    }
}

/// Why a radar chart could not be produced
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    #[error("Cannot create radar chart for category '{category}' in team '{team}'. Add skills and members first.")]
    MissingData { team: String, category: Category },

    #[error(
        "Radar chart for category '{category}' can only be displayed if there are between {min} and {max} skills. Current count: {count}.",
        min = MIN_CHART_SKILLS,
        max = MAX_CHART_SKILLS
    )]
    NotRenderable { category: Category, count: usize },
}

/// One polygon of the radar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarSeries {
    pub name: &'static str,
    pub values: Vec<f64>,
}

/// Chart-ready data for a renderable category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarChart {
    pub title: String,
    pub team: String,
    pub category: Category,
    /// Axis labels, one per eligible skill
    pub axes: Vec<String>,
    /// Radial axis range, inclusive
    pub range: [u8; 2],
    pub series: Vec<RadarSeries>,
}

impl RadarChart {
    fn from_stats(team: &str, category: Category, stats: &[SkillStats]) -> Self {
        let collect = |f: fn(&SkillStats) -> f64| stats.iter().map(f).collect::<Vec<_>>();
        Self {
            title: format!("{} Competency Radar Chart for Team: {}", category, team),
            team: team.to_string(),
            category,
            axes: stats.iter().map(|s| s.skill.clone()).collect(),
            range: [0, MAX_LEVEL],
            series: vec![
                RadarSeries {
                    name: "Min",
                    values: collect(|s| f64::from(s.min)),
                },
                RadarSeries {
                    name: "Max",
                    values: collect(|s| f64::from(s.max)),
                },
                RadarSeries {
                    name: "Average",
                    values: collect(|s| s.average),
                },
            ],
        }
    }
}

/// Build radar chart data for a category, or explain why it can't be drawn
pub fn radar_chart(team: &Team, category: Category) -> Result<RadarChart, ChartError> {
    if team.skills.get(category).is_empty() || team.members.is_empty() {
        return Err(ChartError::MissingData {
            team: team.name.clone(),
            category,
        });
    }

    let stats = category_stats(team, category);
    match stats.eligibility {
        Eligibility::Renderable => Ok(RadarChart::from_stats(&team.name, category, &stats.skills)),
        Eligibility::NotRenderable { count } => {
            Err(ChartError::NotRenderable { category, count })
        }
    }
}
