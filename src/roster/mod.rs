pub mod error;
pub mod names;
pub mod state;
pub mod types;

pub use error::{ParseCategoryError, RosterError, Severity};
pub use names::parse_name_list;
pub use state::{AddOutcome, Roster, ScoreIndex};
pub use types::{Category, CompetencyLevel, Member, Score, SkillCategories, Team, MAX_LEVEL};
