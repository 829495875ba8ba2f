pub mod formatter;

pub use formatter::{
    format_add_outcome, format_average, format_notice, format_score_matrix, format_stats_table,
    format_team_detail, format_team_list, level_bar, should_use_colors, truncate_name,
};
