use proptest::prelude::*;

use skill_radar::export::{flatten, read_csv, regroup, write_csv};
use skill_radar::roster::{Category, CompetencyLevel, Roster, SkillCategories};
use skill_radar::stats::{category_stats, Eligibility, MAX_CHART_SKILLS, MIN_CHART_SKILLS};

/// (team, members, assignments as (member index, skill index, level))
type TeamPlan = (String, Vec<String>, Vec<(usize, usize, u8)>);

fn arb_team_plan() -> impl Strategy<Value = TeamPlan> {
    (
        "[A-Z][a-z]{2,8}",
        prop::collection::vec("[A-Z][a-z]{1,6}( [A-Z][a-z]{1,6})?", 1..5),
        prop::collection::vec((0usize..8, 0usize..15, 0u8..=10), 0..25),
    )
}

fn build_roster(plans: &[TeamPlan]) -> Roster {
    let defaults = SkillCategories::defaults();
    let skills: Vec<String> = Category::ALL
        .iter()
        .flat_map(|c| defaults.get(*c).to_vec())
        .collect();

    let mut roster = Roster::new();
    for (team, members, assignments) in plans {
        if roster.add_team(team, &defaults).is_err() {
            continue;
        }
        roster.add_members(team, &members.join(",")).unwrap();
        let added: Vec<String> = roster
            .team(team)
            .unwrap()
            .members
            .iter()
            .map(|m| m.name.clone())
            .collect();
        for (member, skill, level) in assignments {
            let member = &added[member % added.len()];
            let skill = &skills[skill % skills.len()];
            let level = CompetencyLevel::new(*level).unwrap();
            roster.set_competency(team, member, skill, level).unwrap();
        }
    }
    roster
}

proptest! {
    #[test]
    fn level_accepts_only_zero_to_ten(value in any::<u8>()) {
        prop_assert_eq!(CompetencyLevel::new(value).is_ok(), value <= 10);
    }

    #[test]
    fn parsed_levels_stay_in_range(value in -100i64..100) {
        match value.to_string().parse::<CompetencyLevel>() {
            Ok(level) => prop_assert!((0..=10).contains(&i64::from(level.value()))),
            Err(_) => prop_assert!(!(0..=10).contains(&value)),
        }
    }

    #[test]
    fn saturating_adjust_stays_in_range(start in 0u8..=10, delta in any::<i8>()) {
        let level = CompetencyLevel::new(start).unwrap().saturating_add(delta);
        prop_assert!(level.value() <= 10);
    }

    #[test]
    fn export_roundtrip_recovers_scores(plans in prop::collection::vec(arb_team_plan(), 0..4)) {
        let roster = build_roster(&plans);
        let records = flatten(&roster);

        let mut buffer = Vec::new();
        write_csv(&records, &mut buffer).unwrap();
        let parsed = read_csv(buffer.as_slice()).unwrap();

        prop_assert_eq!(&parsed, &records);
        prop_assert_eq!(regroup(&parsed), roster.score_index());
    }

    #[test]
    fn eligibility_follows_scored_skill_count(count in 0usize..15) {
        let mut roster = Roster::new();
        roster.add_team("Alpha", &SkillCategories::default()).unwrap();
        roster.add_members("Alpha", "Ana").unwrap();
        if count > 0 {
            let names: Vec<String> = (0..count).map(|i| format!("Skill {}", i)).collect();
            roster.add_skills("Alpha", Category::Technical, &names.join(",")).unwrap();
            for name in &names {
                roster
                    .set_competency("Alpha", "Ana", name, CompetencyLevel::new(5).unwrap())
                    .unwrap();
            }
        }

        let stats = category_stats(roster.team("Alpha").unwrap(), Category::Technical);
        prop_assert_eq!(stats.skills.len(), count);
        if (MIN_CHART_SKILLS..=MAX_CHART_SKILLS).contains(&count) {
            prop_assert_eq!(stats.eligibility, Eligibility::Renderable);
        } else {
            prop_assert_eq!(stats.eligibility, Eligibility::NotRenderable { count });
        }
    }
}
