use skill_radar::export::{export_to_path, export_to_string, ExportError};
use skill_radar::roster::{Category, CompetencyLevel, Roster, SkillCategories};
use skill_radar::stats::{category_stats, radar_chart, ChartError, Eligibility};
use skill_radar::storage::{load_session, save_session};

fn level(value: u8) -> CompetencyLevel {
    CompetencyLevel::new(value).unwrap()
}

#[test]
fn alpha_team_session() {
    let mut roster = Roster::new();
    roster.add_team("Alpha", &SkillCategories::defaults()).unwrap();
    roster.add_members("Alpha", "Ana, Ben").unwrap();
    roster.set_competency("Alpha", "Ana", "Python", level(7)).unwrap();
    roster.set_competency("Alpha", "Ben", "Python", level(3)).unwrap();

    let team = roster.team("Alpha").unwrap();
    let stats = category_stats(team, Category::Technical);
    assert_eq!(stats.skills.len(), 1);
    let python = &stats.skills[0];
    assert_eq!(python.skill, "Python");
    assert_eq!((python.min, python.max), (3, 7));
    assert_eq!(python.average, 5.0);
    assert_eq!(stats.eligibility, Eligibility::NotRenderable { count: 1 });

    let err = radar_chart(team, Category::Technical).unwrap_err();
    assert_eq!(
        err,
        ChartError::NotRenderable {
            category: Category::Technical,
            count: 1
        }
    );
    assert!(err.to_string().contains("Current count: 1"));

    assert_eq!(
        export_to_string(&roster).unwrap(),
        "Team,Member,Skill,Competency Level\nAlpha,Ana,Python,7\nAlpha,Ben,Python,3\n"
    );
}

#[test]
fn session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("session.json");

    let mut roster = Roster::new();
    roster.add_team("Alpha", &SkillCategories::defaults()).unwrap();
    roster.add_members("Alpha", "Ana").unwrap();
    roster.set_competency("Alpha", "Ana", "SAFe", level(6)).unwrap();
    save_session(&path, &roster).unwrap();

    let loaded = load_session(&path).unwrap();
    assert_eq!(loaded, roster);
    let ana = loaded.team("Alpha").unwrap().member("Ana").unwrap();
    assert_eq!(ana.level("SAFe"), Some(level(6)));
    assert_eq!(ana.level("SQL"), None);
}

#[test]
fn deleted_team_is_excluded_from_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("team_data.csv");

    let mut roster = Roster::new();
    for team in ["Alpha", "Beta"] {
        roster.add_team(team, &SkillCategories::defaults()).unwrap();
        roster.add_members(team, "Ana").unwrap();
        roster.set_competency(team, "Ana", "SQL", level(5)).unwrap();
    }
    roster.delete_team("Alpha").unwrap();

    assert_eq!(export_to_path(&roster, &path).unwrap(), 1);
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(!text.contains("Alpha"));
    assert!(text.contains("Beta,Ana,SQL,5"));

    roster.delete_team("Beta").unwrap();
    let err = export_to_path(&roster, &path).unwrap_err();
    assert!(matches!(err.downcast_ref::<ExportError>(), Some(ExportError::Empty)));
}

#[test]
fn full_category_renders_radar() {
    let mut roster = Roster::new();
    roster.add_team("Alpha", &SkillCategories::defaults()).unwrap();
    roster.add_members("Alpha", "Ana, Ben").unwrap();
    let skills = ["SAFe", "Collab", "Comms", "SNOW", "Monitoring and Tracking"];
    for (i, skill) in skills.iter().enumerate() {
        roster.set_competency("Alpha", "Ana", skill, level(i as u8 + 2)).unwrap();
        roster.set_competency("Alpha", "Ben", skill, level(10)).unwrap();
    }

    let chart = radar_chart(roster.team("Alpha").unwrap(), Category::Operational).unwrap();
    assert_eq!(chart.title, "Operational Competency Radar Chart for Team: Alpha");
    assert_eq!(chart.axes, skills);
    assert_eq!(chart.range, [0, 10]);

    let names: Vec<&str> = chart.series.iter().map(|s| s.name).collect();
    assert_eq!(names, ["Min", "Max", "Average"]);
    assert_eq!(chart.series[0].values, [2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(chart.series[1].values, [10.0; 5]);
    assert_eq!(chart.series[2].values, [6.0, 6.5, 7.0, 7.5, 8.0]);
}
