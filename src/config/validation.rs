use super::schema::Config;
use crate::roster::Category;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for category in Category::ALL {
        let key = category.as_str().to_lowercase();
        let skills = config.default_skills.get(category);
        for (i, skill) in skills.iter().enumerate() {
            if skill.trim().is_empty() {
                errors.push(format!("default_skills.{}[{}]: name must not be blank", key, i));
            } else if skill.trim() != skill {
                errors.push(format!(
                    "default_skills.{}[{}]: '{}' name has leading/trailing whitespace",
                    key, i, skill
                ));
            } else if skill.contains(',') || skill.contains('\n') {
                errors.push(format!(
                    "default_skills.{}[{}]: '{}' must not contain commas or newlines",
                    key, i, skill
                ));
            } else if skills[..i].iter().any(|s| s.trim() == skill.as_str()) {
                errors.push(format!(
                    "default_skills.{}[{}]: duplicate skill '{}'",
                    key, i, skill
                ));
            }
        }
    }

    if config.export_path.as_os_str().is_empty() {
        errors.push("export_path: must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
