/// Split user input into names.
///
/// Accepts comma- or newline-separated lists. Entries are trimmed and blanks
/// dropped; repeated names keep only their first occurrence.
pub fn parse_name_list(input: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for name in input.split(|c| c == ',' || c == '\n').map(str::trim) {
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}
