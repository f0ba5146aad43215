// Declarative field-path extraction over serde_json values
//
// API payloads here are deeply nested and inconsistently populated; the
// mapping layer describes where a field may live as a list of paths and
// takes the first one that yields a usable value.

use serde_json::Value;

/// One step of a field path
#[derive(Debug, Clone, Copy)]
pub enum Step<'a> {
    Key(&'a str),
    Index(usize),
}

/// Walk a single path. Returns None as soon as a step does not apply.
pub fn traverse<'j>(value: &'j Value, path: &[Step<'_>]) -> Option<&'j Value> {
    let mut current = value;
    for step in path {
        current = match step {
            Step::Key(key) => current.get(key)?,
            Step::Index(index) => current.get(index)?,
        };
    }
    Some(current)
}

/// First path that resolves to a non-null value
pub fn first_of<'j>(value: &'j Value, paths: &[&[Step<'_>]]) -> Option<&'j Value> {
    paths
        .iter()
        .filter_map(|path| traverse(value, path))
        .find(|v| !v.is_null())
}

/// Gather `field` from every object of the array at `path`
pub fn collect_strings(value: &Value, path: &[Step<'_>], field: &str) -> Vec<String> {
    traverse(value, path)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get(field))
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_traverse_nested() {
        let data = json!({"more_info": {"release_time": "2018-11-22 12:00:00"}});
        let found = traverse(&data, &[Step::Key("more_info"), Step::Key("release_time")]);
        assert_eq!(found.and_then(Value::as_str), Some("2018-11-22 12:00:00"));
    }

    #[test]
    fn test_traverse_index() {
        let data = json!({"songs": [{"id": "abc"}]});
        let found = traverse(&data, &[Step::Key("songs"), Step::Index(0), Step::Key("id")]);
        assert_eq!(found.and_then(Value::as_str), Some("abc"));
    }

    #[test]
    fn test_missing_step_yields_none() {
        let data = json!({"a": {"b": 1}});
        assert!(traverse(&data, &[Step::Key("a"), Step::Key("c")]).is_none());
        assert!(traverse(&data, &[Step::Key("a"), Step::Index(0)]).is_none());
    }

    #[test]
    fn test_first_of_skips_null_and_missing() {
        let data = json!({"duration": null, "more_info": {"duration": "205"}});
        let found = first_of(
            &data,
            &[
                &[Step::Key("duration")],
                &[Step::Key("more_info"), Step::Key("duration")],
            ],
        );
        assert_eq!(found.and_then(Value::as_str), Some("205"));
    }

    #[test]
    fn test_collect_strings() {
        let data = json!({
            "artistMap": {"primary_artists": [
                {"name": "Dhvani Bhanushali"},
                {"name": "Tanishk Bagchi"},
                {"no_name": true},
            ]}
        });
        let names = collect_strings(
            &data,
            &[Step::Key("artistMap"), Step::Key("primary_artists")],
            "name",
        );
        assert_eq!(names, vec!["Dhvani Bhanushali", "Tanishk Bagchi"]);
    }
}
