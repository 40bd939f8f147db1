//! Config file and parameter file loading.

use randkit::{OutputFormat, ParamsInput, RandkitConfig};
use randkit_core::{GenerationMeta, GeneratorMode};
use randkit_engine::Generator;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn config_defaults_sit_under_cli_params() {
    let config_file = write_temp(
        ".toml",
        r#"
output = "pretty"

[defaults.number]
min = 10
max = 20
count = 3
"#,
    );
    let config = RandkitConfig::from_file(config_file.path()).unwrap();
    assert_eq!(config.output, Some(OutputFormat::Pretty));

    let input = ParamsInput {
        sets: vec!["count=6".to_string()],
        ..Default::default()
    };
    let params = input.resolve(config.defaults_for(GeneratorMode::Range)).unwrap();
    let result = Generator::seeded(1).generate(GeneratorMode::Range, &params).unwrap();
    assert_eq!(result.values.len(), 6);
    for value in &result.values {
        assert!((10..=20).contains(&value.as_i64().unwrap()));
    }
}

#[test]
fn yaml_params_file() {
    let file = write_temp(
        ".yaml",
        r#"
pool_a:
  min: 1
  max: 49
  pick: 6
pool_b:
  pick: 0
"#,
    );
    let input = ParamsInput {
        file: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    let params = input.resolve(None).unwrap();
    let result = Generator::seeded(2).generate(GeneratorMode::Lottery, &params).unwrap();
    assert_eq!(result.values.len(), 6);
    assert!(result.bonus_values.is_none());
}

#[test]
fn json_params_file_with_inline_override() {
    let file = write_temp(".json", r#"{"length": 8, "count": 2, "grouping": true}"#);
    let input = ParamsInput {
        inline: Some(r#"{"length": 12}"#.to_string()),
        file: Some(file.path().to_path_buf()),
        sets: Vec::new(),
    };
    let params = input.resolve(None).unwrap();
    let result = Generator::seeded(3).generate(GeneratorMode::Pin, &params).unwrap();
    assert_eq!(result.values.len(), 2);
    for line in result.formatted.lines() {
        assert_eq!(line.len(), 14, "{line}");
        assert_eq!(line.matches('-').count(), 2);
    }
}

#[test]
fn ticket_bag_survives_a_round_trip_through_json() {
    let input = ParamsInput {
        inline: Some(r#"{"min": 1, "max": 6, "count": 4}"#.to_string()),
        ..Default::default()
    };
    let mut generator = Generator::seeded(4);
    let first = generator
        .generate(GeneratorMode::Ticket, &input.resolve(None).unwrap())
        .unwrap();

    // The caller persists the result as JSON and feeds the bag back in.
    let saved = serde_json::to_value(&first).unwrap();
    let next = ParamsInput {
        inline: Some(
            serde_json::json!({
                "min": 1,
                "max": 6,
                "count": 4,
                "ticket_remaining": saved["meta"]["ticket_remaining"],
            })
            .to_string(),
        ),
        ..Default::default()
    };
    let second = generator
        .generate(GeneratorMode::Ticket, &next.resolve(None).unwrap())
        .unwrap();
    assert_eq!(second.values.len(), 2);
    let Some(GenerationMeta::Ticket(meta)) = second.meta else {
        panic!("expected ticket meta");
    };
    assert!(meta.exhausted);

    let mut drawn: Vec<i64> = first
        .values
        .iter()
        .chain(&second.values)
        .map(|v| v.as_i64().unwrap())
        .collect();
    drawn.sort();
    assert_eq!(drawn, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn missing_params_file_is_an_error() {
    let input = ParamsInput {
        file: Some("/nonexistent/params.json".into()),
        ..Default::default()
    };
    assert!(input.resolve(None).is_err());
}
