#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use sql2ddl::inference::rules::RuleSet;
use sql2ddl::{parse_fields, Field};

pub(crate) fn fixture_dir(fixture: &str) -> PathBuf {
    PathBuf::from("tests/fixtures").join(fixture)
}

pub(crate) fn read_fixture_sql(fixture: &str) -> String {
    let path = fixture_dir(fixture).join("input.sql");
    std::fs::read_to_string(path).expect("fixture SQL should be readable")
}

pub(crate) fn parse_fixture_fields(fixture: &str) -> Vec<Field> {
    parse_fields(&read_fixture_sql(fixture)).expect("fixture SQL should parse")
}

pub(crate) fn read_fixture_rules_json(fixture: &str) -> String {
    let path = fixture_dir(fixture).join("rules.json");
    std::fs::read_to_string(path).expect("fixture rules should be readable")
}

pub(crate) fn load_fixture_rules(fixture: &str) -> RuleSet {
    RuleSet::from_json(&read_fixture_rules_json(fixture)).expect("fixture rules should parse")
}

pub(crate) fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("{prefix}_{nanos}"));
    std::fs::create_dir_all(&dir).expect("should create temp dir");
    dir
}

pub(crate) fn field_names(fields: &[Field]) -> Vec<&str> {
    fields.iter().map(|f| f.name.as_str()).collect()
}
