use std::fs;

use toml::{Table, Value};

const CONFIG_PATH: &str = "src/default_config.toml";

/// Expected sections of the bundled config and the value kind of every key.
const SCHEMA: &[(&str, &[(&str, Kind)])] = &[
    (
        "style",
        &[
            ("font_family", Kind::String),
            ("code_font", Kind::String),
            ("font_size_pt", Kind::Integer),
            ("justify", Kind::Bool),
            ("margin_in", Kind::Float),
        ],
    ),
    (
        "header",
        &[
            ("title_block", Kind::Bool),
            ("date_line", Kind::Bool),
            ("date_label", Kind::String),
            ("date_format", Kind::String),
        ],
    ),
    (
        "pdf",
        &[("font_family", Kind::String), ("paper", Kind::String)],
    ),
];

#[derive(Clone, Copy, Debug)]
enum Kind {
    String,
    Integer,
    Float,
    Bool,
}

impl Kind {
    fn accepts(self, value: &Value) -> bool {
        match self {
            Kind::String => value.is_str(),
            Kind::Integer => value.is_integer(),
            Kind::Float => value.is_float(),
            Kind::Bool => value.is_bool(),
        }
    }
}

fn main() {
    println!("cargo:rerun-if-changed={CONFIG_PATH}");

    let content = fs::read_to_string(CONFIG_PATH)
        .unwrap_or_else(|e| panic!("cannot read {CONFIG_PATH}: {e}"));
    let table: Table = content
        .parse()
        .unwrap_or_else(|e| panic!("invalid {CONFIG_PATH}: {e}"));

    let problems = check(&table);
    if !problems.is_empty() {
        panic!("invalid {CONFIG_PATH}:\n  {}", problems.join("\n  "));
    }
}

// Each schema key must be present with its expected kind; unknown names are rejected
fn check(table: &Table) -> Vec<String> {
    let mut problems = Vec::new();

    for name in table.keys() {
        if !SCHEMA.iter().any(|(section, _)| section == name) {
            problems.push(format!("unknown section [{name}]"));
        }
    }

    for (section, keys) in SCHEMA {
        let Some(body) = table.get(*section) else {
            problems.push(format!("missing section [{section}]"));
            continue;
        };
        let Some(body) = body.as_table() else {
            problems.push(format!("[{section}] is not a table"));
            continue;
        };

        for name in body.keys() {
            if !keys.iter().any(|(key, _)| key == name) {
                problems.push(format!("unknown key {section}.{name}"));
            }
        }
        for (key, kind) in *keys {
            match body.get(*key) {
                None => problems.push(format!("missing key {section}.{key}")),
                Some(value) if !kind.accepts(value) => problems.push(format!(
                    "{section}.{key} should be a {kind:?}, found {}",
                    value.type_str()
                )),
                Some(_) => {}
            }
        }
    }

    problems
}
