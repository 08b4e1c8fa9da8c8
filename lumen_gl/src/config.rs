use err_derive::Error;
use hashbrown::HashSet;
use serde_yaml::{Mapping, Value};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Shape every manifest has to follow. Values only matter by type.
pub const MANIFEST_TEMPLATE: &str = r#"
root: "shaders"
programs:
  - name: "basic"
    vertex: "basic.vert"
    fragment: "basic.frag"
"#;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(display = "Failed to read config file: {}", err)]
    ReadConfigFile { err: io::Error },
    #[error(display = "Failed to parse config: {}", err)]
    ParseConfig { err: serde_yaml::Error },
    #[error(
        display = "The structure of \"{}\" is not valid, please refer to:\n{}",
        path_str,
        template
    )]
    StructureValidation { path_str: String, template: String },
    #[error(display = "Invalid program entry: {}", reason)]
    InvalidEntry { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramEntry {
    pub name: String,
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

#[derive(Debug)]
pub struct Config {
    conf: Value,
    root: PathBuf,
    programs: Vec<ProgramEntry>,
}

impl Config {
    #[allow(clippy::new_ret_no_self)]
    pub fn new(path: impl AsRef<Path>, template_src: &str) -> Result<Config, ConfigError> {
        let conf_src = match fs::read_to_string(&path) {
            Ok(conf_src) => conf_src,
            Err(err) => {
                return Err(ConfigError::ReadConfigFile { err });
            }
        };

        let base = path
            .as_ref()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Config::parse(&conf_src, base, template_src).map_err(|err| match err {
            ConfigError::StructureValidation { template, .. } => {
                ConfigError::StructureValidation {
                    path_str: path.as_ref().display().to_string(),
                    template,
                }
            }
            err => err,
        })
    }

    /// Parses a manifest held in memory; relative paths resolve against `base`.
    pub fn parse(
        conf_src: &str,
        base: impl Into<PathBuf>,
        template_src: &str,
    ) -> Result<Config, ConfigError> {
        let conf: Value = match serde_yaml::from_str(conf_src) {
            Ok(conf) => conf,
            Err(err) => return Err(ConfigError::ParseConfig { err }),
        };

        let template: Value = match serde_yaml::from_str(template_src) {
            Ok(template) => template,
            Err(err) => return Err(ConfigError::ParseConfig { err }),
        };

        if !matches_template(&normalize_value(&conf), &normalize_value(&template)) {
            return Err(ConfigError::StructureValidation {
                path_str: "<memory>".to_owned(),
                template: template_src.to_owned(),
            });
        }

        let root = base.into().join(get_str(&conf, "root")?);
        let programs = parse_programs(&conf, &root)?;

        Ok(Config {
            conf,
            root,
            programs,
        })
    }

    pub fn get(&self) -> &Value {
        &self.conf
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn programs(&self) -> &[ProgramEntry] {
        &self.programs
    }
}

fn parse_programs(conf: &Value, root: &Path) -> Result<Vec<ProgramEntry>, ConfigError> {
    let mut seen = HashSet::new();
    let mut programs = Vec::new();

    let entries = conf
        .get("programs")
        .and_then(Value::as_sequence)
        .map(|seq| seq.as_slice())
        .unwrap_or(&[]);

    for entry in entries {
        let name = get_str(entry, "name")?;
        if name.is_empty() {
            return Err(ConfigError::InvalidEntry {
                reason: "program name is empty".to_owned(),
            });
        }
        if !seen.insert(name.to_owned()) {
            return Err(ConfigError::InvalidEntry {
                reason: format!("program \"{}\" is listed twice", name),
            });
        }

        programs.push(ProgramEntry {
            name: name.to_owned(),
            vertex: root.join(get_str(entry, "vertex")?),
            fragment: root.join(get_str(entry, "fragment")?),
        });
    }

    Ok(programs)
}

fn get_str<'a>(value: &'a Value, key: &str) -> Result<&'a str, ConfigError> {
    value
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ConfigError::InvalidEntry {
            reason: format!("missing string \"{}\"", key),
        })
}

fn normalize_value(value: &Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Bool(_) => Value::Bool(false),
        Value::Number(_) => Value::Number(serde_yaml::Number::from(0)),
        Value::String(_) => Value::String(String::new()),
        Value::Sequence(seq) => {
            Value::Sequence(seq.iter().map(|val| normalize_value(val)).collect())
        }
        // In this case we only normalize the value on the right
        Value::Mapping(map) => Value::Mapping(
            map.iter()
                .map(|(val1, val2)| (val1.clone(), normalize_value(val2)))
                .collect(),
        ),
    }
}

// Both sides normalized. Every sequence element must match the template's first element.
fn matches_template(value: &Value, template: &Value) -> bool {
    match (value, template) {
        (Value::Sequence(seq), Value::Sequence(tmpl)) => match tmpl.first() {
            Some(first) => seq.iter().all(|val| matches_template(val, first)),
            None => seq.is_empty(),
        },
        (Value::Mapping(map), Value::Mapping(tmpl)) => {
            map.len() == tmpl.len() && mapping_matches(map, tmpl)
        }
        (value, template) => value == template,
    }
}

fn mapping_matches(map: &Mapping, tmpl: &Mapping) -> bool {
    tmpl.iter().all(|(key, tmpl_val)| match map.get(key) {
        Some(val) => matches_template(val, tmpl_val),
        None => false,
    })
}
