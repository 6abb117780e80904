// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Decoder generation run
//
// Loads a declaration tree from a YAML or JSON schema file, builds the
// registry and length table, and writes one C translation unit. Schema
// errors abort the run with no partial output.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use wiregen::{ByteOrder, CBackend, CompositeDecl, LengthTable, TypeRegistry};

/// Options for one generation run.
pub struct GenOptions {
    pub schema_path: PathBuf,
    /// Destination file; stdout when absent.
    pub output: Option<PathBuf>,
    pub byte_order: ByteOrder,
}

/// Generator state
pub struct Generator {
    options: GenOptions,
}

impl Generator {
    pub fn new(options: GenOptions) -> Self {
        Self { options }
    }

    /// Run the whole batch: load, validate, compute lengths, emit.
    pub fn generate(&self) -> Result<GenerationReport> {
        tracing::info!("Loading schema from: {:?}", self.options.schema_path);
        let text = fs::read_to_string(&self.options.schema_path)
            .context("Failed to read schema file")?;
        let decls = parse_schema(&self.options.schema_path, &text)?;

        tracing::info!("Stage 1: Validating schema");
        let registry = TypeRegistry::from_decls(decls).context("Schema validation failed")?;

        tracing::info!("Stage 2: Computing wire lengths");
        let lengths = LengthTable::build(&registry).context("Length computation failed")?;
        let mut composites = Vec::with_capacity(registry.decls().len());
        for decl in registry.decls() {
            composites.push((decl.name.clone(), lengths.composite(&decl.name)?));
        }

        tracing::info!("Stage 3: Emitting decoders");
        let backend = CBackend::new(&registry, &lengths, self.options.byte_order);
        let unit = backend.emit_unit().context("Code emission failed")?;
        let stamped = format!(
            "/* wiregen {} | schema: {} | generated: {} */\n{}",
            env!("CARGO_PKG_VERSION"),
            self.options.schema_path.display(),
            chrono::Local::now().to_rfc3339(),
            unit
        );

        let output = match &self.options.output {
            Some(path) => {
                fs::write(path, &stamped)
                    .context(format!("Failed to write {}", path.display()))?;
                path.display().to_string()
            }
            None => {
                print!("{}", stamped);
                "<stdout>".to_string()
            }
        };

        tracing::info!("[OK] Generation complete");
        Ok(GenerationReport {
            composites,
            output,
            bytes_written: stamped.len(),
        })
    }
}

fn parse_schema(path: &Path, text: &str) -> Result<Vec<CompositeDecl>> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(text).context("Failed to parse JSON schema")
    } else {
        serde_yaml::from_str(text).context("Failed to parse YAML schema")
    }
}

/// Generation report
#[derive(Debug)]
pub struct GenerationReport {
    /// Composite names with their wire lengths, in schema order.
    pub composites: Vec<(String, usize)>,
    pub output: String,
    pub bytes_written: usize,
}

impl GenerationReport {
    pub fn summary(&self) {
        println!("\n{}", "=".repeat(60));
        println!("  Decoder Generation Report");
        println!("{}", "=".repeat(60));
        println!();
        for (name, len) in &self.composites {
            println!("  [OK] {:<32} {:>6} bytes", name, len);
        }
        println!();
        println!("  Composites: {}", self.composites.len());
        println!("  Output:     {} ({} bytes)", self.output, self.bytes_written);
        println!();
        println!("{}", "=".repeat(60));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    const SCHEMA_YAML: &str = r#"
- name: Inner
  fields:
    - name: field
      type: { primitive: u16 }
- name: Outer
  fields:
    - name: inner
      type: { composite: Inner }
    - name: tag
      type: { primitive: u8 }
"#;

    #[test]
    fn test_generate_writes_translation_unit() {
        let mut schema = tempfile::NamedTempFile::with_suffix(".yaml").expect("schema file");
        schema
            .write_all(SCHEMA_YAML.as_bytes())
            .expect("write schema");
        let out_dir = tempfile::tempdir().expect("out dir");
        let out_path = out_dir.path().join("generated.c");

        let report = Generator::new(GenOptions {
            schema_path: schema.path().to_path_buf(),
            output: Some(out_path.clone()),
            byte_order: ByteOrder::Little,
        })
        .generate()
        .expect("generate");

        assert_eq!(
            report.composites,
            vec![("Inner".to_string(), 2), ("Outer".to_string(), 3)]
        );

        let unit = fs::read_to_string(&out_path).expect("read output");
        assert!(unit.starts_with("/* wiregen "));
        assert!(unit.contains("static const size_t len_Outer = 3;"));
        assert!(unit.contains("ret = unmarshal_Inner(&t->inner, p, n);"));
    }

    #[test]
    fn test_generate_aborts_on_unknown_type() {
        let mut schema = tempfile::NamedTempFile::with_suffix(".yaml").expect("schema file");
        schema
            .write_all(
                b"- name: A\n  fields:\n    - name: b\n      type: { composite: Missing }\n",
            )
            .expect("write schema");
        let out_dir = tempfile::tempdir().expect("out dir");
        let out_path = out_dir.path().join("generated.c");

        let err = Generator::new(GenOptions {
            schema_path: schema.path().to_path_buf(),
            output: Some(out_path.clone()),
            byte_order: ByteOrder::Little,
        })
        .generate()
        .unwrap_err();

        assert!(format!("{:#}", err).contains("unknown type `Missing`"));
        // No partial output.
        assert!(!out_path.exists());
    }

    #[test]
    fn test_parse_schema_json() {
        let json = r#"[{ "name": "A", "fields": [{ "name": "x", "type": { "primitive": "u32" } }] }]"#;
        let decls = parse_schema(Path::new("schema.json"), json).expect("parse");
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "A");
    }
}
