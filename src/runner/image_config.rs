//! Derived generator configs for image size sweeps
//!
//! The generator reads the image size from the `MinimumRepetitions` and
//! `MaximumRepetitions` of the `IMAGE_GENERATOR` enumeration generator.
//! For each image multiplier the base config is cloned next to itself
//! with both values rewritten. The clone is removed when the returned
//! [`DerivedConfig`] is dropped.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::LazyLock;

use log::debug;
use regex::{Captures, Regex};
use tempfile::{Builder, NamedTempFile};

use crate::core::errors::{BenchError, Result};

static ENUMERATION_GENERATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<(?:[\w-]+:)?EnumerationGenerator\b.*?</(?:[\w-]+:)?EnumerationGenerator>").unwrap()
});
static IMAGE_GENERATOR_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(?:[\w-]+:)?id>\s*IMAGE_GENERATOR\s*</(?:[\w-]+:)?id>").unwrap());
static MINIMUM_REPETITIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(<(?:[\w-]+:)?MinimumRepetitions>)[^<]*(</(?:[\w-]+:)?MinimumRepetitions>)").unwrap()
});
static MAXIMUM_REPETITIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(<(?:[\w-]+:)?MaximumRepetitions>)[^<]*(</(?:[\w-]+:)?MaximumRepetitions>)").unwrap()
});

/// A temporary copy of a generator config, deleted on drop
#[derive(Debug)]
pub struct DerivedConfig {
    file: NamedTempFile,
}

impl DerivedConfig {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the file now, reporting any failure
    pub fn close(self) -> Result<()> {
        self.file.close()?;
        Ok(())
    }
}

/// Clone `base` with the image generator repetitions set to `size`
pub fn derive_image_config(base: &Path, size: u32) -> Result<DerivedConfig> {
    let xml = fs::read_to_string(base)?;
    let rewritten = set_image_size(&xml, size).ok_or_else(|| BenchError::MissingElement {
        path: base.to_path_buf(),
        element: missing_element(&xml),
    })?;

    let dir = match base.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("config");
    let prefix = format!("copy_{}_", stem);

    let mut file = Builder::new().prefix(&prefix).suffix(".xml").tempfile_in(dir)?;
    file.write_all(rewritten.as_bytes())?;
    file.flush()?;

    debug!("Derived config {:?} with image size {}", file.path(), size);
    Ok(DerivedConfig { file })
}

/// Rewrite both repetition counts inside the image generator block
///
/// Returns `None` when the block or either element is absent.
pub fn set_image_size(xml: &str, size: u32) -> Option<String> {
    let block = ENUMERATION_GENERATOR
        .find_iter(xml)
        .find(|m| IMAGE_GENERATOR_ID.is_match(m.as_str()))?;
    let section = block.as_str();
    if !MINIMUM_REPETITIONS.is_match(section) || !MAXIMUM_REPETITIONS.is_match(section) {
        return None;
    }

    let replace = |caps: &Captures| format!("{}{}{}", &caps[1], size, &caps[2]);
    let section = MINIMUM_REPETITIONS.replace(section, replace);
    let section = MAXIMUM_REPETITIONS.replace(&section, replace);

    let mut out = String::with_capacity(xml.len());
    out.push_str(&xml[..block.start()]);
    out.push_str(&section);
    out.push_str(&xml[block.end()..]);
    Some(out)
}

fn missing_element(xml: &str) -> &'static str {
    let block = ENUMERATION_GENERATOR
        .find_iter(xml)
        .find(|m| IMAGE_GENERATOR_ID.is_match(m.as_str()));
    match block {
        None => "EnumerationGenerator",
        Some(m) if !MINIMUM_REPETITIONS.is_match(m.as_str()) => "MinimumRepetitions",
        Some(_) => "MaximumRepetitions",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const CONFIG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<dg:Datagenerator xmlns:dg="http://www.domincgiles.com/datagen">
  <dg:EnumerationGenerator>
    <dg:id>PLATE_GENERATOR</dg:id>
    <dg:MinimumRepetitions>1</dg:MinimumRepetitions>
    <dg:MaximumRepetitions>1</dg:MaximumRepetitions>
  </dg:EnumerationGenerator>
  <dg:EnumerationGenerator>
    <dg:id>IMAGE_GENERATOR</dg:id>
    <dg:MinimumRepetitions>1</dg:MinimumRepetitions>
    <dg:MaximumRepetitions>1</dg:MaximumRepetitions>
  </dg:EnumerationGenerator>
</dg:Datagenerator>
"#;

    #[test]
    fn test_only_image_generator_is_rewritten() {
        let out = set_image_size(CONFIG, 7).unwrap();

        let plate = out.find("PLATE_GENERATOR").unwrap();
        let image = out.find("IMAGE_GENERATOR").unwrap();
        assert!(out[plate..image].contains("<dg:MinimumRepetitions>1</dg:MinimumRepetitions>"));
        assert!(out[image..].contains("<dg:MinimumRepetitions>7</dg:MinimumRepetitions>"));
        assert!(out[image..].contains("<dg:MaximumRepetitions>7</dg:MaximumRepetitions>"));
    }

    #[test]
    fn test_unprefixed_elements() {
        let xml = "<EnumerationGenerator><id>IMAGE_GENERATOR</id>\
                   <MinimumRepetitions>2</MinimumRepetitions>\
                   <MaximumRepetitions>3</MaximumRepetitions></EnumerationGenerator>";
        let out = set_image_size(xml, 10).unwrap();

        assert_eq!(
            out,
            "<EnumerationGenerator><id>IMAGE_GENERATOR</id>\
             <MinimumRepetitions>10</MinimumRepetitions>\
             <MaximumRepetitions>10</MaximumRepetitions></EnumerationGenerator>"
        );
    }

    #[test]
    fn test_missing_generator() {
        let xml = "<EnumerationGenerator><id>OTHER</id></EnumerationGenerator>";
        assert_eq!(set_image_size(xml, 2), None);
        assert_eq!(missing_element(xml), "EnumerationGenerator");
    }

    #[test]
    fn test_derived_config_is_deleted_on_drop() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("anpr_relationalv2.xml");
        fs::write(&base, CONFIG).unwrap();

        let derived = derive_image_config(&base, 4).unwrap();
        let path = derived.path().to_path_buf();
        assert_eq!(path.parent(), Some(dir.path()));
        assert!(path.file_name().unwrap().to_str().unwrap().starts_with("copy_anpr_relationalv2_"));
        assert!(fs::read_to_string(&path).unwrap().contains("<dg:MaximumRepetitions>4</dg:MaximumRepetitions>"));

        drop(derived);
        assert!(!path.exists());
        assert_eq!(fs::read_to_string(&base).unwrap(), CONFIG);
    }

    #[test]
    fn test_missing_element_error() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("broken.xml");
        fs::write(&base, "<EnumerationGenerator><id>IMAGE_GENERATOR</id></EnumerationGenerator>").unwrap();

        let err = derive_image_config(&base, 4).unwrap_err();
        assert!(matches!(
            err,
            BenchError::MissingElement { element: "MinimumRepetitions", .. }
        ));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
