//! Canonical encodings of the index and atomic output writes.
//!
//! Every encoder is a pure function of the model: keys and lists come out
//! sorted and nothing depends on construction order, so the same index
//! always encodes to the same bytes.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use srfi_core::views::SpecificationView;
use tempfile::NamedTempFile;

use crate::error::IndexError;
use crate::model::SrfiIndex;

pub const SRFI_JSON: &str = "srfi.json";
pub const SRFI_LISP: &str = "srfi.lisp";
pub const IMPLEMENTATION_JSON: &str = "implementation.json";

/// Punctuation the nested-list reader accepts inside a string literal.
const LISP_SAFE_PUNCTUATION: &str = " !#$%&'()*+,-./:;<=>?@[]^_`{|}~";

/// `srfi.json`: number to specification view, in ascending number order.
///
/// Numbers are written as string keys but ordered numerically, so `"9"`
/// precedes `"10"`.
///
/// # Errors
///
/// Returns [`IndexError::NonAscii`] if any string holds a non-ASCII character.
pub fn encode_index_json(index: &SrfiIndex) -> Result<String, IndexError> {
    let mut by_number = BTreeMap::new();
    for spec in index.specifications() {
        by_number.insert(spec.number, serde_json::to_value(SpecificationView::from(spec))?);
    }
    pretty_ascii(&by_number)
}

/// `implementation.json`: implementation views sorted by id.
///
/// # Errors
///
/// Returns [`IndexError::NonAscii`] if any string holds a non-ASCII character.
pub fn encode_implementations_json(index: &SrfiIndex) -> Result<String, IndexError> {
    canonical_json(&index.implementation_views())
}

/// `srfi.lisp`: one `(number (title "...") (symbols "..." ...))` per line.
///
/// # Errors
///
/// Returns [`IndexError::UnsafeCharacter`] on the first string that holds a
/// character outside the safe set. Nothing is escaped.
pub fn encode_index_lisp(index: &SrfiIndex) -> Result<String, IndexError> {
    let mut entries = Vec::new();
    for spec in index.specifications() {
        let mut symbols = vec!["symbols".to_string()];
        for symbol in &spec.symbols {
            symbols.push(lisp_string(symbol)?);
        }
        entries.push(format!(
            "({} (title {}) ({}))",
            spec.number,
            lisp_string(&spec.title)?,
            symbols.join(" ")
        ));
    }
    Ok(format!("({})\n", entries.join("\n")))
}

/// Sorted keys, four-space indent, printable ASCII.
///
/// Values go through [`serde_json::Value`] so object keys come out sorted
/// whatever the field order of the source type.
fn canonical_json<T: Serialize>(value: &T) -> Result<String, IndexError> {
    pretty_ascii(&serde_json::to_value(value)?)
}

fn pretty_ascii<T: Serialize>(value: &T) -> Result<String, IndexError> {
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    let text = String::from_utf8(buf).map_err(|e| std::io::Error::other(e.utf8_error()))?;
    if let Some(ch) = text.chars().find(|c| !c.is_ascii()) {
        return Err(IndexError::NonAscii { ch });
    }
    Ok(text)
}

fn lisp_string(value: &str) -> Result<String, IndexError> {
    if let Some(ch) = value.chars().find(|&c| !is_lisp_safe(c)) {
        return Err(IndexError::UnsafeCharacter {
            ch,
            value: value.to_string(),
        });
    }
    Ok(format!("\"{value}\""))
}

fn is_lisp_safe(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || LISP_SAFE_PUNCTUATION.contains(ch)
}

/// Writes the three index files into one directory.
#[derive(Debug, Clone)]
pub struct Serializer {
    dir: PathBuf,
}

/// Paths of a completed write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFiles {
    pub index_json: PathBuf,
    pub index_lisp: PathBuf,
    pub implementations_json: PathBuf,
}

impl Serializer {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Encode everything, then write each file atomically.
    ///
    /// Encoding happens before any file is touched, so an unsafe character
    /// leaves the previous outputs as they were.
    ///
    /// # Errors
    ///
    /// Returns the first encoding error, or [`IndexError::Io`] if a write or
    /// rename fails.
    pub fn write(&self, index: &SrfiIndex) -> Result<WrittenFiles, IndexError> {
        let json = encode_index_json(index)?;
        let lisp = encode_index_lisp(index)?;
        let implementations = encode_implementations_json(index)?;

        std::fs::create_dir_all(&self.dir)?;
        let written = WrittenFiles {
            index_json: self.stage(SRFI_JSON, &json)?.commit()?,
            index_lisp: self.stage(SRFI_LISP, &lisp)?.commit()?,
            implementations_json: self
                .stage(IMPLEMENTATION_JSON, &implementations)?
                .commit()?,
        };
        tracing::info!(dir = %self.dir.display(), "wrote index files");
        Ok(written)
    }

    /// Write `contents` to a temporary file next to `name`.
    ///
    /// Nothing is visible at `name` until [`StagedFile::commit`]; dropping
    /// the staged file removes it.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Io`] if the temporary file cannot be written.
    pub fn stage(&self, name: &str, contents: &str) -> Result<StagedFile, IndexError> {
        let mut temp = tempfile::Builder::new()
            .prefix(&format!(".{name}."))
            .suffix(".new")
            .tempfile_in(&self.dir)?;
        temp.write_all(contents.as_bytes())?;
        temp.as_file().sync_all()?;
        Ok(StagedFile {
            temp,
            target: self.dir.join(name),
        })
    }
}

/// A fully written temporary file waiting to be renamed into place.
#[derive(Debug)]
pub struct StagedFile {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedFile {
    /// Atomically replace the target with the staged contents.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Io`] if the rename fails.
    pub fn commit(self) -> Result<PathBuf, IndexError> {
        self.temp
            .persist(&self.target)
            .map_err(|error| IndexError::Io(error.error))?;
        Ok(self.target)
    }
}
