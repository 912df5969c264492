//! Discovery of zipped campaign exports and access to their CSV entry.

use std::{
    fs::{self, File},
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::debug;
use zip::ZipArchive;

use crate::{
    error::SplitError,
    source::{SourceTable, read_source},
};

/// Lists `*.zip` files directly inside `dir`, sorted by file name.
pub fn discover_archives(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).with_context(|| format!("Reading input directory {dir:?}"))?;
    let mut archives = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Listing input directory {dir:?}"))?;
        let path = entry.path();
        let is_zip = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
        if is_zip && path.is_file() {
            archives.push(path);
        }
    }
    archives.sort_by(|left, right| left.file_name().cmp(&right.file_name()));
    debug!("Found {} archive(s) in {:?}", archives.len(), dir);
    Ok(archives)
}

pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parses the first `.csv` entry of the archive at `path`; later entries are ignored.
pub fn read_archive(
    path: &Path,
    delimiter: u8,
    encoding: &'static Encoding,
) -> Result<SourceTable, SplitError> {
    let name = source_name(path);
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .map_err(|err| SplitError::malformed(&name, format!("not a zip archive: {err}")))?;
    for idx in 0..archive.len() {
        let entry = archive.by_index(idx)?;
        if entry.is_file() && entry.name().ends_with(".csv") {
            debug!("Reading '{}' from '{}'", entry.name(), name);
            return read_source(&name, entry, delimiter, encoding);
        }
    }
    Err(SplitError::malformed(&name, "no csv entry"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::Field;
    use encoding_rs::UTF_8;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::{ZipWriter, write::SimpleFileOptions};

    fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        for (name, contents) in entries {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(contents.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn discover_archives_filters_and_sorts() {
        let dir = tempdir().unwrap();
        write_zip(&dir.path().join("b.zip"), &[("b.csv", "client_id\n1\n")]);
        write_zip(&dir.path().join("a.ZIP"), &[("a.csv", "client_id\n2\n")]);
        fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();
        fs::create_dir(dir.path().join("nested.zip")).unwrap();

        let names: Vec<_> = discover_archives(dir.path())
            .unwrap()
            .iter()
            .map(|p| source_name(p))
            .collect();
        assert_eq!(names, vec!["a.ZIP", "b.zip"]);
    }

    #[test]
    fn discover_archives_reports_missing_directory() {
        let dir = tempdir().unwrap();
        assert!(discover_archives(&dir.path().join("absent")).is_err());
    }

    #[test]
    fn read_archive_uses_first_csv_entry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bank.zip");
        write_zip(
            &path,
            &[
                ("README.txt", "not data"),
                ("first.csv", "client_id,day,month\n1,5,jan\n"),
                ("second.csv", "client_id\n99\n"),
            ],
        );
        let table = read_archive(&path, b',', UTF_8).unwrap();
        assert_eq!(table.name, "bank.zip");
        assert_eq!(table.rows, vec![vec!["1", "5", "jan"]]);
        assert!(table.columns.contains(Field::Month));
    }

    #[test]
    fn read_archive_rejects_archives_without_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.zip");
        write_zip(&path, &[("data.txt", "client_id\n1\n")]);
        let err = read_archive(&path, b',', UTF_8).unwrap_err();
        assert!(err.to_string().contains("no csv entry"));
    }

    #[test]
    fn read_archive_rejects_non_zip_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fake.zip");
        fs::write(&path, "client_id\n1\n").unwrap();
        let err = read_archive(&path, b',', UTF_8).unwrap_err();
        assert!(matches!(err, SplitError::MalformedSource { .. }));
    }
}
