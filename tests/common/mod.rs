#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};
use zip::{ZipWriter, write::SimpleFileOptions};

pub const FULL_HEADER: &str = "client_id,age,job,marital,education,credit_default,mortgage,\
number_contacts,contact_duration,previous_campaign_contacts,previous_outcome,\
campaign_outcome,cons_price_idx,euribor_three_months,day,month";

/// Scratch directory with an `input/` folder, cleaned up on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        let temp_dir = tempdir().expect("temp dir");
        fs::create_dir(temp_dir.path().join("input")).expect("create input dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn input(&self) -> PathBuf {
        self.temp_dir.path().join("input")
    }

    pub fn output(&self) -> PathBuf {
        self.temp_dir.path().join("output")
    }

    /// Writes a zip archive into `input/` holding the given entries in order.
    pub fn write_zip(&self, name: &str, entries: &[(&str, &str)]) -> PathBuf {
        let path = self.input().join(name);
        let file = File::create(&path).expect("create zip");
        let mut zip = ZipWriter::new(file);
        for (entry, contents) in entries {
            zip.start_file(*entry, SimpleFileOptions::default())
                .expect("start zip entry");
            zip.write_all(contents.as_bytes())
                .expect("write zip entry");
        }
        zip.finish().expect("finish zip");
        path
    }

    /// Writes `<stem>.csv.zip` containing a single `<stem>.csv`.
    pub fn write_source(&self, stem: &str, csv: &str) -> PathBuf {
        let entry = format!("{stem}.csv");
        self.write_zip(&format!("{stem}.csv.zip"), &[(entry.as_str(), csv)])
    }

    pub fn write_input_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.input().join(name);
        fs::write(&path, contents).expect("write input file");
        path
    }

    pub fn read_output(&self, name: &str) -> String {
        fs::read_to_string(self.output().join(name)).expect("read output table")
    }
}

/// A row matching [`FULL_HEADER`] with the interesting fields filled in.
pub fn full_row(id: u32, job: &str, education: &str, day: &str, month: &str) -> String {
    format!(
        "{id},{age},{job},married,{education},no,yes,1,120,0,nonexistent,no,93.994,4.857,{day},{month}",
        age = 30 + id % 40
    )
}

/// Joins a header and rows into CSV text with a trailing newline.
pub fn csv(header: &str, rows: &[String]) -> String {
    let mut text = String::from(header);
    text.push('\n');
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text
}
