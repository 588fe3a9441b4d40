//! The import orchestrator.
//!
//! One run is strictly sequential: DISCOVER → PLAN → per file
//! (STAGE → STREAM → LOAD) → REPORT. Files are processed one at a time and
//! records one at a time; the truncate/merge contract depends on the fixed
//! global order. Discovery and version errors abort before any destination
//! mutation. A decode or sink failure mid-file aborts the run; chunks already
//! flushed stay committed, and staged temp files are removed on every path.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::archive::{find_archive, SdeArchive};
use crate::error::Result;
use crate::mapping::{map_record, LoadMode, Row};
use crate::parser::{read_version, JsonlReader, SdeVersion};
use crate::ui::{Phase, Ui};

use super::plan::{ImportPlan, PlannedFile};
use super::sink::Sink;

pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Per-run statistics: row counts per source member, in import order.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub version: SdeVersion,
    pub counts: Vec<(String, u64)>,
}

impl RunReport {
    pub fn total_rows(&self) -> u64 {
        self.counts.iter().map(|(_, count)| count).sum()
    }
}

/// Drives a full import against a storage sink.
pub struct SdeImporter<S: Sink> {
    sink: S,
    chunk_size: usize,
}

impl<S: Sink> SdeImporter<S> {
    pub fn new(sink: S, chunk_size: usize) -> Self {
        Self { sink, chunk_size }
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Run the whole pipeline against the archive at (or inside) `data_path`.
    pub fn run(&mut self, data_path: &Path, ui: &mut impl Ui) -> Result<RunReport> {
        // DISCOVER: nothing below touches the sink until the archive and its
        // version metadata have been read successfully.
        ui.set_phase(Phase::Checking);
        let archive_path = find_archive(data_path)?;
        let version = read_version(&archive_path)?;
        ui.log(format!(
            "SDE version {} (released {})",
            version.version, version.release_date
        ));

        let mut archive = SdeArchive::open(&archive_path)?;
        let members = archive.list_members(".jsonl");

        // PLAN
        let plan = ImportPlan::build(&members);
        for member in &plan.unmapped {
            ui.warn(format!("no table mapping for {}, skipping", member));
        }

        ui.set_phase(Phase::Importing);
        let total = plan.files.len();
        let mut counts = Vec::with_capacity(total);

        for (index, planned) in plan.files.iter().enumerate() {
            let member = planned.source.member_name();
            ui.log(format!("[{}/{}] importing {}", index + 1, total, member));

            let count = self.import_file(&mut archive, planned, ui)?;
            counts.push((member.to_string(), count));
        }

        ui.set_phase(Phase::Complete);
        Ok(RunReport { version, counts })
    }

    /// STAGE → STREAM → LOAD for one planned file. Returns the number of
    /// destination rows produced (after explosion).
    fn import_file(
        &mut self,
        archive: &mut SdeArchive,
        planned: &PlannedFile,
        ui: &mut impl Ui,
    ) -> Result<u64> {
        let source = planned.source;
        let table = source.table();

        // Staged temp file lives exactly as long as this import step.
        let staged = archive.stage_member(source.physical_member())?;

        if planned.truncate {
            self.sink.truncate(table)?;
        }

        let reader = JsonlReader::new(
            BufReader::new(File::open(staged.path())?),
            source.member_name(),
        );

        let mut batch: Vec<Row> = Vec::with_capacity(self.chunk_size);
        let mut count: u64 = 0;

        for record in reader {
            let record = record?;
            for row in map_record(source, &record) {
                batch.push(row);
                count += 1;

                if batch.len() >= self.chunk_size {
                    self.flush(planned, &mut batch)?;
                    ui.set_progress(count, 0, source.member_name());
                }
            }
        }

        if !batch.is_empty() {
            self.flush(planned, &mut batch)?;
        }

        ui.log(format!("{}: {} rows", table, count));
        Ok(count)
    }

    fn flush(&mut self, planned: &PlannedFile, batch: &mut Vec<Row>) -> Result<()> {
        let table = planned.source.table();
        match planned.source.load_mode() {
            LoadMode::Replace => self.sink.insert_batch(table, batch)?,
            LoadMode::Merge { key } => self.sink.upsert_batch(table, batch, key)?,
        }
        batch.clear();
        Ok(())
    }
}
