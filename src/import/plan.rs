//! Import planning.
//!
//! The plan is computed once per run: the static file order intersected with
//! the members actually present in the archive. Truncate points are decided
//! here, not at load time — the first planned file contributing to each
//! destination table truncates it, which keeps the merge-table contract
//! intact if the file order ever changes.

use std::collections::HashSet;

use crate::mapping::SourceFile;
use crate::parser::version::VERSION_MEMBER;

/// One file scheduled for import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedFile {
    pub source: SourceFile,
    /// Truncate the destination table before this file's first batch.
    pub truncate: bool,
}

/// The ordered per-run schedule.
#[derive(Debug, Clone, Default)]
pub struct ImportPlan {
    pub files: Vec<PlannedFile>,
    /// Archive members no known source file reads. Skipped with a warning.
    pub unmapped: Vec<String>,
}

impl ImportPlan {
    pub fn build(members: &[String]) -> ImportPlan {
        let present: HashSet<&str> = members.iter().map(String::as_str).collect();

        let mut seen_tables: HashSet<&'static str> = HashSet::new();
        let files = SourceFile::ALL
            .iter()
            .filter(|file| present.contains(file.physical_member()))
            .map(|&source| PlannedFile {
                source,
                truncate: seen_tables.insert(source.table()),
            })
            .collect();

        let unmapped = members
            .iter()
            .filter(|member| {
                member.as_str() != VERSION_MEMBER && !SourceFile::claims_member(member)
            })
            .cloned()
            .collect();

        ImportPlan { files, unmapped }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_absent_files_are_skipped_silently() {
        let plan = ImportPlan::build(&members(&["categories.jsonl", "groups.jsonl"]));

        let sources: Vec<SourceFile> = plan.files.iter().map(|f| f.source).collect();
        assert_eq!(sources, vec![SourceFile::Categories, SourceFile::Groups]);
        assert!(plan.unmapped.is_empty());
    }

    #[test]
    fn test_merge_table_truncates_once_at_first_contributor() {
        let plan = ImportPlan::build(&members(&[
            "mapRegions.jsonl",
            "mapConstellations.jsonl",
            "mapSolarSystems.jsonl",
        ]));

        assert_eq!(plan.files.len(), 3);
        assert!(plan.files[0].truncate);
        assert!(!plan.files[1].truncate);
        assert!(!plan.files[2].truncate);
    }

    #[test]
    fn test_truncate_point_follows_plan_order_not_a_fixed_file() {
        // With regions absent, the first present merge contributor truncates.
        let plan = ImportPlan::build(&members(&[
            "mapConstellations.jsonl",
            "mapSolarSystems.jsonl",
        ]));

        assert_eq!(plan.files[0].source, SourceFile::MapConstellations);
        assert!(plan.files[0].truncate);
        assert!(!plan.files[1].truncate);
    }

    #[test]
    fn test_virtual_files_planned_when_base_member_present() {
        let plan = ImportPlan::build(&members(&["types.jsonl", "typeDogma.jsonl"]));

        let sources: Vec<SourceFile> = plan.files.iter().map(|f| f.source).collect();
        assert_eq!(
            sources,
            vec![
                SourceFile::TypesMeta,
                SourceFile::Types,
                SourceFile::TypeDogma,
                SourceFile::TypeDogmaEffects,
            ]
        );
        // Each pass feeds its own table; all four truncate their own target.
        assert!(plan.files.iter().all(|f| f.truncate));
    }

    #[test]
    fn test_unknown_members_collected_for_warning() {
        let plan = ImportPlan::build(&members(&[
            "categories.jsonl",
            "somethingNew.jsonl",
            "_sde.jsonl",
        ]));

        assert_eq!(plan.unmapped, vec!["somethingNew.jsonl"]);
        assert_eq!(plan.files.len(), 1);
    }
}
