//! SCC catalog (the EPA `SCCDownload.csv` export) and keyword filtering.

use std::collections::BTreeSet;
use std::path::Path;

use ss_core::{Error, Result};

use crate::normalize_scc;

const LEVEL_COLUMNS: [&str; 4] = ["scc level one", "scc level two", "scc level three", "scc level four"];

/// One catalog row.
#[derive(Debug, Clone, PartialEq)]
pub struct SccEntry {
    /// Normalized SCC code.
    pub code: String,
    /// `data category` column, e.g. `Point`.
    pub data_category: String,
    /// `status` column, e.g. `Active`.
    pub status: String,
    /// Descriptions at levels one to four.
    pub levels: [String; 4],
}

impl SccEntry {
    /// Description at `level` (1-based).
    pub fn level(&self, level: u8) -> Option<&str> {
        let idx = usize::from(level).checked_sub(1)?;
        self.levels.get(idx).map(String::as_str)
    }

    fn is_active_point(&self) -> bool {
        self.data_category == "Point" && self.status == "Active"
    }
}

/// Parsed SCC catalog.
#[derive(Debug, Clone, Default)]
pub struct SccCatalog {
    /// Rows in file order.
    pub entries: Vec<SccEntry>,
}

impl SccCatalog {
    /// Number of catalog rows.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True for a catalog with no rows.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read the SCC catalog CSV.
pub fn read_scc_catalog(path: &Path) -> Result<SccCatalog> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).flexible(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let find = |name: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name));

    let required = ["SCC", "data category", "status"];
    let mut idx = Vec::with_capacity(required.len() + LEVEL_COLUMNS.len());
    let mut missing = Vec::new();
    for name in required.iter().chain(LEVEL_COLUMNS.iter()) {
        match find(name) {
            Some(i) => idx.push(i),
            None => missing.push(*name),
        }
    }
    if !missing.is_empty() {
        return Err(Error::Ingest(format!(
            "{}: SCC catalog is missing columns: {}",
            path.display(),
            missing.join(", ")
        )));
    }

    let get = |rec: &csv::StringRecord, i: usize| rec.get(idx[i]).unwrap_or("").trim().to_string();

    let mut entries = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let Some(code) = rec.get(idx[0]).and_then(normalize_scc) else {
            continue;
        };
        entries.push(SccEntry {
            code,
            data_category: get(&rec, 1),
            status: get(&rec, 2),
            levels: [get(&rec, 3), get(&rec, 4), get(&rec, 5), get(&rec, 6)],
        });
    }

    tracing::info!(path = %path.display(), entries = entries.len(), "SCC catalog loaded");
    Ok(SccCatalog { entries })
}

/// SCC codes of active point sources, optionally narrowed by keywords.
///
/// Keyword matching applies only when `keywords` is non-empty and `level`
/// is given; it is a case-insensitive substring match on that level's
/// description, true if any keyword matches.
pub fn filter_scc(catalog: &SccCatalog, keywords: &[String], level: Option<u8>) -> Result<BTreeSet<String>> {
    let keyword_level = match level {
        Some(l) if !keywords.is_empty() => {
            if !(1..=4).contains(&l) {
                return Err(Error::Validation(format!("SCC level must be between 1 and 4, got {l}")));
            }
            Some(l)
        }
        _ => None,
    };
    let needles: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

    let mut codes = BTreeSet::new();
    let mut matched_descriptions = BTreeSet::new();
    for entry in catalog.entries.iter().filter(|e| e.is_active_point()) {
        if let Some(l) = keyword_level {
            let desc = entry.level(l).unwrap_or("");
            let hay = desc.to_lowercase();
            if !needles.iter().any(|n| hay.contains(n.as_str())) {
                continue;
            }
            matched_descriptions.insert(desc);
        }
        codes.insert(entry.code.clone());
    }

    if let Some(l) = keyword_level {
        tracing::debug!(level = l, descriptions = ?matched_descriptions, "SCC keyword matches");
    }
    tracing::info!(codes = codes.len(), keywords = %keywords.join(","), "SCC filter applied");
    Ok(codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn tmp_file(name: &str, contents: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        p.push(format!("ss-scc-{}-{}-{}.csv", name, std::process::id(), nanos));
        std::fs::write(&p, contents).unwrap();
        p
    }

    const CATALOG: &str = "\
SCC,data category,status,scc level one,scc level two,scc level three,scc level four
10100101,Point,Active,External Combustion,Electric Generation,Anthracite Coal,Pulverized Coal
10200101,Point,Active,External Combustion,Industrial,Anthracite Coal,Traveling Grate
20100101,Point,Retired,Internal Combustion Engines,Electric Generation,Distillate Oil,Turbine
2104008100,Nonpoint,Active,Stationary Source Fuel Combustion,Residential,Wood,Fireplace
30500201,Point,Active,Industrial Processes,Mineral Products,Asphalt Concrete,Rotary Dryer
";

    fn catalog() -> SccCatalog {
        let path = tmp_file("catalog", CATALOG);
        let cat = read_scc_catalog(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        cat
    }

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn reads_all_rows() {
        let cat = catalog();
        assert_eq!(cat.len(), 5);
        assert_eq!(cat.entries[0].level(2), Some("Electric Generation"));
        assert_eq!(cat.entries[0].level(0), None);
        assert_eq!(cat.entries[0].level(5), None);
    }

    #[test]
    fn keeps_only_active_point_without_keywords() {
        let codes = filter_scc(&catalog(), &[], Some(1)).unwrap();
        let got: Vec<&str> = codes.iter().map(String::as_str).collect();
        assert_eq!(got, vec!["10100101", "10200101", "30500201"]);
    }

    #[test]
    fn keyword_match_is_case_insensitive_any() {
        let codes = filter_scc(&catalog(), &kw(&["ELECTRIC", "mineral"]), Some(2)).unwrap();
        let got: Vec<&str> = codes.iter().map(String::as_str).collect();
        assert_eq!(got, vec!["10100101", "30500201"]);
    }

    #[test]
    fn keywords_without_level_are_ignored() {
        let codes = filter_scc(&catalog(), &kw(&["electric"]), None).unwrap();
        assert_eq!(codes.len(), 3);
    }

    #[test]
    fn level_out_of_range_is_rejected() {
        let err = filter_scc(&catalog(), &kw(&["coal"]), Some(5)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn missing_level_columns_fail() {
        let path = tmp_file("short", "SCC,data category,status\n1,Point,Active\n");
        let err = read_scc_catalog(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(err.to_string().contains("scc level one"));
    }
}
