//! Reference directory verification and cache behaviour.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use nbi_standards::hash::sha256_hex;
use nbi_standards::{
    CodeEntry, CodeListCache, CodeMatch, CountyEntry, CsvReferenceSource,
    InMemoryReferenceSource, ReferenceSource, StandardsError, StateEntry,
};

const CODE_LISTS: &str = "List,Code,Description\nYesNo,Y,Yes\nYesNo,N,No\nMaterial,C01,Concrete\n";
const STATES: &str = "Code,Abbreviation,Name\n06,CA,California\n32,NV,Nevada\n";
const COUNTIES: &str = "State,Code,Name\n06,037,Los Angeles\n32,003,Clark\n";

fn write_reference_dir(dir: &Path, tamper: bool) {
    let files = [
        ("code_lists.csv", "code_lists", CODE_LISTS),
        ("states.csv", "states", STATES),
        ("counties.csv", "counties", COUNTIES),
    ];
    let mut manifest = String::from(
        "[manifest]\nschema = \"nbi-reference\"\nschema_version = 1\n\n\
         [pins]\nedition = \"test\"\nexported = \"2026-01-01\"\n",
    );
    for (path, role, contents) in files {
        std::fs::write(dir.join(path), contents).expect("write csv");
        manifest.push_str(&format!(
            "\n[[files]]\npath = \"{path}\"\nsha256 = \"{}\"\nrole = \"{role}\"\n",
            sha256_hex(contents.as_bytes())
        ));
    }
    std::fs::write(dir.join("manifest.toml"), manifest).expect("write manifest");
    if tamper {
        std::fs::write(dir.join("states.csv"), format!("{STATES}99,ZZ,Nowhere\n"))
            .expect("tamper");
    }
}

#[test]
fn verified_directory_loads_every_role() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_reference_dir(dir.path(), false);

    let source = CsvReferenceSource::open(dir.path()).expect("verify");
    let summary = source.summary();
    assert_eq!(summary.file_count, 3);
    assert_eq!(summary.code_list_count, 2);
    assert_eq!(summary.code_count, 3);
    assert_eq!(summary.state_count, 2);
    assert_eq!(summary.county_count, 2);

    let cache = CodeListCache::new(source);
    cache.preload(["YesNo", "Material"]).expect("preload");
    assert_eq!(cache.classify("YesNo", Some("y")), CodeMatch::Listed);
    assert!(cache.is_valid_state(Some("32")));
    assert!(cache.is_valid_county(Some("32"), Some("3")));
}

#[test]
fn tampered_file_fails_verification() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_reference_dir(dir.path(), true);

    let err = CsvReferenceSource::open(dir.path()).expect_err("tampered");
    assert!(matches!(err, StandardsError::Sha256Mismatch { .. }), "{err}");
}

#[test]
fn unlisted_file_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_reference_dir(dir.path(), false);
    std::fs::write(dir.path().join("extra.csv"), "x\n").expect("write");

    let err = CsvReferenceSource::open(dir.path()).expect_err("unlisted");
    assert!(matches!(err, StandardsError::InvalidManifest { .. }), "{err}");
}

/// Source that counts fetches so the cache's populate-once guarantee is
/// observable.
struct CountingSource {
    fetches: Arc<AtomicUsize>,
}

impl ReferenceSource for CountingSource {
    fn code_list(&self, name: &str) -> nbi_standards::error::Result<Vec<CodeEntry>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(std::time::Duration::from_millis(5));
        Ok(vec![CodeEntry {
            code: format!("{name}-1"),
            description: String::new(),
        }])
    }

    fn states(&self) -> nbi_standards::error::Result<Vec<StateEntry>> {
        Ok(Vec::new())
    }

    fn counties(&self) -> nbi_standards::error::Result<Vec<CountyEntry>> {
        Ok(Vec::new())
    }
}

#[test]
fn concurrent_first_access_fetches_once() {
    let fetches = Arc::new(AtomicUsize::new(0));
    let cache = Arc::new(CodeListCache::new(CountingSource {
        fetches: Arc::clone(&fetches),
    }));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || cache.is_valid_code("Owner", Some("Owner-1")))
        })
        .collect();
    for handle in handles {
        assert!(handle.join().expect("thread"));
    }
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}

#[test]
fn empty_state_list_fails_preload() {
    let cache = CodeListCache::new(InMemoryReferenceSource::new().with_codes("YesNo", &["Y"]));
    let err = cache.preload(["YesNo"]).expect_err("no states");
    assert!(matches!(err, StandardsError::EmptyStateList));
    assert!(!cache.is_valid_state(Some("06")));
}

#[test]
fn fallback_codes_are_split_from_listed_ones() {
    let cache =
        CodeListCache::new(InMemoryReferenceSource::new().with_codes("Material", &["C01", "S01"]));

    assert_eq!(cache.classify("Material", Some("C01|m12")), CodeMatch::Fallback);
    assert_eq!(cache.fallback_codes("Material", Some("C01|m12")), ["M12"]);
    assert_eq!(
        cache.fallback_codes("Material", Some("A013 | S01 | M12")),
        ["A013", "M12"]
    );
    assert!(cache.fallback_codes("Material", Some("C01|S01")).is_empty());
    assert!(cache.fallback_codes("Material", Some("C01|XYZ")).is_empty());
}
