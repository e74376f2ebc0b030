// tests/index_monotonic.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use proptest::prelude::*;

use buildwatch::fs::FileSystem;
use buildwatch::fs::mock::MockFileSystem;
use buildwatch::watch::{ChangeDetector, ModTimeIndex, WatchTarget};

const FILES: [&str; 4] = ["./a.go", "./b.go", "./pkg/c.go", "./pkg/deep/d.go"];

fn at(secs: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
}

proptest! {
    /// Whatever sequence of timestamps a path is observed with, the stored
    /// value is the running maximum and a change is reported exactly when
    /// the maximum grows.
    #[test]
    fn index_keeps_running_maximum(stamps in proptest::collection::vec(0u64..1_000, 1..40)) {
        let mut index = ModTimeIndex::new();
        let path = Path::new("x.go");
        let mut max: Option<u64> = None;

        for s in stamps {
            let changed = index.observe(path, at(s));
            let expected = max.is_none_or(|m| s > m);
            prop_assert_eq!(changed, expected);
            if expected {
                max = Some(s);
            }
            prop_assert_eq!(index.get(path), max.map(at));
        }
        prop_assert_eq!(index.len(), 1);
    }

    /// Random edits (forwards and backwards in time) against a mock tree:
    /// stored timestamps never decrease and the index never shrinks.
    #[test]
    fn detector_index_never_decreases(
        edits in proptest::collection::vec((0usize..FILES.len(), 0u64..500), 0..30)
    ) {
        let fs = MockFileSystem::new();
        for f in FILES {
            fs.add_file(f);
        }
        let shared: Arc<dyn FileSystem> = Arc::new(fs.clone());
        let target = WatchTarget::resolve(shared.as_ref(), ".").unwrap();
        let mut detector = ChangeDetector::new(shared, target, &["go"]);

        let first = detector.poll().unwrap();
        prop_assert_eq!(first.len(), FILES.len());

        for (file, secs) in edits {
            let before: Vec<Option<SystemTime>> =
                FILES.iter().map(|f| detector.index().get(Path::new(f))).collect();

            fs.set_modified(FILES[file], at(1_000_000 + secs)).unwrap();
            let report = detector.poll().unwrap();

            for (i, f) in FILES.iter().enumerate() {
                let now = detector.index().get(Path::new(f));
                prop_assert!(now >= before[i], "timestamp of {} went backwards", f);

                let reported = report.paths().contains(&PathBuf::from(f));
                prop_assert_eq!(reported, now > before[i]);
            }
            prop_assert_eq!(detector.index().len(), FILES.len());
        }
    }
}
