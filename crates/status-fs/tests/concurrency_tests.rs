//! Concurrent access tests for write_atomic
//!
//! Writers are not serialized; the rename alone must keep every observed
//! file complete.

use status_fs::{NormalizedPath, WriteOptions, io};
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::tempdir;

#[test]
fn test_concurrent_writes_never_interleave() {
    let dir = tempdir().unwrap();
    let file_path = dir.path().join("services.json");
    let path = Arc::new(NormalizedPath::new(&file_path));

    let num_threads = 8;
    let writes_per_thread = 25;
    let barrier = Arc::new(Barrier::new(num_threads + 1));

    let writers: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let path = Arc::clone(&path);
            let barrier = Arc::clone(&barrier);

            thread::spawn(move || {
                barrier.wait();
                for i in 0..writes_per_thread {
                    let content = format!("[\"writer-{thread_id}-{i}\"]");
                    io::write_atomic(&path, content.as_bytes(), WriteOptions::default()).unwrap();
                }
            })
        })
        .collect();

    let reader = {
        let file_path = file_path.clone();
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for _ in 0..200 {
                if let Ok(content) = std::fs::read_to_string(&file_path) {
                    let parsed: Vec<String> = serde_json::from_str(&content)
                        .unwrap_or_else(|e| panic!("torn read {content:?}: {e}"));
                    assert_eq!(parsed.len(), 1);
                }
            }
        })
    };

    for handle in writers {
        handle.join().expect("Thread should not panic");
    }
    reader.join().expect("Reader should not panic");

    let content = std::fs::read_to_string(&file_path).unwrap();
    assert_eq!(content.matches("writer-").count(), 1);
}
