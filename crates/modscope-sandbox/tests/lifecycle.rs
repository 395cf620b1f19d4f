//! Lifecycle properties: deduplicated boot, readiness preconditions,
//! teardown semantics, image caching.

use std::sync::Arc;

use modscope_sandbox::{
    FilesystemImage, ImageSource, Sandbox, SandboxConfig, SandboxError, SandboxStatus,
};

fn inline_sandbox() -> Sandbox {
    let mut image = FilesystemImage::new();
    image.add_file("seed.txt", b"seeded".to_vec());
    Sandbox::new(SandboxConfig {
        image: ImageSource::Inline(Arc::new(image)),
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_initialize_boots_exactly_once() {
    let sandbox = Arc::new(inline_sandbox());

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let sandbox = Arc::clone(&sandbox);
        tasks.push(tokio::spawn(async move { sandbox.initialize().await }));
    }

    let mut handles = Vec::new();
    for task in tasks {
        handles.push(task.await.unwrap().unwrap());
    }

    // All callers resolve to the same live instance.
    for handle in &handles[1..] {
        assert!(Arc::ptr_eq(&handles[0], handle));
    }

    // The shared instance behaves identically for every caller: a write
    // through the manager is visible to a read-back.
    sandbox.write_file("probe.txt", b"hello").await.unwrap();
    let read = sandbox.read_file("probe.txt").await.unwrap();
    assert_eq!(read, b"hello");
}

#[tokio::test]
async fn operations_before_initialize_are_rejected() {
    let sandbox = inline_sandbox();

    assert!(matches!(
        sandbox.write_file("a.txt", b"x").await,
        Err(SandboxError::NotReady)
    ));
    assert!(matches!(
        sandbox.read_file("a.txt").await,
        Err(SandboxError::NotReady)
    ));
    assert!(matches!(
        sandbox.make_directory("d").await,
        Err(SandboxError::NotReady)
    ));
    assert!(matches!(
        sandbox.spawn("true", &[]).await,
        Err(SandboxError::NotReady)
    ));
}

#[tokio::test]
async fn mount_materializes_image_files() {
    let sandbox = inline_sandbox();
    sandbox.initialize().await.unwrap();

    let seeded = sandbox.read_file("seed.txt").await.unwrap();
    assert_eq!(seeded, b"seeded");
}

#[tokio::test]
async fn teardown_invalidates_and_allows_reboot() {
    let sandbox = inline_sandbox();
    sandbox.initialize().await.unwrap();
    sandbox.write_file("scratch.txt", b"x").await.unwrap();

    sandbox.teardown().await;
    assert_eq!(sandbox.status(), SandboxStatus::TornDown);
    assert!(matches!(
        sandbox.read_file("scratch.txt").await,
        Err(SandboxError::NotReady)
    ));

    // Teardown is idempotent.
    sandbox.teardown().await;

    // A new environment boots from the image, without the old scratch file.
    sandbox.initialize().await.unwrap();
    assert_eq!(sandbox.status(), SandboxStatus::Ready);
    assert!(sandbox.read_file("scratch.txt").await.is_err());
    assert_eq!(sandbox.read_file("seed.txt").await.unwrap(), b"seeded");
}

#[tokio::test]
async fn boot_failure_resets_for_retry() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("compiler.img");
    let sandbox = Sandbox::new(SandboxConfig {
        image: ImageSource::File(image_path.clone()),
    });

    // Image missing: boot fails and the manager resets.
    let err = sandbox.initialize().await.unwrap_err();
    assert!(matches!(err, SandboxError::Boot(_)));
    assert_eq!(sandbox.status(), SandboxStatus::Idle);

    // Provide the image; the retry succeeds.
    let mut image = FilesystemImage::new();
    image.add_file("seed.txt", b"v1".to_vec());
    std::fs::write(&image_path, image.to_bytes().unwrap()).unwrap();

    sandbox.initialize().await.unwrap();
    assert_eq!(sandbox.read_file("seed.txt").await.unwrap(), b"v1");
}

#[tokio::test]
async fn teardown_evicts_the_cached_image() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("compiler.img");

    let mut v1 = FilesystemImage::new();
    v1.add_file("seed.txt", b"v1".to_vec());
    std::fs::write(&image_path, v1.to_bytes().unwrap()).unwrap();

    let sandbox = Sandbox::new(SandboxConfig {
        image: ImageSource::File(image_path.clone()),
    });
    sandbox.initialize().await.unwrap();
    assert_eq!(sandbox.read_file("seed.txt").await.unwrap(), b"v1");

    sandbox.teardown().await;

    // The image changed on disk; the post-teardown boot re-fetches it.
    let mut v2 = FilesystemImage::new();
    v2.add_file("seed.txt", b"v2".to_vec());
    std::fs::write(&image_path, v2.to_bytes().unwrap()).unwrap();

    sandbox.initialize().await.unwrap();
    assert_eq!(sandbox.read_file("seed.txt").await.unwrap(), b"v2");
}

#[tokio::test]
async fn paths_cannot_escape_the_root() {
    let sandbox = inline_sandbox();
    sandbox.initialize().await.unwrap();

    assert!(matches!(
        sandbox.write_file("../outside.txt", b"x").await,
        Err(SandboxError::PathEscape(_))
    ));
    assert!(matches!(
        sandbox.read_file("/etc/hostname").await,
        Err(SandboxError::PathEscape(_))
    ));
}

#[cfg(unix)]
#[tokio::test]
async fn spawn_runs_in_the_sandbox_root() {
    let sandbox = inline_sandbox();
    sandbox.initialize().await.unwrap();
    sandbox.write_file("marker.txt", b"here").await.unwrap();

    let process = sandbox.spawn("cat", &["marker.txt"]).await.unwrap();
    let output = process.wait_with_output().await.unwrap();

    assert!(output.success());
    assert_eq!(output.stdout, "here");
}

#[cfg(unix)]
#[tokio::test]
async fn spawn_reports_nonzero_exit() {
    let sandbox = inline_sandbox();
    sandbox.initialize().await.unwrap();

    let process = sandbox
        .spawn("sh", &["-c", "echo boom >&2; exit 3"])
        .await
        .unwrap();
    let output = process.wait_with_output().await.unwrap();

    assert!(!output.success());
    assert_eq!(output.exit_code, Some(3));
    assert_eq!(output.combined().trim(), "boom");
}
