use std::fs;

use chart_export_rs::scratch::ScratchArtifact;

#[test]
fn acquired_paths_never_collide() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = ScratchArtifact::acquire_in(dir.path(), "svg");
    let second = ScratchArtifact::acquire_in(dir.path(), "svg");

    assert_ne!(first.path(), second.path());
    assert_eq!(first.path().parent(), Some(dir.path()));
    assert_eq!(
        first.path().extension().and_then(|ext| ext.to_str()),
        Some("svg")
    );
}

#[test]
fn acquire_uses_platform_temp_dir() {
    let temp_dir = std::env::temp_dir();
    let artifact = ScratchArtifact::acquire("svg");
    assert_eq!(artifact.path().parent(), Some(temp_dir.as_path()));
}

#[test]
fn release_removes_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let artifact = ScratchArtifact::acquire_in(dir.path(), "svg");
    let path = artifact.path().to_path_buf();

    fs::write(&path, b"<svg/>").expect("write scratch");
    assert!(path.exists());

    artifact.release().expect("release");
    assert!(!path.exists());
}

#[test]
fn release_of_absent_file_is_not_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let artifact = ScratchArtifact::acquire_in(dir.path(), "svg");
    assert!(!artifact.path().exists());

    artifact.release().expect("releasing an absent file succeeds");
}

#[test]
fn drop_removes_the_file_without_explicit_release() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = {
        let artifact = ScratchArtifact::acquire_in(dir.path(), "svg");
        fs::write(artifact.path(), b"<svg/>").expect("write scratch");
        artifact.path().to_path_buf()
    };

    assert!(!path.exists(), "drop must remove the scratch file");
}

#[test]
fn scratch_directory_is_clean_after_lifecycle() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let artifact = ScratchArtifact::acquire_in(dir.path(), "svg");
        fs::write(artifact.path(), b"<svg/>").expect("write scratch");
    }

    let residual = fs::read_dir(dir.path()).expect("read scratch dir").count();
    assert_eq!(residual, 0);
}
