//! Workspace refresh scenarios against real child processes.
//!
//! Each test builds a throwaway project, resolves it through the same
//! manifest lookup the CLI uses, and runs `sh -c` scripts in place of npm.
//! The scripts fail loudly when they find stale artifacts, so a green
//! command outcome also proves the cleanup ran first.

#![cfg(unix)]

use pretty_assertions::assert_eq;
use refresh_core::{
    ArtifactKind, CommandOutcome, ConfigResolver, FolderOutcome, NullObserver, Orchestrator,
    Phase, RecordingObserver, RefreshConfig, RefreshEvent, RunReport, SystemPackageManager,
};
use refresh_test_utils::TestWorkspace;
use std::fs;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Packs only when no archive is left over, installs only into a clean folder.
const STRICT_SCRIPTS: &str = r#"
[package_manager]
program = "sh"
pack = ["-c", "for f in *.tgz; do [ -e \"$f\" ] && exit 9; done; echo packed > lib-1.0.1.tgz"]
install = ["-c", """
[ -e node_modules ] && exit 7; \
[ -e package-lock.json ] && exit 8; \
mkdir -p node_modules/dep && echo '{}' > package-lock.json"""]
"#;

fn resolve(ws: &TestWorkspace, lists: &str) -> RefreshConfig {
    ws.write_manifest(&format!("{lists}\n{STRICT_SCRIPTS}"));
    ConfigResolver::new(ws.root())
        .with_exe_dir(None)
        .resolve()
        .expect("manifest should resolve")
}

async fn refresh(config: &RefreshConfig, observer: &mut RecordingObserver) -> RunReport {
    let npm = SystemPackageManager::new(config.package_manager.clone());
    Orchestrator::new(config, &npm).run(observer).await
}

fn command_outcome(report: &RunReport, folder: &str) -> CommandOutcome {
    let entry = report
        .folders
        .iter()
        .find(|r| r.folder == folder)
        .unwrap_or_else(|| panic!("{folder} missing from report"));
    match &entry.outcome {
        FolderOutcome::Refreshed { command, .. } => command.clone(),
        other => panic!("{folder} was not refreshed: {other:?}"),
    }
}

// =============================================================================
// Archive Publisher
// =============================================================================

#[tokio::test]
async fn old_archives_replaced_by_one_fresh_archive() {
    let ws = TestWorkspace::new();
    ws.shared_folder("shared", &["lib-1.0.0.tgz", "lib-0.9.0.tgz"]);
    fs::write(ws.path("shared/README.md"), "docs").unwrap();
    let config = resolve(&ws, "shared = [\"shared\"]");

    let mut observer = RecordingObserver::default();
    let report = refresh(&config, &mut observer).await;

    assert_eq!(command_outcome(&report, "shared"), CommandOutcome::Succeeded);
    assert_eq!(ws.files_with_extension("shared", "tgz"), vec!["lib-1.0.1.tgz"]);
    ws.assert_exists("shared/package.json");
    ws.assert_exists("shared/README.md");

    let removed = observer
        .events
        .iter()
        .filter(|e| matches!(e, RefreshEvent::Removed { kind: ArtifactKind::Archive, .. }))
        .count();
    assert_eq!(removed, 2);
}

#[tokio::test]
async fn shared_folders_pack_before_any_install() {
    let ws = TestWorkspace::new();
    ws.shared_folder("shared", &[]);
    ws.shared_folder("modules/day-book/reports/reports-shared", &[]);
    ws.target_folder("user/functions/user-core", true, true);
    let config = resolve(
        &ws,
        "shared = [\"shared\", \"modules/day-book/reports/reports-shared\"]\n\
         targets = [\"user/functions/user-core\"]",
    );

    let mut observer = RecordingObserver::default();
    refresh(&config, &mut observer).await;

    let commands: Vec<String> = observer
        .events
        .iter()
        .filter_map(|e| match e {
            RefreshEvent::CommandStarted { dir, .. } => dir.file_name().map(str::to_string),
            _ => None,
        })
        .collect();
    assert_eq!(commands, vec!["shared", "reports-shared", "user-core"]);
}

// =============================================================================
// Dependency Resynchronizer
// =============================================================================

#[tokio::test]
async fn clean_target_installs_without_deletions() {
    let ws = TestWorkspace::new();
    ws.target_folder("user/functions/user-core", false, false);
    let config = resolve(&ws, "targets = [\"user/functions/user-core\"]");

    let mut observer = RecordingObserver::default();
    let report = refresh(&config, &mut observer).await;

    assert_eq!(
        command_outcome(&report, "user/functions/user-core"),
        CommandOutcome::Succeeded
    );
    assert!(
        !observer
            .events
            .iter()
            .any(|e| matches!(e, RefreshEvent::Removed { .. }))
    );

    let nothing: Vec<ArtifactKind> = observer
        .events
        .iter()
        .filter_map(|e| match e {
            RefreshEvent::NothingToRemove { kind, .. } => Some(*kind),
            _ => None,
        })
        .collect();
    assert_eq!(nothing, vec![ArtifactKind::CacheDir, ArtifactKind::LockFile]);

    let install = observer
        .events
        .iter()
        .position(|e| matches!(e, RefreshEvent::CommandStarted { .. }))
        .expect("install should start");
    let last_check = observer
        .events
        .iter()
        .rposition(|e| matches!(e, RefreshEvent::NothingToRemove { .. }))
        .unwrap();
    assert!(last_check < install);

    ws.assert_exists("user/functions/user-core/node_modules/dep");
    ws.assert_exists("user/functions/user-core/package-lock.json");
}

#[tokio::test]
async fn stale_cache_and_lock_removed_before_install() {
    let ws = TestWorkspace::new();
    ws.target_folder("user/functions/user-core", true, true);
    let config = resolve(&ws, "targets = [\"user/functions/user-core\"]");

    let report = refresh(&config, &mut RecordingObserver::default()).await;

    assert_eq!(
        command_outcome(&report, "user/functions/user-core"),
        CommandOutcome::Succeeded
    );
    ws.assert_not_exists("user/functions/user-core/node_modules/stale-dep");
    ws.assert_exists("user/functions/user-core/node_modules/dep");
    let lock = fs::read_to_string(ws.path("user/functions/user-core/package-lock.json")).unwrap();
    assert_eq!(lock.trim(), "{}");
}

#[tokio::test]
async fn missing_target_is_skipped_without_side_effects() {
    let ws = TestWorkspace::new();
    ws.target_folder("user/functions/user-core", false, false);
    let config = resolve(
        &ws,
        "targets = [\"modules/day-book/metrics/functions/metrics-core\", \
         \"user/functions/user-core\"]",
    );

    let mut observer = RecordingObserver::default();
    let report = refresh(&config, &mut observer).await;

    assert_eq!(report.folders[0].outcome, FolderOutcome::Missing);
    ws.assert_not_exists("modules");

    let first_events: Vec<&RefreshEvent> = observer
        .events
        .iter()
        .skip_while(|e| !matches!(e, RefreshEvent::FolderMissing { .. }))
        .take(2)
        .collect();
    assert!(matches!(
        first_events[0],
        RefreshEvent::FolderMissing { phase: Phase::Install, .. }
    ));
    assert!(matches!(first_events[1], RefreshEvent::FolderStarted { .. }));
}

#[tokio::test]
async fn undeletable_cache_fails_only_its_folder() {
    use std::os::unix::fs::PermissionsExt;

    if refresh_test_utils::is_root() {
        eprintln!("Skipping test: running as root bypasses permission checks");
        return;
    }

    let ws = TestWorkspace::new();
    ws.target_folder("user/functions/user-core", true, true);
    ws.target_folder("workspace/functions/workspace-core", true, true);
    let locked = ws.path("user/functions/user-core/node_modules/stale-dep");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

    let config = resolve(
        &ws,
        "targets = [\"user/functions/user-core\", \"workspace/functions/workspace-core\"]",
    );
    let mut observer = RecordingObserver::default();
    let report = refresh(&config, &mut observer).await;

    let _ = fs::set_permissions(&locked, fs::Permissions::from_mode(0o755));

    assert!(matches!(report.folders[0].outcome, FolderOutcome::Failed { .. }));
    assert!(report.has_filesystem_failures());
    assert_eq!(
        command_outcome(&report, "workspace/functions/workspace-core"),
        CommandOutcome::Succeeded
    );
    // The failed folder's lock file is left alone and its install never ran
    ws.assert_exists("user/functions/user-core/package-lock.json");
    assert!(
        observer
            .events
            .iter()
            .any(|e| matches!(
                e,
                RefreshEvent::FolderFailed { folder, .. } if folder == "user/functions/user-core"
            ))
    );
}

#[tokio::test]
async fn undeletable_lock_file_fails_only_its_folder() {
    let ws = TestWorkspace::new();
    ws.target_folder("user/functions/user-core", true, false);
    ws.undeletable_lock_file("user/functions/user-core");
    ws.target_folder("workspace/functions/workspace-core", true, true);

    let config = resolve(
        &ws,
        "targets = [\"user/functions/user-core\", \"workspace/functions/workspace-core\"]",
    );
    let mut observer = RecordingObserver::default();
    let report = refresh(&config, &mut observer).await;

    assert!(matches!(report.folders[0].outcome, FolderOutcome::Failed { .. }));
    assert!(report.has_filesystem_failures());
    assert_eq!(
        command_outcome(&report, "workspace/functions/workspace-core"),
        CommandOutcome::Succeeded
    );
    // The install script would have recreated node_modules had it run
    ws.assert_not_exists("user/functions/user-core/node_modules");
    ws.assert_exists("user/functions/user-core/package-lock.json/nested");

    let started: Vec<String> = observer
        .events
        .iter()
        .filter_map(|e| match e {
            RefreshEvent::CommandStarted { dir, .. } => dir.file_name().map(str::to_string),
            _ => None,
        })
        .collect();
    assert_eq!(started, vec!["workspace-core"]);
}

// =============================================================================
// Whole runs
// =============================================================================

#[tokio::test]
async fn second_run_is_idempotent() {
    let ws = TestWorkspace::new();
    ws.shared_folder("shared", &["lib-0.1.0.tgz"]);
    ws.target_folder("user/functions/user-core", true, true);
    let config = resolve(
        &ws,
        "shared = [\"shared\"]\ntargets = [\"user/functions/user-core\"]",
    );
    let npm = SystemPackageManager::new(config.package_manager.clone());

    let first = Orchestrator::new(&config, &npm).run(&mut NullObserver).await;
    let first_status = Orchestrator::new(&config, &npm).status().unwrap();
    let second = Orchestrator::new(&config, &npm).run(&mut NullObserver).await;
    let second_status = Orchestrator::new(&config, &npm).status().unwrap();

    assert_eq!(first.summary(), second.summary());
    assert_eq!(second.summary().failed_commands, 0);
    assert_eq!(first_status, second_status);
    assert_eq!(ws.files_with_extension("shared", "tgz"), vec!["lib-1.0.1.tgz"]);
}

#[tokio::test]
async fn failing_command_does_not_stop_the_run() {
    let ws = TestWorkspace::new();
    ws.target_folder("broken", false, false);
    ws.target_folder("user/functions/user-core", false, false);
    fs::create_dir(ws.path("broken/node_modules")).unwrap();
    fs::write(ws.path("broken/broken.marker"), "").unwrap();
    ws.write_manifest(
        "targets = [\"broken\", \"user/functions/user-core\"]\n\n\
         [package_manager]\nprogram = \"sh\"\n\
         install = [\"-c\", \"[ -e broken.marker ] && exit 4; echo '{}' > package-lock.json\"]\n",
    );
    let config = ConfigResolver::new(ws.root())
        .with_exe_dir(None)
        .resolve()
        .unwrap();

    let report = refresh(&config, &mut RecordingObserver::default()).await;

    assert_eq!(
        command_outcome(&report, "broken"),
        CommandOutcome::Exited { code: Some(4) }
    );
    assert_eq!(
        command_outcome(&report, "user/functions/user-core"),
        CommandOutcome::Succeeded
    );
    assert!(!report.has_filesystem_failures());
    assert_eq!(report.summary().failed_commands, 1);
    ws.assert_not_exists("broken/node_modules");
    ws.assert_exists("user/functions/user-core/package-lock.json");
}
