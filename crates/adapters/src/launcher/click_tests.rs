// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::os::unix::fs::PermissionsExt;
use std::time::Duration;
use tokio::sync::mpsc;

#[test]
fn legacy_apps_have_no_click_helper() {
    let dir = tempfile::tempdir().unwrap();
    let launcher = ClickLauncher::new(HelperFinder::new(dir.path()));
    let app = AppId::parse("_python3.4").unwrap();
    assert_eq!(launcher.helper_info(&app), None);
}

#[tokio::test]
async fn launch_sets_app_id_for_helper() {
    let dir = tempfile::tempdir().unwrap();
    let exe = dir.path().join("helper.sh");
    std::fs::write(&exe, "#!/bin/sh\nprintf '%s' \"$APP_ID\" > \"$2\"\n").unwrap();
    std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();

    let launcher = ClickLauncher::new(HelperFinder::new(dir.path()));
    let (tx, mut rx) = mpsc::unbounded_channel();
    launcher
        .install_observer(Arc::new(move |id| {
            let _ = tx.send(id);
        }))
        .unwrap();

    let output = dir.path().join("out");
    let helper = HelperInfo::new("com.example.test_test-helper_1", exe);
    let id = launcher
        .launch(&helper, &dir.path().join("in"), &output)
        .await
        .unwrap();

    let done = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(done, id);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "com.example.test_test-helper_1"
    );
}
