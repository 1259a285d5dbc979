// tests/integration_test.rs

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

// --- Test Setup Helper ---

struct TestApp {
    temp_dir: TempDir,
    bin_path: PathBuf,
}

impl TestApp {
    fn new() -> Self {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let bin_path = assert_cmd::cargo::cargo_bin("r50coach");
        Self { temp_dir, bin_path }
    }

    fn with_config(self, endpoint: &str, token: &str, on_server_error: &str) -> Self {
        let config_dir = self.path().join(".config").join("r50coach");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        let config_content = format!(
            r#"
            provider = "coze"
            on_server_error = "{on_server_error}"

            [coze]
            endpoint = "{endpoint}"
            token = "{token}"
            timeout_secs = 10

            [dify]
            endpoint = ""
            token = ""
            timeout_secs = 10
        "#
        );
        fs::write(config_dir.join("config.toml"), config_content)
            .expect("Failed to write test-specific config.toml");

        self
    }

    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    fn r50coach(&self) -> Command {
        let mut cmd = Command::new(&self.bin_path);
        cmd.current_dir(self.path());
        cmd.env("HOME", self.path());
        cmd.env("USERPROFILE", self.path());
        cmd.env("XDG_CONFIG_HOME", self.path().join(".config"));
        // 避免外部环境变量覆盖测试配置
        cmd.env_remove("COZE_API_URL");
        cmd.env_remove("COZE_API_TOKEN");
        cmd
    }
}

const GENERATE_FLAGS: [&str; 11] = [
    "generate",
    "--lens",
    "55mm",
    "--scene",
    "portrait-night",
    "--lighting",
    "golden",
    "--weather",
    "sunny",
    "--style",
    "japanese",
];

async fn mock_coze_rich(server: &mut mockito::ServerGuard) -> mockito::Mock {
    server
        .mock("POST", "/run")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "optimized_params": {
                "scene_analysis": {"summary": "弱光人像", "difficulty_level": "较难"},
                "camera_settings_r50": {
                    "shooting_mode": "M",
                    "aperture": "f/1.8",
                    "shutter_speed": "1/60",
                    "iso": 1234,
                    "white_balance": {"mode_or_kelvin": "3200K"}
                },
                "picture_style_settings": {"sharpness": 2, "contrast": -1, "saturation": -1, "color_tone": 1},
                "expert_advice": "优先保证安全快门"
            },
            "run_id": "run-itest"
        }"#,
        )
        .create_async()
        .await
}

// --- Tests ---

#[test]
fn test_init_command() {
    let app = TestApp::new();
    let mut cmd = app.r50coach();
    cmd.arg("init");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("已创建默认配置文件"));
}

#[tokio::test]
async fn test_generate_renders_remote_params_and_saves_history() {
    let mut server = mockito::Server::new_async().await;
    let mock = mock_coze_rich(&mut server).await;

    let app = TestApp::new().with_config(&format!("{}/run", server.url()), "test-token", "fail");
    let mut cmd = app.r50coach();
    cmd.args(GENERATE_FLAGS);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1234"))
        .stdout(predicate::str::contains("f/1.8"))
        .stdout(predicate::str::contains("优先保证安全快门"))
        .stdout(predicate::str::contains("已保存到历史记录"));

    mock.assert_async().await;

    let mut list_cmd = app.r50coach();
    list_cmd.arg("history");
    list_cmd
        .assert()
        .success()
        .stdout(predicate::str::contains("ISO 1234"));
}

#[test]
fn test_generate_without_token_fails_before_any_request() {
    // endpoint 指向不存在的服务，token 为空：必须在发请求前就报配置错误
    let app = TestApp::new().with_config("http://localhost:9/run", "", "fail");
    let mut cmd = app.r50coach();
    cmd.args(GENERATE_FLAGS);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("配置缺失"));
}

#[test]
fn test_custom_scene_without_text_is_rejected() {
    let app = TestApp::new().with_config("http://localhost:9/run", "test-token", "fail");
    let mut cmd = app.r50coach();
    cmd.args(["generate", "--scene", "custom"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("自定义场景"));
}

#[tokio::test]
async fn test_unauthorized_response_surfaces_the_status_code() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/run")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Invalid token"}"#)
        .create_async()
        .await;

    let app = TestApp::new().with_config(&format!("{}/run", server.url()), "bad-token", "fail");
    let mut cmd = app.r50coach();
    cmd.args(GENERATE_FLAGS);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("401"))
        .stderr(predicate::str::contains("Invalid token"));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_propagates_under_fail_policy() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/run")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let app = TestApp::new().with_config(&format!("{}/run", server.url()), "test-token", "fail");
    let mut cmd = app.r50coach();
    cmd.args(GENERATE_FLAGS);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("502"));

    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_degrades_to_mock_under_mock_policy() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/run")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let app = TestApp::new().with_config(&format!("{}/run", server.url()), "test-token", "mock");
    let mut cmd = app.r50coach();
    cmd.args(GENERATE_FLAGS);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("本地规则生成"))
        .stdout(predicate::str::contains("相机设置"));

    mock.assert_async().await;
}

#[test]
fn test_offline_generation_needs_no_configuration() {
    let app = TestApp::new();
    let mut cmd = app.r50coach();
    cmd.args(GENERATE_FLAGS);
    cmd.arg("--offline");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("离线模式"))
        .stdout(predicate::str::contains("f/1.8"));
}

#[test]
fn test_history_list_delete_and_clear() {
    let app = TestApp::new();

    // 离线生成两条记录
    for _ in 0..2 {
        let mut cmd = app.r50coach();
        cmd.args(GENERATE_FLAGS);
        cmd.arg("--offline");
        cmd.assert().success();
    }

    let mut list_cmd = app.r50coach();
    list_cmd.args(["history", "list"]);
    list_cmd
        .assert()
        .success()
        .stdout(predicate::str::contains("共 2 条历史记录"));

    // 不存在的 id 删除失败
    let mut delete_cmd = app.r50coach();
    delete_cmd.args(["history", "delete", "ffffffff"]);
    delete_cmd
        .assert()
        .failure()
        .stderr(predicate::str::contains("没有找到"));

    let mut clear_cmd = app.r50coach();
    clear_cmd.args(["history", "clear", "--yes"]);
    clear_cmd
        .assert()
        .success()
        .stdout(predicate::str::contains("历史记录已清空"));

    let mut empty_cmd = app.r50coach();
    empty_cmd.arg("history");
    empty_cmd
        .assert()
        .success()
        .stdout(predicate::str::contains("暂无历史记录"));
}

#[test]
fn test_generate_without_save_flag_keeps_history_empty() {
    let app = TestApp::new();
    let mut cmd = app.r50coach();
    cmd.args(GENERATE_FLAGS);
    cmd.args(["--offline", "--no-save"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("已保存到历史记录").not());

    let mut list_cmd = app.r50coach();
    list_cmd.arg("history");
    list_cmd
        .assert()
        .success()
        .stdout(predicate::str::contains("暂无历史记录"));
}
