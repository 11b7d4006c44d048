//! Project fixtures and metadata server mocks shared by the integration tests

#![allow(dead_code)]

use std::path::Path;

use mcmodupdater::config::DevelopConfig;
use mockito::{Mock, ServerGuard};
use tempfile::TempDir;

pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// Creates a project directory from `(relative path, content)` pairs
pub fn create_project(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (relative, content) in files {
        write_file(temp_dir.path(), relative, content);
    }
    temp_dir
}

/// Points every metadata source at `server`
pub fn develop_config(server: &ServerGuard) -> DevelopConfig {
    let url = server.url();
    let mut config = DevelopConfig::default();
    config.architectury.api = format!("{}/architectury/versions", url);
    config.fabric.yarn = format!("{}/fabric/yarn", url);
    config.fabric.loader = format!("{}/fabric/loader", url);
    config.fabric.api = format!("{}/fabric/api/maven-metadata.xml", url);
    config.forge.api = format!("{}/forge/maven-metadata.xml", url);
    config.quilt.quilt_mappings = format!("{}/quilt/quilt-mappings", url);
    config.quilt.loader = format!("{}/quilt/loader", url);
    config.quilt.quilted_fabric_api = format!("{}/quilt/qfapi/maven-metadata.xml", url);
    config.neoforge.api = format!("{}/neoforge/maven-metadata.xml", url);
    config
}

pub fn maven_metadata(versions: &[&str]) -> String {
    let items: String = versions
        .iter()
        .map(|v| format!("<version>{}</version>", v))
        .collect();
    format!(
        "<metadata><groupId>test</groupId><artifactId>test</artifactId><versioning><versions>{}</versions><lastUpdated>20240101000000</lastUpdated></versioning></metadata>",
        items
    )
}

pub async fn mock_get(server: &mut ServerGuard, path: &str, body: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_body(body)
        .create_async()
        .await
}

/// Serves Fabric metadata where 1.20.1 has loader 0.15.0, yarn build 10 and API 0.90.0
pub async fn mock_fabric(server: &mut ServerGuard) -> Vec<Mock> {
    vec![
        mock_get(
            server,
            "/fabric/yarn",
            r#"[
                {"gameVersion": "1.20.2", "separator": "+build.", "build": 4, "maven": "net.fabricmc:yarn:1.20.2+build.4", "version": "1.20.2+build.4", "stable": true},
                {"gameVersion": "1.20.1", "separator": "+build.", "build": 10, "maven": "net.fabricmc:yarn:1.20.1+build.10", "version": "1.20.1+build.10", "stable": true}
            ]"#,
        )
        .await,
        mock_get(
            server,
            "/fabric/loader",
            r#"[
                {"separator": ".", "build": 25, "maven": "net.fabricmc:fabric-loader:0.15.0", "version": "0.15.0", "stable": true},
                {"separator": ".", "build": 24, "maven": "net.fabricmc:fabric-loader:0.14.24", "version": "0.14.24", "stable": true}
            ]"#,
        )
        .await,
        mock_get(
            server,
            "/fabric/api/maven-metadata.xml",
            &maven_metadata(&["0.89.0+1.20.1", "0.90.0+1.20.1", "0.91.0+1.20.2"]),
        )
        .await,
    ]
}

/// Serves Forge metadata where the latest 1.20.1 build is 47.2.0
pub async fn mock_forge(server: &mut ServerGuard) -> Mock {
    mock_get(
        server,
        "/forge/maven-metadata.xml",
        &maven_metadata(&["1.20.2-48.0.1", "1.20.1-47.2.0", "1.20.1-47.1.0"]),
    )
    .await
}

/// Serves Quilt metadata where 1.20.1 has loader 0.20.0, mappings build 24 and QFAPI 7.1.0
pub async fn mock_quilt(server: &mut ServerGuard) -> Vec<Mock> {
    vec![
        mock_get(
            server,
            "/quilt/quilt-mappings",
            r#"[
                {"gameVersion": "1.20.1", "separator": "+build.", "build": 24, "maven": "org.quiltmc:quilt-mappings:1.20.1+build.24", "version": "1.20.1+build.24", "stable": true},
                {"gameVersion": "1.20.1", "separator": "+build.", "build": 23, "maven": "org.quiltmc:quilt-mappings:1.20.1+build.23", "version": "1.20.1+build.23", "stable": true}
            ]"#,
        )
        .await,
        mock_get(
            server,
            "/quilt/loader",
            r#"[{"separator": ".", "build": 0, "maven": "org.quiltmc:quilt-loader:0.20.0", "version": "0.20.0", "stable": true}]"#,
        )
        .await,
        mock_get(
            server,
            "/quilt/qfapi/maven-metadata.xml",
            &maven_metadata(&["7.0.6+0.85.0-1.20.1", "7.1.0+0.86.0-1.20.1"]),
        )
        .await,
    ]
}
