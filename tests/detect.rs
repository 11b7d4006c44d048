//! Platform detection on real project trees

mod helper;

use mcmodupdater::config::DevelopConfig;
use mcmodupdater::develop::error::DetectError;
use mcmodupdater::develop::platforms::{
    PLATFORM_ARCHITECTURY, PLATFORM_FABRIC, PLATFORM_FORGE, PLATFORM_NEOFORGE, PLATFORM_QUILT,
};
use mcmodupdater::develop::tree::ProjectTree;
use mcmodupdater::develop::version_key::VersionKey;
use mcmodupdater::error::UpdateError;
use mcmodupdater::updater::McModUpdater;

use helper::create_project;

const FABRIC_PROPERTIES: &str = "\
minecraft_version=1.20.1
yarn_mappings=1.20.1+build.9
fabric_loader_version=0.14.21
mod_version=1.0.0
fabric_api_version=0.86.0+1.20.1
";

#[test]
fn fabric_project_is_detected_as_fabric() {
    let project = create_project(&[
        ("gradle.properties", FABRIC_PROPERTIES),
        ("src/main/resources/fabric.mod.json", "{}"),
    ]);

    let updater = McModUpdater::new(&DevelopConfig::default());
    let info = updater.load_tree(&ProjectTree::new(project.path())).unwrap();

    assert_eq!(info.platform.descriptor(), PLATFORM_FABRIC);
    assert_eq!(info.versions.len(), 5);
    assert_eq!(
        info.versions.get(&VersionKey::FabricLoaderVersion).map(String::as_str),
        Some("0.14.21")
    );
}

#[test]
fn later_platform_wins_when_several_markers_match() {
    let project = create_project(&[
        ("gradle.properties", "minecraft_version=1.20.1\nquilt_loader_version=0.19.2\n"),
        ("src/main/resources/fabric.mod.json", "{}"),
        ("src/main/resources/quilt.mod.json", "{}"),
        ("gradle/libs.versions.toml", "[versions]\nquilt_loader = \"0.19.2\"\n"),
    ]);

    let updater = McModUpdater::new(&DevelopConfig::default());
    let info = updater.load_tree(&ProjectTree::new(project.path())).unwrap();

    assert_eq!(info.platform.descriptor(), PLATFORM_QUILT);
}

#[test]
fn neoforge_project_is_not_mistaken_for_forge() {
    let project = create_project(&[
        (
            "gradle.properties",
            "minecraft_version=1.20.4\nneoforge_version=20.4.80-beta\n",
        ),
        ("src/main/resources/META-INF/neoforge.mods.toml", ""),
    ]);

    let updater = McModUpdater::new(&DevelopConfig::default());
    let info = updater.load_tree(&ProjectTree::new(project.path())).unwrap();

    assert_eq!(info.platform.descriptor(), PLATFORM_NEOFORGE);
}

#[test]
fn architectury_project_lists_only_present_sub_platforms() {
    let project = create_project(&[
        (
            "gradle.properties",
            "minecraft_version=1.20.1\narchitectury_version=9.1.12\nforge_version=1.20.1-47.1.0\nquilt_loader_version=0.20.0\n",
        ),
        ("settings.gradle", "include 'common', 'forge', 'quilt'"),
        ("common/build.gradle", ""),
        ("forge/src/main/resources/META-INF/mods.toml", ""),
        ("quilt/src/main/resources/quilt.mod.json", "{}"),
    ]);

    let updater = McModUpdater::new(&DevelopConfig::default());
    let info = updater.load_tree(&ProjectTree::new(project.path())).unwrap();

    assert_eq!(info.platform.descriptor(), PLATFORM_ARCHITECTURY);
    assert_eq!(
        info.platform.constituents(),
        vec![PLATFORM_FORGE, PLATFORM_QUILT]
    );
    assert!(info.versions.contains_key(&VersionKey::ArchitecturyVersion));
    assert!(info.versions.contains_key(&VersionKey::ForgeVersion));
    assert!(info.versions.contains_key(&VersionKey::QuiltLoaderVersion));
}

#[test]
fn architectury_project_without_loader_modules_fails() {
    let project = create_project(&[
        ("gradle.properties", "minecraft_version=1.20.1\n"),
        ("settings.gradle.kts", ""),
        ("common/build.gradle.kts", ""),
    ]);

    let updater = McModUpdater::new(&DevelopConfig::default());
    let result = updater.load_tree(&ProjectTree::new(project.path()));

    assert!(matches!(
        result,
        Err(UpdateError::Detect(DetectError::NoSubPlatforms))
    ));
}

#[test]
fn empty_project_is_not_detected() {
    let project = create_project(&[("gradle.properties", "minecraft_version=1.20.1\n")]);

    let updater = McModUpdater::new(&DevelopConfig::default());
    let result = updater.load_tree(&ProjectTree::new(project.path()));

    assert!(matches!(
        result,
        Err(UpdateError::Detect(DetectError::NoPlatform))
    ));
}

#[test]
fn detected_project_without_properties_file_fails_to_parse() {
    let project = create_project(&[("src/main/resources/fabric.mod.json", "{}")]);

    let updater = McModUpdater::new(&DevelopConfig::default());
    let result = updater.load_tree(&ProjectTree::new(project.path()));

    assert!(matches!(result, Err(UpdateError::Parse(_))));
}
