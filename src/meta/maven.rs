//! Maven `maven-metadata.xml` model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename = "metadata", rename_all = "camelCase")]
pub struct MavenMetadata {
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub artifact_id: String,
    #[serde(default)]
    pub versioning: MavenVersioning,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MavenVersioning {
    #[serde(default)]
    pub latest: String,
    #[serde(default)]
    pub release: String,
    #[serde(default)]
    pub versions: MavenVersions,
    #[serde(default)]
    pub last_updated: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MavenVersions {
    #[serde(default, rename = "version")]
    pub items: Vec<String>,
}

impl MavenMetadata {
    pub fn versions(&self) -> &[String] {
        &self.versioning.versions.items
    }

    /// Last version ending in `+<game_version>` or `-<game_version>`.
    ///
    /// The listing order decides, not version ordering.
    pub fn latest_with_game_suffix(&self, game_version: &str) -> Option<&str> {
        let plus = format!("+{}", game_version);
        let minus = format!("-{}", game_version);
        self.versions()
            .iter()
            .rfind(|v| v.ends_with(&plus) || v.ends_with(&minus))
            .map(String::as_str)
    }

    /// First version starting with `<game_version>-`
    pub fn latest_with_game_prefix(&self, game_version: &str) -> Option<&str> {
        let prefix = format!("{}-", game_version);
        self.versions()
            .iter()
            .find(|v| v.starts_with(&prefix))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn metadata(versions: &[&str]) -> MavenMetadata {
        MavenMetadata {
            versioning: MavenVersioning {
                versions: MavenVersions {
                    items: versions.iter().map(|v| v.to_string()).collect(),
                },
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn deserializes_maven_metadata_xml() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<metadata>
  <groupId>net.fabricmc.fabric-api</groupId>
  <artifactId>fabric-api</artifactId>
  <versioning>
    <latest>0.92.0+1.20.1</latest>
    <release>0.92.0+1.20.1</release>
    <versions>
      <version>0.91.0+1.20.1</version>
      <version>0.92.0+1.20.1</version>
    </versions>
    <lastUpdated>20231201120000</lastUpdated>
  </versioning>
</metadata>"#;

        let meta: MavenMetadata = quick_xml::de::from_str(xml).unwrap();

        assert_eq!(meta.artifact_id, "fabric-api");
        assert_eq!(meta.versions(), &["0.91.0+1.20.1", "0.92.0+1.20.1"]);
        assert_eq!(meta.versioning.last_updated, "20231201120000");
    }

    #[rstest]
    #[case(&["1.0+1.20", "1.1+1.20", "1.0+1.21"], "1.20", Some("1.1+1.20"))]
    #[case(&["0.5.0-1.20.1", "0.4.0+1.20.1"], "1.20.1", Some("0.4.0+1.20.1"))]
    #[case(&["1.0+1.20.1"], "1.20", None)]
    #[case(&[], "1.20", None)]
    fn latest_with_game_suffix_takes_last_match(
        #[case] versions: &[&str],
        #[case] game_version: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(
            metadata(versions).latest_with_game_suffix(game_version),
            expected
        );
    }

    #[rstest]
    #[case(&["1.20.1-47.2.0", "1.20.1-47.1.0", "1.20-46.0.14"], "1.20.1", Some("1.20.1-47.2.0"))]
    #[case(&["1.20.1-47.2.0", "1.20-46.0.14"], "1.20", Some("1.20-46.0.14"))]
    #[case(&["1.20.1-47.2.0"], "1.19", None)]
    fn latest_with_game_prefix_takes_first_match(
        #[case] versions: &[&str],
        #[case] game_version: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(
            metadata(versions).latest_with_game_prefix(game_version),
            expected
        );
    }
}
